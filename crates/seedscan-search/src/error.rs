//! Errors the scoring driver itself can raise. Most failure modes in this
//! pipeline are caught earlier (parsing in `seedscan-io`, validation in
//! `seedscan-filter::validate`); by the time a search runs, the only things
//! left to report are malformed ranges.

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("seed range start {start} + count {count} overflows the seed space (size {space_size})")]
    RangeOverflow { start: u64, count: u64, space_size: u64 },
    #[error("a query compiled with no must, must_not, or should clauses cannot be searched")]
    EmptyFilterTree,
}
