//! The record emitted for every seed that clears must/must_not and the
//! current cutoff.

use seedscan_core::Seed;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub seed: Seed,
    pub score: u64,
    /// One entry per `should` clause, in query order.
    pub per_clause_counts: Vec<u32>,
}
