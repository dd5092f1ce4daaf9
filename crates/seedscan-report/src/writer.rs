//! The `ResultWriter` capability every output format implements: one method
//! to append a record, one to flush. `seedscan-cli`'s single writer thread
//! owns exactly one of these regardless of how many worker threads are
//! feeding it over the crossbeam channel.

use seedscan_search::SearchResult;

use crate::error::ReportError;

pub trait ResultWriter {
    fn write_result(&mut self, result: &SearchResult) -> Result<(), ReportError>;
    fn flush(&mut self) -> Result<(), ReportError>;
}
