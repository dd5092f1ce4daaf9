//! Result-sink adapters: turn a stream of [`seedscan_search::SearchResult`]
//! values into CSV or newline-delimited JSON on whatever `Write` the caller
//! hands over. No threading, no file paths — `seedscan-cli` owns those.

#![forbid(unsafe_code)]

mod csv;
mod error;
mod json;
mod writer;

pub use crate::csv::CsvResultWriter;
pub use error::ReportError;
pub use json::JsonResultWriter;
pub use writer::ResultWriter;
