//! Hand-rolled CSV output. Every field here is either an 8-character
//! alphanumeric seed or a plain integer, so there is nothing to quote or
//! escape — a `csv` crate dependency would buy nothing a `write!` doesn't
//! already give us.

use std::io::Write;

use seedscan_search::SearchResult;

use crate::error::ReportError;
use crate::writer::ResultWriter;

pub struct CsvResultWriter<W: Write> {
    out: W,
    clause_count: usize,
    header_written: bool,
}

impl<W: Write> CsvResultWriter<W> {
    /// `clause_count` is the compiled query's `should` list length, fixed
    /// for the lifetime of one search — every row has exactly this many
    /// `clause_N` columns.
    pub fn new(out: W, clause_count: usize) -> Self {
        CsvResultWriter { out, clause_count, header_written: false }
    }

    fn write_header(&mut self) -> Result<(), ReportError> {
        write!(self.out, "seed,score")?;
        for i in 0..self.clause_count {
            write!(self.out, ",clause_{i}")?;
        }
        writeln!(self.out)?;
        Ok(())
    }
}

impl<W: Write> ResultWriter for CsvResultWriter<W> {
    fn write_result(&mut self, result: &SearchResult) -> Result<(), ReportError> {
        if !self.header_written {
            self.write_header()?;
            self.header_written = true;
        }
        write!(self.out, "{},{}", result.seed, result.score)?;
        for count in &result.per_clause_counts {
            write!(self.out, ",{count}")?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ReportError> {
        self.out.flush()?;
        Ok(())
    }
}
