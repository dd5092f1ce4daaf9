//! Newline-delimited JSON output: one canonical-bytes object per result,
//! so a single writer thread can stream results as they arrive instead of
//! buffering the whole run into one JSON array.

use std::io::Write;

use seedscan_search::SearchResult;

use crate::error::ReportError;
use crate::writer::ResultWriter;

pub struct JsonResultWriter<W: Write> {
    out: W,
}

impl<W: Write> JsonResultWriter<W> {
    pub fn new(out: W) -> Self {
        JsonResultWriter { out }
    }
}

impl<W: Write> ResultWriter for JsonResultWriter<W> {
    fn write_result(&mut self, result: &SearchResult) -> Result<(), ReportError> {
        let value = serde_json::json!({
            "seed": result.seed.as_str(),
            "score": result.score,
            "per_clause_counts": result.per_clause_counts,
        });
        let bytes = seedscan_io::canonical_json::to_canonical_bytes(&value);
        self.out.write_all(&bytes)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ReportError> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedscan_core::Seed;

    #[test]
    fn each_line_is_independently_valid_json() {
        let mut buf = Vec::new();
        let mut w = JsonResultWriter::new(&mut buf);
        w.write_result(&SearchResult { seed: Seed::parse("AAAAAAA2").unwrap(), score: 10, per_clause_counts: vec![2] })
            .unwrap();
        w.write_result(&SearchResult { seed: Seed::parse("AAAAAAA3").unwrap(), score: 0, per_clause_counts: vec![0] })
            .unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["seed"], "AAAAAAA2");
        assert_eq!(first["score"], 10);
        assert_eq!(first["per_clause_counts"], serde_json::json!([2]));
    }

    #[test]
    fn keys_are_written_in_sorted_canonical_order() {
        let mut buf = Vec::new();
        let mut w = JsonResultWriter::new(&mut buf);
        w.write_result(&SearchResult { seed: Seed::parse("AAAAAAA2").unwrap(), score: 1, per_clause_counts: vec![] })
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.trim_end(), r#"{"per_clause_counts":[],"score":1,"seed":"AAAAAAA2"}"#);
    }
}
