//! Query-file loading and canonical JSON helpers for the seed search engine.
//!
//! No game-rule knowledge lives here: this crate only turns a query JSON
//! file into a [`seedscan_core::Query`], and turns result records back into
//! canonical bytes for hashing or stable comparison in tests.

#![forbid(unsafe_code)]

use std::fs;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

pub mod canonical_json;
pub mod wire;

pub use wire::{RawClause, RawQuery, RawQueryMeta};

/// Reject query files larger than this outright; a legitimate query is at
/// most a few hundred clauses.
const MAX_QUERY_BYTES: u64 = 4 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum QueryIoError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("query file exceeds the 4 MiB limit")]
    TooLarge,
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("invalid {field}: {source}")]
    Clause {
        field: &'static str,
        #[source]
        source: seedscan_core::CoreError,
    },
    #[error("a composite clause must set exactly one of `and`, `or`, `not`")]
    AmbiguousComposite,
    #[error("a composite clause's child list must not be empty")]
    EmptyComposite,
}

/// Load and parse a query JSON file, but do not run the clause-normalizer or
/// cross-clause validator (that's `seedscan-filter`'s job).
pub fn load_query_file(path: &Path) -> Result<seedscan_core::Query, QueryIoError> {
    let bytes = read_bounded(path)?;
    let raw: wire::RawQuery = serde_json::from_slice(&bytes)?;
    raw.into_query()
}

/// Parse a query already in memory, e.g. one embedded in a test fixture.
pub fn parse_query_str(json: &str) -> Result<seedscan_core::Query, QueryIoError> {
    let raw: wire::RawQuery = serde_json::from_str(json)?;
    raw.into_query()
}

fn read_bounded(path: &Path) -> Result<Vec<u8>, QueryIoError> {
    let mut f = fs::File::open(path).map_err(|source| QueryIoError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let mut buf = Vec::new();
    f.by_ref()
        .take(MAX_QUERY_BYTES + 1)
        .read_to_end(&mut buf)
        .map_err(|source| QueryIoError::Io {
            path: path.display().to_string(),
            source,
        })?;
    if buf.len() as u64 > MAX_QUERY_BYTES {
        return Err(QueryIoError::TooLarge);
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_query() {
        let q = parse_query_str(
            r#"{
                "must": [{"type": "joker", "value": "Blueprint", "antes": [1, 2]}],
                "deck": "red",
                "stake": "white"
            }"#,
        )
        .unwrap();
        assert_eq!(q.must.len(), 1);
        assert_eq!(q.deck, seedscan_core::Deck::Red);
    }

    #[test]
    fn rejects_composite_with_both_and_and_or() {
        let err = parse_query_str(
            r#"{
                "must": [{
                    "and": [{"type": "joker", "value": "Blueprint"}],
                    "or": [{"type": "joker", "value": "Mime"}]
                }]
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, QueryIoError::AmbiguousComposite));
    }

    #[test]
    fn rejects_unknown_clause_type() {
        let err = parse_query_str(r#"{"must": [{"type": "spaceship", "value": "x"}]}"#).unwrap_err();
        assert!(matches!(err, QueryIoError::Clause { field: "type", .. }));
    }

    #[test]
    fn rejects_missing_value_field() {
        let err = parse_query_str(r#"{"must": [{"type": "joker"}]}"#).unwrap_err();
        assert!(matches!(err, QueryIoError::MissingField("value")));
    }

    #[test]
    fn should_clause_score_defaults_to_one_but_can_be_overridden() {
        let q = parse_query_str(
            r#"{
                "must": [{"type": "joker", "value": "Blueprint"}],
                "should": [
                    {"type": "joker", "value": "Brainstorm", "score": 5},
                    {"type": "tarot", "value": "TheFool"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(q.should[0].score, 5);
        assert_eq!(q.should[1].score, 1);
    }

    #[test]
    fn loads_a_real_file_from_disk() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        use std::io::Write;
        write!(f, r#"{{"must": [{{"type": "joker", "value": "Blueprint"}}]}}"#).unwrap();
        let q = load_query_file(f.path()).unwrap();
        assert_eq!(q.must.len(), 1);
    }

    #[test]
    fn rejects_a_file_over_the_byte_cap() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        use std::io::Write;
        let padding = "x".repeat(MAX_QUERY_BYTES as usize + 1);
        write!(f, r#"{{"must": [{{"type": "joker", "value": "{padding}"}}]}}"#).unwrap();
        let err = load_query_file(f.path()).unwrap_err();
        assert!(matches!(err, QueryIoError::TooLarge));
    }
}
