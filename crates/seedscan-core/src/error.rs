//! Shared error domain for `seedscan-core`.
//!
//! Parsing/domain errors only; validation-report aggregation (which collects
//! many of these at once) lives in `seedscan-filter`.

use alloc::string::String;

/// Errors raised while parsing or constructing core domain values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("unknown clause type: {0}")]
    InvalidType(String),
    #[error("antes set must be non-empty")]
    InvalidAntes,
    #[error("ante {0} is out of range (0..39)")]
    AnteOutOfRange(u8),
    #[error("slot index {0} is out of range (0..{})", crate::clause::MAX_SLOTS)]
    SlotOutOfRange(u8),
    #[error("unknown {field}: {value}")]
    InvalidEnumValue { field: &'static str, value: String },
    #[error("AnyLegendary wildcard is not valid on a soul joker clause")]
    AnyLegendaryOnSoulJoker,
    #[error("{0}")]
    Domain(&'static str),
}
