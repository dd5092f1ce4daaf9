//! Turns a parsed [`seedscan_core::Query`] into something a search worker
//! can run per-seed: validate it, compile it into a [`FilterTree`], then
//! drive `prefilter_lane`/`verify_lane` across lanes.

mod build;
mod category;
mod filters;
mod node;
mod validate;

pub use build::build_filter_tree;
pub use category::{build_leaf, group_by_category};
pub use node::{ClauseEvaluator, FilterNode, FilterTree};
pub use validate::{validate, ClausePath, Severity, ValidationIssue, ValidationReport};
