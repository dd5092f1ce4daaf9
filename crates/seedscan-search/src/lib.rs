//! The vectorized scoring driver: advances seed batches through a compiled
//! filter tree and scores survivors.
//!
//! This crate is deliberately I/O-free. It never opens a file, never knows
//! about CSV or JSON, and never decides how many threads to run — it just
//! turns `(source, tree, range, session)` into a stream of [`SearchResult`]
//! values via a caller-supplied callback. `seedscan-cli` is what wires
//! threads, a result sink, and the terminal output format around it.

mod driver;
mod error;
mod result;
mod session;

pub use driver::search_range;
pub use error::SearchError;
pub use result::SearchResult;
pub use session::SearchSession;
