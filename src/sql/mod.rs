//! Multi-statement SQL execution pipeline.
//!
//! Raw query text flows through statement splitting, the per-statement
//! security gate, sequential execution on a single connection, and finally
//! plain-text rendering:
//! - `splitter`: semicolon-based statement boundary detection
//! - `gate`: allow-list and multi-statement checks
//! - `executor`: one connection per call, commit-after-mutation semantics
//! - `outcome`: per-statement result model
//! - `format`: deterministic text rendering

pub mod executor;
pub mod format;
pub mod gate;
pub mod outcome;
pub mod splitter;

pub use executor::SqlExecutor;
pub use format::{OUTCOME_SEPARATOR, format_outcome, format_outcomes};
pub use gate::{AllowList, Rejection, check_statement};
pub use outcome::StatementOutcome;
pub use splitter::split_statements;
