//! Per-statement execution outcomes.

/// The result of executing (or refusing) one statement.
///
/// Exactly one outcome is produced per statement, and the batch preserves
/// statement order. Error outcomes cover both security rejections and
/// driver-level failures; they do not abort the batch.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementOutcome {
    /// The statement described a result set (SELECT/SHOW/EXPLAIN-shaped).
    ResultSet {
        columns: Vec<String>,
        /// Row-major values; `None` is SQL NULL.
        rows: Vec<Vec<Option<String>>>,
    },
    /// The statement mutated data and was committed.
    Mutation { rows_affected: u64 },
    /// The statement was rejected or failed; the batch continued.
    Error { statement: String, message: String },
}

impl StatementOutcome {
    pub fn error(statement: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            statement: statement.into(),
            message: message.into(),
        }
    }
}
