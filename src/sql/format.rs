//! Plain-text rendering of outcome sequences.
//!
//! The output shape is a fixed external contract: comma-joined header and
//! rows with NULL rendered as the literal token `NULL`, entries joined by a
//! `---` line. Values are never quoted or escaped for embedded commas or
//! newlines - this is deliberately a plain CSV-like format, not RFC 4180,
//! and must stay that way for compatibility.

use crate::sql::StatementOutcome;

/// Separator line placed between outcome renderings.
pub const OUTCOME_SEPARATOR: &str = "\n---\n";

/// Render one outcome.
pub fn format_outcome(outcome: &StatementOutcome) -> String {
    match outcome {
        StatementOutcome::ResultSet { columns, rows } => {
            let mut lines = Vec::with_capacity(rows.len() + 1);
            lines.push(columns.join(","));
            for row in rows {
                let rendered: Vec<&str> = row
                    .iter()
                    .map(|v| v.as_deref().unwrap_or("NULL"))
                    .collect();
                lines.push(rendered.join(","));
            }
            lines.join("\n")
        }
        StatementOutcome::Mutation { rows_affected } => {
            format!("execution succeeded. Rows affected: {}", rows_affected)
        }
        StatementOutcome::Error { statement, message } => {
            format!("error executing statement '{}': {}", statement, message)
        }
    }
}

/// Render the full ordered outcome sequence as one string.
///
/// An empty sequence (no non-empty statements in the input) renders as the
/// empty string.
pub fn format_outcomes(outcomes: &[StatementOutcome]) -> String {
    outcomes
        .iter()
        .map(format_outcome)
        .collect::<Vec<_>>()
        .join(OUTCOME_SEPARATOR)
}
