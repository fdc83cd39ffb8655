//! Per-statement security gate.
//!
//! Every statement passes two checks before it reaches the driver: it must
//! not contain a semicolon anywhere (guards against smuggling a second
//! statement past the splitter via quoting tricks - coarse but conservative),
//! and its leading verb must be on the configured allow-list. A rejected
//! statement becomes an error outcome for that statement only; the rest of
//! the batch still runs.

use std::collections::BTreeSet;
use std::fmt;

/// Immutable set of lowercase SQL verbs permitted in execute_sql.
///
/// Built once at startup from configuration and passed into the executor;
/// runtime changes to the environment are not picked up.
#[derive(Debug, Clone)]
pub struct AllowList {
    verbs: BTreeSet<String>,
}

impl AllowList {
    /// Parse a comma-separated verb list. Entries are trimmed and
    /// lower-cased; empty entries are ignored.
    pub fn parse(raw: &str) -> Self {
        let verbs = raw
            .split(',')
            .map(|v| v.trim().to_lowercase())
            .filter(|v| !v.is_empty())
            .collect();
        Self { verbs }
    }

    pub fn contains(&self, verb: &str) -> bool {
        self.verbs.contains(verb)
    }

    /// Comma-joined verb list for rejection messages.
    pub fn describe(&self) -> String {
        self.verbs.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

impl Default for AllowList {
    /// The default allow-list when no configuration is supplied.
    fn default() -> Self {
        Self::parse("select,update,show")
    }
}

impl fmt::Display for AllowList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// Why a statement was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The statement text contains a semicolon.
    MultipleStatements,
    /// The leading verb is not on the allow-list.
    MethodNotAllowed { verb: String, allowed: String },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MultipleStatements => write!(f, "multiple statements forbidden"),
            Self::MethodNotAllowed { verb, allowed } => {
                write!(f, "method not allowed: {}, allowed: {}", verb, allowed)
            }
        }
    }
}

/// Check one trimmed statement against the gate.
pub fn check_statement(statement: &str, allow: &AllowList) -> Result<(), Rejection> {
    if statement.contains(';') {
        return Err(Rejection::MultipleStatements);
    }

    let verb = statement
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase();

    if !allow.contains(&verb) {
        return Err(Rejection::MethodNotAllowed {
            verb,
            allowed: allow.describe(),
        });
    }

    Ok(())
}
