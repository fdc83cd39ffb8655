//! Batch statement execution against a single connection.
//!
//! One top-level call acquires one pooled connection and runs all of its
//! statements on it in order, inside one implicit transaction scope
//! (autocommit disabled for the session). Commits happen only after
//! statements that produced no result set; a committed mutation is never
//! undone by a later failure. Statement-level failures of any kind are
//! recorded as error outcomes and the batch continues; only a failure to
//! obtain a working session aborts the whole call.

use crate::db::row_values;
use crate::error::{ServerError, ServerResult};
use crate::sql::format::format_outcomes;
use crate::sql::gate::{AllowList, check_statement};
use crate::sql::outcome::StatementOutcome;
use crate::sql::splitter::split_statements;
use sqlx::mysql::{MySqlConnection, MySqlPool};
use sqlx::{Column, Executor, Statement};
use tracing::{debug, warn};

/// Executes multi-statement batches with per-statement failure isolation.
pub struct SqlExecutor {
    pool: MySqlPool,
    allow_list: AllowList,
}

impl SqlExecutor {
    pub fn new(pool: MySqlPool, allow_list: AllowList) -> Self {
        Self { pool, allow_list }
    }

    /// Run a batch and render it as text, folding call-aborting errors into
    /// the response. The caller always receives a text body, never a
    /// protocol-level fault.
    pub async fn execute_rendered(&self, query: &str) -> String {
        match self.execute_batch(query).await {
            Ok(outcomes) => format_outcomes(&outcomes),
            Err(err) => {
                warn!(error = %err, "Query aborted before statement execution");
                format!("error executing query: {}", err)
            }
        }
    }

    /// Execute every statement of `query` in order on one connection.
    ///
    /// Returns one outcome per non-empty statement, preserving input order.
    /// `Err` is reserved for failures before any statement starts
    /// (connection acquisition or session setup); everything after that is
    /// captured per statement inside the returned sequence.
    pub async fn execute_batch(&self, query: &str) -> ServerResult<Vec<StatementOutcome>> {
        let statements = split_statements(query);
        if statements.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.pool.acquire().await?;
        // One implicit transaction scope for the whole call; commits are
        // issued explicitly after mutations only.
        (&mut *conn).execute("SET autocommit = 0").await?;

        let mut outcomes = Vec::with_capacity(statements.len());
        for statement in &statements {
            if let Err(rejection) = check_statement(statement, &self.allow_list) {
                warn!(statement = %statement, reason = %rejection, "Statement rejected");
                outcomes.push(StatementOutcome::error(statement, rejection.to_string()));
                continue;
            }

            match self.run_statement(&mut conn, statement).await {
                Ok(outcome) => outcomes.push(outcome),
                Err(err) => {
                    warn!(statement = %statement, error = %err, "Statement failed");
                    outcomes.push(StatementOutcome::error(statement, error_text(err)));
                }
            }
        }

        // Discard uncommitted work and restore autocommit before the
        // connection goes back to the pool. Best effort: the outcomes are
        // already decided and the pool health-checks connections on reuse.
        let _ = (&mut *conn).execute("ROLLBACK").await;
        let _ = (&mut *conn).execute("SET autocommit = 1").await;

        Ok(outcomes)
    }

    /// Execute one gated statement and classify its outcome.
    async fn run_statement(
        &self,
        conn: &mut MySqlConnection,
        statement: &str,
    ) -> ServerResult<StatementOutcome> {
        // Preparing first yields column metadata even for zero-row results,
        // which is what distinguishes SELECT/SHOW/EXPLAIN-shaped statements
        // from mutations.
        let prepared = (&mut *conn).prepare(statement).await?;

        if prepared.columns().is_empty() {
            let done = (&mut *conn).execute(statement).await?;
            (&mut *conn).execute("COMMIT").await?;
            debug!(
                statement = %statement,
                rows_affected = done.rows_affected(),
                "Mutation committed"
            );
            return Ok(StatementOutcome::Mutation {
                rows_affected: done.rows_affected(),
            });
        }

        let columns: Vec<String> = prepared
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        let fetched = (&mut *conn).fetch_all(statement).await?;
        let rows: Vec<Vec<Option<String>>> = fetched.iter().map(row_values).collect();

        debug!(
            statement = %statement,
            columns = columns.len(),
            rows = rows.len(),
            "Result set fetched"
        );

        Ok(StatementOutcome::ResultSet { columns, rows })
    }
}

/// Error text for a per-statement failure outcome.
fn error_text(err: ServerError) -> String {
    match err {
        ServerError::Statement {
            message,
            sql_state: Some(code),
        } => format!("{} (SQLSTATE: {})", message, code),
        ServerError::Statement {
            message,
            sql_state: None,
        } => message,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_text_includes_sql_state() {
        let err = ServerError::statement("Unknown table 'x'", Some("42S02".to_string()));
        assert_eq!(error_text(err), "Unknown table 'x' (SQLSTATE: 42S02)");
    }

    #[test]
    fn test_error_text_plain_message() {
        let err = ServerError::statement("Deadlock found", None);
        assert_eq!(error_text(err), "Deadlock found");
    }

    #[test]
    fn test_error_text_connection_variant_keeps_prefix() {
        let err = ServerError::connection("broken pipe", "reconnect");
        assert!(error_text(err).contains("connection failed"));
    }
}
