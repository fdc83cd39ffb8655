//! Error types for the MySQL MCP server.
//!
//! Errors are split along the "abort the call" / "record and continue" line:
//! variants here abort a call (or the process, for configuration errors),
//! while per-statement failures are captured as `StatementOutcome::Error`
//! inside the batch result and never surface as a `ServerError`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("missing required configuration: {message}")]
    Configuration { message: String },

    #[error("connection failed: {message}")]
    Connection { message: String, suggestion: String },

    #[error("statement failed: {message}")]
    Statement {
        message: String,
        /// e.g. "42S02" for unknown table
        sql_state: Option<String>,
    },

    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl ServerError {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a connection error with a helpful suggestion.
    pub fn connection(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Create a statement error with optional SQLSTATE code.
    pub fn statement(message: impl Into<String>, sql_state: Option<String>) -> Self {
        Self::Statement {
            message: message.into(),
            sql_state,
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// True when the error aborts the whole call rather than one statement.
    pub fn aborts_call(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. } | Self::Connection { .. } | Self::Internal { .. }
        )
    }
}

/// Convert sqlx errors to ServerError.
///
/// Session-level failures (I/O, TLS, protocol, pool) become `Connection`
/// errors and abort the call; everything the server reports for one
/// statement becomes `Statement`.
impl From<sqlx::Error> for ServerError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Configuration(msg) => ServerError::connection(
                msg.to_string(),
                "Check MYSQL_HOST/MYSQL_PORT/MYSQL_USER/MYSQL_PASSWORD/MYSQL_DATABASE",
            ),
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.to_string());
                ServerError::statement(db_err.message().to_string(), code)
            }
            sqlx::Error::PoolTimedOut => ServerError::connection(
                "Timed out acquiring a connection from the pool",
                "Check that the MySQL server is reachable",
            ),
            sqlx::Error::PoolClosed => {
                ServerError::connection("Connection pool is closed", "Restart the server")
            }
            sqlx::Error::Io(io_err) => ServerError::connection(
                format!("I/O error: {}", io_err),
                "Check network connectivity and MySQL server status",
            ),
            sqlx::Error::Tls(tls_err) => ServerError::connection(
                format!("TLS error: {}", tls_err),
                "Verify TLS configuration and certificates",
            ),
            sqlx::Error::Protocol(msg) => ServerError::connection(
                format!("Protocol error: {}", msg),
                "Check MySQL server compatibility",
            ),
            sqlx::Error::RowNotFound => ServerError::statement("No rows returned", None),
            sqlx::Error::ColumnNotFound(col) => {
                ServerError::statement(format!("Column not found: {}", col), None)
            }
            sqlx::Error::ColumnIndexOutOfBounds { index, len } => ServerError::internal(format!(
                "Column index {} out of bounds (len: {})",
                index, len
            )),
            sqlx::Error::ColumnDecode { index, source } => {
                ServerError::internal(format!("Failed to decode column {}: {}", index, source))
            }
            sqlx::Error::Decode(source) => {
                ServerError::internal(format!("Decode error: {}", source))
            }
            sqlx::Error::WorkerCrashed => ServerError::internal("Database worker crashed"),
            _ => ServerError::internal(format!("Unknown database error: {}", err)),
        }
    }
}

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Convert ServerError to MCP ErrorData.
///
/// Only input validation surfaces as a protocol fault; everything that
/// happens past the tool router is embedded in the text response instead
/// (the caller always receives a text sequence). This conversion covers the
/// remaining pre-core paths and transport startup.
impl From<ServerError> for rmcp::ErrorData {
    fn from(err: ServerError) -> Self {
        match &err {
            ServerError::InvalidInput { .. } => {
                rmcp::ErrorData::invalid_params(err.to_string(), None)
            }
            ServerError::Statement { sql_state, .. } => {
                let data = sql_state
                    .as_ref()
                    .map(|code| serde_json::json!({ "sql_state": code }));
                rmcp::ErrorData::invalid_params(err.to_string(), data)
            }
            ServerError::Connection { suggestion, .. } => rmcp::ErrorData::internal_error(
                err.to_string(),
                Some(serde_json::json!({ "suggestion": suggestion })),
            ),
            ServerError::Configuration { .. } | ServerError::Internal { .. } => {
                rmcp::ErrorData::internal_error(err.to_string(), None)
            }
        }
    }
}
