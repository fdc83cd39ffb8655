//! Configuration handling for the MySQL MCP server.
//!
//! Configuration comes from CLI arguments and environment variables. The
//! connection parameters and the statement allow-list are read once at
//! startup into immutable values that get passed into the executor; nothing
//! in the core reads the environment after that.

use crate::error::{ServerError, ServerResult};
use crate::sql::AllowList;
use clap::{Parser, ValueEnum};

pub const DEFAULT_MYSQL_HOST: &str = "localhost";
pub const DEFAULT_MYSQL_PORT: u16 = 3306;
pub const DEFAULT_ALLOW_METHODS: &str = "select,update,show";

pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";
pub const DEFAULT_HTTP_PORT: u16 = 9003;
pub const DEFAULT_MCP_ENDPOINT: &str = "/";

/// Transport mode for the MCP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TransportMode {
    /// Standard input/output (for CLI integration)
    #[default]
    Stdio,
    /// Streamable HTTP (for web clients)
    Http,
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stdio => write!(f, "stdio"),
            Self::Http => write!(f, "http"),
        }
    }
}

/// MySQL connection parameters, opaque to the core beyond being handed to
/// the driver. Validated once via [`Config::connection_config`].
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    /// Sensitive - not logged.
    pub password: String,
    pub database: String,
}

/// Configuration for the MySQL MCP server.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mysql-mcp-server",
    about = "MCP server for MySQL operations - SQL execution, schema lookup, and lock inspection",
    version,
    author
)]
pub struct Config {
    /// MySQL server host
    #[arg(long, default_value = DEFAULT_MYSQL_HOST, env = "MYSQL_HOST")]
    pub host: String,

    /// MySQL server port
    #[arg(long, default_value_t = DEFAULT_MYSQL_PORT, env = "MYSQL_PORT")]
    pub port: u16,

    /// MySQL user name (required)
    #[arg(long, env = "MYSQL_USER")]
    pub user: Option<String>,

    /// MySQL password (required)
    #[arg(long, env = "MYSQL_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// MySQL database name (required)
    #[arg(long, env = "MYSQL_DATABASE")]
    pub database: Option<String>,

    /// Comma-separated list of SQL verbs allowed in execute_sql
    #[arg(
        long,
        default_value = DEFAULT_ALLOW_METHODS,
        env = "ALLOW_METHODS",
        value_name = "VERBS"
    )]
    pub allow_methods: String,

    /// Transport mode (stdio or http)
    #[arg(
        short,
        long,
        value_enum,
        default_value = "stdio",
        env = "MCP_TRANSPORT"
    )]
    pub transport: TransportMode,

    /// HTTP host to bind to (only used with http transport)
    #[arg(long, default_value = DEFAULT_HTTP_HOST, env = "MCP_HTTP_HOST")]
    pub http_host: String,

    /// HTTP port to bind to (only used with http transport)
    #[arg(long, default_value_t = DEFAULT_HTTP_PORT, env = "MCP_HTTP_PORT")]
    pub http_port: u16,

    /// MCP endpoint path (only used with http transport)
    #[arg(long, default_value = DEFAULT_MCP_ENDPOINT, env = "MCP_ENDPOINT")]
    pub mcp_endpoint: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "MCP_LOG_LEVEL")]
    pub log_level: String,

    /// Enable JSON logging format
    #[arg(long, env = "MCP_JSON_LOGS")]
    pub json_logs: bool,
}

impl Config {
    /// Parse configuration from command line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create a default configuration (useful for testing).
    pub fn default_config() -> Self {
        Self {
            host: DEFAULT_MYSQL_HOST.to_string(),
            port: DEFAULT_MYSQL_PORT,
            user: None,
            password: None,
            database: None,
            allow_methods: DEFAULT_ALLOW_METHODS.to_string(),
            transport: TransportMode::Stdio,
            http_host: DEFAULT_HTTP_HOST.to_string(),
            http_port: DEFAULT_HTTP_PORT,
            mcp_endpoint: DEFAULT_MCP_ENDPOINT.to_string(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }

    /// Validate and assemble the connection parameters.
    ///
    /// User, password, and database have no defaults; any of them missing is
    /// a configuration error that fails the process at startup, never a
    /// per-statement error.
    pub fn connection_config(&self) -> ServerResult<ConnectionConfig> {
        let mut missing = Vec::new();
        if self.user.is_none() {
            missing.push("MYSQL_USER");
        }
        if self.password.is_none() {
            missing.push("MYSQL_PASSWORD");
        }
        if self.database.is_none() {
            missing.push("MYSQL_DATABASE");
        }
        if !missing.is_empty() {
            return Err(ServerError::configuration(missing.join(", ")));
        }

        Ok(ConnectionConfig {
            host: self.host.clone(),
            port: self.port,
            user: self.user.clone().unwrap_or_default(),
            password: self.password.clone().unwrap_or_default(),
            database: self.database.clone().unwrap_or_default(),
        })
    }

    /// Build the statement allow-list from the configured verb list.
    pub fn allow_list(&self) -> AllowList {
        AllowList::parse(&self.allow_methods)
    }

    /// Get the HTTP bind address.
    pub fn http_bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_config() -> Config {
        Config {
            user: Some("app".to_string()),
            password: Some("secret".to_string()),
            database: Some("sales".to_string()),
            ..Config::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.transport, TransportMode::Stdio);
        assert_eq!(config.host, DEFAULT_MYSQL_HOST);
        assert_eq!(config.port, DEFAULT_MYSQL_PORT);
        assert_eq!(config.http_port, DEFAULT_HTTP_PORT);
    }

    #[test]
    fn test_connection_config_complete() {
        let config = full_config();
        let conn = config.connection_config().unwrap();
        assert_eq!(conn.host, "localhost");
        assert_eq!(conn.port, 3306);
        assert_eq!(conn.user, "app");
        assert_eq!(conn.database, "sales");
    }

    #[test]
    fn test_connection_config_missing_user() {
        let config = Config {
            user: None,
            ..full_config()
        };
        let err = config.connection_config().unwrap_err();
        assert!(err.to_string().contains("MYSQL_USER"));
    }

    #[test]
    fn test_connection_config_missing_all_names_each() {
        let config = Config::default();
        let err = config.connection_config().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("MYSQL_USER"));
        assert!(msg.contains("MYSQL_PASSWORD"));
        assert!(msg.contains("MYSQL_DATABASE"));
    }

    #[test]
    fn test_allow_list_default_verbs() {
        let config = full_config();
        let allow = config.allow_list();
        assert!(allow.contains("select"));
        assert!(allow.contains("update"));
        assert!(allow.contains("show"));
        assert!(!allow.contains("drop"));
    }

    #[test]
    fn test_allow_list_custom_verbs() {
        let config = Config {
            allow_methods: "select,insert".to_string(),
            ..full_config()
        };
        let allow = config.allow_list();
        assert!(allow.contains("insert"));
        assert!(!allow.contains("update"));
    }

    #[test]
    fn test_http_bind_addr() {
        let config = Config {
            http_host: "127.0.0.1".to_string(),
            http_port: 3000,
            ..Config::default()
        };
        assert_eq!(config.http_bind_addr(), "127.0.0.1:3000");
    }
}
