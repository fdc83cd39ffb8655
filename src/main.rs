//! MySQL MCP Server - Main entry point.
//!
//! This server provides MCP (Model Context Protocol) tools for AI assistants
//! to run SQL against a single configured MySQL database.

use clap::Parser;
use mysql_mcp_server::config::{Config, TransportMode};
use mysql_mcp_server::db::build_pool;
use mysql_mcp_server::mcp::MySqlService;
use mysql_mcp_server::sql::SqlExecutor;
use mysql_mcp_server::transport::{HttpTransport, StdioTransport, Transport};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for logging.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        subscriber.with(fmt::layer().json()).init();
    } else {
        subscriber
            .with(fmt::layer().with_target(true).with_thread_ids(false))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse configuration from command line and environment
    let config = Config::parse();

    // Initialize logging
    init_tracing(&config);

    // Connection parameters have no safe defaults; fail fast when missing
    let connection = match config.connection_config() {
        Ok(connection) => connection,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("Required settings (flag or environment variable):");
            eprintln!("  --user      MYSQL_USER");
            eprintln!("  --password  MYSQL_PASSWORD");
            eprintln!("  --database  MYSQL_DATABASE");
            eprintln!();
            eprintln!("Example:");
            eprintln!("  mysql-mcp-server --user app --password secret --database sales");
            std::process::exit(1);
        }
    };

    let allow_list = config.allow_list();
    info!(
        transport = %config.transport,
        host = %connection.host,
        port = connection.port,
        database = %connection.database,
        allowed = %allow_list,
        "Starting MySQL MCP Server v{}",
        env!("CARGO_PKG_VERSION")
    );

    // The pool connects lazily; an unreachable server surfaces per call
    let pool = build_pool(&connection);
    let executor = Arc::new(SqlExecutor::new(pool.clone(), allow_list));
    let service = MySqlService::new(executor, connection.database.clone());

    // Run the appropriate transport
    let result = match config.transport {
        TransportMode::Stdio => {
            info!("Using stdio transport");
            let transport = StdioTransport::new(service, pool);
            transport.run().await
        }
        TransportMode::Http => {
            info!(
                host = %config.http_host,
                port = config.http_port,
                endpoint = %config.mcp_endpoint,
                "Using HTTP transport"
            );
            let transport = HttpTransport::new(
                service,
                pool,
                &config.http_host,
                config.http_port,
                &config.mcp_endpoint,
            );
            transport.run().await
        }
    };

    if let Err(e) = result {
        error!(error = %e, "Server error");
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}
