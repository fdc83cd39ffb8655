//! MySQL MCP Server Library
//!
//! This library provides MCP (Model Context Protocol) tools for AI assistants
//! to run SQL against a single configured MySQL database, explore its schema,
//! and diagnose InnoDB lock waits.

pub mod config;
pub mod db;
pub mod error;
pub mod mcp;
pub mod sql;
pub mod tools;
pub mod transport;

pub use config::Config;
pub use error::ServerError;
pub use mcp::MySqlService;
