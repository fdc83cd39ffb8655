//! MySQL connection pool construction.

use crate::config::ConnectionConfig;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use std::time::Duration;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// Build a lazily-connecting pool from validated connection parameters.
///
/// The pool is lazy on purpose: an unreachable or misconfigured server does
/// not fail startup, it surfaces as a connection error on the first acquire
/// of each call, which is where the call-abort contract expects it.
pub fn build_pool(config: &ConnectionConfig) -> MySqlPool {
    let options = MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.database);

    MySqlPoolOptions::new()
        .max_connections(DEFAULT_MAX_CONNECTIONS)
        .acquire_timeout(Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS))
        .connect_lazy_with(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_pool_is_lazy() {
        // No server is listening here; a lazy pool must still construct.
        let config = ConnectionConfig {
            host: "localhost".to_string(),
            port: 3306,
            user: "app".to_string(),
            password: "secret".to_string(),
            database: "sales".to_string(),
        };
        let pool = build_pool(&config);
        assert!(!pool.is_closed());
    }
}
