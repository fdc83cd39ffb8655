//! InnoDB row-lock wait diagnostics.
//!
//! A fixed report over `information_schema.INNODB_LOCK_WAITS` joined to both
//! the waiting and the blocking transactions, their lock records, and their
//! server threads. Longest-waiting conflicts sort first. Requires the legacy
//! InnoDB tables (MySQL 5.7-era); the query runs through the ordinary
//! execution pipeline like any other SELECT.

use crate::sql::SqlExecutor;
use std::sync::Arc;

/// Lock-wait report, one row per blocked/blocking transaction pair.
pub const LOCK_WAITS_SQL: &str = "SELECT \
 p2.HOST AS blocked_host, \
 p2.USER AS blocked_user, \
 r.trx_id AS blocked_trx_id, \
 r.trx_mysql_thread_id AS blocked_thread_id, \
 TIMESTAMPDIFF(SECOND, r.trx_wait_started, CURRENT_TIMESTAMP) AS wait_seconds, \
 r.trx_query AS blocked_query, \
 m.lock_table AS blocked_lock_table, \
 m.lock_mode AS blocked_lock_mode, \
 m.lock_type AS blocked_lock_type, \
 m.lock_index AS blocked_lock_index, \
 m.lock_space AS blocked_lock_space, \
 m.lock_page AS blocked_lock_page, \
 m.lock_rec AS blocked_lock_rec, \
 m.lock_data AS blocked_lock_data, \
 p.HOST AS blocking_host, \
 p.USER AS blocking_user, \
 b.trx_id AS blocking_trx_id, \
 b.trx_mysql_thread_id AS blocking_thread_id, \
 b.trx_query AS blocking_query, \
 l.lock_table AS blocking_lock_table, \
 l.lock_mode AS blocking_lock_mode, \
 l.lock_type AS blocking_lock_type, \
 l.lock_index AS blocking_lock_index, \
 l.lock_space AS blocking_lock_space, \
 l.lock_page AS blocking_lock_page, \
 l.lock_rec AS blocking_lock_rec, \
 l.lock_data AS blocking_lock_data, \
 IF(p.COMMAND = 'Sleep', CONCAT(p.TIME, ' s'), 0) AS blocking_idle_time \
 FROM information_schema.INNODB_LOCK_WAITS w \
 INNER JOIN information_schema.INNODB_TRX b ON b.trx_id = w.blocking_trx_id \
 INNER JOIN information_schema.INNODB_TRX r ON r.trx_id = w.requesting_trx_id \
 INNER JOIN information_schema.INNODB_LOCKS l \
 ON w.blocking_lock_id = l.lock_id AND l.lock_trx_id = b.trx_id \
 INNER JOIN information_schema.INNODB_LOCKS m \
 ON m.lock_id = w.requested_lock_id AND m.lock_trx_id = r.trx_id \
 INNER JOIN information_schema.PROCESSLIST p ON p.ID = b.trx_mysql_thread_id \
 INNER JOIN information_schema.PROCESSLIST p2 ON p2.ID = r.trx_mysql_thread_id \
 ORDER BY wait_seconds DESC";

/// Handler for the get_lock_tables tool.
pub struct LockInspector {
    executor: Arc<SqlExecutor>,
}

impl LockInspector {
    pub fn new(executor: Arc<SqlExecutor>) -> Self {
        Self { executor }
    }

    /// Run the lock-wait report and render it as text.
    pub async fn lock_waits(&self) -> String {
        self.executor.execute_rendered(LOCK_WAITS_SQL).await
    }
}
