//! Schema introspection helpers over `information_schema`.
//!
//! Three pure query builders plus a thin handler that routes the built SQL
//! through the full execution pipeline (splitter, gate, executor), exactly
//! like a hand-written execute_sql call would. Caller-supplied text is
//! interpolated directly into the SQL without parameterization; that is the
//! inherited external contract of these tools, documented here rather than
//! silently changed.

use crate::sql::SqlExecutor;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;

/// Input for the get_table_name tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TableNameInput {
    /// Table comment keyword to search for
    pub text: String,
}

/// Input for the get_table_desc tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TableDescInput {
    /// Table name(s) to describe; separate multiple names with commas
    pub text: String,
}

/// Input for the get_table_index tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TableIndexInput {
    /// Table name(s) to inspect; separate multiple names with commas
    pub text: String,
}

/// Build the quoted IN-list body from a comma-separated table list.
fn in_list(tables: &str) -> String {
    tables
        .split(',')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("','")
}

/// Search tables of `database` whose comment contains `comment`.
pub fn build_table_by_comment(database: &str, comment: &str) -> String {
    format!(
        "SELECT TABLE_SCHEMA, TABLE_NAME, TABLE_COMMENT \
         FROM information_schema.TABLES \
         WHERE TABLE_SCHEMA = '{}' AND TABLE_COMMENT LIKE '%{}%'",
        database, comment
    )
}

/// Describe the columns of the listed tables, ordered by table then
/// ordinal position.
pub fn build_columns_for_tables(database: &str, tables: &str) -> String {
    format!(
        "SELECT TABLE_NAME, COLUMN_NAME, COLUMN_COMMENT \
         FROM information_schema.COLUMNS \
         WHERE TABLE_SCHEMA = '{}' AND TABLE_NAME IN ('{}') \
         ORDER BY TABLE_NAME, ORDINAL_POSITION",
        database,
        in_list(tables)
    )
}

/// Describe the indexes of the listed tables, ordered by table, index
/// name, then position within the index.
pub fn build_indexes_for_tables(database: &str, tables: &str) -> String {
    format!(
        "SELECT TABLE_NAME, INDEX_NAME, COLUMN_NAME, SEQ_IN_INDEX, NON_UNIQUE, INDEX_TYPE \
         FROM information_schema.STATISTICS \
         WHERE TABLE_SCHEMA = '{}' AND TABLE_NAME IN ('{}') \
         ORDER BY TABLE_NAME, INDEX_NAME, SEQ_IN_INDEX",
        database,
        in_list(tables)
    )
}

/// Handler for the schema introspection tools.
pub struct SchemaToolHandler {
    executor: Arc<SqlExecutor>,
    database: String,
}

impl SchemaToolHandler {
    pub fn new(executor: Arc<SqlExecutor>, database: impl Into<String>) -> Self {
        Self {
            executor,
            database: database.into(),
        }
    }

    /// get_table_name: search tables by comment keyword.
    pub async fn table_by_comment(&self, text: &str) -> String {
        let sql = build_table_by_comment(&self.database, text);
        self.executor.execute_rendered(&sql).await
    }

    /// get_table_desc: column structure for one or more tables.
    pub async fn columns_for_tables(&self, text: &str) -> String {
        let sql = build_columns_for_tables(&self.database, text);
        self.executor.execute_rendered(&sql).await
    }

    /// get_table_index: index details for one or more tables.
    pub async fn indexes_for_tables(&self, text: &str) -> String {
        let sql = build_indexes_for_tables(&self.database, text);
        self.executor.execute_rendered(&sql).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_by_comment_query() {
        let sql = build_table_by_comment("sales", "订单");
        assert!(sql.starts_with("SELECT TABLE_SCHEMA, TABLE_NAME, TABLE_COMMENT"));
        assert!(sql.contains("information_schema.TABLES"));
        assert!(sql.contains("TABLE_SCHEMA = 'sales'"));
        assert!(sql.contains("TABLE_COMMENT LIKE '%订单%'"));
    }

    #[test]
    fn test_columns_query_single_table() {
        let sql = build_columns_for_tables("sales", "orders");
        assert!(sql.contains("information_schema.COLUMNS"));
        assert!(sql.contains("TABLE_NAME IN ('orders')"));
        assert!(sql.ends_with("ORDER BY TABLE_NAME, ORDINAL_POSITION"));
    }

    #[test]
    fn test_columns_query_table_list_trimmed() {
        let sql = build_columns_for_tables("sales", "orders, users");
        assert!(sql.contains("TABLE_NAME IN ('orders','users')"));
    }

    #[test]
    fn test_indexes_query_ordering() {
        let sql = build_indexes_for_tables("sales", "orders,users");
        assert!(sql.contains("information_schema.STATISTICS"));
        assert!(sql.contains("TABLE_NAME IN ('orders','users')"));
        assert!(sql.ends_with("ORDER BY TABLE_NAME, INDEX_NAME, SEQ_IN_INDEX"));
    }

    #[test]
    fn test_built_queries_pass_the_gate() {
        // Builders route through the pipeline, so they must be single
        // statements with an allow-listed verb.
        use crate::sql::{AllowList, check_statement};
        let allow = AllowList::default();
        for sql in [
            build_table_by_comment("db", "x"),
            build_columns_for_tables("db", "a,b"),
            build_indexes_for_tables("db", "a"),
        ] {
            assert!(check_statement(&sql, &allow).is_ok());
        }
    }
}
