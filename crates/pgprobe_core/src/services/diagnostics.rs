//! The diagnostic queries the checker runs.
//!
//! Server introspection, catalog enumeration, per-table row counts with
//! partial-failure tolerance, and the sentinel write probe against the
//! `categories` table.

use crate::error::CheckError;
use crate::models::{ServerVersion, TableEntry, TableSummary};
use crate::services::pool::PooledConnection;

use chrono::{DateTime, Utc};

/// Table the write probe targets, when present.
pub const PROBE_TABLE: &str = "categories";
/// Name of the sentinel row; also the upsert conflict target.
pub const SENTINEL_NAME: &str = "Test Category";
/// Description stored on the sentinel row.
pub const SENTINEL_DESCRIPTION: &str = "Connectivity probe row; safe to delete";

/// Diagnostic query service.
pub struct Diagnostics;

impl Diagnostics {
    /// Fetch and parse the server version string.
    pub async fn server_version(conn: &PooledConnection) -> Result<ServerVersion, CheckError> {
        let row = conn.query_one("SELECT version()", &[]).await?;
        Ok(ServerVersion::parse(row.get::<_, String>(0)))
    }

    /// Fetch the server's current time.
    pub async fn server_time(conn: &PooledConnection) -> Result<DateTime<Utc>, CheckError> {
        let row = conn.query_one("SELECT now()", &[]).await?;
        Ok(row.get(0))
    }

    /// List all user tables in the public schema, ordered by name.
    pub async fn list_tables(conn: &PooledConnection) -> Result<Vec<TableEntry>, CheckError> {
        let rows = conn
            .query(
                r#"
                SELECT tablename, schemaname
                FROM pg_catalog.pg_tables
                WHERE schemaname = 'public'
                ORDER BY tablename
                "#,
                &[],
            )
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| TableEntry { schema: row.get("schemaname"), name: row.get("tablename") })
            .collect())
    }

    /// Count the rows of one table.
    pub async fn count_rows(
        conn: &PooledConnection,
        table: &TableEntry,
    ) -> Result<i64, CheckError> {
        let sql = format!(
            "SELECT COUNT(*) FROM {}.{}",
            quote_ident(&table.schema),
            quote_ident(&table.name)
        );
        let row = conn.query_one(&sql, &[]).await?;
        Ok(row.get(0))
    }

    /// Count rows for every listed table.
    ///
    /// A failing table is recorded as unavailable and the remaining tables
    /// are still counted.
    pub async fn summarize_tables(
        conn: &PooledConnection,
        tables: &[TableEntry],
    ) -> Vec<TableSummary> {
        let mut summaries = Vec::with_capacity(tables.len());
        for table in tables {
            match Self::count_rows(conn, table).await {
                Ok(rows) => summaries.push(TableSummary::counted(table, rows)),
                Err(e) => {
                    tracing::warn!(table = %table.name, error = %e, "row count failed");
                    summaries.push(TableSummary::unavailable(table, e.to_string()));
                }
            }
        }
        summaries
    }

    /// Insert the sentinel row, doing nothing on a name conflict.
    ///
    /// Returns `true` if a row was actually created, `false` when the
    /// sentinel was already present from a prior run.
    pub async fn insert_sentinel(conn: &PooledConnection) -> Result<bool, CheckError> {
        let row = conn
            .query_opt(
                "INSERT INTO categories (name, description) VALUES ($1, $2) \
                 ON CONFLICT (name) DO NOTHING RETURNING name",
                &[&SENTINEL_NAME, &SENTINEL_DESCRIPTION],
            )
            .await?;
        Ok(row.is_some())
    }

    /// Select the sentinel row back by name; returns the row count.
    pub async fn select_sentinel(conn: &PooledConnection) -> Result<u64, CheckError> {
        let rows = conn
            .query("SELECT * FROM categories WHERE name = $1", &[&SENTINEL_NAME])
            .await?;
        Ok(rows.len() as u64)
    }

    /// Delete the sentinel row by name; returns the rows deleted.
    pub async fn delete_sentinel(conn: &PooledConnection) -> Result<u64, CheckError> {
        conn.execute("DELETE FROM categories WHERE name = $1", &[&SENTINEL_NAME]).await
    }
}

/// Quote an identifier for interpolation into a count query.
fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_ident_wraps_plain_names() {
        assert_eq!(quote_ident("categories"), "\"categories\"");
    }

    #[test]
    fn quote_ident_escapes_embedded_quotes() {
        assert_eq!(quote_ident("odd\"name"), "\"odd\"\"name\"");
    }

    #[test]
    fn count_query_is_schema_qualified() {
        let table = TableEntry { schema: "public".to_string(), name: "products".to_string() };
        let sql = format!(
            "SELECT COUNT(*) FROM {}.{}",
            quote_ident(&table.schema),
            quote_ident(&table.name)
        );
        assert_eq!(sql, "SELECT COUNT(*) FROM \"public\".\"products\"");
    }
}
