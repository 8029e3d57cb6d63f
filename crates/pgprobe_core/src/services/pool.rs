//! Database connection pooling with deadpool-postgres.
//!
//! The checker only ever holds one connection at a time; the pool bounds
//! how many physical connections may exist and owns their teardown.

use crate::error::CheckError;
use crate::models::CheckConfig;

use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod, Runtime};
use tokio_postgres::NoTls;

/// A bounded pool of connections for a single checker run.
///
/// Building the pool does not touch the network; the first acquisition
/// does, and its failure is what gets classified for the report.
pub struct CheckPool {
    pool: Pool,
}

impl CheckPool {
    /// Build a pool from the run configuration.
    pub fn new(config: &CheckConfig) -> Result<Self, CheckError> {
        let mut pg_config = tokio_postgres::Config::new();
        pg_config.host(&config.host);
        pg_config.port(config.port);
        pg_config.dbname(&config.database);
        pg_config.user(&config.user);
        pg_config.password(&config.password);
        pg_config.application_name("pgprobe");
        pg_config.connect_timeout(config.connect_timeout);
        pg_config.keepalives(true);
        pg_config.keepalives_idle(config.idle_timeout);

        let manager = Manager::from_config(
            pg_config,
            NoTls,
            ManagerConfig { recycling_method: RecyclingMethod::Fast },
        );

        let pool = Pool::builder(manager)
            .max_size(config.pool_max_size)
            .create_timeout(Some(config.connect_timeout))
            .wait_timeout(Some(config.connect_timeout))
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| CheckError::connection(format!("failed to build pool: {e}")))?;

        Ok(Self { pool })
    }

    /// Acquire a connection, classifying any failure for the report.
    ///
    /// The connection returns to the pool when the handle is dropped.
    pub async fn get(&self) -> Result<PooledConnection, CheckError> {
        let client = self.pool.get().await.map_err(CheckError::from)?;
        Ok(PooledConnection { client })
    }

    /// Close the pool, dropping all connections.
    pub fn close(&self) {
        self.pool.close();
        tracing::info!("connection pool closed");
    }

    /// Check if the pool is closed.
    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}

/// A connection acquired from the pool.
///
/// Automatically returns to the pool when dropped.
pub struct PooledConnection {
    client: deadpool_postgres::Client,
}

impl PooledConnection {
    /// Execute a query that returns rows.
    pub async fn query(
        &self,
        sql: &str,
        params: &[&(dyn tokio_postgres::types::ToSql + Sync)],
    ) -> Result<Vec<tokio_postgres::Row>, CheckError> {
        self.client.query(sql, params).await.map_err(CheckError::from)
    }

    /// Execute a query expected to return exactly one row.
    pub async fn query_one(
        &self,
        sql: &str,
        params: &[&(dyn tokio_postgres::types::ToSql + Sync)],
    ) -> Result<tokio_postgres::Row, CheckError> {
        self.client.query_one(sql, params).await.map_err(CheckError::from)
    }

    /// Execute a query returning zero or one row.
    pub async fn query_opt(
        &self,
        sql: &str,
        params: &[&(dyn tokio_postgres::types::ToSql + Sync)],
    ) -> Result<Option<tokio_postgres::Row>, CheckError> {
        self.client.query_opt(sql, params).await.map_err(CheckError::from)
    }

    /// Execute a statement that doesn't return rows.
    pub async fn execute(
        &self,
        sql: &str,
        params: &[&(dyn tokio_postgres::types::ToSql + Sync)],
    ) -> Result<u64, CheckError> {
        self.client.execute(sql, params).await.map_err(CheckError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CheckConfig;

    #[test]
    fn pool_builds_without_touching_the_network() {
        let config = CheckConfig::from_lookup(|_| None).unwrap();
        let pool = CheckPool::new(&config).unwrap();
        assert!(!pool.is_closed());
    }

    #[test]
    fn close_is_observable_and_idempotent() {
        let config = CheckConfig::from_lookup(|_| None).unwrap();
        let pool = CheckPool::new(&config).unwrap();
        pool.close();
        pool.close();
        assert!(pool.is_closed());
    }
}
