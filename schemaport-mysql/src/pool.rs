//! Connection pool for MySQL.

use std::sync::Arc;

use mysql_async::{Conn, Opts, Pool, PoolConstraints, PoolOpts};
use tracing::{debug, info};

use crate::config::MysqlConfig;
use crate::error::MysqlResult;

/// A connection pool for MySQL.
#[derive(Clone)]
pub struct MysqlPool {
    inner: Pool,
    config: Arc<MysqlConfig>,
}

impl MysqlPool {
    /// Create a new connection pool from configuration.
    ///
    /// No connection is opened until the first [`MysqlPool::get`].
    pub fn new(config: MysqlConfig) -> Self {
        let constraints =
            PoolConstraints::new(1, config.max_connections.max(1)).unwrap_or_default();
        let opts = config
            .to_opts_builder()
            .pool_opts(PoolOpts::new().with_constraints(constraints));

        let pool = Pool::new(Opts::from(opts));

        info!(
            host = %config.host,
            port = %config.port,
            database = %config.database,
            max_connections = %config.max_connections,
            "MySQL connection pool created"
        );

        Self {
            inner: pool,
            config: Arc::new(config),
        }
    }

    /// Get a connection from the pool.
    pub async fn get(&self) -> MysqlResult<Conn> {
        debug!("Acquiring connection from pool");
        Ok(self.inner.get_conn().await?)
    }

    /// Get the connection configuration.
    pub fn config(&self) -> &MysqlConfig {
        &self.config
    }

    /// Disconnect all connections and close the pool.
    pub async fn disconnect(self) -> MysqlResult<()> {
        self.inner.disconnect().await?;
        info!("MySQL connection pool closed");
        Ok(())
    }
}
