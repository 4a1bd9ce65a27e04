//! [`CatalogSource`] backed by a live MySQL server.

use async_trait::async_trait;
use mysql_async::Row;
use mysql_async::prelude::*;
use schemaport_introspect::queries::{mysql as queries, sample_query};
use schemaport_introspect::{CatalogSource, IntrospectError, IntrospectResult, SampleRow};
use schemaport_schema::{CatalogColumn, CatalogForeignKey, CatalogIndexColumn, Dialect};
use tracing::debug;

use crate::config::MysqlConfig;
use crate::error::{MysqlError, MysqlResult};
use crate::pool::MysqlPool;
use crate::row::FromMysqlRow;

/// Reads `INFORMATION_SCHEMA` for the configured database.
#[derive(Clone)]
pub struct MysqlSource {
    pool: MysqlPool,
    schema: String,
}

impl MysqlSource {
    /// Create a source and verify that the server is reachable.
    pub async fn connect(config: MysqlConfig) -> MysqlResult<Self> {
        let timeout = config.connect_timeout;
        let source = Self::from_pool(MysqlPool::new(config));

        // fail here rather than on the first catalog query
        let conn = match timeout {
            Some(limit) => tokio::time::timeout(limit, source.pool.get())
                .await
                .map_err(|_| MysqlError::connection(format!("timed out after {:?}", limit)))??,
            None => source.pool.get().await?,
        };
        drop(conn);
        Ok(source)
    }

    /// Create a source over an existing pool.
    pub fn from_pool(pool: MysqlPool) -> Self {
        let schema = pool.config().database.clone();
        Self { pool, schema }
    }

    /// Get the underlying pool.
    pub fn pool(&self) -> &MysqlPool {
        &self.pool
    }

    /// Close the pool.
    pub async fn close(self) -> MysqlResult<()> {
        self.pool.disconnect().await
    }

    async fn fetch<T, P>(
        &self,
        operation: &'static str,
        table: &str,
        sql: &str,
        params: P,
    ) -> IntrospectResult<Vec<T>>
    where
        T: FromMysqlRow + Send,
        P: Into<mysql_async::Params> + Send,
    {
        let mut conn = self.pool.get().await?;
        let rows: Vec<Row> = conn
            .exec(sql, params)
            .await
            .map_err(|e| IntrospectError::query(operation, table, e))?;

        rows.iter()
            .map(|row| T::from_row(row).map_err(|e| IntrospectError::query(operation, table, e)))
            .collect()
    }
}

#[async_trait]
impl CatalogSource for MysqlSource {
    fn dialect(&self) -> Dialect {
        Dialect::MySql
    }

    fn schema_name(&self) -> &str {
        &self.schema
    }

    async fn list_tables(&self) -> IntrospectResult<Vec<String>> {
        let mut conn = self.pool.get().await?;
        let tables: Vec<String> = conn
            .exec(queries::TABLES, (self.schema.as_str(),))
            .await
            .map_err(|e| IntrospectError::query("list tables", "", e))?;
        debug!(schema = %self.schema, count = tables.len(), "Listed tables");
        Ok(tables)
    }

    async fn list_columns(&self, table: &str) -> IntrospectResult<Vec<CatalogColumn>> {
        self.fetch("list columns", table, queries::COLUMNS, (self.schema.as_str(), table))
            .await
    }

    async fn list_indexes(&self, table: &str) -> IntrospectResult<Vec<CatalogIndexColumn>> {
        self.fetch("list indexes", table, queries::INDEXES, (self.schema.as_str(), table))
            .await
    }

    async fn list_foreign_keys(&self, table: &str) -> IntrospectResult<Vec<CatalogForeignKey>> {
        self.fetch(
            "list foreign keys",
            table,
            queries::FOREIGN_KEYS,
            (self.schema.as_str(), table),
        )
        .await
    }

    async fn sample_rows(&self, table: &str, limit: usize) -> IntrospectResult<Vec<SampleRow>> {
        let sql = sample_query(Dialect::MySql, &self.schema, table, limit)?;
        let mut conn = self.pool.get().await?;
        let rows: Vec<Row> = conn
            .query(sql)
            .await
            .map_err(|e| IntrospectError::query("sample rows", table, e))?;

        rows.iter()
            .map(|row| {
                SampleRow::from_row(row).map_err(|e| IntrospectError::query("sample rows", table, e))
            })
            .collect()
    }
}
