//! [`CatalogSource`] backed by a live PostgreSQL server.

use async_trait::async_trait;
use schemaport_introspect::queries::{postgres as queries, sample_query};
use schemaport_introspect::{CatalogSource, IntrospectError, IntrospectResult, SampleRow};
use schemaport_schema::{CatalogColumn, CatalogForeignKey, CatalogIndexColumn, Dialect};
use tokio_postgres::types::ToSql;
use tracing::debug;

use crate::config::PgConfig;
use crate::error::PgResult;
use crate::pool::PgPool;
use crate::row::{FromPgRow, PgRow};

/// Reads the Postgres catalogs for one schema.
#[derive(Clone)]
pub struct PgSource {
    pool: PgPool,
    schema: String,
}

impl PgSource {
    /// Create a source and verify that the server is reachable.
    pub async fn connect(config: PgConfig) -> PgResult<Self> {
        let source = Self::from_pool(PgPool::new(config)?);
        drop(source.pool.get().await?);
        Ok(source)
    }

    /// Create a source over an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        let schema = pool.config().schema.clone();
        Self { pool, schema }
    }

    /// Get the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn fetch<T: FromPgRow>(
        &self,
        operation: &'static str,
        table: &str,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> IntrospectResult<Vec<T>> {
        let client = self.pool.get().await?;
        let rows = client
            .query(sql, params)
            .await
            .map_err(|e| IntrospectError::query(operation, table, e))?;

        rows.iter()
            .map(|row| T::from_row(row).map_err(|e| IntrospectError::query(operation, table, e)))
            .collect()
    }
}

#[async_trait]
impl CatalogSource for PgSource {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    fn schema_name(&self) -> &str {
        &self.schema
    }

    async fn list_tables(&self) -> IntrospectResult<Vec<String>> {
        let client = self.pool.get().await?;
        let rows = client
            .query(queries::TABLES, &[&self.schema])
            .await
            .map_err(|e| IntrospectError::query("list tables", "", e))?;

        let tables = rows
            .iter()
            .map(|row| row.get_value::<String>("tablename"))
            .collect::<PgResult<Vec<_>>>()?;
        debug!(schema = %self.schema, count = tables.len(), "Listed tables");
        Ok(tables)
    }

    async fn list_columns(&self, table: &str) -> IntrospectResult<Vec<CatalogColumn>> {
        self.fetch("list columns", table, queries::COLUMNS, &[&self.schema, &table])
            .await
    }

    async fn list_indexes(&self, table: &str) -> IntrospectResult<Vec<CatalogIndexColumn>> {
        self.fetch("list indexes", table, queries::INDEXES, &[&self.schema, &table])
            .await
    }

    async fn list_foreign_keys(&self, table: &str) -> IntrospectResult<Vec<CatalogForeignKey>> {
        self.fetch(
            "list foreign keys",
            table,
            queries::FOREIGN_KEYS,
            &[&self.schema, &table],
        )
        .await
    }

    async fn sample_rows(&self, table: &str, limit: usize) -> IntrospectResult<Vec<SampleRow>> {
        let sql = sample_query(Dialect::Postgres, &self.schema, table, limit)?;
        self.fetch("sample rows", table, &sql, &[]).await
    }
}
