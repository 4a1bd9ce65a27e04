//! The query capability consumed by the introspector.

use async_trait::async_trait;
use schemaport_schema::{CatalogColumn, CatalogForeignKey, CatalogIndexColumn, Dialect};

use crate::classifier::SampleRow;
use crate::error::{IntrospectError, IntrospectResult};

/// Maximum identifier length, in characters, accepted by either dialect.
pub const MAX_IDENTIFIER_LEN: usize = 64;

/// Read access to one schema of a live database.
///
/// Implementations bind schema and table names as query parameters. The
/// only query that interpolates a name is [`CatalogSource::sample_rows`],
/// which must run [`validate_identifier`] first.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Dialect family of the database.
    fn dialect(&self) -> Dialect;

    /// Schema (database) being introspected.
    fn schema_name(&self) -> &str;

    /// Base tables of the schema, ordered by name.
    async fn list_tables(&self) -> IntrospectResult<Vec<String>>;

    /// Columns of a table, ordered by physical position.
    async fn list_columns(&self, table: &str) -> IntrospectResult<Vec<CatalogColumn>>;

    /// One row per indexed column of every index of a table.
    async fn list_indexes(&self, table: &str) -> IntrospectResult<Vec<CatalogIndexColumn>>;

    /// One row per column pair of every foreign key declared on a table.
    async fn list_foreign_keys(&self, table: &str) -> IntrospectResult<Vec<CatalogForeignKey>>;

    /// Up to `limit` randomly chosen rows of a table.
    async fn sample_rows(&self, table: &str, limit: usize) -> IntrospectResult<Vec<SampleRow>>;
}

#[async_trait]
impl<T: CatalogSource + ?Sized> CatalogSource for Box<T> {
    fn dialect(&self) -> Dialect {
        (**self).dialect()
    }

    fn schema_name(&self) -> &str {
        (**self).schema_name()
    }

    async fn list_tables(&self) -> IntrospectResult<Vec<String>> {
        (**self).list_tables().await
    }

    async fn list_columns(&self, table: &str) -> IntrospectResult<Vec<CatalogColumn>> {
        (**self).list_columns(table).await
    }

    async fn list_indexes(&self, table: &str) -> IntrospectResult<Vec<CatalogIndexColumn>> {
        (**self).list_indexes(table).await
    }

    async fn list_foreign_keys(&self, table: &str) -> IntrospectResult<Vec<CatalogForeignKey>> {
        (**self).list_foreign_keys(table).await
    }

    async fn sample_rows(&self, table: &str, limit: usize) -> IntrospectResult<Vec<SampleRow>> {
        (**self).sample_rows(table, limit).await
    }
}

/// Validate a table or schema name before it is quoted into SQL.
///
/// Any name a catalog can hold is accepted: quoting doubles embedded quote
/// characters. Empty names, NUL characters and names longer than
/// [`MAX_IDENTIFIER_LEN`] characters are rejected.
pub fn validate_identifier(name: &str) -> IntrospectResult<&str> {
    let len = name.chars().count();
    if len > 0 && len <= MAX_IDENTIFIER_LEN && !name.contains('\0') {
        Ok(name)
    } else {
        Err(IntrospectError::InvalidIdentifier(name.to_string()))
    }
}
