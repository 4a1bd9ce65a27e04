//! In-memory catalog source.
//!
//! Serves canned catalog rows, which makes it possible to drive the
//! introspector without a database.

use std::collections::HashMap;

use async_trait::async_trait;
use schemaport_schema::{CatalogColumn, CatalogForeignKey, CatalogIndexColumn, Dialect};

use crate::classifier::SampleRow;
use crate::error::{IntrospectError, IntrospectResult};
use crate::source::{CatalogSource, validate_identifier};

#[derive(Debug, Clone, Default)]
struct MemoryTable {
    columns: Vec<CatalogColumn>,
    indexes: Vec<CatalogIndexColumn>,
    foreign_keys: Vec<CatalogForeignKey>,
    samples: Vec<SampleRow>,
}

/// A [`CatalogSource`] backed by fixed rows.
#[derive(Debug, Clone)]
pub struct MemorySource {
    dialect: Dialect,
    schema: String,
    tables: Vec<String>,
    data: HashMap<String, MemoryTable>,
    failing: Option<String>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new(dialect: Dialect, schema: impl Into<String>) -> Self {
        Self {
            dialect,
            schema: schema.into(),
            tables: Vec::new(),
            data: HashMap::new(),
            failing: None,
        }
    }

    fn table_mut(&mut self, table: &str) -> &mut MemoryTable {
        if !self.tables.iter().any(|t| t == table) {
            self.tables.push(table.to_string());
        }
        self.data.entry(table.to_string()).or_default()
    }

    /// Add a table with its columns. Positions are assigned in order.
    pub fn with_table(mut self, table: &str, columns: Vec<CatalogColumn>) -> Self {
        let columns = columns
            .into_iter()
            .enumerate()
            .map(|(i, c)| c.position(i as u32 + 1))
            .collect();
        self.table_mut(table).columns = columns;
        self
    }

    /// Set the index rows of a table.
    pub fn with_indexes(mut self, table: &str, indexes: Vec<CatalogIndexColumn>) -> Self {
        self.table_mut(table).indexes = indexes;
        self
    }

    /// Set the foreign key rows of a table.
    pub fn with_foreign_keys(mut self, table: &str, foreign_keys: Vec<CatalogForeignKey>) -> Self {
        self.table_mut(table).foreign_keys = foreign_keys;
        self
    }

    /// Set the sample rows of a table.
    pub fn with_samples(mut self, table: &str, samples: Vec<SampleRow>) -> Self {
        self.table_mut(table).samples = samples;
        self
    }

    /// Make every query against `table` fail.
    pub fn failing_on(mut self, table: &str) -> Self {
        self.failing = Some(table.to_string());
        self
    }

    fn table(&self, operation: &'static str, table: &str) -> IntrospectResult<&MemoryTable> {
        if self.failing.as_deref() == Some(table) {
            return Err(IntrospectError::query(operation, table, "simulated failure"));
        }
        self.data
            .get(table)
            .ok_or_else(|| IntrospectError::query(operation, table, "no such table"))
    }
}

#[async_trait]
impl CatalogSource for MemorySource {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn schema_name(&self) -> &str {
        &self.schema
    }

    async fn list_tables(&self) -> IntrospectResult<Vec<String>> {
        let mut tables = self.tables.clone();
        tables.sort();
        Ok(tables)
    }

    async fn list_columns(&self, table: &str) -> IntrospectResult<Vec<CatalogColumn>> {
        Ok(self.table("list columns", table)?.columns.clone())
    }

    async fn list_indexes(&self, table: &str) -> IntrospectResult<Vec<CatalogIndexColumn>> {
        Ok(self.table("list indexes", table)?.indexes.clone())
    }

    async fn list_foreign_keys(&self, table: &str) -> IntrospectResult<Vec<CatalogForeignKey>> {
        Ok(self.table("list foreign keys", table)?.foreign_keys.clone())
    }

    async fn sample_rows(&self, table: &str, limit: usize) -> IntrospectResult<Vec<SampleRow>> {
        validate_identifier(table)?;
        let samples = &self.table("sample rows", table)?.samples;
        Ok(samples.iter().take(limit).cloned().collect())
    }
}
