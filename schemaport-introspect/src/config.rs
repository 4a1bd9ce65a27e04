//! Introspection settings.

use serde::{Deserialize, Serialize};

/// Default number of rows sampled per table.
pub const DEFAULT_SAMPLE_SIZE: usize = 10;

/// Default number of tables introspected at once.
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// Configuration for a catalog introspection pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntrospectionConfig {
    /// Rows sampled per table for column classification.
    pub sample_size: usize,
    /// Maximum tables read concurrently.
    pub max_concurrency: usize,
    /// Tables to include (empty = all).
    pub include_tables: Vec<String>,
    /// Tables to exclude.
    pub exclude_tables: Vec<String>,
}

impl Default for IntrospectionConfig {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            include_tables: Vec::new(),
            exclude_tables: Vec::new(),
        }
    }
}

impl IntrospectionConfig {
    /// Create a new introspection config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sample size.
    pub fn sample_size(mut self, size: usize) -> Self {
        self.sample_size = size;
        self
    }

    /// Set the maximum concurrency (at least 1).
    pub fn max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max.max(1);
        self
    }

    /// Include only these tables.
    pub fn include_tables(mut self, tables: Vec<String>) -> Self {
        self.include_tables = tables;
        self
    }

    /// Exclude these tables.
    pub fn exclude_tables(mut self, tables: Vec<String>) -> Self {
        self.exclude_tables = tables;
        self
    }

    /// Check if a table should be introspected.
    pub fn should_include_table(&self, name: &str) -> bool {
        if self.exclude_tables.iter().any(|t| t == name) {
            return false;
        }
        self.include_tables.is_empty() || self.include_tables.iter().any(|t| t == name)
    }
}
