//! Error types for catalog introspection.

use thiserror::Error;

/// Result type alias for introspection operations.
pub type IntrospectResult<T> = Result<T, IntrospectError>;

/// Errors that can occur while reading a database catalog.
#[derive(Debug, Error)]
pub enum IntrospectError {
    /// A table or schema name failed validation before interpolation.
    #[error("invalid identifier `{0}`")]
    InvalidIdentifier(String),

    /// A catalog query failed.
    #[error("failed to {operation} for table `{table}`: {message}")]
    Query {
        /// What was being read (e.g. "list columns").
        operation: &'static str,
        /// Table being introspected; empty for schema-wide queries.
        table: String,
        /// Driver error message.
        message: String,
    },

    /// Connection or pool error reported by a driver.
    #[error("connection error: {0}")]
    Connection(String),

    /// Invalid driver configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// The assembled model is inconsistent.
    #[error(transparent)]
    Schema(#[from] schemaport_schema::SchemaError),
}

impl IntrospectError {
    /// Create a catalog query error.
    pub fn query(
        operation: &'static str,
        table: impl Into<String>,
        message: impl std::fmt::Display,
    ) -> Self {
        Self::Query {
            operation,
            table: table.into(),
            message: message.to_string(),
        }
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Check if this is a connection error.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}
