//! Error types for PostgreSQL operations.

use schemaport_introspect::IntrospectError;
use thiserror::Error;

/// Result type for PostgreSQL operations.
pub type PgResult<T> = Result<T, PgError>;

/// Errors that can occur during PostgreSQL operations.
#[derive(Error, Debug)]
pub enum PgError {
    /// Connection pool error.
    #[error("pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    /// PostgreSQL error.
    #[error("postgres error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Row deserialization error.
    #[error("deserialization error: {0}")]
    Deserialization(String),
}

impl PgError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a deserialization error.
    pub fn deserialization(message: impl Into<String>) -> Self {
        Self::Deserialization(message.into())
    }

    /// Check if this is a connection error.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::Pool(_))
    }
}

impl From<PgError> for IntrospectError {
    fn from(err: PgError) -> Self {
        match err {
            PgError::Pool(e) => IntrospectError::connection(e.to_string()),
            PgError::Postgres(e) => IntrospectError::connection(e.to_string()),
            PgError::Config(msg) => IntrospectError::config(msg),
            PgError::Deserialization(msg) => IntrospectError::query("decode row", "", msg),
        }
    }
}
