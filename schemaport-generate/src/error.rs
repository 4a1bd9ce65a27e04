//! Error types for SQL generation.

use schemaport_schema::Dialect;
use thiserror::Error;
use uuid::Uuid;

use crate::action::Action;

/// Result type alias for generation operations.
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Errors that can occur while rendering a project version.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The request was rejected before any rendering.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No template is registered for an action and dialect.
    #[error("no template registered for action `{action}` in dialect `{dialect}`")]
    MissingTemplate {
        /// Requested action.
        action: Action,
        /// Requested dialect.
        dialect: Dialect,
    },

    /// A single-row helper was asked for an entity that is not in the version.
    #[error("unknown entity {0}")]
    UnknownEntity(Uuid),

    /// Writing rendered output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Schema-level error, e.g. an unknown dialect tag.
    #[error(transparent)]
    Schema(#[from] schemaport_schema::SchemaError),
}

impl GenerateError {
    /// Create an invalid request error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }
}
