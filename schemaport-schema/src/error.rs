//! Error types for the canonical schema model.

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur while building or validating a project version.
#[derive(Error, Debug, Diagnostic)]
pub enum SchemaError {
    /// The dialect tag is not one of the supported families.
    #[error("unsupported dialect `{0}`")]
    #[diagnostic(
        code(schemaport::schema::unsupported_dialect),
        help("supported dialects are `mysql` and `pg`")
    )]
    UnsupportedDialect(String),

    /// Two entities share the same id.
    #[error("duplicate entity id `{id}` (`{identifier}`)")]
    #[diagnostic(code(schemaport::schema::duplicate_entity))]
    DuplicateEntity { id: String, identifier: String },

    /// A relationship endpoint points outside the project version.
    #[error("relationship `{relationship}` references unknown {target}")]
    #[diagnostic(code(schemaport::schema::dangling_relationship))]
    DanglingRelationship {
        relationship: String,
        target: String,
    },

    /// A project version could not be encoded or decoded.
    #[error("project version JSON error: {0}")]
    #[diagnostic(code(schemaport::schema::json))]
    Json(#[from] serde_json::Error),
}

impl SchemaError {
    /// Create a dangling relationship error.
    pub fn dangling(relationship: impl Into<String>, target: impl Into<String>) -> Self {
        Self::DanglingRelationship {
            relationship: relationship.into(),
            target: target.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SchemaError::UnsupportedDialect("oracle".to_string());
        assert_eq!(err.to_string(), "unsupported dialect `oracle`");

        let err = SchemaError::dangling("fk_orders_customer", "entity 1234");
        assert!(err.to_string().contains("fk_orders_customer"));
        assert!(err.to_string().contains("entity 1234"));
    }
}
