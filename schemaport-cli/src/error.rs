//! CLI error types and result alias.

use miette::Diagnostic;
use thiserror::Error;

use schemaport_generate::GenerateError;
use schemaport_introspect::IntrospectError;
use schemaport_schema::SchemaError;

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// IO error
    #[error("IO error: {0}")]
    #[diagnostic(code(schemaport::io))]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    #[diagnostic(code(schemaport::config))]
    Config(String),

    /// Model file could not be read or written
    #[error("Model error: {0}")]
    #[diagnostic(code(schemaport::model))]
    Model(String),

    /// Introspection failed
    #[error("Introspection error: {0}")]
    #[diagnostic(
        code(schemaport::introspect),
        help("check the connection URL and that the user can read the catalog")
    )]
    Introspect(#[from] IntrospectError),

    /// Rendering failed
    #[error("Generation error: {0}")]
    #[diagnostic(code(schemaport::generate))]
    Generate(#[from] GenerateError),
}

impl From<SchemaError> for CliError {
    fn from(err: SchemaError) -> Self {
        CliError::Model(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Model(format!("Invalid JSON: {}", err))
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::Config(format!("Failed to parse TOML: {}", err))
    }
}

#[cfg(feature = "mysql")]
impl From<schemaport_mysql::MysqlError> for CliError {
    fn from(err: schemaport_mysql::MysqlError) -> Self {
        CliError::Introspect(err.into())
    }
}

#[cfg(feature = "postgres")]
impl From<schemaport_postgres::PgError> for CliError {
    fn from(err: schemaport_postgres::PgError) -> Self {
        CliError::Introspect(err.into())
    }
}
