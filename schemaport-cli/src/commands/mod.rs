//! CLI command implementations.

pub mod generate;
pub mod introspect;
pub mod sql;

use schemaport_introspect::{CatalogSource, IntrospectionConfig, Introspector};
use schemaport_schema::{Dialect, ProjectVersion};
use tracing::debug;

use crate::cli::ConnectionArgs;
use crate::config::{Config, DATABASE_URL_ENV};
use crate::error::{CliError, CliResult};

/// Dialect served by a connection URL.
pub fn dialect_for_url(url: &str) -> CliResult<Dialect> {
    let parsed =
        url::Url::parse(url).map_err(|e| CliError::Config(format!("Invalid database URL: {}", e)))?;
    match parsed.scheme() {
        "mysql" | "mariadb" => Ok(Dialect::MySql),
        "postgres" | "postgresql" => Ok(Dialect::Postgres),
        other => Err(CliError::Config(format!(
            "Unsupported database URL scheme: {}",
            other
        ))),
    }
}

/// Merge command line overrides into the configured connection settings.
pub fn resolve_connection(
    args: &ConnectionArgs,
    config: &Config,
) -> CliResult<(String, Option<String>, IntrospectionConfig)> {
    let url = args
        .url
        .clone()
        .or_else(|| config.database.url.clone())
        .ok_or_else(|| {
            CliError::Config(format!(
                "No database URL. Pass --url, set {} or add [database] url to the config file",
                DATABASE_URL_ENV
            ))
        })?;
    let schema = args.schema.clone().or_else(|| config.database.schema.clone());

    let mut introspection = config.introspection.clone();
    if let Some(size) = args.sample_size {
        introspection = introspection.sample_size(size);
    }
    if let Some(max) = args.max_concurrency {
        introspection = introspection.max_concurrency(max);
    }

    Ok((url, schema, introspection))
}

/// Connect to the database named by `args` and read it into a project version.
pub async fn introspect_database(
    args: &ConnectionArgs,
    config: &Config,
) -> CliResult<(Dialect, ProjectVersion)> {
    let (url, schema, introspection) = resolve_connection(args, config)?;
    let dialect = dialect_for_url(&url)?;
    debug!(dialect = %dialect, schema = ?schema, "Connecting");

    let version = match dialect {
        Dialect::MySql => introspect_mysql(&url, schema, introspection).await?,
        Dialect::Postgres => introspect_postgres(&url, schema, introspection).await?,
    };
    Ok((dialect, version))
}

async fn run_introspector<S: CatalogSource>(
    source: S,
    config: IntrospectionConfig,
) -> CliResult<ProjectVersion> {
    let version = Introspector::with_config(source, config)
        .build_project_version()
        .await?;
    Ok(version)
}

#[cfg(feature = "mysql")]
async fn introspect_mysql(
    url: &str,
    schema: Option<String>,
    config: IntrospectionConfig,
) -> CliResult<ProjectVersion> {
    use schemaport_mysql::{MysqlConfig, MysqlSource};

    let mut mysql = MysqlConfig::from_url(url)?;
    if let Some(schema) = schema {
        mysql.database = schema;
    }
    let source = MysqlSource::connect(mysql).await?;
    run_introspector(source, config).await
}

#[cfg(not(feature = "mysql"))]
async fn introspect_mysql(
    _: &str,
    _: Option<String>,
    _: IntrospectionConfig,
) -> CliResult<ProjectVersion> {
    Err(CliError::Config("built without MySQL support".to_string()))
}

#[cfg(feature = "postgres")]
async fn introspect_postgres(
    url: &str,
    schema: Option<String>,
    config: IntrospectionConfig,
) -> CliResult<ProjectVersion> {
    use schemaport_postgres::{PgConfig, PgSource};

    let mut pg = PgConfig::from_url(url)?;
    if let Some(schema) = schema {
        pg = pg.schema(schema);
    }
    let source = PgSource::connect(pg).await?;
    run_introspector(source, config).await
}

#[cfg(not(feature = "postgres"))]
async fn introspect_postgres(
    _: &str,
    _: Option<String>,
    _: IntrospectionConfig,
) -> CliResult<ProjectVersion> {
    Err(CliError::Config("built without Postgres support".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ConnectionArgs {
        ConnectionArgs {
            url: None,
            schema: None,
            sample_size: None,
            max_concurrency: None,
        }
    }

    #[test]
    fn test_dialect_for_url() {
        assert_eq!(dialect_for_url("mysql://root@localhost/app").unwrap(), Dialect::MySql);
        assert_eq!(dialect_for_url("mariadb://localhost/app").unwrap(), Dialect::MySql);
        assert_eq!(
            dialect_for_url("postgresql://localhost/app").unwrap(),
            Dialect::Postgres
        );
        assert!(dialect_for_url("sqlite://app.db").is_err());
        assert!(dialect_for_url("not a url").is_err());
    }

    #[test]
    fn test_arguments_override_config() {
        let mut config = Config::default();
        config.database.url = Some("mysql://localhost/from_config".to_string());
        config.database.schema = Some("cfg".to_string());

        let mut overrides = args();
        overrides.url = Some("postgres://localhost/from_args".to_string());
        overrides.sample_size = Some(3);

        let (url, schema, introspection) = resolve_connection(&overrides, &config).unwrap();
        assert_eq!(url, "postgres://localhost/from_args");
        assert_eq!(schema.as_deref(), Some("cfg"));
        assert_eq!(introspection.sample_size, 3);
        assert_eq!(
            introspection.max_concurrency,
            config.introspection.max_concurrency
        );
    }

    #[test]
    fn test_missing_url() {
        let err = resolve_connection(&args(), &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
