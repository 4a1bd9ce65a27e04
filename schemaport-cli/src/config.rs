//! CLI configuration handling.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use schemaport_generate::Action;
use schemaport_introspect::IntrospectionConfig;
use schemaport_schema::Dialect;

use crate::error::CliResult;

/// Default config file name
pub const CONFIG_FILE_NAME: &str = "schemaport.toml";

/// Environment variable holding the database URL
pub const DATABASE_URL_ENV: &str = "SCHEMAPORT_DATABASE_URL";

/// schemaport CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database connection
    pub database: DatabaseConfig,

    /// Introspection settings
    pub introspection: IntrospectionConfig,

    /// Generation settings
    pub generate: GenerateConfig,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `path` if given, else `schemaport.toml` when present, else defaults
    pub fn discover(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(CONFIG_FILE_NAME);
                if default.exists() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection URL (`mysql://`, `mariadb://`, `postgres://`)
    pub url: Option<String>,

    /// Schema to read; the URL database for MySQL, `public` for Postgres
    pub schema: Option<String>,
}

/// Generation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Target dialect
    pub dialect: Dialect,

    /// Actions rendered when none are given on the command line
    pub actions: Vec<Action>,

    /// Output root; artifacts go to stdout when unset
    pub output: Option<PathBuf>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::MySql,
            actions: vec![Action::Create],
            output: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_config() {
        let config: Config = toml::from_str(
            r#"
            [database]
            url = "mysql://root@localhost/app"
            schema = "app"

            [introspection]
            sample_size = 20
            max_concurrency = 4
            exclude_tables = ["schema_migrations"]

            [generate]
            dialect = "pg"
            actions = ["create", "select_indexed_simple"]
            output = "executions"
            "#,
        )
        .unwrap();

        assert_eq!(config.database.url.as_deref(), Some("mysql://root@localhost/app"));
        assert_eq!(config.database.schema.as_deref(), Some("app"));
        assert_eq!(config.introspection.sample_size, 20);
        assert_eq!(config.introspection.max_concurrency, 4);
        assert!(!config.introspection.should_include_table("schema_migrations"));
        assert_eq!(config.generate.dialect, Dialect::Postgres);
        assert_eq!(
            config.generate.actions,
            [Action::Create, Action::SelectIndexedSimple]
        );
        assert_eq!(config.generate.output, Some(PathBuf::from("executions")));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.generate.actions, [Action::Create]);
        assert_eq!(config.introspection, IntrospectionConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[generate]\ndialect = \"postgres\"\n").unwrap();

        let config = Config::discover(Some(&path)).unwrap();
        assert_eq!(config.generate.dialect, Dialect::Postgres);
    }

    #[test]
    fn test_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[generate\n").unwrap();

        assert!(Config::load(&path).is_err());
    }
}
