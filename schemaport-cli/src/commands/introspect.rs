//! `schemaport introspect`: read a live schema into a project version file.

use crate::cli::IntrospectArgs;
use crate::config::Config;
use crate::error::CliResult;
use crate::output;

use super::introspect_database;

/// Run the introspect command
pub async fn run(args: IntrospectArgs, config: &Config) -> CliResult<()> {
    let (dialect, version) = introspect_database(&args.connection, config).await?;
    let json = version.to_json()?;

    match &args.out {
        Some(path) => {
            tokio::fs::write(path, &json).await?;
            output::success(&format!(
                "Introspected {} entities and {} relationships",
                version.entities.len(),
                version.relationships.len()
            ));
            output::kv("Dialect", dialect.as_str());
            output::kv("Output", &path.display().to_string());
        }
        None => output::artifact(&json),
    }

    for entity in &version.entities {
        let invalid: Vec<&str> = entity
            .fields
            .iter()
            .filter(|f| f.field_type.is_invalid())
            .map(|f| f.identifier.as_str())
            .collect();
        if !invalid.is_empty() {
            output::warn(&format!(
                "{}: unmapped column types, omitted from SQL: {}",
                entity.identifier,
                invalid.join(", ")
            ));
        }
    }

    Ok(())
}
