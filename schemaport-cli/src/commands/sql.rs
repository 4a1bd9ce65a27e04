//! `schemaport sql`: introspect a database and print its CREATE statements.

use schemaport_generate::{Action, GenerateRequest, Generator, NullSink};

use crate::cli::SqlArgs;
use crate::config::Config;
use crate::error::CliResult;
use crate::output;

use super::introspect_database;

/// Run the sql command
pub async fn run(args: SqlArgs, config: &Config) -> CliResult<()> {
    let (source_dialect, version) = introspect_database(&args.connection, config).await?;
    let dialect = args.dialect.unwrap_or(source_dialect);

    let request = GenerateRequest::new(dialect, version).action(Action::Create);
    let response = Generator::new(NullSink).generate(&request).await?;
    let sql = response.get(Action::Create).unwrap_or_default();

    match &args.out {
        Some(path) => {
            tokio::fs::write(path, sql).await?;
            output::header("schemaport sql");
            output::kv("Source", source_dialect.as_str());
            output::kv("Target", dialect.as_str());
            output::kv("Output", &path.display().to_string());
            output::success("CREATE statements written");
        }
        None => output::artifact(sql),
    }

    Ok(())
}
