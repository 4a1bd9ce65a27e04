//! `schemaport generate`: render SQL from a project version file.

use std::path::Path;

use schemaport_generate::{
    DirectorySink, GenerateRequest, GenerateResponse, Generator, NullSink, OutputSink,
};
use schemaport_schema::ProjectVersion;

use crate::cli::GenerateArgs;
use crate::config::Config;
use crate::error::{CliError, CliResult};
use crate::output;

/// Read a project version file.
pub async fn load_version(path: &Path) -> CliResult<ProjectVersion> {
    let json = tokio::fs::read_to_string(path).await.map_err(|e| {
        CliError::Model(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let version = ProjectVersion::from_json(&json)?;
    version.validate()?;
    Ok(version)
}

/// Build the request from arguments, falling back to the config file.
pub fn build_request(
    args: &GenerateArgs,
    config: &Config,
    version: ProjectVersion,
) -> GenerateRequest {
    let dialect = args.dialect.unwrap_or(config.generate.dialect);
    let actions = if args.action.is_empty() {
        config.generate.actions.clone()
    } else {
        args.action.clone()
    };

    let mut request = GenerateRequest::new(dialect, version).actions(actions);
    request.entities = args.entity.clone();
    request
}

/// Run the generate command
pub async fn run(args: GenerateArgs, config: &Config) -> CliResult<()> {
    let version = load_version(&args.input).await?;
    let request = build_request(&args, config, version);

    match args.out.as_ref().or(config.generate.output.as_ref()) {
        Some(root) => {
            let response = execute(DirectorySink::new(root), &request).await?;
            output::success(&format!(
                "Rendered {} actions for {}",
                response.results.len(),
                request.dialect
            ));
            output::info(&format!("Execution {}", response.execution_id));
            for result in &response.results {
                if let Some(path) = &result.path {
                    output::list_item(&path.display().to_string());
                }
            }
        }
        None => {
            let response = execute(NullSink, &request).await?;
            for result in &response.results {
                output::artifact(&result.data);
            }
        }
    }

    Ok(())
}

async fn execute<S: OutputSink>(sink: S, request: &GenerateRequest) -> CliResult<GenerateResponse> {
    Ok(Generator::new(sink).generate(request).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemaport_generate::Action;
    use schemaport_schema::Dialect;
    use std::path::PathBuf;

    fn args() -> GenerateArgs {
        GenerateArgs {
            input: PathBuf::from("version.json"),
            dialect: None,
            action: Vec::new(),
            entity: Vec::new(),
            out: None,
        }
    }

    #[test]
    fn test_request_falls_back_to_config() {
        let mut config = Config::default();
        config.generate.dialect = Dialect::Postgres;
        config.generate.actions = vec![Action::Insert, Action::Delete];

        let request = build_request(&args(), &config, ProjectVersion::new());
        assert_eq!(request.dialect, Dialect::Postgres);
        assert_eq!(request.actions, [Action::Insert, Action::Delete]);
    }

    #[test]
    fn test_arguments_win() {
        let mut overrides = args();
        overrides.dialect = Some(Dialect::MySql);
        overrides.action = vec![Action::SelectSimple];

        let mut config = Config::default();
        config.generate.dialect = Dialect::Postgres;

        let request = build_request(&overrides, &config, ProjectVersion::new());
        assert_eq!(request.dialect, Dialect::MySql);
        assert_eq!(request.actions, [Action::SelectSimple]);
    }

    #[tokio::test]
    async fn test_load_version_missing_file() {
        let err = load_version(Path::new("/nonexistent/version.json")).await.unwrap_err();
        assert!(matches!(err, CliError::Model(_)));
    }
}
