//! schemaport CLI - command-line interface for schemaport.

use clap::Parser;

use schemaport_cli::cli::{Cli, Command};
use schemaport_cli::commands;
use schemaport_cli::config::Config;
use schemaport_cli::error::CliResult;
use schemaport_cli::logging;
use schemaport_cli::output;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        output::newline();
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let config = Config::discover(cli.config.as_deref())?;

    match cli.command {
        Command::Introspect(args) => commands::introspect::run(args, &config).await,
        Command::Generate(args) => commands::generate::run(args, &config).await,
        Command::Sql(args) => commands::sql::run(args, &config).await,
    }
}
