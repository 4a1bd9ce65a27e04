//! CLI argument definitions using clap.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use schemaport_generate::Action;
use schemaport_schema::Dialect;
use uuid::Uuid;

use crate::config::DATABASE_URL_ENV;

/// schemaport - translate schemas between live databases and SQL
#[derive(Parser, Debug)]
#[command(name = "schemaport")]
#[command(author = "Pegasus Heavy Industries LLC")]
#[command(version)]
#[command(about = "schemaport - translate schemas between live databases and SQL", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file (defaults to ./schemaport.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read a live database into a project version (JSON)
    Introspect(IntrospectArgs),

    /// Render SQL from a project version file
    Generate(GenerateArgs),

    /// Introspect a database and print its CREATE statements
    Sql(SqlArgs),
}

// =============================================================================
// Shared connection arguments
// =============================================================================

/// Database connection arguments
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Database connection URL (mysql://, mariadb://, postgres://)
    #[arg(short, long, env = DATABASE_URL_ENV)]
    pub url: Option<String>,

    /// Schema to read
    #[arg(short, long)]
    pub schema: Option<String>,

    /// Rows sampled per table for type refinement
    #[arg(long)]
    pub sample_size: Option<usize>,

    /// Tables read concurrently
    #[arg(long)]
    pub max_concurrency: Option<usize>,
}

// =============================================================================
// Introspect Command
// =============================================================================

/// Arguments for the `introspect` command
#[derive(Args, Debug)]
pub struct IntrospectArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Write the project version to this file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

// =============================================================================
// Generate Command
// =============================================================================

/// Arguments for the `generate` command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Project version JSON file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Target dialect (mysql, pg)
    #[arg(short, long)]
    pub dialect: Option<Dialect>,

    /// Actions to render (create, insert, update, delete, select_simple,
    /// select_indexed_simple, select_indexed_combined)
    #[arg(short, long, value_delimiter = ',')]
    pub action: Vec<Action>,

    /// Restrict rendering to these entity ids
    #[arg(short, long, value_delimiter = ',')]
    pub entity: Vec<Uuid>,

    /// Output root; artifacts land in <out>/<execution id>/<action>.sql
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

// =============================================================================
// Sql Command
// =============================================================================

/// Arguments for the `sql` command
#[derive(Args, Debug)]
pub struct SqlArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Target dialect (defaults to the source dialect)
    #[arg(short, long)]
    pub dialect: Option<Dialect>,

    /// Write the SQL to this file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}
