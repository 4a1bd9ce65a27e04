//! schemaport CLI - command-line interface for schemaport.
//!
//! Introspects live MySQL or Postgres schemas into project version files
//! and renders SQL from them.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
