//! # schemaport-introspect
//!
//! Reads a live MySQL or Postgres schema into the canonical model.
//!
//! This crate provides:
//! - The [`CatalogSource`] capability implemented by the driver crates
//! - Catalog SQL shared by those drivers ([`queries`])
//! - The sample classifier that refines ambiguous column types
//! - The [`Introspector`], which builds a [`ProjectVersion`] with bounded
//!   concurrency
//!
//! ## Example
//!
//! ```rust,ignore
//! use schemaport_introspect::{Introspector, IntrospectionConfig};
//! use schemaport_mysql::{MysqlConfig, MysqlSource};
//!
//! let source = MysqlSource::connect(MysqlConfig::from_url("mysql://root@localhost/app")?).await?;
//! let version = Introspector::with_config(source, IntrospectionConfig::default())
//!     .build_project_version()
//!     .await?;
//! ```
//!
//! [`ProjectVersion`]: schemaport_schema::ProjectVersion

pub mod classifier;
pub mod config;
pub mod error;
pub mod executor;
pub mod introspector;
pub mod memory;
pub mod queries;
pub mod source;

pub use classifier::{SampleRow, SampleSet};
pub use config::IntrospectionConfig;
pub use error::{IntrospectError, IntrospectResult};
pub use executor::BoundedExecutor;
pub use introspector::Introspector;
pub use memory::MemorySource;
pub use source::{CatalogSource, validate_identifier};
