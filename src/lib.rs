//! # schemaport
//!
//! Bidirectional schema translation between live MySQL/Postgres catalogs and
//! a dialect-neutral model.
//!
//! schemaport provides:
//! - A canonical model of entities, fields, indexes and relationships
//! - Introspection of MySQL and Postgres catalogs, refined by sampled rows
//! - Type mapping between the model and each dialect
//! - SQL rendering: DDL, parameterized DML and synthesized lookup queries
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use schemaport::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = MysqlSource::connect(MysqlConfig::from_url("mysql://root@localhost/app")?).await?;
//!     let version = Introspector::new(source).build_project_version().await?;
//!
//!     let request = GenerateRequest::new(Dialect::Postgres, version).action(Action::Create);
//!     let response = Generator::new(NullSink).generate(&request).await?;
//!     println!("{}", response.get(Action::Create).unwrap_or_default());
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Canonical model, catalog rows and type mapping.
pub mod schema {
    pub use schemaport_schema::*;
}

/// Catalog introspection.
pub mod introspect {
    pub use schemaport_introspect::*;
}

/// SQL rendering.
pub mod generate {
    pub use schemaport_generate::*;
}

/// MySQL catalog source.
#[cfg(feature = "mysql")]
#[cfg_attr(docsrs, doc(cfg(feature = "mysql")))]
pub mod mysql {
    pub use schemaport_mysql::*;
}

/// Postgres catalog source.
#[cfg(feature = "postgres")]
#[cfg_attr(docsrs, doc(cfg(feature = "postgres")))]
pub mod postgres {
    pub use schemaport_postgres::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::generate::{
        Action, DirectorySink, GenerateRequest, GenerateResponse, Generator, NullSink,
        OutputSink, TemplateRegistry,
    };
    pub use crate::introspect::{CatalogSource, IntrospectionConfig, Introspector};
    #[cfg(feature = "mysql")]
    pub use crate::mysql::{MysqlConfig, MysqlSource};
    #[cfg(feature = "postgres")]
    pub use crate::postgres::{PgConfig, PgSource};
    pub use crate::schema::{Dialect, Entity, Field, FieldType, ProjectVersion, Relationship};
}

// Re-export key types at the crate root
pub use schemaport_generate::{GenerateError, Generator};
pub use schemaport_introspect::{IntrospectError, Introspector};
pub use schemaport_schema::{Dialect, ProjectVersion, SchemaError};
