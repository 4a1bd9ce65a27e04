//! # schemaport-schema
//!
//! Dialect-neutral schema model for schemaport.
//!
//! This crate provides:
//! - The canonical model: [`ProjectVersion`], [`Entity`], [`Field`], [`Index`]
//!   and [`Relationship`]
//! - The [`Dialect`] tag shared by introspection and generation
//! - Normalized catalog row shapes read by the dialect drivers
//! - The type mapper between catalog column types and [`FieldType`]
//!
//! ## Example
//!
//! ```rust
//! use schemaport_schema::{Dialect, Entity, Field, FieldType, ProjectVersion};
//! use schemaport_schema::typemap;
//!
//! let users = Entity::new("users")
//!     .with_field(Field::new("id", FieldType::Uuid).key(true).required(true));
//! let version = ProjectVersion::new().with_entity(users);
//! assert!(version.validate().is_ok());
//!
//! let sql = typemap::field_type_to_sql(Dialect::MySql, &FieldType::Uuid);
//! assert_eq!(sql.as_deref(), Some("CHAR(36)"));
//! ```

pub mod catalog;
pub mod dialect;
pub mod error;
pub mod model;
pub mod typemap;

pub use catalog::{CatalogColumn, CatalogForeignKey, CatalogIndexColumn};
pub use dialect::Dialect;
pub use error::{SchemaError, SchemaResult};
pub use model::*;
pub use typemap::{NoSamples, SampleProbe};
