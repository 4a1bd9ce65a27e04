//! # schemaport-generate
//!
//! Renders a [`ProjectVersion`](schemaport_schema::ProjectVersion) into SQL
//! for MySQL or Postgres.
//!
//! Entities are ordered so that foreign key targets come first, projected into
//! per-dialect view models, and handed to one [`Template`] per requested
//! [`Action`]. Each artifact is passed to an [`OutputSink`].
//!
//! ```rust,ignore
//! use schemaport_generate::{Action, DirectorySink, GenerateRequest, Generator};
//! use schemaport_schema::Dialect;
//!
//! let request = GenerateRequest::new(Dialect::Postgres, version)
//!     .action(Action::Create)
//!     .action(Action::SelectIndexedSimple);
//!
//! let response = Generator::new(DirectorySink::new("executions"))
//!     .generate(&request)
//!     .await?;
//! println!("{}", response.get(Action::Create).unwrap_or_default());
//! ```

pub mod action;
pub mod error;
pub mod escape;
pub mod generator;
pub mod render;
pub mod resolve;
pub mod select;
pub mod sink;
pub mod sort;
pub mod templates;
pub mod view;

pub use action::Action;
pub use error::{GenerateError, GenerateResult};
pub use escape::{escape_value, quote_value, unescape_value};
pub use generator::{ActionResult, GenerateRequest, GenerateResponse, Generator};
pub use render::{build_schema_entities, insert_with_values, update_with_values};
pub use resolve::resolve_constraints;
pub use select::{MAX_COMBINABLE, SelectOptions, combinations, resolve_select_statements};
pub use sink::{DirectorySink, NullSink, OutputSink};
pub use sort::sort_entities;
pub use templates::{RenderContext, Template, TemplateRegistry};
pub use view::{
    SchemaConstraint, SchemaEntity, SchemaField, SchemaIndex, SchemaIndexColumn,
    SchemaSelectStatement,
};
