//! Mapping between catalog column types and canonical field types.
//!
//! Each dialect module exposes two functions:
//!
//! - `column_to_field_type` refines a [`CatalogColumn`] into a [`FieldType`],
//!   consulting a [`SampleProbe`] for types the catalog alone cannot tell
//!   apart (UUIDs stored as `CHAR(36)`, emails and URLs stored as `VARCHAR`,
//!   arrays stored as `JSON`).
//! - `field_type_to_sql` renders a [`FieldType`] as a column type, returning
//!   `None` for [`FieldType::Invalid`].
//!
//! [`CatalogColumn`]: crate::catalog::CatalogColumn
//! [`FieldType`]: crate::model::FieldType
//! [`FieldType::Invalid`]: crate::model::FieldType::Invalid

pub mod mysql;
pub mod postgres;

use crate::catalog::CatalogColumn;
use crate::dialect::Dialect;
use crate::model::FieldType;

/// Evidence about the contents of a column, gathered from sampled rows.
pub trait SampleProbe {
    /// Every sampled value of the column parses as a UUID.
    fn is_uuid(&self, column: &str) -> bool;

    /// Every sampled value of the column is an email address.
    fn is_email(&self, column: &str) -> bool;

    /// Every sampled value of the column is an absolute URL.
    fn is_url(&self, column: &str) -> bool;

    /// Every sampled value of the column is a JSON array.
    fn is_json_array(&self, column: &str) -> bool;
}

/// A probe for tables without samples: every check is negative.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSamples;

impl SampleProbe for NoSamples {
    fn is_uuid(&self, _column: &str) -> bool {
        false
    }

    fn is_email(&self, _column: &str) -> bool {
        false
    }

    fn is_url(&self, _column: &str) -> bool {
        false
    }

    fn is_json_array(&self, _column: &str) -> bool {
        false
    }
}

/// Map a catalog column to a canonical type for the given dialect.
pub fn column_to_field_type(
    dialect: Dialect,
    column: &CatalogColumn,
    probe: &dyn SampleProbe,
) -> FieldType {
    match dialect {
        Dialect::MySql => mysql::column_to_field_type(column, probe),
        Dialect::Postgres => postgres::column_to_field_type(column, probe),
    }
}

/// Render a canonical type as a column type for the given dialect.
pub fn field_type_to_sql(dialect: Dialect, field_type: &FieldType) -> Option<String> {
    match dialect {
        Dialect::MySql => mysql::field_type_to_sql(field_type),
        Dialect::Postgres => postgres::field_type_to_sql(field_type),
    }
}

fn sized(name: &str, max_size: u64, default: u64) -> String {
    let size = if max_size == 0 { default } else { max_size };
    format!("{}({})", name, size)
}
