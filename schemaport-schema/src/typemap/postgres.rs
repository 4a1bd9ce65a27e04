//! Postgres family type mapping.

use super::{SampleProbe, sized};
use crate::catalog::CatalogColumn;
use crate::model::{FieldType, IntegerSize, StorageMode};

const TEXT_SIZE: u64 = 65_535;

/// Map an `information_schema.columns` row to a canonical type.
pub fn column_to_field_type(column: &CatalogColumn, probe: &dyn SampleProbe) -> FieldType {
    let data_type = column.data_type.to_ascii_lowercase();

    match data_type.as_str() {
        "uuid" => FieldType::Uuid,
        "character" | "char" => {
            let max = column.max_length.unwrap_or(0);
            if max == 36 && probe.is_uuid(&column.name) {
                FieldType::Uuid
            } else {
                FieldType::char(max)
            }
        }
        "boolean" => FieldType::Boolean,
        "smallint" => FieldType::integer(IntegerSize::Sixteen),
        "integer" => FieldType::integer(IntegerSize::ThirtyTwo),
        "bigint" => FieldType::integer(IntegerSize::SixtyFour),
        "double precision" | "real" => FieldType::Float,
        "numeric" | "decimal" => FieldType::Decimal,
        "character varying" | "varchar" => {
            if probe.is_email(&column.name) {
                FieldType::Email
            } else if probe.is_url(&column.name) {
                FieldType::Url
            } else {
                FieldType::varchar(column.max_length.unwrap_or(255))
            }
        }
        "text" => FieldType::text(column.max_length.unwrap_or(TEXT_SIZE)),
        "bytea" => FieldType::binary_file(column.max_length.unwrap_or(TEXT_SIZE)),
        "json" | "jsonb" => {
            if probe.is_json_array(&column.name) {
                FieldType::Array
            } else {
                FieldType::Json
            }
        }
        "array" => FieldType::Array,
        "date" => FieldType::Date,
        "timestamp" | "timestamp without time zone" | "timestamp with time zone" => {
            FieldType::DateTime
        }
        "time" | "time without time zone" | "time with time zone" => FieldType::Time,
        _ => FieldType::Invalid,
    }
}

/// Render a canonical type as a Postgres column type.
pub fn field_type_to_sql(field_type: &FieldType) -> Option<String> {
    let sql = match field_type {
        FieldType::Uuid => "UUID".to_string(),
        FieldType::Integer(config) => match config.size {
            Some(IntegerSize::Eight) | Some(IntegerSize::Sixteen) => "SMALLINT",
            Some(IntegerSize::TwentyFour) | Some(IntegerSize::ThirtyTwo) | None => "INTEGER",
            Some(IntegerSize::SixtyFour) => "BIGINT",
        }
        .to_string(),
        FieldType::Float => "DOUBLE PRECISION".to_string(),
        FieldType::Decimal => "DECIMAL".to_string(),
        FieldType::Boolean => "BOOLEAN".to_string(),
        FieldType::Char(c) => sized("CHAR", c.max_size, 255),
        FieldType::Varchar(c) | FieldType::Encrypted(c) => sized("VARCHAR", c.max_size, 255),
        FieldType::Text(_) | FieldType::RichText | FieldType::Code | FieldType::Markdown => {
            "TEXT".to_string()
        }
        FieldType::Email | FieldType::Slug => "VARCHAR(512)".to_string(),
        FieldType::Url | FieldType::Location => "VARCHAR(2048)".to_string(),
        FieldType::Phone | FieldType::Color => "VARCHAR(50)".to_string(),
        FieldType::File(c) | FieldType::Image(c) | FieldType::Audio(c) | FieldType::Video(c) => {
            match c.storage {
                StorageMode::Binary => "BYTEA",
                StorageMode::ObjectStore => "VARCHAR(512)",
            }
            .to_string()
        }
        FieldType::Enum(c) if c.allow_multiple => "JSON".to_string(),
        FieldType::Enum(_) => "INTEGER".to_string(),
        FieldType::Json | FieldType::Array => "JSON".to_string(),
        FieldType::Date => "DATE".to_string(),
        FieldType::DateTime => "TIMESTAMP".to_string(),
        FieldType::Time => "TIME".to_string(),
        FieldType::Invalid => return None,
    };
    Some(sql)
}
