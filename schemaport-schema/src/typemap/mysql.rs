//! MySQL family type mapping.

use super::{SampleProbe, sized};
use crate::catalog::CatalogColumn;
use crate::model::{FieldType, FileConfig, IntegerSize, StorageMode};

const TINY: u64 = 255;
const REGULAR: u64 = 65_535;
const MEDIUM: u64 = 16_777_215;
const LONG: u64 = 4_294_967_295;

/// Map an `INFORMATION_SCHEMA.COLUMNS` row to a canonical type.
pub fn column_to_field_type(column: &CatalogColumn, probe: &dyn SampleProbe) -> FieldType {
    let data_type = column.data_type.to_ascii_lowercase();
    let len = |default: u64| column.max_length.unwrap_or(default);

    match data_type.as_str() {
        "char" => {
            let max = len(0);
            if max == 36 && probe.is_uuid(&column.name) {
                FieldType::Uuid
            } else {
                FieldType::char(max)
            }
        }
        "tinyint" if column.column_type.eq_ignore_ascii_case("tinyint(1)") => FieldType::Boolean,
        "tinyint" => FieldType::integer(IntegerSize::Eight),
        "smallint" => FieldType::integer(IntegerSize::Sixteen),
        "mediumint" => FieldType::integer(IntegerSize::TwentyFour),
        "int" | "integer" => FieldType::integer(IntegerSize::ThirtyTwo),
        "bigint" => FieldType::integer(IntegerSize::SixtyFour),
        "double" | "float" | "real" => FieldType::Float,
        "decimal" | "numeric" => FieldType::Decimal,
        "varchar" => {
            if probe.is_email(&column.name) {
                FieldType::Email
            } else if probe.is_url(&column.name) {
                FieldType::Url
            } else {
                FieldType::varchar(len(255))
            }
        }
        "tinytext" => FieldType::text(len(TINY)),
        "text" => FieldType::text(len(REGULAR)),
        "mediumtext" => FieldType::text(len(MEDIUM)),
        "longtext" => FieldType::text(len(LONG)),
        "tinyblob" => FieldType::binary_file(len(TINY)),
        "blob" | "binary" | "varbinary" => FieldType::binary_file(len(REGULAR)),
        "mediumblob" => FieldType::binary_file(len(MEDIUM)),
        "longblob" => FieldType::binary_file(len(LONG)),
        "json" => {
            if probe.is_json_array(&column.name) {
                FieldType::Array
            } else {
                FieldType::Json
            }
        }
        "date" => FieldType::Date,
        "datetime" | "timestamp" => FieldType::DateTime,
        "time" => FieldType::Time,
        _ => FieldType::Invalid,
    }
}

/// Render a canonical type as a MySQL column type.
pub fn field_type_to_sql(field_type: &FieldType) -> Option<String> {
    let sql = match field_type {
        FieldType::Uuid => "CHAR(36)".to_string(),
        FieldType::Integer(config) => match config.size {
            Some(IntegerSize::Eight) => "TINYINT",
            Some(IntegerSize::Sixteen) => "SMALLINT",
            Some(IntegerSize::TwentyFour) => "MEDIUMINT",
            Some(IntegerSize::ThirtyTwo) | None => "INT",
            Some(IntegerSize::SixtyFour) => "BIGINT",
        }
        .to_string(),
        FieldType::Float => "DOUBLE".to_string(),
        FieldType::Decimal => "DECIMAL".to_string(),
        FieldType::Boolean => "TINYINT(1)".to_string(),
        FieldType::Char(c) => sized("CHAR", c.max_size, 255),
        FieldType::Varchar(c) | FieldType::Encrypted(c) => sized("VARCHAR", c.max_size, 255),
        FieldType::Text(c) => text_tier(c.max_size).to_string(),
        FieldType::RichText | FieldType::Code | FieldType::Markdown => "TEXT".to_string(),
        FieldType::Email | FieldType::Url | FieldType::Location | FieldType::Slug => {
            "VARCHAR(512)".to_string()
        }
        FieldType::Phone | FieldType::Color => "VARCHAR(50)".to_string(),
        FieldType::File(c) | FieldType::Image(c) | FieldType::Audio(c) | FieldType::Video(c) => {
            file_type(c).to_string()
        }
        FieldType::Enum(c) if c.allow_multiple => "JSON".to_string(),
        FieldType::Enum(_) => "INT".to_string(),
        FieldType::Json | FieldType::Array => "JSON".to_string(),
        FieldType::Date => "DATE".to_string(),
        FieldType::DateTime => "DATETIME".to_string(),
        FieldType::Time => "TIME".to_string(),
        FieldType::Invalid => return None,
    };
    Some(sql)
}

fn text_tier(max_size: u64) -> &'static str {
    match max_size {
        0 => "TEXT",
        1..=TINY => "TINYTEXT",
        ..=REGULAR => "TEXT",
        ..=MEDIUM => "MEDIUMTEXT",
        _ => "LONGTEXT",
    }
}

fn file_type(config: &FileConfig) -> &'static str {
    match (config.storage, config.max_size) {
        (StorageMode::ObjectStore, _) => "VARCHAR(512)",
        (StorageMode::Binary, 0) => "BLOB",
        (StorageMode::Binary, 1..=TINY) => "TINYBLOB",
        (StorageMode::Binary, ..=REGULAR) => "BLOB",
        (StorageMode::Binary, ..=MEDIUM) => "MEDIUMBLOB",
        (StorageMode::Binary, _) => "LONGBLOB",
    }
}
