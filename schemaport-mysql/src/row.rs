//! Row decoding for MySQL catalog and sample queries.

use mysql_async::prelude::FromValue;
use mysql_async::{Row, Value};
use schemaport_introspect::SampleRow;
use schemaport_schema::{CatalogColumn, CatalogForeignKey, CatalogIndexColumn};
use serde_json::Value as JsonValue;

/// Trait for converting a MySQL row to a Rust type.
pub trait FromMysqlRow: Sized {
    /// Convert a MySQL row to this type.
    fn from_row(row: &Row) -> Result<Self, FromMysqlRowError>;
}

/// Error type for row deserialization.
#[derive(Debug)]
pub struct FromMysqlRowError {
    /// The error message.
    pub message: String,
    /// The column that caused the error, if known.
    pub column: Option<String>,
}

impl FromMysqlRowError {
    /// Create a new error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            column: None,
        }
    }

    /// Create a new error with a column name.
    pub fn with_column(message: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            column: Some(column.into()),
        }
    }
}

impl std::fmt::Display for FromMysqlRowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref column) = self.column {
            write!(f, "column '{}': {}", column, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for FromMysqlRowError {}

/// Read a nullable column by position.
fn get<T: FromValue>(row: &Row, idx: usize, name: &str) -> Result<Option<T>, FromMysqlRowError> {
    match row.get_opt::<Option<T>, usize>(idx) {
        Some(Ok(value)) => Ok(value),
        Some(Err(e)) => Err(FromMysqlRowError::with_column(e.to_string(), name)),
        None => Err(FromMysqlRowError::with_column("missing column", name)),
    }
}

/// Read a non-null column by position.
fn require<T: FromValue>(row: &Row, idx: usize, name: &str) -> Result<T, FromMysqlRowError> {
    get(row, idx, name)?.ok_or_else(|| FromMysqlRowError::with_column("unexpected NULL", name))
}

/// Decodes a row of [`queries::mysql::COLUMNS`](schemaport_introspect::queries::mysql::COLUMNS).
impl FromMysqlRow for CatalogColumn {
    fn from_row(row: &Row) -> Result<Self, FromMysqlRowError> {
        let data_type: String = require(row, 2, "DATA_TYPE")?;
        Ok(CatalogColumn {
            name: require(row, 0, "COLUMN_NAME")?,
            position: get::<u32>(row, 1, "ORDINAL_POSITION")?.unwrap_or_default(),
            column_type: get(row, 3, "COLUMN_TYPE")?.unwrap_or_else(|| data_type.clone()),
            data_type,
            column_key: get(row, 4, "COLUMN_KEY")?.unwrap_or_default(),
            default_value: get(row, 5, "COLUMN_DEFAULT")?,
            nullable: get::<String>(row, 6, "IS_NULLABLE")?.as_deref() == Some("YES"),
            max_length: get(row, 7, "CHARACTER_MAXIMUM_LENGTH")?,
        })
    }
}

/// Decodes a row of [`queries::mysql::INDEXES`](schemaport_introspect::queries::mysql::INDEXES).
impl FromMysqlRow for CatalogIndexColumn {
    fn from_row(row: &Row) -> Result<Self, FromMysqlRowError> {
        let non_unique: i64 = get(row, 3, "NON_UNIQUE")?.unwrap_or(1);
        let index_type: Option<String> = get(row, 4, "INDEX_TYPE")?;
        let collation: Option<String> = get(row, 5, "COLLATION")?;
        let constraint_type: Option<String> = get(row, 7, "CONSTRAINT_TYPE")?;
        let primary = constraint_type.as_deref() == Some("PRIMARY KEY");

        Ok(CatalogIndexColumn {
            index_name: require(row, 0, "INDEX_NAME")?,
            // functional key parts report a NULL column name
            column_name: get(row, 1, "COLUMN_NAME")?,
            seq: get::<u32>(row, 2, "SEQ_IN_INDEX")?.unwrap_or_default(),
            primary,
            unique: primary || non_unique == 0,
            fulltext: index_type.as_deref() == Some("FULLTEXT"),
            ascending: collation.as_deref() != Some("D"),
            sub_part: get(row, 6, "SUB_PART")?,
        })
    }
}

/// Decodes a row of [`queries::mysql::FOREIGN_KEYS`](schemaport_introspect::queries::mysql::FOREIGN_KEYS).
impl FromMysqlRow for CatalogForeignKey {
    fn from_row(row: &Row) -> Result<Self, FromMysqlRowError> {
        Ok(CatalogForeignKey::new(
            require::<String>(row, 0, "CONSTRAINT_NAME")?,
            require::<String>(row, 1, "COLUMN_NAME")?,
            require::<String>(row, 2, "REFERENCED_TABLE_NAME")?,
            require::<String>(row, 3, "REFERENCED_COLUMN_NAME")?,
        ))
    }
}

/// Decodes a sampled row into column name to JSON value.
impl FromMysqlRow for SampleRow {
    fn from_row(row: &Row) -> Result<Self, FromMysqlRowError> {
        let mut map = SampleRow::new();

        for (i, column) in row.columns_ref().iter().enumerate() {
            let value = row.as_ref(i).map(value_to_json).unwrap_or(JsonValue::Null);
            map.insert(column.name_str().to_string(), value);
        }

        Ok(map)
    }
}

/// Convert a driver value to JSON.
///
/// Text stays a JSON string even when it looks like JSON; the classifier
/// decides what a string means. Non-UTF-8 bytes become `null`.
pub fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::NULL => JsonValue::Null,
        Value::Bytes(bytes) => std::str::from_utf8(bytes)
            .map(|s| JsonValue::String(s.to_string()))
            .unwrap_or(JsonValue::Null),
        Value::Int(i) => JsonValue::Number((*i).into()),
        Value::UInt(u) => JsonValue::Number((*u).into()),
        Value::Float(f) => serde_json::Number::from_f64(f64::from(*f))
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Value::Double(d) => serde_json::Number::from_f64(*d)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Value::Date(year, month, day, hour, minute, second, micro) => JsonValue::String(format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:06}",
            year, month, day, hour, minute, second, micro
        )),
        Value::Time(is_neg, days, hours, minutes, seconds, micro) => {
            let sign = if *is_neg { "-" } else { "" };
            JsonValue::String(format!(
                "{}{}:{:02}:{:02}.{:06}",
                sign,
                days * 24 + u32::from(*hours),
                minutes,
                seconds,
                micro
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mysql_row_error_display() {
        let err = FromMysqlRowError::with_column("unexpected NULL", "DATA_TYPE");
        assert_eq!(err.to_string(), "column 'DATA_TYPE': unexpected NULL");
        assert_eq!(FromMysqlRowError::new("boom").to_string(), "boom");
    }

    #[test]
    fn test_value_to_json_text_stays_string() {
        let json = value_to_json(&Value::Bytes(b"[1,2]".to_vec()));
        assert_eq!(json, JsonValue::String("[1,2]".to_string()));

        let json = value_to_json(&Value::Bytes(b"ada@example.com".to_vec()));
        assert_eq!(json, JsonValue::String("ada@example.com".to_string()));
    }

    #[test]
    fn test_value_to_json_scalars() {
        assert_eq!(value_to_json(&Value::NULL), JsonValue::Null);
        assert_eq!(value_to_json(&Value::Int(-4)), serde_json::json!(-4));
        assert_eq!(value_to_json(&Value::UInt(7)), serde_json::json!(7));
        assert_eq!(value_to_json(&Value::Double(f64::NAN)), JsonValue::Null);
        assert_eq!(value_to_json(&Value::Bytes(vec![0xff, 0xfe])), JsonValue::Null);
    }

    #[test]
    fn test_value_to_json_temporal() {
        assert_eq!(
            value_to_json(&Value::Date(2024, 3, 9, 14, 5, 0, 0)),
            JsonValue::String("2024-03-09T14:05:00.000000".to_string())
        );
        assert_eq!(
            value_to_json(&Value::Time(true, 1, 2, 3, 4, 0)),
            JsonValue::String("-26:03:04.000000".to_string())
        );
    }
}
