//! PostgreSQL row decoding for catalog and sample queries.

use schemaport_introspect::SampleRow;
use schemaport_schema::{CatalogColumn, CatalogForeignKey, CatalogIndexColumn};
use tokio_postgres::Row;
use tokio_postgres::types::FromSql;

use crate::error::{PgError, PgResult};

/// Extension trait for PostgreSQL rows.
pub trait PgRow {
    /// Get a column value by name.
    fn get_value<T>(&self, column: &str) -> PgResult<T>
    where
        T: for<'a> FromSql<'a>;
}

impl PgRow for Row {
    fn get_value<T>(&self, column: &str) -> PgResult<T>
    where
        T: for<'a> FromSql<'a>,
    {
        self.try_get(column).map_err(|e| {
            PgError::deserialization(format!("failed to get column '{}': {}", column, e))
        })
    }
}

/// Trait for converting a PostgreSQL row to a catalog type.
pub trait FromPgRow: Sized {
    /// Convert a row to this type.
    fn from_row(row: &Row) -> PgResult<Self>;
}

impl FromPgRow for CatalogColumn {
    fn from_row(row: &Row) -> PgResult<Self> {
        let data_type: String = row.get_value("data_type")?;
        let position: i32 = row.get_value("ordinal_position")?;
        let max_length: Option<i64> = row.get_value("character_maximum_length")?;

        Ok(CatalogColumn {
            name: row.get_value("column_name")?,
            position: u32::try_from(position).unwrap_or_default(),
            column_type: data_type.clone(),
            data_type,
            max_length: max_length.and_then(|len| u64::try_from(len).ok()),
            nullable: row.get_value::<Option<bool>>("is_nullable")?.unwrap_or(true),
            column_key: String::new(),
            default_value: row.get_value("column_default")?,
        })
    }
}

impl FromPgRow for CatalogIndexColumn {
    fn from_row(row: &Row) -> PgResult<Self> {
        let seq: i32 = row.get_value("seq")?;
        let primary: bool = row.get_value("is_primary")?;

        Ok(CatalogIndexColumn {
            index_name: row.get_value("index_name")?,
            column_name: row.get_value("column_name")?,
            seq: u32::try_from(seq).unwrap_or_default(),
            primary,
            unique: primary || row.get_value::<bool>("is_unique")?,
            fulltext: false,
            ascending: row.get_value::<Option<bool>>("ascending")?.unwrap_or(true),
            sub_part: None,
        })
    }
}

impl FromPgRow for CatalogForeignKey {
    fn from_row(row: &Row) -> PgResult<Self> {
        Ok(CatalogForeignKey::new(
            row.get_value::<String>("constraint_name")?,
            row.get_value::<String>("column_name")?,
            row.get_value::<String>("referenced_table")?,
            row.get_value::<String>("referenced_column")?,
        ))
    }
}

/// Sample rows arrive as a single `row_to_json` text column.
impl FromPgRow for SampleRow {
    fn from_row(row: &Row) -> PgResult<Self> {
        let text: String = row
            .try_get(0)
            .map_err(|e| PgError::deserialization(format!("failed to get sample row: {}", e)))?;
        parse_sample(&text)
    }
}

/// Parse one `row_to_json` document into a sample row.
pub fn parse_sample(text: &str) -> PgResult<SampleRow> {
    serde_json::from_str(text)
        .map_err(|e| PgError::deserialization(format!("invalid sample row JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_sample() {
        let row = parse_sample(
            r#"{"id":"9b2f6c1e-0d4a-4c55-8d7e-3f1a2b9c4d10","tags":["a","b"],"deleted_at":null}"#,
        )
        .unwrap();
        assert_eq!(row.len(), 3);
        assert_eq!(row["tags"], json!(["a", "b"]));
        assert!(row["deleted_at"].is_null());
    }

    #[test]
    fn test_parse_sample_rejects_non_object() {
        assert!(parse_sample("[1,2,3]").is_err());
        assert!(parse_sample("not json").is_err());
    }
}
