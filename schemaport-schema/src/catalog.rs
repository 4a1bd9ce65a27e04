//! Raw catalog rows, as read from `INFORMATION_SCHEMA` or `pg_catalog`.
//!
//! Both dialect drivers normalize their query results into these shapes so
//! the type mapper and the introspector work on a single representation.

use serde::{Deserialize, Serialize};

use crate::model::IndexKind;

/// One column of a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogColumn {
    /// Column name.
    pub name: String,
    /// 1-based physical position.
    pub position: u32,
    /// Bare type name (`DATA_TYPE`).
    pub data_type: String,
    /// Full type with modifiers (MySQL `COLUMN_TYPE`; Postgres repeats `data_type`).
    pub column_type: String,
    /// `CHARACTER_MAXIMUM_LENGTH`, when the catalog reports one.
    pub max_length: Option<u64>,
    /// Whether NULL is allowed.
    pub nullable: bool,
    /// MySQL `COLUMN_KEY` (`PRI`, `UNI`, `MUL` or empty).
    pub column_key: String,
    /// Default expression, if any.
    pub default_value: Option<String>,
}

impl CatalogColumn {
    /// Create a new nullable column.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        let data_type = data_type.into();
        Self {
            name: name.into(),
            column_type: data_type.clone(),
            data_type,
            nullable: true,
            ..Default::default()
        }
    }

    /// Set the full column type.
    pub fn column_type(mut self, column_type: impl Into<String>) -> Self {
        self.column_type = column_type.into();
        self
    }

    /// Set the maximum character length.
    pub fn max_length(mut self, max_length: u64) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Set the nullability.
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Set the MySQL column key.
    pub fn column_key(mut self, key: impl Into<String>) -> Self {
        self.column_key = key.into();
        self
    }

    /// Set the physical position.
    pub fn position(mut self, position: u32) -> Self {
        self.position = position;
        self
    }
}

/// One column of one index. Rows of the same index share `index_name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogIndexColumn {
    /// Index name.
    pub index_name: String,
    /// Column name; `None` for expression columns.
    pub column_name: Option<String>,
    /// 1-based position in the index.
    pub seq: u32,
    /// Backs the primary key.
    pub primary: bool,
    /// Enforces uniqueness.
    pub unique: bool,
    /// Full-text index.
    pub fulltext: bool,
    /// Ascending sort order.
    pub ascending: bool,
    /// MySQL `SUB_PART` prefix length.
    pub sub_part: Option<u32>,
}

impl CatalogIndexColumn {
    /// Create a new ascending plain index column.
    pub fn new(index_name: impl Into<String>, column_name: impl Into<String>, seq: u32) -> Self {
        Self {
            index_name: index_name.into(),
            column_name: Some(column_name.into()),
            seq,
            ascending: true,
            ..Default::default()
        }
    }

    /// Mark as a primary key column.
    pub fn primary(mut self) -> Self {
        self.primary = true;
        self.unique = true;
        self
    }

    /// Mark as a unique index column.
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Mark as a full-text index column.
    pub fn fulltext(mut self) -> Self {
        self.fulltext = true;
        self
    }

    /// Mark as descending.
    pub fn descending(mut self) -> Self {
        self.ascending = false;
        self
    }

    /// Canonical kind of the index this row belongs to.
    pub fn kind(&self) -> IndexKind {
        if self.primary {
            IndexKind::Primary
        } else if self.fulltext {
            IndexKind::Fulltext
        } else if self.unique {
            IndexKind::Unique
        } else {
            IndexKind::Index
        }
    }
}

/// One column pair of a foreign key constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogForeignKey {
    /// Constraint name.
    pub constraint_name: String,
    /// Referencing column.
    pub column_name: String,
    /// Referenced table.
    pub referenced_table: String,
    /// Referenced column.
    pub referenced_column: String,
}

impl CatalogForeignKey {
    /// Create a new foreign key column pair.
    pub fn new(
        constraint_name: impl Into<String>,
        column_name: impl Into<String>,
        referenced_table: impl Into<String>,
        referenced_column: impl Into<String>,
    ) -> Self {
        Self {
            constraint_name: constraint_name.into(),
            column_name: column_name.into(),
            referenced_table: referenced_table.into(),
            referenced_column: referenced_column.into(),
        }
    }
}
