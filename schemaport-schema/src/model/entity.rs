//! Entities, fields and indexes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::{FieldType, Status};
use super::current_version;

/// A column of an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Unique id.
    pub id: Uuid,
    /// Creation version (unix seconds).
    pub version: i64,
    /// Column name.
    pub identifier: String,
    /// Whether the column is NOT NULL.
    pub required: bool,
    /// Canonical type.
    pub field_type: FieldType,
    /// Lifecycle status.
    #[serde(default)]
    pub status: Status,
    /// Part of the primary key.
    #[serde(default)]
    pub key: bool,
    /// Carries a single-column unique constraint.
    #[serde(default)]
    pub unique: bool,
}

impl Field {
    /// Create a new active, nullable field.
    pub fn new(identifier: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: Uuid::new_v4(),
            version: current_version(),
            identifier: identifier.into(),
            required: false,
            field_type,
            status: Status::Active,
            key: false,
            unique: false,
        }
    }

    /// Set the NOT NULL flag.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Mark the field as part of the primary key.
    pub fn key(mut self, key: bool) -> Self {
        self.key = key;
        self
    }

    /// Set the unique flag.
    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    /// Set the status.
    pub fn status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }
}

/// Kind of index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    /// Primary key.
    Primary,
    /// Unique index.
    Unique,
    /// Plain index.
    Index,
    /// Full-text index.
    Fulltext,
}

/// Sort direction of an indexed column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    /// SQL keyword.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// One column of an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexField {
    /// Id of the indexed field.
    pub field_id: Uuid,
    /// 1-based position in the index.
    pub priority: u32,
    /// Sort direction.
    #[serde(default)]
    pub order: SortOrder,
    /// Prefix length for long text or binary columns.
    #[serde(default)]
    pub length: Option<u32>,
}

/// An index over one or more fields of a standalone entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    /// Unique id.
    pub id: Uuid,
    /// Index name.
    pub identifier: String,
    /// Lifecycle status.
    #[serde(default)]
    pub status: Status,
    /// Kind of index.
    pub kind: IndexKind,
    /// Indexed columns in priority order.
    pub fields: Vec<IndexField>,
}

impl Index {
    /// Create a new active index without columns.
    pub fn new(identifier: impl Into<String>, kind: IndexKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            identifier: identifier.into(),
            status: Status::Active,
            kind,
            fields: Vec::new(),
        }
    }

    /// Append an ascending column.
    pub fn with_field(mut self, field_id: Uuid) -> Self {
        let priority = self.fields.len() as u32 + 1;
        self.fields.push(IndexField {
            field_id,
            priority,
            order: SortOrder::Asc,
            length: None,
        });
        self
    }

    /// Append a column with full settings.
    pub fn with_index_field(mut self, field: IndexField) -> Self {
        self.fields.push(field);
        self
    }

    /// Check if the index covers exactly one column.
    pub fn is_single_column(&self) -> bool {
        self.fields.len() == 1
    }
}

/// Configuration of an entity backed by a physical table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandaloneConfig {
    /// Indexes of the table.
    #[serde(default)]
    pub indexes: Vec<Index>,
}

/// Kind of entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "config", rename_all = "snake_case")]
pub enum EntityKind {
    /// Backed by its own table.
    Standalone(StandaloneConfig),
    /// Embedded in another entity; never rendered.
    Dependent,
}

/// A table of the project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique id.
    pub id: Uuid,
    /// Creation version (unix seconds).
    pub version: i64,
    /// Table name.
    pub identifier: String,
    /// Columns in physical order.
    pub fields: Vec<Field>,
    /// Entity kind.
    pub kind: EntityKind,
    /// Lifecycle status.
    #[serde(default)]
    pub status: Status,
}

impl Entity {
    /// Create a new active standalone entity.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            version: current_version(),
            identifier: identifier.into(),
            fields: Vec::new(),
            kind: EntityKind::Standalone(StandaloneConfig::default()),
            status: Status::Active,
        }
    }

    /// Create a new dependent entity.
    pub fn dependent(identifier: impl Into<String>) -> Self {
        Self {
            kind: EntityKind::Dependent,
            ..Self::new(identifier)
        }
    }

    /// Append a field.
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Append an index. Ignored on dependent entities.
    pub fn with_index(mut self, index: Index) -> Self {
        if let EntityKind::Standalone(config) = &mut self.kind {
            config.indexes.push(index);
        }
        self
    }

    /// Check if the entity is backed by a table.
    pub fn is_standalone(&self) -> bool {
        matches!(self.kind, EntityKind::Standalone(_))
    }

    /// Indexes of a standalone entity; empty otherwise.
    pub fn indexes(&self) -> &[Index] {
        match &self.kind {
            EntityKind::Standalone(config) => &config.indexes,
            EntityKind::Dependent => &[],
        }
    }

    /// Look up a field by id.
    pub fn field(&self, id: Uuid) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Look up a field by column name.
    pub fn field_by_identifier(&self, identifier: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.identifier == identifier)
    }

    /// Primary key fields in column order.
    pub fn key_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.key)
    }

    /// Check if the given field ids are exactly the primary key or a unique key.
    pub fn is_unique_key(&self, field_ids: &[Uuid]) -> bool {
        let same_set = |ids: &[Uuid]| {
            ids.len() == field_ids.len() && field_ids.iter().all(|id| ids.contains(id))
        };

        let pk: Vec<Uuid> = self.key_fields().map(|f| f.id).collect();
        if !pk.is_empty() && same_set(&pk) {
            return true;
        }
        if let [single] = field_ids {
            if self.field(*single).is_some_and(|f| f.unique) {
                return true;
            }
        }
        self.indexes()
            .iter()
            .filter(|i| matches!(i.kind, IndexKind::Primary | IndexKind::Unique))
            .any(|i| {
                let ids: Vec<Uuid> = i.fields.iter().map(|f| f.field_id).collect();
                same_set(&ids)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::IntegerSize;

    fn make_users() -> Entity {
        let id = Field::new("id", FieldType::Uuid).required(true).key(true);
        let email = Field::new("email", FieldType::Email).unique(true);
        let age = Field::new("age", FieldType::integer(IntegerSize::ThirtyTwo));
        let email_id = email.id;
        Entity::new("users")
            .with_field(id)
            .with_field(email)
            .with_field(age)
            .with_index(Index::new("idx_email", IndexKind::Unique).with_field(email_id))
    }

    #[test]
    fn test_entity_lookup() {
        let users = make_users();
        assert!(users.is_standalone());
        assert_eq!(users.indexes().len(), 1);
        assert!(users.field_by_identifier("email").is_some());
        assert!(users.field_by_identifier("missing").is_none());
        assert_eq!(users.key_fields().count(), 1);
    }

    #[test]
    fn test_dependent_entity_has_no_indexes() {
        let e = Entity::dependent("address")
            .with_index(Index::new("idx", IndexKind::Index));
        assert!(!e.is_standalone());
        assert!(e.indexes().is_empty());
    }

    #[test]
    fn test_index_priority() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let index = Index::new("idx_ab", IndexKind::Index)
            .with_field(a)
            .with_field(b);
        assert_eq!(index.fields[0].priority, 1);
        assert_eq!(index.fields[1].priority, 2);
        assert!(!index.is_single_column());
    }

    #[test]
    fn test_is_unique_key() {
        let users = make_users();
        let id = users.field_by_identifier("id").unwrap().id;
        let email = users.field_by_identifier("email").unwrap().id;
        let age = users.field_by_identifier("age").unwrap().id;

        assert!(users.is_unique_key(&[id]));
        assert!(users.is_unique_key(&[email]));
        assert!(!users.is_unique_key(&[age]));
        assert!(!users.is_unique_key(&[id, age]));
    }

    #[test]
    fn test_field_serde() {
        let field = Field::new("name", FieldType::varchar(64)).required(true);
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["field_type"]["type"], "VARCHAR");
        assert_eq!(json["field_type"]["config"]["max_size"], 64);
        let back: Field = serde_json::from_value(json).unwrap();
        assert_eq!(back, field);
    }
}
