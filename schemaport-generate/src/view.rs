//! Per-request render view models.
//!
//! These are projections of the canonical model for one dialect. They are
//! rebuilt for every generation request and never persisted.

use convert_case::{Case, Casing};
use schemaport_schema::{
    Dialect, Entity, Field, FieldType, IndexKind, ProjectVersion, SortOrder, typemap,
};
use uuid::Uuid;

use crate::resolve::resolve_constraints;
use crate::select::{SelectOptions, resolve_select_statements};

/// A column ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaField {
    /// Column name.
    pub name: String,
    /// Column name in PascalCase, used in statement names.
    pub name_title: String,
    /// Dialect column type.
    pub sql_type: String,
    /// Id of the source field.
    pub field_id: Uuid,
    /// Canonical type of the source field.
    pub field_type: FieldType,
    /// `NOT NULL`.
    pub required: bool,
    /// Single-column unique constraint.
    pub unique: bool,
    /// Primary key member.
    pub key: bool,
}

impl SchemaField {
    /// Project a field, or `None` when it cannot be rendered.
    pub fn from_field(field: &Field, dialect: Dialect) -> Option<Self> {
        if field.identifier.is_empty() || !field.status.is_active() {
            return None;
        }
        let sql_type = typemap::field_type_to_sql(dialect, &field.field_type)?;

        Some(Self {
            name: field.identifier.clone(),
            name_title: field.identifier.to_case(Case::Pascal),
            sql_type,
            field_id: field.id,
            field_type: field.field_type,
            required: field.required,
            unique: field.unique,
            key: field.key,
        })
    }

    /// Column default, if the type has one.
    pub fn default_clause(&self) -> Option<&'static str> {
        matches!(self.field_type, FieldType::DateTime).then_some("DEFAULT CURRENT_TIMESTAMP")
    }

    /// Everything after the type in a column definition.
    pub fn postfix(&self) -> String {
        let mut parts = Vec::new();
        if self.required || self.key {
            parts.push("NOT NULL");
        }
        if self.unique && !self.key {
            parts.push("UNIQUE");
        }
        if let Some(default) = self.default_clause() {
            parts.push(default);
        }
        parts.join(" ")
    }
}

/// One column of a rendered index.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaIndexColumn {
    /// Column name.
    pub name: String,
    /// Sort direction.
    pub order: SortOrder,
    /// Prefix length.
    pub length: Option<u32>,
}

/// An index ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaIndex {
    /// Index name; Postgres names are made unique across entities.
    pub name: String,
    /// Index kind.
    pub kind: IndexKind,
    /// Columns by priority.
    pub columns: Vec<SchemaIndexColumn>,
}

impl SchemaIndex {
    /// Rendering order among an entity's indexes.
    pub fn type_sort(&self) -> u8 {
        match self.kind {
            IndexKind::Primary => 0,
            IndexKind::Index => 1,
            IndexKind::Unique => 2,
            IndexKind::Fulltext => 3,
        }
    }
}

/// A foreign key constraint ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaConstraint {
    /// Constraint name.
    pub name: String,
    /// Referenced table.
    pub table_name: String,
    /// Local columns, aligned with `to_fields`.
    pub from_fields: Vec<String>,
    /// Referenced columns.
    pub to_fields: Vec<String>,
}

/// A named lookup query.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaSelectStatement {
    /// PascalCase name, e.g. `UsersByEmail`.
    pub name: String,
    /// snake_case name, e.g. `users_by_email`.
    pub identifier: String,
    /// Table queried.
    pub entity_identifier: String,
    /// Filter columns, sorted by name.
    pub fields: Vec<SchemaField>,
    /// Spans more than one index.
    pub combined: bool,
    /// Lookup by primary key.
    pub is_primary: bool,
    /// Indexed DATE/DATETIME columns usable for ordering.
    pub time_fields: Vec<SchemaField>,
    /// At least one time field exists.
    pub sort_supported: bool,
}

/// An entity ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaEntity {
    /// Target dialect.
    pub dialect: Dialect,
    /// Table name.
    pub name: String,
    /// Table name in PascalCase.
    pub name_title: String,
    /// Id of the source entity.
    pub entity_id: Uuid,
    /// Primary key column names in field order.
    pub primary_keys: Vec<String>,
    /// Renderable columns in field order.
    pub fields: Vec<SchemaField>,
    /// Indexes ordered by kind.
    pub indexes: Vec<SchemaIndex>,
    /// Outgoing foreign keys.
    pub constraints: Vec<SchemaConstraint>,
    /// Synthesized lookup queries.
    pub select_statements: Vec<SchemaSelectStatement>,
}

impl SchemaEntity {
    /// Project a standalone entity. Other kinds produce an entity without
    /// columns, indexes or statements.
    pub fn build(
        entity: &Entity,
        version: &ProjectVersion,
        dialect: Dialect,
        options: &SelectOptions,
    ) -> Self {
        let mut view = Self {
            dialect,
            name: entity.identifier.clone(),
            name_title: entity.identifier.to_case(Case::Pascal),
            entity_id: entity.id,
            primary_keys: Vec::new(),
            fields: Vec::new(),
            indexes: Vec::new(),
            constraints: Vec::new(),
            select_statements: Vec::new(),
        };

        if !entity.is_standalone() {
            return view;
        }

        view.fields = entity
            .fields
            .iter()
            .filter_map(|f| SchemaField::from_field(f, dialect))
            .collect();
        view.primary_keys = view
            .fields
            .iter()
            .filter(|f| f.key)
            .map(|f| f.name.clone())
            .collect();
        view.indexes = map_indexes(entity, &view.fields);
        view.constraints = resolve_constraints(entity, version);
        view.select_statements = resolve_select_statements(entity, dialect, options);
        view
    }

    /// Check if a column is part of the primary key.
    pub fn is_primary_key(&self, name: &str) -> bool {
        self.primary_keys.iter().any(|pk| pk == name)
    }

    /// Look up a rendered column by source field id.
    pub fn field(&self, field_id: Uuid) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.field_id == field_id)
    }

    /// Columns outside the primary key.
    pub fn non_key_fields(&self) -> impl Iterator<Item = &SchemaField> {
        self.fields.iter().filter(|f| !self.is_primary_key(&f.name))
    }
}

/// Active indexes whose every column is rendered, ordered by kind.
fn map_indexes(entity: &Entity, fields: &[SchemaField]) -> Vec<SchemaIndex> {
    let mut indexes: Vec<SchemaIndex> = entity
        .indexes()
        .iter()
        .filter(|index| index.status.is_active() && !index.fields.is_empty())
        .filter_map(|index| {
            let mut index_fields: Vec<_> = index.fields.iter().collect();
            index_fields.sort_by_key(|f| f.priority);

            let columns = index_fields
                .into_iter()
                .map(|f| {
                    fields
                        .iter()
                        .find(|sf| sf.field_id == f.field_id)
                        .map(|sf| SchemaIndexColumn {
                            name: sf.name.clone(),
                            order: f.order,
                            length: f.length,
                        })
                })
                .collect::<Option<Vec<_>>>()?;

            Some(SchemaIndex {
                name: index.identifier.clone(),
                kind: index.kind,
                columns,
            })
        })
        .collect();

    indexes.sort_by_key(SchemaIndex::type_sort);
    indexes
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemaport_schema::{Index, IndexField, Status};

    fn users() -> Entity {
        let id = Field::new("id", FieldType::Uuid).key(true).required(true);
        let email = Field::new("email", FieldType::Email).unique(true);
        let created = Field::new("created_at", FieldType::DateTime).required(true);
        let legacy = Field::new("legacy", FieldType::Invalid);
        let hidden = Field::new("hidden", FieldType::Boolean).status(Status::Inactive);

        let by_email = Index::new("uq_email", IndexKind::Unique).with_field(email.id);
        let by_created = Index::new("idx_created", IndexKind::Index).with_field(created.id);
        let by_legacy = Index::new("idx_legacy", IndexKind::Index).with_field(legacy.id);
        let pk = Index::new("PRIMARY", IndexKind::Primary).with_field(id.id);

        Entity::new("users")
            .with_field(id)
            .with_field(email)
            .with_field(created)
            .with_field(legacy)
            .with_field(hidden)
            .with_index(by_email)
            .with_index(by_created)
            .with_index(by_legacy)
            .with_index(pk)
    }

    #[test]
    fn test_field_projection() {
        let entity = users();
        let version = ProjectVersion::new().with_entity(entity.clone());
        let view = SchemaEntity::build(&entity, &version, Dialect::MySql, &SelectOptions::default());

        let names: Vec<&str> = view.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["id", "email", "created_at"]);
        assert_eq!(view.name_title, "Users");
        assert_eq!(view.primary_keys, ["id"]);
        assert_eq!(view.fields[0].sql_type, "CHAR(36)");
        assert_eq!(view.fields[1].postfix(), "UNIQUE");
        assert_eq!(
            view.fields[2].postfix(),
            "NOT NULL DEFAULT CURRENT_TIMESTAMP"
        );
        assert_eq!(view.fields[2].name_title, "CreatedAt");
    }

    #[test]
    fn test_indexes_sorted_and_unresolved_dropped() {
        let entity = users();
        let version = ProjectVersion::new().with_entity(entity.clone());
        let view = SchemaEntity::build(&entity, &version, Dialect::Postgres, &SelectOptions::default());

        let names: Vec<&str> = view.indexes.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["PRIMARY", "idx_created", "uq_email"]);
    }

    #[test]
    fn test_index_columns_follow_priority() {
        let a = Field::new("a", FieldType::integer(schemaport_schema::IntegerSize::ThirtyTwo));
        let b = Field::new("b", FieldType::text(0));
        let index = Index::new("idx_ab", IndexKind::Index)
            .with_index_field(IndexField {
                field_id: b.id,
                priority: 2,
                order: SortOrder::Desc,
                length: Some(32),
            })
            .with_index_field(IndexField {
                field_id: a.id,
                priority: 1,
                order: SortOrder::Asc,
                length: None,
            });
        let entity = Entity::new("t").with_field(a).with_field(b).with_index(index);
        let version = ProjectVersion::new().with_entity(entity.clone());
        let view = SchemaEntity::build(&entity, &version, Dialect::MySql, &SelectOptions::default());

        let columns = &view.indexes[0].columns;
        assert_eq!(columns[0].name, "a");
        assert_eq!(columns[1].name, "b");
        assert_eq!(columns[1].order, SortOrder::Desc);
        assert_eq!(columns[1].length, Some(32));
    }

    #[test]
    fn test_dependent_entity_is_empty() {
        let entity = Entity::dependent("audit").with_field(Field::new("id", FieldType::Uuid));
        let version = ProjectVersion::new().with_entity(entity.clone());
        let view = SchemaEntity::build(&entity, &version, Dialect::MySql, &SelectOptions::default());

        assert!(view.fields.is_empty());
        assert!(view.select_statements.is_empty());
    }
}
