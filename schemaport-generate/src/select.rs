//! Synthesis of named lookup queries.
//!
//! Every entity gets a primary key lookup. Plain indexes are then combined:
//! each non-empty subset of them yields one statement filtering on the union
//! of their columns. Single-column DATE/DATETIME indexes do not take part;
//! they mark the statements as sortable instead.

use std::collections::HashSet;

use convert_case::{Case, Casing};
use schemaport_schema::{Dialect, Entity, Field, Index, IndexKind};
use tracing::warn;
use uuid::Uuid;

use crate::view::{SchemaField, SchemaSelectStatement};

/// Default cap on the number of combined indexes.
pub const DEFAULT_MAX_INDEXES: usize = 12;

/// Hard limit on the items [`combinations`] enumerates (2^16 - 1 subsets).
pub const MAX_COMBINABLE: usize = 16;

/// Options for select synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOptions {
    /// Only the first `max_indexes` eligible indexes are combined. Values
    /// above [`MAX_COMBINABLE`] are treated as [`MAX_COMBINABLE`].
    pub max_indexes: usize,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            max_indexes: DEFAULT_MAX_INDEXES,
        }
    }
}

impl SelectOptions {
    /// Set the combination cap, clamped to [`MAX_COMBINABLE`].
    pub fn max_indexes(mut self, max_indexes: usize) -> Self {
        self.max_indexes = max_indexes.min(MAX_COMBINABLE);
        self
    }

    fn effective_max_indexes(&self) -> usize {
        self.max_indexes.min(MAX_COMBINABLE)
    }
}

/// Every non-empty subset of `items`, in ascending bitmask order.
///
/// Bit `i` of the mask selects `items[i]`, so `[a, b]` yields `[a]`, `[b]`,
/// `[a, b]`. Only the first [`MAX_COMBINABLE`] items are considered.
pub fn combinations<T: Copy>(items: &[T]) -> Vec<Vec<T>> {
    let items = &items[..items.len().min(MAX_COMBINABLE)];
    let n = items.len();
    if n == 0 {
        return Vec::new();
    }
    (1u64..(1u64 << n))
        .map(|mask| {
            items
                .iter()
                .enumerate()
                .filter(|(i, _)| (mask >> i) & 1 == 1)
                .map(|(_, item)| *item)
                .collect()
        })
        .collect()
}

/// Lookup statements for a standalone entity.
pub fn resolve_select_statements(
    entity: &Entity,
    dialect: Dialect,
    options: &SelectOptions,
) -> Vec<SchemaSelectStatement> {
    let mut selects = Vec::new();
    if !entity.is_standalone() {
        return selects;
    }

    let entity_title = entity.identifier.to_case(Case::Pascal);

    let keys: Vec<&Field> = entity.key_fields().collect();
    if !keys.is_empty() {
        let key_titles: Vec<String> = keys
            .iter()
            .map(|f| f.identifier.to_case(Case::Pascal))
            .collect();
        let name = format!("{}By{}", entity_title, key_titles.join("And"));
        selects.push(SchemaSelectStatement {
            identifier: name.to_case(Case::Snake),
            name,
            entity_identifier: entity.identifier.clone(),
            fields: sorted_fields(keys.into_iter(), dialect),
            combined: false,
            is_primary: true,
            time_fields: Vec::new(),
            sort_supported: false,
        });
    }

    let mut time_fields = Vec::new();
    let mut eligible: Vec<&Index> = Vec::new();
    for index in entity.indexes() {
        if index.kind != IndexKind::Index || !index.status.is_active() || index.fields.is_empty() {
            continue;
        }
        if index.is_single_column() {
            let field = entity.field(index.fields[0].field_id);
            if let Some(field) = field.filter(|f| f.field_type.is_temporal()) {
                time_fields.extend(SchemaField::from_field(field, dialect));
                continue;
            }
        }
        eligible.push(index);
    }

    let max_indexes = options.effective_max_indexes();
    if eligible.len() > max_indexes {
        warn!(
            entity = %entity.identifier,
            indexes = eligible.len(),
            max_indexes,
            "Too many indexes to combine, ignoring the rest"
        );
        eligible.truncate(max_indexes);
    }

    let sort_supported = !time_fields.is_empty();
    for combination in combinations(&eligible) {
        let mut seen: HashSet<Uuid> = HashSet::new();
        let fields = combination
            .iter()
            .flat_map(|index| index.fields.iter())
            .filter(|f| seen.insert(f.field_id))
            .filter_map(|f| entity.field(f.field_id));
        let fields = sorted_fields(fields, dialect);
        if fields.is_empty() {
            continue;
        }

        let titles: Vec<&str> = fields.iter().map(|f| f.name_title.as_str()).collect();
        let name = format!("{}By{}", entity_title, titles.join("And"));
        selects.push(SchemaSelectStatement {
            identifier: name.to_case(Case::Snake),
            name,
            entity_identifier: entity.identifier.clone(),
            fields,
            combined: combination.len() > 1,
            is_primary: false,
            time_fields: time_fields.clone(),
            sort_supported,
        });
    }

    selects
}

fn sorted_fields<'a>(fields: impl Iterator<Item = &'a Field>, dialect: Dialect) -> Vec<SchemaField> {
    let mut fields: Vec<SchemaField> = fields
        .filter_map(|f| SchemaField::from_field(f, dialect))
        .collect();
    fields.sort_by(|a, b| a.name.cmp(&b.name));
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schemaport_schema::{FieldType, IntegerSize};

    fn names(selects: &[SchemaSelectStatement]) -> Vec<&str> {
        selects.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_combinations_order() {
        assert_eq!(
            combinations(&['a', 'b', 'c']),
            vec![
                vec!['a'],
                vec!['b'],
                vec!['a', 'b'],
                vec!['c'],
                vec!['a', 'c'],
                vec!['b', 'c'],
                vec!['a', 'b', 'c'],
            ]
        );
        assert!(combinations::<u8>(&[]).is_empty());
    }

    #[test]
    fn test_users_by_email_sortable() {
        let id = Field::new("id", FieldType::Uuid).key(true);
        let email = Field::new("email", FieldType::Email);
        let created = Field::new("created_at", FieldType::DateTime);
        let entity = Entity::new("users")
            .with_index(Index::new("idx_email", IndexKind::Index).with_field(email.id))
            .with_index(Index::new("idx_created", IndexKind::Index).with_field(created.id))
            .with_field(id)
            .with_field(email)
            .with_field(created);

        let selects = resolve_select_statements(&entity, Dialect::MySql, &SelectOptions::default());
        assert_eq!(names(&selects), ["UsersById", "UsersByEmail"]);

        let pk = &selects[0];
        assert!(pk.is_primary);
        assert_eq!(pk.identifier, "users_by_id");

        let by_email = &selects[1];
        assert_eq!(by_email.identifier, "users_by_email");
        assert!(by_email.sort_supported);
        assert!(!by_email.combined);
        assert_eq!(by_email.time_fields[0].name, "created_at");
    }

    #[test]
    fn test_combined_fields_sorted_and_deduplicated() {
        let tenant = Field::new("tenant_id", FieldType::integer(IntegerSize::SixtyFour));
        let status = Field::new("status", FieldType::varchar(32));
        let author = Field::new("author_id", FieldType::Uuid);
        let entity = Entity::new("blog_posts")
            .with_index(
                Index::new("idx_tenant_status", IndexKind::Index)
                    .with_field(tenant.id)
                    .with_field(status.id),
            )
            .with_index(
                Index::new("idx_tenant_author", IndexKind::Index)
                    .with_field(tenant.id)
                    .with_field(author.id),
            )
            .with_field(tenant)
            .with_field(status)
            .with_field(author);

        let selects = resolve_select_statements(&entity, Dialect::Postgres, &SelectOptions::default());
        assert_eq!(
            names(&selects),
            [
                "BlogPostsByStatusAndTenantId",
                "BlogPostsByAuthorIdAndTenantId",
                "BlogPostsByAuthorIdAndStatusAndTenantId",
            ]
        );
        assert!(selects[2].combined);
        assert_eq!(selects[2].fields.len(), 3);
        assert_eq!(selects[2].identifier, "blog_posts_by_author_id_and_status_and_tenant_id");
        assert!(!selects[2].sort_supported);
    }

    #[test]
    fn test_power_set_count() {
        for k in 0..5usize {
            let mut entity = Entity::new("wide").with_field(Field::new("id", FieldType::Uuid).key(true));
            for i in 0..k {
                let field = Field::new(format!("c{}", i), FieldType::varchar(10));
                entity = entity
                    .with_index(Index::new(format!("idx_c{}", i), IndexKind::Index).with_field(field.id))
                    .with_field(field);
            }
            // unique and temporal indexes never combine
            let day = Field::new("day", FieldType::Date);
            let id = entity.fields[0].id;
            entity = entity
                .with_index(Index::new("idx_day", IndexKind::Index).with_field(day.id))
                .with_index(Index::new("uq_id", IndexKind::Unique).with_field(id))
                .with_field(day);

            let selects = resolve_select_statements(&entity, Dialect::MySql, &SelectOptions::default());
            let combos = selects.iter().filter(|s| !s.is_primary).count();
            assert_eq!(combos, (1 << k) - 1);
            assert_eq!(selects.iter().filter(|s| s.is_primary).count(), 1);
        }
    }

    #[test]
    fn test_max_indexes_cap() {
        let mut entity = Entity::new("t");
        for i in 0..4 {
            let field = Field::new(format!("c{}", i), FieldType::varchar(10));
            entity = entity
                .with_index(Index::new(format!("idx_{}", i), IndexKind::Index).with_field(field.id))
                .with_field(field);
        }

        let selects =
            resolve_select_statements(&entity, Dialect::MySql, &SelectOptions::default().max_indexes(2));
        assert_eq!(names(&selects), ["TByC0", "TByC1", "TByC0AndC1"]);
    }

    #[test]
    fn test_combinations_capped() {
        assert_eq!(combinations(&[0u8; 64]).len(), (1 << MAX_COMBINABLE) - 1);
        assert_eq!(
            SelectOptions::default().max_indexes(usize::MAX).max_indexes,
            MAX_COMBINABLE
        );

        let mut entity = Entity::new("t");
        for i in 0..3 {
            let field = Field::new(format!("c{}", i), FieldType::varchar(10));
            entity = entity
                .with_index(Index::new(format!("idx_{}", i), IndexKind::Index).with_field(field.id))
                .with_field(field);
        }
        let options = SelectOptions { max_indexes: usize::MAX };
        assert_eq!(resolve_select_statements(&entity, Dialect::MySql, &options).len(), 7);
    }

    #[test]
    fn test_no_keys_no_primary_statement() {
        let entity = Entity::new("logs").with_field(Field::new("line", FieldType::text(0)));
        assert!(resolve_select_statements(&entity, Dialect::MySql, &SelectOptions::default()).is_empty());
    }
}
