//! Parameterized `INSERT`, `UPDATE` and `DELETE` statements.

use super::{RenderContext, Template, assignments, join_statements};
use crate::view::SchemaEntity;

/// `INSERT` of every column.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertTemplate;

impl Template for InsertTemplate {
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        let statements = ctx
            .entities
            .iter()
            .filter(|e| !e.fields.is_empty())
            .map(|e| {
                let columns: Vec<&str> = e.fields.iter().map(|f| f.name.as_str()).collect();
                let placeholders: Vec<String> = (1..=columns.len())
                    .map(|i| ctx.dialect.placeholder(i))
                    .collect();
                format!(
                    "INSERT INTO {} ({}) VALUES ({});",
                    ctx.quote(&e.name),
                    ctx.quote_list(&columns),
                    placeholders.join(", ")
                )
            })
            .collect();
        join_statements(statements)
    }
}

/// `UPDATE` of non-key columns by primary key.
///
/// Entities without a primary key or without non-key columns are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateTemplate;

impl Template for UpdateTemplate {
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        let statements = ctx
            .entities
            .iter()
            .filter_map(|e| {
                let values: Vec<&str> = e.non_key_fields().map(|f| f.name.as_str()).collect();
                if e.primary_keys.is_empty() || values.is_empty() {
                    return None;
                }
                let keys = key_names(e);
                Some(format!(
                    "UPDATE {} SET {} WHERE {};",
                    ctx.quote(&e.name),
                    assignments(ctx, &values, 1, ", "),
                    assignments(ctx, &keys, values.len() + 1, " AND ")
                ))
            })
            .collect();
        join_statements(statements)
    }
}

/// `DELETE` by primary key.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteTemplate;

impl Template for DeleteTemplate {
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        let statements = ctx
            .entities
            .iter()
            .filter(|e| !e.primary_keys.is_empty())
            .map(|e| {
                format!(
                    "DELETE FROM {} WHERE {};",
                    ctx.quote(&e.name),
                    assignments(ctx, &key_names(e), 1, " AND ")
                )
            })
            .collect();
        join_statements(statements)
    }
}

fn key_names(entity: &SchemaEntity) -> Vec<&str> {
    entity.primary_keys.iter().map(String::as_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::SelectOptions;
    use pretty_assertions::assert_eq;
    use schemaport_schema::{Dialect, Entity, Field, FieldType, ProjectVersion};

    fn views(dialect: Dialect) -> Vec<SchemaEntity> {
        let users = Entity::new("users")
            .with_field(Field::new("id", FieldType::Uuid).key(true))
            .with_field(Field::new("email", FieldType::Email))
            .with_field(Field::new("name", FieldType::varchar(100)));
        let tags = Entity::new("tags").with_field(Field::new("tag", FieldType::varchar(32)).key(true));
        let logs = Entity::new("logs").with_field(Field::new("line", FieldType::text(0)));

        let version = ProjectVersion::new()
            .with_entity(users)
            .with_entity(tags)
            .with_entity(logs);
        version
            .entities
            .iter()
            .map(|e| SchemaEntity::build(e, &version, dialect, &SelectOptions::default()))
            .collect()
    }

    fn render(template: &dyn Template, dialect: Dialect) -> String {
        let entities = views(dialect);
        template.render(&RenderContext::new(dialect, &entities))
    }

    #[test]
    fn test_insert() {
        assert_eq!(
            render(&InsertTemplate, Dialect::Postgres),
            "INSERT INTO \"users\" (\"id\", \"email\", \"name\") VALUES ($1, $2, $3);\n\n\
             INSERT INTO \"tags\" (\"tag\") VALUES ($1);\n\n\
             INSERT INTO \"logs\" (\"line\") VALUES ($1);\n"
        );
    }

    #[test]
    fn test_update_numbers_where_after_set() {
        assert_eq!(
            render(&UpdateTemplate, Dialect::Postgres),
            "UPDATE \"users\" SET \"email\" = $1, \"name\" = $2 WHERE \"id\" = $3;\n"
        );
        assert_eq!(
            render(&UpdateTemplate, Dialect::MySql),
            "UPDATE `users` SET `email` = ?, `name` = ? WHERE `id` = ?;\n"
        );
    }

    #[test]
    fn test_delete_skips_keyless() {
        assert_eq!(
            render(&DeleteTemplate, Dialect::MySql),
            "DELETE FROM `users` WHERE `id` = ?;\n\nDELETE FROM `tags` WHERE `tag` = ?;\n"
        );
    }
}
