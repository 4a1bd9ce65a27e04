//! Named lookup queries.

use super::{RenderContext, Template, assignments, join_statements};
use crate::view::{SchemaEntity, SchemaSelectStatement};

/// Which synthesized statements a [`SelectTemplate`] renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectKind {
    /// Primary key lookups.
    Primary,
    /// Lookups over a single index.
    IndexedSimple,
    /// Lookups over two or more indexes.
    IndexedCombined,
}

impl SelectKind {
    /// Check if a statement belongs to this kind.
    pub fn matches(&self, statement: &SchemaSelectStatement) -> bool {
        match self {
            Self::Primary => statement.is_primary,
            Self::IndexedSimple => !statement.is_primary && !statement.combined,
            Self::IndexedCombined => statement.combined,
        }
    }
}

/// Renders one kind of synthesized select statement.
#[derive(Debug, Clone, Copy)]
pub struct SelectTemplate {
    kind: SelectKind,
}

impl SelectTemplate {
    /// Create a template for the given statement kind.
    pub fn new(kind: SelectKind) -> Self {
        Self { kind }
    }

    /// Statement kind rendered.
    pub fn kind(&self) -> SelectKind {
        self.kind
    }
}

impl Template for SelectTemplate {
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        let kind = self.kind;
        let statements = ctx
            .entities
            .iter()
            .flat_map(move |e| {
                e.select_statements
                    .iter()
                    .filter(move |s| kind.matches(s))
                    .map(move |s| select(ctx, e, s))
            })
            .collect();
        join_statements(statements)
    }
}

fn select(ctx: &RenderContext<'_>, entity: &SchemaEntity, statement: &SchemaSelectStatement) -> String {
    let columns: Vec<&str> = entity.fields.iter().map(|f| f.name.as_str()).collect();
    let filters: Vec<&str> = statement.fields.iter().map(|f| f.name.as_str()).collect();

    let mut sql = format!(
        "-- {}\nSELECT {} FROM {} WHERE {}",
        statement.name,
        ctx.quote_list(&columns),
        ctx.quote(&entity.name),
        assignments(ctx, &filters, 1, " AND ")
    );

    if statement.sort_supported {
        let order: Vec<String> = statement
            .time_fields
            .iter()
            .map(|f| format!("{} DESC", ctx.quote(&f.name)))
            .collect();
        sql.push_str(" ORDER BY ");
        sql.push_str(&order.join(", "));
    }

    sql.push(';');
    sql
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::SelectOptions;
    use pretty_assertions::assert_eq;
    use schemaport_schema::{Dialect, Entity, Field, FieldType, Index, IndexKind, ProjectVersion};

    fn users(dialect: Dialect) -> Vec<SchemaEntity> {
        let id = Field::new("id", FieldType::Uuid).key(true);
        let email = Field::new("email", FieldType::Email);
        let name = Field::new("name", FieldType::varchar(100));
        let created = Field::new("created_at", FieldType::DateTime);
        let entity = Entity::new("users")
            .with_index(Index::new("idx_email", IndexKind::Index).with_field(email.id))
            .with_index(Index::new("idx_name", IndexKind::Index).with_field(name.id))
            .with_index(Index::new("idx_created", IndexKind::Index).with_field(created.id))
            .with_field(id)
            .with_field(email)
            .with_field(name)
            .with_field(created);
        let version = ProjectVersion::new().with_entity(entity);
        vec![SchemaEntity::build(
            &version.entities[0],
            &version,
            dialect,
            &SelectOptions::default(),
        )]
    }

    fn render(kind: SelectKind, dialect: Dialect) -> String {
        let entities = users(dialect);
        SelectTemplate::new(kind).render(&RenderContext::new(dialect, &entities))
    }

    #[test]
    fn test_primary_lookup() {
        assert_eq!(
            render(SelectKind::Primary, Dialect::MySql),
            "-- UsersById\n\
             SELECT `id`, `email`, `name`, `created_at` FROM `users` WHERE `id` = ?;\n"
        );
    }

    #[test]
    fn test_simple_lookups_sorted_by_time() {
        assert_eq!(
            render(SelectKind::IndexedSimple, Dialect::Postgres),
            "-- UsersByEmail\n\
             SELECT \"id\", \"email\", \"name\", \"created_at\" FROM \"users\" \
             WHERE \"email\" = $1 ORDER BY \"created_at\" DESC;\n\n\
             -- UsersByName\n\
             SELECT \"id\", \"email\", \"name\", \"created_at\" FROM \"users\" \
             WHERE \"name\" = $1 ORDER BY \"created_at\" DESC;\n"
        );
    }

    #[test]
    fn test_combined_lookup() {
        assert_eq!(
            render(SelectKind::IndexedCombined, Dialect::MySql),
            "-- UsersByEmailAndName\n\
             SELECT `id`, `email`, `name`, `created_at` FROM `users` \
             WHERE `email` = ? AND `name` = ? ORDER BY `created_at` DESC;\n"
        );
    }
}
