//! `CREATE TABLE` rendering.

use schemaport_schema::{Dialect, IndexKind, SortOrder};

use super::{RenderContext, Template, join_statements};
use crate::view::{SchemaEntity, SchemaIndex};

/// Table definitions with keys, indexes and foreign keys.
///
/// MySQL declares indexes inside the table body. Postgres index names are
/// schema-wide, so indexes follow the table as `CREATE INDEX` statements.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateTemplate;

impl Template for CreateTemplate {
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        let statements = ctx
            .entities
            .iter()
            .filter(|e| !e.fields.is_empty())
            .map(|e| create_table(ctx, e))
            .collect();
        join_statements(statements)
    }
}

fn create_table(ctx: &RenderContext<'_>, entity: &SchemaEntity) -> String {
    let mut lines: Vec<String> = entity
        .fields
        .iter()
        .map(|f| {
            let postfix = f.postfix();
            if postfix.is_empty() {
                format!("{} {}", ctx.quote(&f.name), f.sql_type)
            } else {
                format!("{} {} {}", ctx.quote(&f.name), f.sql_type, postfix)
            }
        })
        .collect();

    if !entity.primary_keys.is_empty() {
        lines.push(format!("PRIMARY KEY ({})", ctx.quote_list(&entity.primary_keys)));
    } else if let Some(pk) = entity.indexes.iter().find(|i| i.kind == IndexKind::Primary) {
        let columns: Vec<&str> = pk.columns.iter().map(|c| c.name.as_str()).collect();
        lines.push(format!("PRIMARY KEY ({})", ctx.quote_list(&columns)));
    }

    let secondary = entity
        .indexes
        .iter()
        .filter(|i| i.kind != IndexKind::Primary);

    if ctx.dialect == Dialect::MySql {
        lines.extend(secondary.clone().map(|index| mysql_index(ctx, index)));
    }

    for constraint in &entity.constraints {
        lines.push(format!(
            "CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
            ctx.quote(&constraint.name),
            ctx.quote_list(&constraint.from_fields),
            ctx.quote(&constraint.table_name),
            ctx.quote_list(&constraint.to_fields),
        ));
    }

    let mut sql = format!(
        "CREATE TABLE IF NOT EXISTS {} (\n    {}\n);",
        ctx.quote(&entity.name),
        lines.join(",\n    ")
    );

    if ctx.dialect == Dialect::Postgres {
        for index in secondary {
            sql.push('\n');
            sql.push_str(&postgres_index(ctx, &entity.name, index));
        }
    }

    sql
}

fn mysql_index(ctx: &RenderContext<'_>, index: &SchemaIndex) -> String {
    let prefix = match index.kind {
        IndexKind::Unique => "UNIQUE INDEX",
        IndexKind::Fulltext => "FULLTEXT INDEX",
        IndexKind::Index | IndexKind::Primary => "INDEX",
    };

    let columns: Vec<String> = index
        .columns
        .iter()
        .map(|c| {
            let name = ctx.quote(&c.name);
            if index.kind == IndexKind::Fulltext {
                return name;
            }
            match c.length {
                Some(len) => format!("{}({}) {}", name, len, c.order.as_sql()),
                None => format!("{} {}", name, c.order.as_sql()),
            }
        })
        .collect();

    format!("{} {} ({})", prefix, ctx.quote(&index.name), columns.join(", "))
}

fn postgres_index(ctx: &RenderContext<'_>, table: &str, index: &SchemaIndex) -> String {
    let name = ctx.quote(&index.name);
    let table = ctx.quote(table);

    if index.kind == IndexKind::Fulltext {
        let document = index
            .columns
            .iter()
            .map(|c| format!("coalesce({}, '')", ctx.quote(&c.name)))
            .collect::<Vec<_>>()
            .join(" || ' ' || ");
        return format!(
            "CREATE INDEX IF NOT EXISTS {} ON {} USING GIN (to_tsvector('simple', {}));",
            name, table, document
        );
    }

    // prefix lengths have no Postgres equivalent
    let columns: Vec<String> = index
        .columns
        .iter()
        .map(|c| match c.order {
            SortOrder::Asc => ctx.quote(&c.name),
            SortOrder::Desc => format!("{} DESC", ctx.quote(&c.name)),
        })
        .collect();

    let unique = if index.kind == IndexKind::Unique { "UNIQUE " } else { "" };
    format!(
        "CREATE {}INDEX IF NOT EXISTS {} ON {} ({});",
        unique,
        name,
        table,
        columns.join(", ")
    )
}
