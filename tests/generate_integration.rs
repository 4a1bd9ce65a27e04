//! Integration tests for rendering and type mapping properties.

use std::collections::HashSet;

use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use schemaport::generate::{
    Action, GenerateRequest, Generator, NullSink, SelectOptions, escape_value,
    resolve_select_statements, sort_entities, unescape_value,
};
use schemaport::introspect::{SampleRow, SampleSet};
use schemaport::schema::{
    CatalogColumn, Dialect, Entity, Field, FieldType, Index, IndexKind, IntegerSize,
    NoSamples, ProjectVersion, Relationship, RelationshipNode, SampleProbe, typemap,
};

#[tokio::test]
async fn test_postgres_index_names_unique_across_tables() {
    let a = Field::new("name", FieldType::varchar(80));
    let b = Field::new("name", FieldType::varchar(80));
    let version = ProjectVersion::new()
        .with_entity(
            Entity::new("authors")
                .with_index(Index::new("idx_name", IndexKind::Index).with_field(a.id))
                .with_field(a),
        )
        .with_entity(
            Entity::new("books")
                .with_index(Index::new("idx_name", IndexKind::Index).with_field(b.id))
                .with_field(b),
        );

    let request = GenerateRequest::new(Dialect::Postgres, version).action(Action::Create);
    let response = Generator::new(NullSink).generate(&request).await.unwrap();
    let create = response.get(Action::Create).unwrap();

    assert!(create.contains("CREATE INDEX IF NOT EXISTS \"idx_name\" ON \"authors\" (\"name\");"));
    assert!(create.contains("CREATE INDEX IF NOT EXISTS \"idx_name_2\" ON \"books\" (\"name\");"));
}

/// Builds a chain with a cycle, a self reference and a dangling target.
fn tangled_version() -> ProjectVersion {
    let names = ["a", "b", "c", "d", "e", "f"];
    let entities: Vec<Entity> = names
        .iter()
        .map(|n| Entity::new(*n).with_field(Field::new("id", FieldType::Uuid).key(true)))
        .collect();
    let node = |i: usize| RelationshipNode::new(entities[i].id, vec![entities[i].fields[0].id]);

    let relationships = vec![
        Relationship::foreign_key("a_b", node(0), node(1)),
        Relationship::foreign_key("b_c", node(1), node(2)),
        Relationship::foreign_key("c_a", node(2), node(0)),
        Relationship::foreign_key("d_d", node(3), node(3)),
        Relationship::foreign_key("e_d", node(4), node(3)),
        Relationship::foreign_key(
            "f_ghost",
            node(5),
            RelationshipNode::new(Uuid::new_v4(), vec![Uuid::new_v4()]),
        ),
    ];

    let mut version = ProjectVersion::new();
    version.entities = entities;
    version.relationships = relationships;
    version
}

#[test]
fn test_sort_is_permutation() {
    let version = tangled_version();
    let sorted = sort_entities(&version);

    assert_eq!(sorted.len(), version.entities.len());
    let ids: HashSet<Uuid> = sorted.iter().map(|e| e.id).collect();
    assert_eq!(ids, version.entities.iter().map(|e| e.id).collect::<HashSet<_>>());

    let order: Vec<&str> = sorted.iter().map(|e| e.identifier.as_str()).collect();
    let pos = |name: &str| order.iter().position(|n| *n == name).unwrap();
    assert!(pos("d") < pos("e"));
    // cycle members come last
    assert!(pos("f") < pos("a") && pos("e") < pos("a"));
}

#[test]
fn test_combination_count_is_power_set() {
    for k in 0..6usize {
        let mut entity = Entity::new("wide").with_field(Field::new("id", FieldType::Uuid).key(true));
        for i in 0..k {
            let field = Field::new(format!("col{}", i), FieldType::integer(IntegerSize::ThirtyTwo));
            entity = entity
                .with_index(Index::new(format!("idx_{}", i), IndexKind::Index).with_field(field.id))
                .with_field(field);
        }

        let statements = resolve_select_statements(&entity, Dialect::Postgres, &SelectOptions::default());
        let combined = statements.iter().filter(|s| !s.is_primary).count();
        assert_eq!(combined, (1 << k) - 1, "k = {}", k);
        assert_eq!(statements.len(), combined + 1);
    }
}

#[test]
fn test_escape_round_trip() {
    let inputs = [
        "",
        "plain",
        "it's",
        "say \"hi\"",
        "back\\slash",
        "nul\0byte",
        "line\nfeed\r\n",
        "ctrl\u{1a}z",
        "trailing\\",
        "\\n is not a newline",
        "ünïcödé ✓",
    ];
    for input in inputs {
        assert_eq!(unescape_value(&escape_value(input)), input);
    }
}

/// Split a rendered column type into the catalog shape.
fn catalog_column(name: &str, sql: &str) -> CatalogColumn {
    let lower = sql.to_ascii_lowercase();
    let column = CatalogColumn::new(name, lower.split('(').next().unwrap_or_default());
    let column = column.column_type(lower.clone());
    match lower
        .split_once('(')
        .and_then(|(_, rest)| rest.trim_end_matches(')').parse::<u64>().ok())
    {
        Some(len) => column.max_length(len),
        None => column,
    }
}

fn round_trip(dialect: Dialect, field_type: &FieldType, probe: &dyn SampleProbe) -> FieldType {
    let sql = typemap::field_type_to_sql(dialect, field_type).unwrap();
    typemap::column_to_field_type(dialect, &catalog_column("col", &sql), probe)
}

#[test]
fn test_native_types_round_trip() {
    let mysql = [
        FieldType::integer(IntegerSize::Eight),
        FieldType::integer(IntegerSize::Sixteen),
        FieldType::integer(IntegerSize::TwentyFour),
        FieldType::integer(IntegerSize::ThirtyTwo),
        FieldType::integer(IntegerSize::SixtyFour),
        FieldType::Float,
        FieldType::Decimal,
        FieldType::Boolean,
        FieldType::char(10),
        FieldType::varchar(100),
        FieldType::Json,
        FieldType::Date,
        FieldType::DateTime,
        FieldType::Time,
    ];
    for field_type in &mysql {
        assert_eq!(&round_trip(Dialect::MySql, field_type, &NoSamples), field_type);
    }

    let postgres = [
        FieldType::Uuid,
        FieldType::integer(IntegerSize::Sixteen),
        FieldType::integer(IntegerSize::ThirtyTwo),
        FieldType::integer(IntegerSize::SixtyFour),
        FieldType::Float,
        FieldType::Decimal,
        FieldType::Boolean,
        FieldType::char(10),
        FieldType::varchar(100),
        FieldType::Json,
        FieldType::Date,
        FieldType::DateTime,
        FieldType::Time,
    ];
    for field_type in &postgres {
        assert_eq!(&round_trip(Dialect::Postgres, field_type, &NoSamples), field_type);
    }
}

fn samples(values: serde_json::Value) -> SampleSet {
    let rows: Vec<SampleRow> = values
        .as_array()
        .into_iter()
        .flatten()
        .map(|v| [("col".to_string(), v.clone())].into_iter().collect())
        .collect();
    SampleSet::new(rows)
}

#[test]
fn test_sampled_types_round_trip() {
    let uuid = samples(json!([Uuid::new_v4().to_string(), Uuid::new_v4().to_string()]));
    let email = samples(json!(["a@example.com", "b@example.org"]));
    let url = samples(json!(["https://example.com/a", "http://example.org"]));
    let array = samples(json!(["[1, 2]", "[]"]));

    for dialect in Dialect::ALL {
        assert_eq!(round_trip(dialect, &FieldType::Uuid, &uuid), FieldType::Uuid);
        assert_eq!(round_trip(dialect, &FieldType::Email, &email), FieldType::Email);
        assert_eq!(round_trip(dialect, &FieldType::Url, &url), FieldType::Url);
        assert_eq!(round_trip(dialect, &FieldType::Array, &array), FieldType::Array);
    }
}
