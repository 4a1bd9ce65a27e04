//! Integration tests from catalog rows to rendered SQL.
//!
//! These tests drive the introspector with an in-memory catalog and feed the
//! resulting project version through the generator.

use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use schemaport::generate::{Action, GenerateRequest, Generator, NullSink};
use schemaport::introspect::{Introspector, MemorySource, SampleRow};
use schemaport::schema::{
    CatalogColumn, CatalogForeignKey, CatalogIndexColumn, Dialect, FieldType,
};

fn row(pairs: &[(&str, serde_json::Value)]) -> SampleRow {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn users_source() -> MemorySource {
    let samples = (0..5)
        .map(|i| {
            row(&[
                ("id", json!(Uuid::new_v4().to_string())),
                ("email", json!(format!("user{}@example.com", i))),
                ("created_at", json!("2024-03-01T10:00:00")),
            ])
        })
        .collect();

    MemorySource::new(Dialect::MySql, "app")
        .with_table(
            "users",
            vec![
                CatalogColumn::new("id", "char")
                    .column_type("char(36)")
                    .max_length(36)
                    .nullable(false)
                    .column_key("PRI"),
                CatalogColumn::new("email", "varchar")
                    .column_type("varchar(255)")
                    .max_length(255),
                CatalogColumn::new("created_at", "datetime").column_type("datetime"),
            ],
        )
        .with_indexes(
            "users",
            vec![
                CatalogIndexColumn::new("PRIMARY", "id", 1).primary(),
                CatalogIndexColumn::new("idx_email", "email", 1),
                CatalogIndexColumn::new("idx_created", "created_at", 1),
            ],
        )
        .with_samples("users", samples)
}

/// Samples refine CHAR(36) and VARCHAR columns, and the DATETIME index makes
/// lookups sortable.
#[tokio::test]
async fn test_mysql_users_round_trip() {
    let version = Introspector::new(users_source())
        .build_project_version()
        .await
        .unwrap();

    let users = version.entity_by_identifier("users").unwrap();
    assert_eq!(users.field_by_identifier("id").unwrap().field_type, FieldType::Uuid);
    assert_eq!(users.field_by_identifier("email").unwrap().field_type, FieldType::Email);

    let view = schemaport::generate::build_schema_entities(
        &version,
        Dialect::MySql,
        &[],
        &Default::default(),
    );
    let simple: Vec<_> = view[0]
        .select_statements
        .iter()
        .filter(|s| !s.is_primary && !s.combined)
        .collect();
    assert_eq!(simple.len(), 1);
    assert_eq!(simple[0].name, "UsersByEmail");
    assert!(simple[0].sort_supported);

    let request = GenerateRequest::new(Dialect::MySql, version).action(Action::SelectIndexedSimple);
    let response = Generator::new(NullSink).generate(&request).await.unwrap();
    assert_eq!(
        response.get(Action::SelectIndexedSimple).unwrap(),
        "-- UsersByEmail\n\
         SELECT `id`, `email`, `created_at` FROM `users` \
         WHERE `email` = ? ORDER BY `created_at` DESC;\n"
    );
}

/// A single non-UUID value keeps a CHAR(36) column a CHAR.
#[tokio::test]
async fn test_one_bad_sample_disables_uuid() {
    let mut samples: Vec<SampleRow> = (0..9)
        .map(|_| row(&[("token", json!(Uuid::new_v4().to_string()))]))
        .collect();
    samples.push(row(&[("token", json!("not-a-uuid"))]));

    let source = MemorySource::new(Dialect::MySql, "app")
        .with_table(
            "sessions",
            vec![CatalogColumn::new("token", "char").column_type("char(36)").max_length(36)],
        )
        .with_samples("sessions", samples);

    let version = Introspector::new(source).build_project_version().await.unwrap();
    let token = version
        .entity_by_identifier("sessions")
        .unwrap()
        .field_by_identifier("token")
        .unwrap();
    assert_eq!(token.field_type, FieldType::char(36));
}

/// Foreign keys read from the catalog order CREATE statements.
#[tokio::test]
async fn test_foreign_key_orders_create() {
    let source = MemorySource::new(Dialect::Postgres, "public")
        .with_table(
            "orders",
            vec![
                CatalogColumn::new("id", "uuid").nullable(false),
                CatalogColumn::new("customer_id", "uuid").nullable(false),
            ],
        )
        .with_indexes("orders", vec![CatalogIndexColumn::new("orders_pkey", "id", 1).primary()])
        .with_foreign_keys(
            "orders",
            vec![CatalogForeignKey::new(
                "orders_customer_id_fkey",
                "customer_id",
                "customers",
                "id",
            )],
        )
        .with_table("customers", vec![CatalogColumn::new("id", "uuid").nullable(false)])
        .with_indexes(
            "customers",
            vec![CatalogIndexColumn::new("customers_pkey", "id", 1).primary()],
        );

    let version = Introspector::new(source).build_project_version().await.unwrap();
    assert_eq!(version.relationships.len(), 1);

    let request = GenerateRequest::new(Dialect::Postgres, version).action(Action::Create);
    let response = Generator::new(NullSink).generate(&request).await.unwrap();
    let create = response.get(Action::Create).unwrap();

    let customers = create.find("CREATE TABLE IF NOT EXISTS \"customers\"").unwrap();
    let orders = create.find("CREATE TABLE IF NOT EXISTS \"orders\"").unwrap();
    assert!(customers < orders);
    assert!(create.contains(
        "CONSTRAINT \"orders_customer_id_fkey\" FOREIGN KEY (\"customer_id\") \
         REFERENCES \"customers\" (\"id\")"
    ));
}

/// Hyphenated table names are sampled and rendered quoted.
#[tokio::test]
async fn test_hyphenated_table_round_trip() {
    let samples = (0..4)
        .map(|i| row(&[("contact", json!(format!("buyer{}@example.com", i)))]))
        .collect();
    let source = MemorySource::new(Dialect::Postgres, "public")
        .with_table("customers", vec![CatalogColumn::new("id", "uuid").nullable(false)])
        .with_table(
            "order-items",
            vec![CatalogColumn::new("contact", "character varying").max_length(255)],
        )
        .with_samples("order-items", samples);

    let version = Introspector::new(source).build_project_version().await.unwrap();
    assert_eq!(version.entities.len(), 2);
    let items = version.entity_by_identifier("order-items").unwrap();
    assert_eq!(items.field_by_identifier("contact").unwrap().field_type, FieldType::Email);

    let request = GenerateRequest::new(Dialect::Postgres, version).action(Action::Create);
    let response = Generator::new(NullSink).generate(&request).await.unwrap();
    assert!(response
        .get(Action::Create)
        .unwrap()
        .contains("CREATE TABLE IF NOT EXISTS \"order-items\""));
}
