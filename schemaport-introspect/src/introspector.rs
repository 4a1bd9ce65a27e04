//! Turns catalog rows and samples into the canonical model.

use indexmap::IndexMap;
use schemaport_schema::typemap;
use schemaport_schema::{
    Cardinality, CatalogForeignKey, CatalogIndexColumn, Dialect, Entity, Field, Index, IndexField,
    ProjectVersion, Relationship, RelationshipNode, SortOrder,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::classifier::SampleSet;
use crate::config::IntrospectionConfig;
use crate::error::{IntrospectError, IntrospectResult};
use crate::executor::BoundedExecutor;
use crate::source::CatalogSource;

/// Prefix length applied to MySQL text and blob index columns without `SUB_PART`.
pub const DEFAULT_INDEX_PREFIX: u32 = 255;

/// Reads one schema through a [`CatalogSource`] and builds a [`ProjectVersion`].
pub struct Introspector<S> {
    source: S,
    config: IntrospectionConfig,
    executor: BoundedExecutor,
}

impl<S: CatalogSource> Introspector<S> {
    /// Create a new introspector with the default configuration.
    pub fn new(source: S) -> Self {
        Self::with_config(source, IntrospectionConfig::default())
    }

    /// Create a new introspector with the given configuration.
    pub fn with_config(source: S, config: IntrospectionConfig) -> Self {
        let executor = BoundedExecutor::new(config.max_concurrency);
        Self {
            source,
            config,
            executor,
        }
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The active configuration.
    pub fn config(&self) -> &IntrospectionConfig {
        &self.config
    }

    /// Dialect of the source.
    pub fn dialect(&self) -> Dialect {
        self.source.dialect()
    }

    /// Tables of the schema, after include/exclude filtering.
    pub async fn list_tables(&self) -> IntrospectResult<Vec<String>> {
        let tables = self.source.list_tables().await?;
        let total = tables.len();
        let tables: Vec<String> = tables
            .into_iter()
            .filter(|t| self.config.should_include_table(t))
            .collect();

        debug!(
            schema = %self.source.schema_name(),
            total,
            included = tables.len(),
            "Listed tables"
        );
        Ok(tables)
    }

    /// Build the entity for one table: fields, key flags and indexes.
    pub async fn build_entity(&self, table: &str) -> IntrospectResult<Entity> {
        let dialect = self.dialect();
        let columns = self.source.list_columns(table).await?;
        let samples = if self.config.sample_size > 0 {
            match self.source.sample_rows(table, self.config.sample_size).await {
                Ok(rows) => SampleSet::new(rows),
                Err(IntrospectError::InvalidIdentifier(name)) => {
                    warn!(
                        table = %table,
                        name = %name,
                        "Cannot sample table, skipping type refinement"
                    );
                    SampleSet::default()
                }
                Err(e) => return Err(e),
            }
        } else {
            SampleSet::default()
        };
        let index_rows = self.source.list_indexes(table).await?;
        let groups = group_index_rows(&index_rows);

        let mut entity = Entity::new(table);
        for column in &columns {
            let field_type = typemap::column_to_field_type(dialect, column, &samples);
            if field_type.is_invalid() {
                warn!(
                    table = %table,
                    column = %column.name,
                    data_type = %column.data_type,
                    "Skipping column with unsupported type"
                );
                continue;
            }

            let (key, unique) = match dialect {
                Dialect::MySql => (column.column_key == "PRI", column.column_key == "UNI"),
                Dialect::Postgres => key_flags_from_indexes(&groups, &column.name),
            };

            entity = entity.with_field(
                Field::new(&column.name, field_type)
                    .required(!column.nullable)
                    .key(key)
                    .unique(unique),
            );
        }

        for (name, rows) in &groups {
            match build_index(dialect, name, rows, &entity) {
                Some(index) => entity = entity.with_index(index),
                None => debug!(
                    table = %table,
                    index = %name,
                    "Skipping index with unresolved columns"
                ),
            }
        }

        debug!(
            table = %table,
            columns = columns.len(),
            fields = entity.fields.len(),
            indexes = entity.indexes().len(),
            samples = samples.len(),
            "Built entity"
        );
        Ok(entity)
    }

    /// Build the foreign-key relationships declared on `table`.
    ///
    /// Endpoints are resolved by name against `known`; a constraint with any
    /// unresolved table or column is dropped.
    pub async fn build_relationships(
        &self,
        table: &str,
        known: &[Entity],
    ) -> IntrospectResult<Vec<Relationship>> {
        let Some(from_entity) = known.iter().find(|e| e.identifier == table) else {
            debug!(table = %table, "Table not among known entities, skipping relationships");
            return Ok(Vec::new());
        };

        let rows = self.source.list_foreign_keys(table).await?;
        let mut groups: IndexMap<&str, Vec<&CatalogForeignKey>> = IndexMap::new();
        for row in &rows {
            groups.entry(row.constraint_name.as_str()).or_default().push(row);
        }

        let mut relationships = Vec::with_capacity(groups.len());
        for (name, pairs) in groups {
            match build_relationship(name, &pairs, from_entity, known) {
                Some(rel) => relationships.push(rel),
                None => debug!(
                    table = %table,
                    constraint = %name,
                    "Dropping relationship with unresolved endpoint"
                ),
            }
        }
        Ok(relationships)
    }

    /// Introspect the whole schema.
    ///
    /// Entities are built concurrently, one task per table; relationships are
    /// built once every entity is known, one task per entity.
    pub async fn build_project_version(&self) -> IntrospectResult<ProjectVersion> {
        let tables = self.list_tables().await?;

        info!(
            dialect = %self.dialect(),
            schema = %self.source.schema_name(),
            tables = tables.len(),
            max_concurrency = self.executor.max_concurrency(),
            "Introspecting schema"
        );

        let entities = self
            .executor
            .try_execute_all(tables.iter().map(|t| move || self.build_entity(t)))
            .await?;

        let known = entities.as_slice();
        let relationships: Vec<Relationship> = self
            .executor
            .try_execute_all(
                known
                    .iter()
                    .map(|e| move || self.build_relationships(&e.identifier, known)),
            )
            .await?
            .into_iter()
            .flatten()
            .collect();

        let mut version = ProjectVersion::new();
        version.entities = entities;
        version.relationships = relationships;
        version.validate()?;

        info!(
            entities = version.entities.len(),
            relationships = version.relationships.len(),
            "Introspection complete"
        );
        Ok(version)
    }
}

/// Group index rows by index name in first-seen order, each group sorted by position.
fn group_index_rows(rows: &[CatalogIndexColumn]) -> IndexMap<&str, Vec<&CatalogIndexColumn>> {
    let mut groups: IndexMap<&str, Vec<&CatalogIndexColumn>> = IndexMap::new();
    for row in rows {
        groups.entry(row.index_name.as_str()).or_default().push(row);
    }
    for rows in groups.values_mut() {
        rows.sort_by_key(|r| r.seq);
    }
    groups
}

/// Key and unique flags of a column derived from index rows.
///
/// A column is a key when it belongs to the primary index, and unique when a
/// single-column, non-primary unique index covers it.
fn key_flags_from_indexes(
    groups: &IndexMap<&str, Vec<&CatalogIndexColumn>>,
    column: &str,
) -> (bool, bool) {
    let covers = |rows: &[&CatalogIndexColumn]| {
        rows.iter().any(|r| r.column_name.as_deref() == Some(column))
    };

    let key = groups
        .values()
        .any(|rows| rows.first().is_some_and(|r| r.primary) && covers(rows.as_slice()));
    let unique = groups.values().any(|rows| {
        rows.len() == 1 && rows[0].unique && !rows[0].primary && covers(rows.as_slice())
    });
    (key, unique)
}

fn build_index(
    dialect: Dialect,
    name: &str,
    rows: &[&CatalogIndexColumn],
    entity: &Entity,
) -> Option<Index> {
    let first = rows.first()?;
    let mut index = Index::new(name, first.kind());

    for row in rows {
        let field = entity.field_by_identifier(row.column_name.as_deref()?)?;
        let length = match dialect {
            Dialect::MySql => row.sub_part.or_else(|| {
                field
                    .field_type
                    .needs_index_prefix()
                    .then_some(DEFAULT_INDEX_PREFIX)
            }),
            Dialect::Postgres => None,
        };
        index = index.with_index_field(IndexField {
            field_id: field.id,
            priority: row.seq,
            order: if row.ascending {
                SortOrder::Asc
            } else {
                SortOrder::Desc
            },
            length,
        });
    }
    Some(index)
}

fn build_relationship(
    name: &str,
    pairs: &[&CatalogForeignKey],
    from_entity: &Entity,
    known: &[Entity],
) -> Option<Relationship> {
    let target = &pairs.first()?.referenced_table;
    if pairs.iter().any(|p| &p.referenced_table != target) {
        return None;
    }
    let to_entity = known.iter().find(|e| &e.identifier == target)?;

    let resolve = |entity: &Entity, column: &str| entity.field_by_identifier(column).map(|f| f.id);
    let from_ids = pairs
        .iter()
        .map(|p| resolve(from_entity, p.column_name.as_str()))
        .collect::<Option<Vec<Uuid>>>()?;
    let to_ids = pairs
        .iter()
        .map(|p| resolve(to_entity, p.referenced_column.as_str()))
        .collect::<Option<Vec<Uuid>>>()?;

    let cardinality = if from_entity.is_unique_key(&from_ids) {
        Cardinality::OneToOne
    } else {
        Cardinality::ManyToOne
    };

    Some(
        Relationship::foreign_key(
            name,
            RelationshipNode::new(from_entity.id, from_ids),
            RelationshipNode::new(to_entity.id, to_ids),
        )
        .cardinality(cardinality),
    )
}
