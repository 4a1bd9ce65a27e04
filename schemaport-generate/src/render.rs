//! Projection of a project version into render view models, plus the
//! single-row literal renderers.

use std::collections::{HashMap, HashSet};

use schemaport_schema::{Dialect, ProjectVersion};
use tracing::debug;
use uuid::Uuid;

use crate::error::{GenerateError, GenerateResult};
use crate::escape::quote_value;
use crate::select::SelectOptions;
use crate::sort::sort_entities;
use crate::view::{SchemaEntity, SchemaField};

/// Build the render views for `dialect`, in dependency order.
///
/// An empty `entity_ids` selects every entity, not none. Dependent entities and
/// entities with an empty identifier are skipped. Postgres index names are
/// made unique across the result.
pub fn build_schema_entities(
    version: &ProjectVersion,
    dialect: Dialect,
    entity_ids: &[Uuid],
    options: &SelectOptions,
) -> Vec<SchemaEntity> {
    let selected: HashSet<Uuid> = entity_ids.iter().copied().collect();

    let mut entities: Vec<SchemaEntity> = sort_entities(version)
        .into_iter()
        .filter(|e| selected.is_empty() || selected.contains(&e.id))
        .filter(|e| e.is_standalone() && !e.identifier.is_empty())
        .map(|e| SchemaEntity::build(e, version, dialect, options))
        .collect();

    if dialect == Dialect::Postgres {
        dedup_index_names(&mut entities);
    }

    debug!(
        dialect = %dialect,
        entities = entities.len(),
        "Built render entities"
    );
    entities
}

/// Rename repeated index names to `name_2`, `name_3`, ... in enumeration order.
///
/// The first use of a name keeps it. Suffixed names never collide with any
/// name already present in `entities` or generated earlier.
pub fn dedup_index_names(entities: &mut [SchemaEntity]) {
    let mut taken: HashSet<String> = entities
        .iter()
        .flat_map(|e| e.indexes.iter().map(|i| i.name.clone()))
        .collect();
    let mut seen: HashSet<String> = HashSet::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for index in entities.iter_mut().flat_map(|e| e.indexes.iter_mut()) {
        if seen.insert(index.name.clone()) {
            continue;
        }

        let count = counts.entry(index.name.clone()).or_insert(1);
        let candidate = loop {
            *count += 1;
            let candidate = format!("{}_{}", index.name, count);
            if !taken.contains(&candidate) {
                break candidate;
            }
        };
        taken.insert(candidate.clone());
        index.name = candidate;
    }
}

/// `INSERT` of one row with literal values.
///
/// `values` maps field ids to raw values; columns without a value are `NULL`.
pub fn insert_with_values(
    version: &ProjectVersion,
    entity_id: Uuid,
    dialect: Dialect,
    values: &HashMap<Uuid, String>,
) -> GenerateResult<String> {
    let entity = single_entity(version, entity_id, dialect)?;
    if entity.fields.is_empty() {
        return Err(GenerateError::invalid_request(format!(
            "entity `{}` has no renderable columns",
            entity.name
        )));
    }

    let columns: Vec<String> = entity.fields.iter().map(|f| dialect.quote_ident(&f.name)).collect();
    let literals: Vec<String> = entity
        .fields
        .iter()
        .map(|f| literal(dialect, values.get(&f.field_id)))
        .collect();

    Ok(format!(
        "INSERT INTO {} ({}) VALUES ({});",
        dialect.quote_ident(&entity.name),
        columns.join(", "),
        literals.join(", ")
    ))
}

/// `UPDATE` of one row with literal values.
///
/// Fields in `values` that are not among `keys` are assigned; `keys` select
/// the row. Both sides must be non-empty.
pub fn update_with_values(
    version: &ProjectVersion,
    entity_id: Uuid,
    dialect: Dialect,
    values: &HashMap<Uuid, String>,
    keys: &HashMap<Uuid, String>,
) -> GenerateResult<String> {
    let entity = single_entity(version, entity_id, dialect)?;

    let assign = |f: &SchemaField, value: Option<&String>| {
        format!("{} = {}", dialect.quote_ident(&f.name), literal(dialect, value))
    };

    let set: Vec<String> = entity
        .fields
        .iter()
        .filter(|f| values.contains_key(&f.field_id) && !keys.contains_key(&f.field_id))
        .map(|f| assign(f, values.get(&f.field_id)))
        .collect();
    let filter: Vec<String> = entity
        .fields
        .iter()
        .filter(|f| keys.contains_key(&f.field_id))
        .map(|f| assign(f, keys.get(&f.field_id)))
        .collect();

    if set.is_empty() {
        return Err(GenerateError::invalid_request("update has no values to set"));
    }
    if filter.is_empty() {
        return Err(GenerateError::invalid_request("update has no key to match"));
    }

    Ok(format!(
        "UPDATE {} SET {} WHERE {};",
        dialect.quote_ident(&entity.name),
        set.join(", "),
        filter.join(" AND ")
    ))
}

fn single_entity(
    version: &ProjectVersion,
    entity_id: Uuid,
    dialect: Dialect,
) -> GenerateResult<SchemaEntity> {
    let entity = version
        .entity(entity_id)
        .filter(|e| e.is_standalone())
        .ok_or(GenerateError::UnknownEntity(entity_id))?;
    Ok(SchemaEntity::build(entity, version, dialect, &SelectOptions::default()))
}

fn literal(dialect: Dialect, value: Option<&String>) -> String {
    value.map_or_else(|| "NULL".to_string(), |v| quote_value(dialect, v))
}
