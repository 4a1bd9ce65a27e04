//! Dependency ordering of entities.

use std::collections::{HashMap, HashSet};

use schemaport_schema::{Entity, ProjectVersion};
use uuid::Uuid;

/// Order entities so that foreign-key targets precede the entities referencing them.
///
/// Entities without outgoing foreign keys come first in their original order.
/// Repeated passes then emit every entity whose targets have all been emitted.
/// Whatever remains (cycles) follows by ascending relationship degree, ties
/// kept in original order. Self references and references to entities
/// missing from the version never block an entity.
///
/// The result is always a permutation of `version.entities`.
pub fn sort_entities(version: &ProjectVersion) -> Vec<&Entity> {
    let present: HashSet<Uuid> = version.entities.iter().map(|e| e.id).collect();

    let mut targets: HashMap<Uuid, HashSet<Uuid>> = HashMap::new();
    let mut degree: HashMap<Uuid, usize> = HashMap::new();
    for rel in &version.relationships {
        *degree.entry(rel.from.entity_id).or_default() += 1;
        *degree.entry(rel.to.entity_id).or_default() += 1;

        if rel.use_foreign_key && !rel.is_self_reference() && present.contains(&rel.to.entity_id)
        {
            targets
                .entry(rel.from.entity_id)
                .or_default()
                .insert(rel.to.entity_id);
        }
    }

    let mut sorted: Vec<&Entity> = Vec::with_capacity(version.entities.len());
    let mut emitted: HashSet<Uuid> = HashSet::with_capacity(version.entities.len());

    for entity in &version.entities {
        if targets.get(&entity.id).is_none_or(|t| t.is_empty()) && emitted.insert(entity.id) {
            sorted.push(entity);
        }
    }

    loop {
        let mut progressed = false;
        for entity in &version.entities {
            if emitted.contains(&entity.id) {
                continue;
            }
            let ready = targets
                .get(&entity.id)
                .is_none_or(|t| t.iter().all(|id| emitted.contains(id)));
            if ready {
                emitted.insert(entity.id);
                sorted.push(entity);
                progressed = true;
            }
        }
        if !progressed {
            break;
        }
    }

    let mut rest: Vec<&Entity> = version
        .entities
        .iter()
        .filter(|e| !emitted.contains(&e.id))
        .collect();
    // stable sort keeps original order among equal degrees
    rest.sort_by_key(|e| degree.get(&e.id).copied().unwrap_or(0));
    sorted.extend(rest);

    sorted
}
