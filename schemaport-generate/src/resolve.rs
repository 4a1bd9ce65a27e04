//! Foreign key resolution for rendering.

use schemaport_schema::{Entity, ProjectVersion};
use tracing::debug;

use crate::view::SchemaConstraint;

/// Foreign keys declared by `entity`.
///
/// A relationship becomes a constraint when it is FK-backed, starts at
/// `entity`, both ends are standalone entities of `version` and every field
/// on both sides resolves to an active field. Anything else is skipped.
/// Column pairs keep relationship order so composite keys stay aligned.
pub fn resolve_constraints(entity: &Entity, version: &ProjectVersion) -> Vec<SchemaConstraint> {
    version
        .relationships
        .iter()
        .filter(|rel| {
            rel.use_foreign_key && rel.status.is_active() && rel.from.entity_id == entity.id
        })
        .filter_map(|rel| {
            let resolved = version
                .resolve_node(&rel.from)
                .zip(version.resolve_node(&rel.to));
            let Some(((from_entity, from_fields), (to_entity, to_fields))) = resolved else {
                debug!(relationship = %rel.identifier, "Skipping unresolved relationship");
                return None;
            };

            let renderable = from_entity.is_standalone()
                && to_entity.is_standalone()
                && !to_entity.identifier.is_empty()
                && !from_fields.is_empty()
                && from_fields.len() == to_fields.len()
                && from_fields
                    .iter()
                    .chain(to_fields.iter())
                    .all(|f| f.status.is_active());
            if !renderable {
                debug!(relationship = %rel.identifier, "Skipping non-renderable relationship");
                return None;
            }

            Some(SchemaConstraint {
                name: rel.identifier.clone(),
                table_name: to_entity.identifier.clone(),
                from_fields: from_fields.iter().map(|f| f.identifier.clone()).collect(),
                to_fields: to_fields.iter().map(|f| f.identifier.clone()).collect(),
            })
        })
        .collect()
}
