//! Project versions: the root of the canonical model.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::current_version;
use super::entity::{Entity, Field};
use super::relationship::{Relationship, RelationshipNode};
use super::types::Status;
use crate::error::{SchemaError, SchemaResult};

/// A snapshot of a database schema in dialect-neutral form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectVersion {
    /// Unique id.
    pub id: Uuid,
    /// Creation version (unix seconds).
    pub version: i64,
    /// Lifecycle status.
    #[serde(default)]
    pub status: Status,
    /// Entities in introspection order.
    #[serde(default)]
    pub entities: Vec<Entity>,
    /// Relationships between entities.
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl Default for ProjectVersion {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectVersion {
    /// Create a new, empty project version.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            version: current_version(),
            status: Status::Active,
            entities: Vec::new(),
            relationships: Vec::new(),
        }
    }

    /// Append an entity.
    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entities.push(entity);
        self
    }

    /// Append a relationship.
    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationships.push(relationship);
        self
    }

    /// Look up an entity by id.
    pub fn entity(&self, id: Uuid) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Look up an entity by table name.
    pub fn entity_by_identifier(&self, identifier: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.identifier == identifier)
    }

    /// Resolve every field of a relationship node, or `None` if any is missing.
    pub fn resolve_node(&self, node: &RelationshipNode) -> Option<(&Entity, Vec<&Field>)> {
        let entity = self.entity(node.entity_id)?;
        let fields = node
            .field_ids
            .iter()
            .map(|id| entity.field(*id))
            .collect::<Option<Vec<_>>>()?;
        Some((entity, fields))
    }

    /// Check that entity ids are unique and every relationship endpoint resolves.
    pub fn validate(&self) -> SchemaResult<()> {
        let mut seen = HashSet::with_capacity(self.entities.len());
        for entity in &self.entities {
            if !seen.insert(entity.id) {
                return Err(SchemaError::DuplicateEntity {
                    id: entity.id.to_string(),
                    identifier: entity.identifier.clone(),
                });
            }
        }

        for rel in &self.relationships {
            for node in [&rel.from, &rel.to] {
                let Some(entity) = self.entity(node.entity_id) else {
                    return Err(SchemaError::dangling(
                        &rel.identifier,
                        format!("entity {}", node.entity_id),
                    ));
                };
                if let Some(missing) = node.field_ids.iter().find(|id| entity.field(**id).is_none())
                {
                    return Err(SchemaError::dangling(
                        &rel.identifier,
                        format!("field {} of `{}`", missing, entity.identifier),
                    ));
                }
            }
        }

        Ok(())
    }

    /// Encode as pretty-printed JSON.
    pub fn to_json(&self) -> SchemaResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode from JSON.
    pub fn from_json(json: &str) -> SchemaResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
