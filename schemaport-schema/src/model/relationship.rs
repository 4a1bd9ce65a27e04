//! Relationships between entities.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::current_version;
use super::types::Status;

/// Cardinality of a relationship, seen from its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    /// One row on each side.
    OneToOne,
    /// One source row, many targets.
    OneToMany,
    /// Many source rows share one target.
    ManyToOne,
    /// Many on both sides.
    ManyToMany,
}

/// One end of a relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipNode {
    /// Entity id.
    pub entity_id: Uuid,
    /// Participating field ids, aligned with the other end.
    pub field_ids: Vec<Uuid>,
}

impl RelationshipNode {
    /// Create a new node.
    pub fn new(entity_id: Uuid, field_ids: Vec<Uuid>) -> Self {
        Self {
            entity_id,
            field_ids,
        }
    }
}

/// A link between two entities, usually a foreign key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Unique id.
    pub id: Uuid,
    /// Creation version (unix seconds).
    pub version: i64,
    /// Constraint name.
    pub identifier: String,
    /// Referencing side.
    pub from: RelationshipNode,
    /// Referenced side.
    pub to: RelationshipNode,
    /// Lifecycle status.
    #[serde(default)]
    pub status: Status,
    /// Whether the link is enforced with a foreign key constraint.
    pub use_foreign_key: bool,
    /// Cardinality.
    pub cardinality: Cardinality,
}

impl Relationship {
    /// Create a new foreign-key backed, many-to-one relationship.
    pub fn foreign_key(
        identifier: impl Into<String>,
        from: RelationshipNode,
        to: RelationshipNode,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            version: current_version(),
            identifier: identifier.into(),
            from,
            to,
            status: Status::Active,
            use_foreign_key: true,
            cardinality: Cardinality::ManyToOne,
        }
    }

    /// Set the cardinality.
    pub fn cardinality(mut self, cardinality: Cardinality) -> Self {
        self.cardinality = cardinality;
        self
    }

    /// Set whether the relationship is enforced by a foreign key.
    pub fn use_foreign_key(mut self, use_foreign_key: bool) -> Self {
        self.use_foreign_key = use_foreign_key;
        self
    }

    /// Check if the relationship points back at its own entity.
    pub fn is_self_reference(&self) -> bool {
        self.from.entity_id == self.to.entity_id
    }
}
