// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use accessmap_domain::{CheckpointId, Entity, EntityId, ZONES_DEFINITION};
use serde::de::{Error as _, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The complete access-control topology of one event.
///
/// A topology is a value: transitions never mutate it in place, they
/// produce a new one. Entities are kept in creation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TopologyDocument", into = "TopologyDocument")]
pub struct Topology {
    /// The event this topology belongs to.
    pub event_id: String,
    /// Document tag; `zonesDefinition` for a configured topology.
    pub operation: String,
    entities: Vec<Entity>,
}

impl Topology {
    /// Creates an empty zones-definition topology.
    #[must_use]
    pub fn new(event_id: &str) -> Self {
        Self {
            event_id: event_id.to_string(),
            operation: ZONES_DEFINITION.to_string(),
            entities: Vec::new(),
        }
    }

    /// Creates a topology from already-validated parts.
    ///
    /// Later entities replace earlier ones with the same identifier.
    #[must_use]
    pub fn from_parts(event_id: &str, operation: &str, entities: Vec<Entity>) -> Self {
        let mut topology: Self = Self {
            event_id: event_id.to_string(),
            operation: operation.to_string(),
            entities: Vec::with_capacity(entities.len()),
        };
        for entity in entities {
            topology.upsert_entity(entity);
        }
        topology
    }

    /// Returns whether this document is tagged as a zones definition.
    #[must_use]
    pub fn is_zones_definition(&self) -> bool {
        self.operation == ZONES_DEFINITION
    }

    /// All entities in creation order.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Looks up one entity.
    #[must_use]
    pub fn entity(&self, entity_id: &EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id() == entity_id)
    }

    /// Returns whether an entity with this identifier exists.
    #[must_use]
    pub fn contains(&self, entity_id: &EntityId) -> bool {
        self.entity(entity_id).is_some()
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns whether there are no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// One-line description used in log output.
    #[must_use]
    pub fn describe(&self) -> String {
        let checkpoints: usize = self
            .entities
            .iter()
            .map(|entity| entity.checkpoints().len())
            .sum();
        format!(
            "event_id={},entities={},checkpoints={}",
            self.event_id,
            self.entities.len(),
            checkpoints
        )
    }

    pub(crate) fn entity_mut(&mut self, entity_id: &EntityId) -> Option<&mut Entity> {
        self.entities
            .iter_mut()
            .find(|entity| entity.id() == entity_id)
    }

    pub(crate) fn upsert_entity(&mut self, entity: Entity) {
        match self.entity_mut(&entity.id().clone()) {
            Some(existing) => *existing = entity,
            None => self.entities.push(entity),
        }
    }

    pub(crate) fn remove_entity(&mut self, entity_id: &EntityId) -> Option<Entity> {
        let index: usize = self
            .entities
            .iter()
            .position(|entity| entity.id() == entity_id)?;
        Some(self.entities.remove(index))
    }
}

/// Why a command left the topology unchanged without failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The targeted entity does not exist.
    EntityNotFound(EntityId),
    /// The targeted checkpoint does not exist on the entity.
    CheckpointNotFound {
        /// The owning entity.
        entity_id: EntityId,
        /// The missing checkpoint.
        checkpoint_id: CheckpointId,
    },
    /// The entity does not accept occupancy reports.
    UpdatePolicyDisabled(EntityId),
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EntityNotFound(id) => write!(f, "entity '{id}' not found"),
            Self::CheckpointNotFound {
                entity_id,
                checkpoint_id,
            } => write!(
                f,
                "checkpoint '{checkpoint_id}' not found on entity '{entity_id}'"
            ),
            Self::UpdatePolicyDisabled(id) => {
                write!(f, "update policy is disabled for entity '{id}'")
            }
        }
    }
}

/// Whether a command changed the topology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The command was applied.
    Applied,
    /// The command was a no-op.
    Ignored(IgnoreReason),
}

impl Outcome {
    /// Returns whether the command was applied.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// A record of what a command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    /// The command name (e.g., "`CreateGate`").
    pub action: String,
    /// The entity the command targeted or created.
    pub entity_id: EntityId,
    /// Human-readable description.
    pub details: String,
}

impl Change {
    /// Creates a new `Change`.
    #[must_use]
    pub const fn new(action: String, entity_id: EntityId, details: String) -> Self {
        Self {
            action,
            entity_id,
            details,
        }
    }
}

/// The result of a successful transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects. An ignored command yields an unchanged copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The topology after the transition.
    pub new_topology: Topology,
    /// Whether anything changed.
    pub outcome: Outcome,
    /// What the command did.
    pub change: Change,
}

/// The stored shape of a topology.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TopologyDocument {
    #[serde(default)]
    event_id: String,
    #[serde(default)]
    operation: String,
    #[serde(default)]
    data: ZonesData,
}

#[derive(Default, Serialize, Deserialize)]
struct ZonesData {
    #[serde(default)]
    zones: EntityMap,
}

/// Entities keyed by identifier, preserving document order.
#[derive(Default)]
struct EntityMap(Vec<Entity>);

impl Serialize for EntityMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entity in &self.0 {
            map.serialize_entry(entity.id(), entity)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for EntityMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntityMapVisitor;

        impl<'de> Visitor<'de> for EntityMapVisitor {
            type Value = EntityMap;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of entity id to entity")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entities: Vec<Entity> = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, entity)) = access.next_entry::<String, Entity>()? {
                    if key != entity.id().value() {
                        return Err(A::Error::custom(format!(
                            "zone key '{key}' does not match zoneId '{}'",
                            entity.id()
                        )));
                    }
                    if entities.iter().any(|existing| existing.id() == entity.id()) {
                        return Err(A::Error::custom(format!(
                            "zone '{key}' appears more than once"
                        )));
                    }
                    entities.push(entity);
                }
                Ok(EntityMap(entities))
            }
        }

        deserializer.deserialize_map(EntityMapVisitor)
    }
}

impl From<TopologyDocument> for Topology {
    fn from(document: TopologyDocument) -> Self {
        Self::from_parts(
            &document.event_id,
            &document.operation,
            document.data.zones.0,
        )
    }
}

impl From<Topology> for TopologyDocument {
    fn from(topology: Topology) -> Self {
        Self {
            event_id: topology.event_id,
            operation: topology.operation,
            data: ZonesData {
                zones: EntityMap(topology.entities),
            },
        }
    }
}
