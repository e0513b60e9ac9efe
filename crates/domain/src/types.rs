// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::ids::gate_entry_checkpoint_id;
use crate::links::{LinkScope, qr_share_link, share_link};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Identifies an entity within one event topology.
///
/// Identifiers have the form `<kind-prefix>#<token>` and are never reused.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Wraps an existing identifier.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifies a checkpoint within its owning entity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckpointId(String);

impl CheckpointId {
    /// Wraps an existing identifier.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CheckpointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The kind tag of an entity as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityKind {
    /// An entry gate.
    Gate,
    /// A top-level venue.
    Venue,
    /// A top-level zone.
    Zone,
    /// A subzone nested under a zone or venue.
    Subzone,
}

impl EntityKind {
    /// Every kind, in display order.
    pub const ALL: [Self; 4] = [Self::Gate, Self::Venue, Self::Zone, Self::Subzone];

    /// Converts this kind to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gate => "GATE",
            Self::Venue => "VENUE",
            Self::Zone => "ZONE",
            Self::Subzone => "SUBZONE",
        }
    }

    /// The prefix used when generating identifiers for this kind.
    #[must_use]
    pub const fn id_prefix(&self) -> &'static str {
        match self {
            Self::Gate => "gate",
            Self::Venue => "venue",
            Self::Zone => "zone",
            Self::Subzone => "subzone",
        }
    }

    /// Returns whether entities of this kind may hold subzones.
    #[must_use]
    pub const fn can_parent_subzones(&self) -> bool {
        matches!(self, Self::Venue | Self::Zone)
    }
}

impl FromStr for EntityKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GATE" => Ok(Self::Gate),
            "VENUE" => Ok(Self::Venue),
            "ZONE" => Ok(Self::Zone),
            "SUBZONE" => Ok(Self::Subzone),
            _ => Err(DomainError::InvalidKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named credential class that may be admitted to an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessType {
    /// General admission.
    General,
    /// Backstage areas.
    Backstage,
    /// The stage itself.
    Stage,
    /// Contractual commitments (crew, suppliers).
    Compromis,
    /// VIP guests.
    Vip,
}

impl AccessType {
    /// Every access type, in wire order.
    pub const ALL: [Self; 5] = [
        Self::General,
        Self::Backstage,
        Self::Stage,
        Self::Compromis,
        Self::Vip,
    ];

    /// Converts this access type to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::General => "GENERAL",
            Self::Backstage => "BACKSTAGE",
            Self::Stage => "STAGE",
            Self::Compromis => "COMPROMIS",
            Self::Vip => "VIP",
        }
    }
}

impl FromStr for AccessType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GENERAL" => Ok(Self::General),
            "BACKSTAGE" => Ok(Self::Backstage),
            "STAGE" => Ok(Self::Stage),
            "COMPROMIS" => Ok(Self::Compromis),
            "VIP" => Ok(Self::Vip),
            _ => Err(DomainError::InvalidAccessType(s.to_string())),
        }
    }
}

impl std::fmt::Display for AccessType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The set of access flags carried by an entity.
///
/// Each flag is independent; absent flags decode as disabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", default)]
#[allow(clippy::struct_excessive_bools)]
pub struct AccessTypes {
    /// General admission.
    pub general: bool,
    /// Backstage areas.
    pub backstage: bool,
    /// The stage itself.
    pub stage: bool,
    /// Contractual commitments.
    pub compromis: bool,
    /// VIP guests.
    pub vip: bool,
}

impl AccessTypes {
    /// Every flag enabled.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            general: true,
            backstage: true,
            stage: true,
            compromis: true,
            vip: true,
        }
    }

    /// Every flag disabled.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            general: false,
            backstage: false,
            stage: false,
            compromis: false,
            vip: false,
        }
    }

    /// Builds a flag set with exactly the given access types enabled.
    #[must_use]
    pub fn from_enabled(enabled: &[AccessType]) -> Self {
        enabled
            .iter()
            .fold(Self::none(), |flags, access| flags.with(*access, true))
    }

    /// Returns whether the given access type is enabled.
    #[must_use]
    pub const fn is_enabled(&self, access: AccessType) -> bool {
        match access {
            AccessType::General => self.general,
            AccessType::Backstage => self.backstage,
            AccessType::Stage => self.stage,
            AccessType::Compromis => self.compromis,
            AccessType::Vip => self.vip,
        }
    }

    /// Returns a copy with one flag set.
    #[must_use]
    pub const fn with(mut self, access: AccessType, enabled: bool) -> Self {
        match access {
            AccessType::General => self.general = enabled,
            AccessType::Backstage => self.backstage = enabled,
            AccessType::Stage => self.stage = enabled,
            AccessType::Compromis => self.compromis = enabled,
            AccessType::Vip => self.vip = enabled,
        }
        self
    }

    /// The enabled access types, in wire order.
    #[must_use]
    pub fn enabled(&self) -> Vec<AccessType> {
        AccessType::ALL
            .into_iter()
            .filter(|access| self.is_enabled(*access))
            .collect()
    }
}

/// Direction of travel through a checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// Entering the entity.
    In,
    /// Leaving the entity.
    Out,
}

impl Direction {
    /// Converts this direction to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Out => "OUT",
        }
    }
}

impl FromStr for Direction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "IN" => Ok(Self::In),
            "OUT" => Ok(Self::Out),
            _ => Err(DomainError::InvalidDirection(s.to_string())),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A directional access point owned by exactly one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkpoint {
    /// Unique within the owning entity.
    pub checkpoint_id: CheckpointId,
    /// Display name.
    pub name: String,
    /// Direction of travel.
    #[serde(rename = "type")]
    pub direction: Direction,
    /// Operator role assigned to the device at this checkpoint.
    pub role: String,
    /// Shareable link to the checkpoint scanner page.
    pub share_link: String,
    /// Shareable link rendered as a QR code.
    pub qr_share_link: String,
    /// Hardware binding of the scanning device, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_imei: Option<String>,
}

impl Checkpoint {
    /// Creates a checkpoint, deriving both share links from its name.
    ///
    /// An empty device IMEI is treated as no binding.
    ///
    /// # Arguments
    ///
    /// * `checkpoint_id` - The checkpoint identifier
    /// * `name` - The display name (also the share-link slug source)
    /// * `direction` - IN or OUT
    /// * `role` - The operator role label
    /// * `scope` - Which share-link path segment to use
    /// * `device_imei` - Optional hardware binding
    #[must_use]
    pub fn new(
        checkpoint_id: CheckpointId,
        name: &str,
        direction: Direction,
        role: &str,
        scope: LinkScope,
        device_imei: Option<String>,
    ) -> Self {
        Self {
            checkpoint_id,
            name: name.to_string(),
            direction,
            role: role.to_string(),
            share_link: share_link(scope, name),
            qr_share_link: qr_share_link(scope, name),
            device_imei: device_imei.filter(|imei| !imei.trim().is_empty()),
        }
    }

    /// Creates the `IN` checkpoint that accompanies a new gate.
    ///
    /// The checkpoint is named `"<gate name> Entry"` and its share links
    /// point at the gate, not at the checkpoint name.
    #[must_use]
    pub fn gate_entry(gate_name: &str, role: &str, device_imei: Option<String>) -> Self {
        Self {
            checkpoint_id: gate_entry_checkpoint_id(gate_name),
            name: format!("{gate_name} Entry"),
            direction: Direction::In,
            role: role.to_string(),
            share_link: share_link(LinkScope::Gate, gate_name),
            qr_share_link: qr_share_link(LinkScope::Gate, gate_name),
            device_imei: device_imei.filter(|imei| !imei.trim().is_empty()),
        }
    }
}

/// Where an entity sits in the hierarchy.
///
/// Only subzones carry a parent, and their parent is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// A top-level entry gate.
    Gate,
    /// A top-level venue.
    Venue,
    /// A top-level zone.
    Zone,
    /// A subzone under a zone or venue.
    Subzone {
        /// The parent entity.
        parent_id: EntityId,
        /// The parent's name when the subzone was created.
        parent_name: String,
    },
}

impl Placement {
    /// The wire kind tag of this placement.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Gate => EntityKind::Gate,
            Self::Venue => EntityKind::Venue,
            Self::Zone => EntityKind::Zone,
            Self::Subzone { .. } => EntityKind::Subzone,
        }
    }
}

/// A node in the access-control hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EntityRecord", into = "EntityRecord")]
pub struct Entity {
    id: EntityId,
    placement: Placement,
    /// Display name.
    pub name: String,
    /// Ceiling on simultaneous occupancy.
    pub max_capacity: u32,
    /// Last reported occupancy. May exceed `max_capacity`.
    pub current_occupancy: u32,
    /// Credential classes admitted.
    pub access_types: AccessTypes,
    /// Whether externally reported occupancy is accepted.
    pub update_policy: bool,
    checkpoints: BTreeMap<CheckpointId, Checkpoint>,
}

impl Entity {
    /// Creates an entity with zero occupancy, no checkpoints and the update
    /// policy enabled.
    ///
    /// # Arguments
    ///
    /// * `id` - The entity identifier
    /// * `name` - The display name
    /// * `placement` - The entity's kind and parent
    /// * `max_capacity` - The occupancy ceiling
    /// * `access_types` - The admitted credential classes
    #[must_use]
    pub fn new(
        id: EntityId,
        name: &str,
        placement: Placement,
        max_capacity: u32,
        access_types: AccessTypes,
    ) -> Self {
        Self {
            id,
            placement,
            name: name.to_string(),
            max_capacity,
            current_occupancy: 0,
            access_types,
            update_policy: true,
            checkpoints: BTreeMap::new(),
        }
    }

    /// Returns the entity identifier.
    #[must_use]
    pub const fn id(&self) -> &EntityId {
        &self.id
    }

    /// Returns the entity placement.
    #[must_use]
    pub const fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Returns the entity kind.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.placement.kind()
    }

    /// Returns the parent identifier for subzones.
    #[must_use]
    pub const fn parent_id(&self) -> Option<&EntityId> {
        match &self.placement {
            Placement::Subzone { parent_id, .. } => Some(parent_id),
            Placement::Gate | Placement::Venue | Placement::Zone => None,
        }
    }

    /// Returns the parent name snapshot for subzones.
    #[must_use]
    pub fn parent_name(&self) -> Option<&str> {
        match &self.placement {
            Placement::Subzone { parent_name, .. } => Some(parent_name),
            Placement::Gate | Placement::Venue | Placement::Zone => None,
        }
    }

    /// Returns the checkpoints keyed by identifier.
    #[must_use]
    pub const fn checkpoints(&self) -> &BTreeMap<CheckpointId, Checkpoint> {
        &self.checkpoints
    }

    /// Looks up one checkpoint.
    #[must_use]
    pub fn checkpoint(&self, checkpoint_id: &CheckpointId) -> Option<&Checkpoint> {
        self.checkpoints.get(checkpoint_id)
    }

    /// Inserts a checkpoint, returning any checkpoint it overwrote.
    pub fn insert_checkpoint(&mut self, checkpoint: Checkpoint) -> Option<Checkpoint> {
        self.checkpoints
            .insert(checkpoint.checkpoint_id.clone(), checkpoint)
    }

    /// Replaces an existing checkpoint. Returns `false` without changes if
    /// no checkpoint with that identifier exists.
    pub fn replace_checkpoint(&mut self, checkpoint: Checkpoint) -> bool {
        match self.checkpoints.get_mut(&checkpoint.checkpoint_id) {
            Some(existing) => {
                *existing = checkpoint;
                true
            }
            None => false,
        }
    }

    /// Removes a checkpoint, returning it if it existed.
    pub fn remove_checkpoint(&mut self, checkpoint_id: &CheckpointId) -> Option<Checkpoint> {
        self.checkpoints.remove(checkpoint_id)
    }

    /// Returns a copy carrying the given checkpoint.
    #[must_use]
    pub fn with_checkpoint(mut self, checkpoint: Checkpoint) -> Self {
        self.insert_checkpoint(checkpoint);
        self
    }

    /// Returns whether occupancy exceeds capacity.
    ///
    /// This is reported for display only; it is never enforced.
    #[must_use]
    pub const fn is_over_capacity(&self) -> bool {
        self.current_occupancy > self.max_capacity
    }

    /// Occupancy as a whole percentage of capacity, rounded down.
    ///
    /// Returns `None` for zero-capacity entities.
    #[must_use]
    pub fn occupancy_percent(&self) -> Option<u64> {
        if self.max_capacity == 0 {
            return None;
        }
        Some(u64::from(self.current_occupancy) * 100 / u64::from(self.max_capacity))
    }
}

const fn default_update_policy() -> bool {
    true
}

/// The stored shape of an entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntityRecord {
    zone_id: EntityId,
    name: String,
    #[serde(rename = "type")]
    kind: EntityKind,
    parent_zone_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent_zone_name: Option<String>,
    max_capacity: u32,
    #[serde(default)]
    current_occupancy: u32,
    #[serde(default)]
    access_types: AccessTypes,
    #[serde(default)]
    check_points: BTreeMap<CheckpointId, Checkpoint>,
    #[serde(default = "default_update_policy")]
    update_policy: bool,
}

impl TryFrom<EntityRecord> for Entity {
    type Error = DomainError;

    fn try_from(record: EntityRecord) -> Result<Self, Self::Error> {
        let placement: Placement = match (record.kind, record.parent_zone_id) {
            (EntityKind::Subzone, Some(parent_id)) => Placement::Subzone {
                parent_id,
                parent_name: record.parent_zone_name.unwrap_or_default(),
            },
            (EntityKind::Subzone, None) => {
                return Err(DomainError::MalformedEntity {
                    entity_id: record.zone_id.value().to_string(),
                    reason: String::from("subzone has no parentZoneId"),
                });
            }
            (kind, Some(_)) => {
                return Err(DomainError::MalformedEntity {
                    entity_id: record.zone_id.value().to_string(),
                    reason: format!("{kind} must not have a parentZoneId"),
                });
            }
            (EntityKind::Gate, None) => Placement::Gate,
            (EntityKind::Venue, None) => Placement::Venue,
            (EntityKind::Zone, None) => Placement::Zone,
        };

        if let Some((key, checkpoint)) = record
            .check_points
            .iter()
            .find(|(key, checkpoint)| **key != checkpoint.checkpoint_id)
        {
            return Err(DomainError::MalformedEntity {
                entity_id: record.zone_id.value().to_string(),
                reason: format!(
                    "checkpoint key '{key}' does not match checkpointId '{}'",
                    checkpoint.checkpoint_id
                ),
            });
        }

        Ok(Self {
            id: record.zone_id,
            placement,
            name: record.name,
            max_capacity: record.max_capacity,
            current_occupancy: record.current_occupancy,
            access_types: record.access_types,
            update_policy: record.update_policy,
            checkpoints: record.check_points,
        })
    }
}

impl From<Entity> for EntityRecord {
    fn from(entity: Entity) -> Self {
        let kind: EntityKind = entity.kind();
        let (parent_zone_id, parent_zone_name) = match entity.placement {
            Placement::Subzone {
                parent_id,
                parent_name,
            } => (Some(parent_id), Some(parent_name)),
            Placement::Gate | Placement::Venue | Placement::Zone => (None, None),
        };

        Self {
            zone_id: entity.id,
            name: entity.name,
            kind,
            parent_zone_id,
            parent_zone_name,
            max_capacity: entity.max_capacity,
            current_occupancy: entity.current_occupancy,
            access_types: entity.access_types,
            check_points: entity.checkpoints,
            update_policy: entity.update_policy,
        }
    }
}
