// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use accessmap_domain::{AccessTypes, Checkpoint, CheckpointId, EntityId};

/// A command represents user intent as data only.
///
/// Commands are the only way to request topology changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a gate with its entry checkpoint.
    CreateGate {
        /// The gate name.
        name: String,
        /// Hardware binding for the entry checkpoint device.
        device_imei: Option<String>,
        /// Operator role for the entry checkpoint.
        device_role: Option<String>,
    },
    /// Create a top-level zone.
    CreateZone {
        /// The zone name.
        name: String,
        /// The occupancy ceiling.
        max_capacity: u32,
        /// The admitted credential classes.
        access_types: AccessTypes,
    },
    /// Create a top-level venue.
    CreateVenue {
        /// The venue name.
        name: String,
        /// The occupancy ceiling.
        max_capacity: u32,
        /// The admitted credential classes.
        access_types: AccessTypes,
    },
    /// Create a subzone under an existing zone or venue.
    CreateSubzone {
        /// The parent zone or venue.
        parent_id: EntityId,
        /// The subzone name.
        name: String,
        /// The occupancy ceiling.
        max_capacity: u32,
        /// The admitted credential classes.
        access_types: AccessTypes,
    },
    /// Add a checkpoint to an entity. An existing checkpoint with the
    /// same identifier is overwritten.
    AddCheckpoint {
        /// The owning entity.
        entity_id: EntityId,
        /// The checkpoint to insert.
        checkpoint: Checkpoint,
    },
    /// Replace an existing checkpoint.
    UpdateCheckpoint {
        /// The owning entity.
        entity_id: EntityId,
        /// The replacement, matched by identifier.
        checkpoint: Checkpoint,
    },
    /// Remove a checkpoint.
    DeleteCheckpoint {
        /// The owning entity.
        entity_id: EntityId,
        /// The checkpoint to remove.
        checkpoint_id: CheckpointId,
    },
    /// Enable or disable automatic occupancy updates for an entity.
    SetUpdatePolicy {
        /// The target entity.
        entity_id: EntityId,
        /// Whether occupancy reports are accepted.
        enabled: bool,
    },
    /// Record an externally reported occupancy.
    RecordOccupancy {
        /// The target entity.
        entity_id: EntityId,
        /// The reported occupancy.
        occupancy: u32,
    },
    /// Remove an entity and its checkpoints.
    ///
    /// Subzones of a removed parent are kept and become orphaned.
    DeleteEntity {
        /// The entity to remove.
        entity_id: EntityId,
    },
}

impl Command {
    /// The name recorded for this command in change records.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateGate { .. } => "CreateGate",
            Self::CreateZone { .. } => "CreateZone",
            Self::CreateVenue { .. } => "CreateVenue",
            Self::CreateSubzone { .. } => "CreateSubzone",
            Self::AddCheckpoint { .. } => "AddCheckpoint",
            Self::UpdateCheckpoint { .. } => "UpdateCheckpoint",
            Self::DeleteCheckpoint { .. } => "DeleteCheckpoint",
            Self::SetUpdatePolicy { .. } => "SetUpdatePolicy",
            Self::RecordOccupancy { .. } => "RecordOccupancy",
            Self::DeleteEntity { .. } => "DeleteEntity",
        }
    }
}
