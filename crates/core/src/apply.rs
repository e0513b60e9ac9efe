// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{Change, IgnoreReason, Outcome, Topology, TransitionResult};
use accessmap_domain::{
    AccessTypes, Checkpoint, CheckpointId, DEFAULT_GATE_CAPACITY, DEFAULT_GATE_ROLE, DomainError,
    Entity, EntityId, EntityKind, IdGenerator, Placement, validate_checkpoint, validate_name,
};
use tracing::{debug, warn};

/// Applies a command to a topology, producing a new topology.
///
/// The input topology is never modified. Commands that target a missing
/// entity or checkpoint during update, delete, policy or occupancy
/// changes are not errors: they return an unchanged copy with an
/// `Outcome::Ignored` explaining why.
///
/// # Arguments
///
/// * `topology` - The current topology (immutable)
/// * `command` - The command to apply
/// * `ids` - Source of identifiers for created entities
///
/// # Errors
///
/// Returns an error if:
/// - A name is empty
/// - A checkpoint has a blank identifier or name
/// - A subzone parent does not exist or cannot hold subzones
/// - A checkpoint is added to a missing entity
/// - The id generator has no identifier left for a new entity
#[allow(clippy::too_many_lines)]
pub fn apply(
    topology: &Topology,
    command: Command,
    ids: &mut IdGenerator,
) -> Result<TransitionResult, CoreError> {
    let action: String = command.name().to_string();

    let (new_topology, outcome, entity_id, details): (Topology, Outcome, EntityId, String) =
        match command {
            Command::CreateGate {
                name,
                device_imei,
                device_role,
            } => {
                validate_name(&name)?;

                let role: String = device_role
                    .filter(|role| !role.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_GATE_ROLE.to_string());
                let gate_id: EntityId = fresh_entity_id(topology, ids, EntityKind::Gate)?;
                let gate: Entity = Entity::new(
                    gate_id.clone(),
                    &name,
                    Placement::Gate,
                    DEFAULT_GATE_CAPACITY,
                    AccessTypes::all(),
                )
                .with_checkpoint(Checkpoint::gate_entry(&name, &role, device_imei));

                let mut new_topology: Topology = topology.clone();
                new_topology.upsert_entity(gate);
                (
                    new_topology,
                    Outcome::Applied,
                    gate_id,
                    format!("Gate \"{name}\" created"),
                )
            }
            Command::CreateZone {
                name,
                max_capacity,
                access_types,
            } => create_top_level(
                topology,
                ids,
                &name,
                Placement::Zone,
                max_capacity,
                access_types,
            )?,
            Command::CreateVenue {
                name,
                max_capacity,
                access_types,
            } => create_top_level(
                topology,
                ids,
                &name,
                Placement::Venue,
                max_capacity,
                access_types,
            )?,
            Command::CreateSubzone {
                parent_id,
                name,
                max_capacity,
                access_types,
            } => {
                validate_name(&name)?;

                let parent: &Entity = topology
                    .entity(&parent_id)
                    .ok_or_else(|| DomainError::ParentNotFound(parent_id.clone()))?;
                if !parent.kind().can_parent_subzones() {
                    return Err(CoreError::DomainViolation(DomainError::InvalidParent {
                        parent_id,
                        kind: parent.kind(),
                    }));
                }

                let subzone_id: EntityId = fresh_entity_id(topology, ids, EntityKind::Subzone)?;
                let subzone: Entity = Entity::new(
                    subzone_id.clone(),
                    &name,
                    Placement::Subzone {
                        parent_id,
                        parent_name: parent.name.clone(),
                    },
                    max_capacity,
                    access_types,
                );
                let details: String =
                    format!("Subzone \"{name}\" created in \"{}\"", parent.name);

                let mut new_topology: Topology = topology.clone();
                new_topology.upsert_entity(subzone);
                (new_topology, Outcome::Applied, subzone_id, details)
            }
            Command::AddCheckpoint {
                entity_id,
                checkpoint,
            } => {
                validate_checkpoint(&checkpoint)?;

                let mut new_topology: Topology = topology.clone();
                let entity: &mut Entity = new_topology
                    .entity_mut(&entity_id)
                    .ok_or_else(|| DomainError::EntityNotFound(entity_id.clone()))?;
                let details: String = format!("Checkpoint \"{}\" added", checkpoint.name);
                if let Some(previous) = entity.insert_checkpoint(checkpoint) {
                    warn!(
                        "Checkpoint {} on {} overwritten by a new checkpoint with the same id",
                        previous.checkpoint_id, entity_id
                    );
                }
                (new_topology, Outcome::Applied, entity_id, details)
            }
            Command::UpdateCheckpoint {
                entity_id,
                checkpoint,
            } => {
                validate_checkpoint(&checkpoint)?;

                let mut new_topology: Topology = topology.clone();
                let details: String = format!("Checkpoint \"{}\" updated", checkpoint.name);
                let outcome: Outcome = match new_topology.entity_mut(&entity_id) {
                    None => Outcome::Ignored(IgnoreReason::EntityNotFound(entity_id.clone())),
                    Some(entity) => {
                        let checkpoint_id: CheckpointId = checkpoint.checkpoint_id.clone();
                        if entity.replace_checkpoint(checkpoint) {
                            Outcome::Applied
                        } else {
                            Outcome::Ignored(IgnoreReason::CheckpointNotFound {
                                entity_id: entity_id.clone(),
                                checkpoint_id,
                            })
                        }
                    }
                };
                (new_topology, outcome, entity_id, details)
            }
            Command::DeleteCheckpoint {
                entity_id,
                checkpoint_id,
            } => {
                let mut new_topology: Topology = topology.clone();
                let (outcome, details): (Outcome, String) =
                    match new_topology.entity_mut(&entity_id) {
                        None => (
                            Outcome::Ignored(IgnoreReason::EntityNotFound(entity_id.clone())),
                            format!("Checkpoint '{checkpoint_id}' not deleted"),
                        ),
                        Some(entity) => match entity.remove_checkpoint(&checkpoint_id) {
                            Some(removed) => (
                                Outcome::Applied,
                                format!("Checkpoint \"{}\" deleted", removed.name),
                            ),
                            None => (
                                Outcome::Ignored(IgnoreReason::CheckpointNotFound {
                                    entity_id: entity_id.clone(),
                                    checkpoint_id: checkpoint_id.clone(),
                                }),
                                format!("Checkpoint '{checkpoint_id}' not deleted"),
                            ),
                        },
                    };
                (new_topology, outcome, entity_id, details)
            }
            Command::SetUpdatePolicy { entity_id, enabled } => {
                let mut new_topology: Topology = topology.clone();
                let state: &str = if enabled { "enabled" } else { "disabled" };
                let (outcome, details): (Outcome, String) =
                    match new_topology.entity_mut(&entity_id) {
                        None => (
                            Outcome::Ignored(IgnoreReason::EntityNotFound(entity_id.clone())),
                            format!("Update policy for '{entity_id}' not changed"),
                        ),
                        Some(entity) => {
                            entity.update_policy = enabled;
                            (
                                Outcome::Applied,
                                format!("Update policy for \"{}\" {state}", entity.name),
                            )
                        }
                    };
                (new_topology, outcome, entity_id, details)
            }
            Command::RecordOccupancy {
                entity_id,
                occupancy,
            } => {
                let mut new_topology: Topology = topology.clone();
                let (outcome, details): (Outcome, String) =
                    match new_topology.entity_mut(&entity_id) {
                        None => (
                            Outcome::Ignored(IgnoreReason::EntityNotFound(entity_id.clone())),
                            format!("Occupancy for '{entity_id}' not recorded"),
                        ),
                        Some(entity) if !entity.update_policy => (
                            Outcome::Ignored(IgnoreReason::UpdatePolicyDisabled(
                                entity_id.clone(),
                            )),
                            format!("Occupancy for \"{}\" not recorded", entity.name),
                        ),
                        Some(entity) => {
                            entity.current_occupancy = occupancy;
                            (
                                Outcome::Applied,
                                format!(
                                    "Occupancy for \"{}\" is {occupancy}/{}",
                                    entity.name, entity.max_capacity
                                ),
                            )
                        }
                    };
                (new_topology, outcome, entity_id, details)
            }
            Command::DeleteEntity { entity_id } => {
                let mut new_topology: Topology = topology.clone();
                let (outcome, details): (Outcome, String) =
                    match new_topology.remove_entity(&entity_id) {
                        None => (
                            Outcome::Ignored(IgnoreReason::EntityNotFound(entity_id.clone())),
                            format!("Entity '{entity_id}' not deleted"),
                        ),
                        Some(removed) => (
                            Outcome::Applied,
                            format!("{} \"{}\" deleted", removed.kind(), removed.name),
                        ),
                    };
                (new_topology, outcome, entity_id, details)
            }
        };

    match &outcome {
        Outcome::Applied => debug!("{action} applied to {entity_id}: {}", new_topology.describe()),
        Outcome::Ignored(reason) => warn!("{action} ignored: {reason}"),
    }

    Ok(TransitionResult {
        new_topology,
        outcome,
        change: Change::new(action, entity_id, details),
    })
}

fn create_top_level(
    topology: &Topology,
    ids: &mut IdGenerator,
    name: &str,
    placement: Placement,
    max_capacity: u32,
    access_types: AccessTypes,
) -> Result<(Topology, Outcome, EntityId, String), CoreError> {
    validate_name(name)?;

    let kind: EntityKind = placement.kind();
    let entity_id: EntityId = fresh_entity_id(topology, ids, kind)?;
    let entity: Entity = Entity::new(
        entity_id.clone(),
        name,
        placement,
        max_capacity,
        access_types,
    );

    let mut new_topology: Topology = topology.clone();
    new_topology.upsert_entity(entity);
    let details: String = match kind {
        EntityKind::Venue => format!("Venue \"{name}\" created"),
        EntityKind::Gate | EntityKind::Zone | EntityKind::Subzone => {
            format!("Zone \"{name}\" created")
        }
    };
    Ok((new_topology, Outcome::Applied, entity_id, details))
}

/// Issues an identifier not yet present in the topology.
fn fresh_entity_id(
    topology: &Topology,
    ids: &mut IdGenerator,
    kind: EntityKind,
) -> Result<EntityId, DomainError> {
    loop {
        let candidate: EntityId = ids.entity_id(kind)?;
        if !topology.contains(&candidate) {
            return Ok(candidate);
        }
    }
}
