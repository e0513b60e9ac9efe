// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dispatch of parsed actions to the editing session.

use crate::output;
use crate::{Action, AreaArgs};
use accessmap::{Outcome, Topology, validate_entity_exists};
use accessmap_api::{
    ApiError, Repository, parse_access_types, parse_direction, parse_entity_id,
    translate_domain_error,
};
use accessmap_domain::{
    AccessTypes, Checkpoint, CheckpointId, Entity, EntityId, GATE_DEVICE_ROLES, ZONE_DEVICE_ROLES,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Runs one action and returns its JSON result.
///
/// Mutating actions wait for the new snapshot to be saved.
///
/// # Errors
///
/// Returns an error if the input is invalid, a domain rule rejects the
/// change, or the backend cannot store it.
pub async fn execute(
    repository: &mut Repository,
    action: &Action,
) -> Result<Value, Box<dyn std::error::Error>> {
    debug!("Executing {action:?}");
    let snapshot: Arc<Topology> = repository.snapshot();

    let value: Value = match action {
        Action::Show => serde_json::to_value(&*snapshot)?,
        Action::Summary => serde_json::to_value(snapshot.summary())?,
        Action::Classify => output::classification(&snapshot),
        Action::Checkpoints { entity } => match entity {
            Some(entity) => {
                let entity_id: EntityId = parse_entity_id(entity)?;
                serde_json::to_value(snapshot.checkpoints_of(&entity_id))?
            }
            None => serde_json::to_value(snapshot.all_checkpoints())?,
        },
        Action::Subzones => output::subzones_by_parent(&snapshot),
        Action::Orphans => output::entity_refs(&snapshot.orphaned_subzones()),
        Action::CreateGate { name, imei, role } => {
            note_role(role.as_deref());
            let gate: Entity = repository.create_gate(name, imei.clone(), role.clone())?;
            serde_json::to_value(gate)?
        }
        Action::CreateZone { name, area } => {
            let access_types: AccessTypes = parse_area_access(area)?;
            serde_json::to_value(repository.create_zone(name, area.capacity, access_types)?)?
        }
        Action::CreateVenue { name, area } => {
            let access_types: AccessTypes = parse_area_access(area)?;
            serde_json::to_value(repository.create_venue(name, area.capacity, access_types)?)?
        }
        Action::CreateSubzone { parent, name, area } => {
            let parent_id: EntityId = parse_entity_id(parent)?;
            let access_types: AccessTypes = parse_area_access(area)?;
            serde_json::to_value(repository.create_subzone(
                &parent_id,
                name,
                area.capacity,
                access_types,
            )?)?
        }
        Action::AddCheckpoint {
            entity,
            name,
            direction,
            role,
            imei,
        } => {
            let entity_id: EntityId = parse_entity_id(entity)?;
            note_role(role.as_deref());
            let checkpoint: Checkpoint = repository.add_checkpoint(
                &entity_id,
                name,
                parse_direction(direction)?,
                role.as_deref(),
                imei.clone(),
            )?;
            serde_json::to_value(checkpoint)?
        }
        Action::UpdateCheckpoint {
            entity,
            checkpoint,
            name,
            direction,
            role,
            imei,
        } => {
            let entity_id: EntityId = parse_entity_id(entity)?;
            let checkpoint_id: CheckpointId = CheckpointId::new(checkpoint.trim());
            let owner: &Entity =
                validate_entity_exists(&snapshot, &entity_id).map_err(translate_domain_error)?;
            let Some(mut updated) = owner.checkpoint(&checkpoint_id).cloned() else {
                return Err(ApiError::ResourceNotFound {
                    resource_type: String::from("Checkpoint"),
                    message: format!(
                        "Checkpoint '{checkpoint_id}' does not exist on entity '{entity_id}'"
                    ),
                }
                .into());
            };
            if let Some(name) = name {
                updated.name.clone_from(name);
            }
            if let Some(direction) = direction {
                updated.direction = parse_direction(direction)?;
            }
            if let Some(role) = role {
                note_role(Some(role));
                updated.role.clone_from(role);
            }
            if let Some(imei) = imei {
                updated.device_imei = Some(imei.clone()).filter(|imei| !imei.trim().is_empty());
            }
            output::outcome(&repository.update_checkpoint(&entity_id, updated)?)
        }
        Action::DeleteCheckpoint { entity, checkpoint } => {
            let entity_id: EntityId = parse_entity_id(entity)?;
            let checkpoint_id: CheckpointId = CheckpointId::new(checkpoint.trim());
            output::outcome(&repository.delete_checkpoint(&entity_id, &checkpoint_id)?)
        }
        Action::SetPolicy { entity, enabled } => {
            let entity_id: EntityId = parse_entity_id(entity)?;
            output::outcome(&repository.set_update_policy(&entity_id, *enabled)?)
        }
        Action::TogglePolicy { entity } => {
            let entity_id: EntityId = parse_entity_id(entity)?;
            output::outcome(&repository.toggle_update_policy(&entity_id)?)
        }
        Action::RecordOccupancy { entity, occupancy } => {
            let entity_id: EntityId = parse_entity_id(entity)?;
            let outcome: Outcome = repository.record_occupancy(&entity_id, *occupancy)?;
            output::outcome(&outcome)
        }
        Action::DeleteEntity { entity } => {
            let entity_id: EntityId = parse_entity_id(entity)?;
            output::outcome(&repository.delete_entity(&entity_id)?)
        }
    };

    repository.flush().await?;
    Ok(value)
}

fn parse_area_access(area: &AreaArgs) -> Result<AccessTypes, ApiError> {
    parse_access_types(&area.access)
}

/// Warns about roles that no scanner device is provisioned for.
fn note_role(role: Option<&str>) {
    if let Some(role) = role.map(str::trim).filter(|role| !role.is_empty()) {
        let known: bool = GATE_DEVICE_ROLES
            .iter()
            .chain(ZONE_DEVICE_ROLES.iter())
            .any(|candidate| candidate.eq_ignore_ascii_case(role));
        if !known {
            warn!("Role '{role}' is not one of the standard steward roles");
        }
    }
}
