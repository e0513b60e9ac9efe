// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, Topology, TransitionResult, apply};
use accessmap_domain::{
    AccessTypes, Checkpoint, CheckpointId, Direction, EntityId, IdGenerator, LinkScope,
};

pub const TEST_EVENT_ID: &str = "EVENT_050";

pub fn create_test_topology() -> Topology {
    Topology::new(TEST_EVENT_ID)
}

pub fn create_test_checkpoint(id: &str, name: &str) -> Checkpoint {
    Checkpoint::new(
        CheckpointId::new(id),
        name,
        Direction::In,
        "STEWARD-ZONEIN",
        LinkScope::Checkpoint,
        None,
    )
}

pub fn apply_ok(topology: &Topology, command: Command, ids: &mut IdGenerator) -> TransitionResult {
    apply(topology, command, ids).expect("command should apply")
}

/// Applies a create command and returns the new topology and created id.
pub fn create(topology: &Topology, command: Command, ids: &mut IdGenerator) -> (Topology, EntityId) {
    let transition: TransitionResult = apply_ok(topology, command, ids);
    (transition.new_topology, transition.change.entity_id)
}

pub fn create_gate_command(name: &str) -> Command {
    Command::CreateGate {
        name: name.to_string(),
        device_imei: None,
        device_role: None,
    }
}

pub fn create_venue_command(name: &str, max_capacity: u32) -> Command {
    Command::CreateVenue {
        name: name.to_string(),
        max_capacity,
        access_types: AccessTypes::all(),
    }
}

pub fn create_zone_command(name: &str, max_capacity: u32) -> Command {
    Command::CreateZone {
        name: name.to_string(),
        max_capacity,
        access_types: AccessTypes::none(),
    }
}

pub fn create_subzone_command(parent_id: &EntityId, name: &str, max_capacity: u32) -> Command {
    Command::CreateSubzone {
        parent_id: parent_id.clone(),
        name: name.to_string(),
        max_capacity,
        access_types: AccessTypes::none(),
    }
}
