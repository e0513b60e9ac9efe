// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use accessmap::{Command, Topology, apply};
use accessmap_domain::{AccessTypes, EntityId, IdGenerator};

pub const TEST_EVENT_ID: &str = "EVENT_050";

/// Builds a topology holding a gate, a venue and one subzone.
pub fn create_test_topology() -> Topology {
    let mut ids: IdGenerator = IdGenerator::new();
    let topology: Topology = Topology::new(TEST_EVENT_ID);
    let topology: Topology = apply(
        &topology,
        Command::CreateGate {
            name: String::from("Main Gate"),
            device_imei: None,
            device_role: None,
        },
        &mut ids,
    )
    .expect("gate should be created")
    .new_topology;
    let transition = apply(
        &topology,
        Command::CreateVenue {
            name: String::from("Hall"),
            max_capacity: 200,
            access_types: AccessTypes::all(),
        },
        &mut ids,
    )
    .expect("venue should be created");
    let hall_id: EntityId = transition.change.entity_id;
    apply(
        &transition.new_topology,
        Command::CreateSubzone {
            parent_id: hall_id,
            name: String::from("Stage"),
            max_capacity: 50,
            access_types: AccessTypes::none(),
        },
        &mut ids,
    )
    .expect("subzone should be created")
    .new_topology
}
