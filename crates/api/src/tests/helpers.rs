// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::{Notification, Repository};
use accessmap::{Command, Topology, apply};
use accessmap_domain::{AccessTypes, IdGenerator};
use accessmap_persistence::{EventGateway, MemoryGateway};
use std::sync::Arc;

pub const TEST_EVENT_ID: &str = "EVENT_050";

pub async fn open_repository(gateway: &Arc<MemoryGateway>) -> Repository {
    let gateway: Arc<dyn EventGateway> = Arc::clone(gateway) as Arc<dyn EventGateway>;
    Repository::open(TEST_EVENT_ID, gateway).await
}

/// A stored topology with one zone named "Pit", as left by an earlier session.
pub fn create_stored_topology() -> Topology {
    let mut ids: IdGenerator = IdGenerator::new();
    apply(
        &Topology::new(TEST_EVENT_ID),
        Command::CreateZone {
            name: String::from("Pit"),
            max_capacity: 100,
            access_types: AccessTypes::all(),
        },
        &mut ids,
    )
    .expect("zone should be created")
    .new_topology
}

pub fn error_messages(notifications: &[Notification]) -> Vec<String> {
    notifications
        .iter()
        .filter(|notification| notification.is_error())
        .map(|notification| notification.message.clone())
        .collect()
}
