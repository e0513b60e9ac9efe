// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! JSON rendering of derived views.

use accessmap::{Classification, Outcome, Topology};
use accessmap_api::Notification;
use accessmap_domain::Entity;
use serde_json::{Map, Value, json};

/// The banner shown when a default topology was created.
pub fn seed_banner(event_id: &str) -> String {
    format!(
        "No zones were configured for {event_id}; a default gate and venue were created. \
         Edit or delete them to match the event."
    )
}

/// Notifications to print alongside a command's result.
///
/// An error notification carrying the same text as `command_error` is
/// dropped, since the command error itself is reported.
pub fn notices(
    notifications: Vec<Notification>,
    command_error: Option<&str>,
) -> Vec<Notification> {
    notifications
        .into_iter()
        .filter(|notification| {
            !(notification.is_error() && Some(notification.message.as_str()) == command_error)
        })
        .collect()
}

/// Identifier, name and kind of each entity.
pub fn entity_refs(entities: &[&Entity]) -> Value {
    Value::Array(
        entities
            .iter()
            .map(|entity| {
                json!({
                    "zoneId": entity.id(),
                    "name": entity.name,
                    "type": entity.kind().as_str(),
                })
            })
            .collect(),
    )
}

/// Entities grouped by kind.
pub fn classification(topology: &Topology) -> Value {
    let classification: Classification<'_> = topology.classify();
    json!({
        "gates": entity_refs(&classification.gates),
        "venues": entity_refs(&classification.venues),
        "zones": entity_refs(&classification.zones),
        "subzones": entity_refs(&classification.subzones),
    })
}

/// Subzones keyed by parent id.
pub fn subzones_by_parent(topology: &Topology) -> Value {
    let grouped: Map<String, Value> = topology
        .group_subzones_by_parent()
        .into_iter()
        .map(|(parent_id, subzones)| (parent_id.value().to_string(), entity_refs(&subzones)))
        .collect();
    Value::Object(grouped)
}

/// Whether a command changed anything, and why not.
pub fn outcome(outcome: &Outcome) -> Value {
    match outcome {
        Outcome::Applied => json!({ "outcome": "applied" }),
        Outcome::Ignored(reason) => json!({
            "outcome": "ignored",
            "reason": reason.to_string(),
        }),
    }
}
