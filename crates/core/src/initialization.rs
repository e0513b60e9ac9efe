// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::state::Topology;
use accessmap_domain::{
    AccessTypes, DEFAULT_GATE_CAPACITY, DEFAULT_GATE_NAME, DEFAULT_VENUE_CAPACITY,
    DEFAULT_VENUE_NAME, Entity, EntityKind, IdGenerator, Placement,
};

/// Decides whether a fetched document needs a default topology.
///
/// Returns `true` when:
/// - No document exists
/// - The document is not tagged as a zones definition
/// - The document holds no entities
#[must_use]
pub fn is_first_visit(document: Option<&Topology>) -> bool {
    document.is_none_or(|topology| !topology.is_zones_definition() || topology.is_empty())
}

/// Builds the default topology for a new event.
///
/// The topology holds one gate (capacity 1000) and one venue (capacity
/// 500), both admitting every access type and without checkpoints.
///
/// # Errors
///
/// Returns an error if the id generator has no identifiers left.
pub fn seed_default_topology(
    event_id: &str,
    ids: &mut IdGenerator,
) -> Result<Topology, CoreError> {
    let gate: Entity = Entity::new(
        ids.entity_id(EntityKind::Gate)?,
        DEFAULT_GATE_NAME,
        Placement::Gate,
        DEFAULT_GATE_CAPACITY,
        AccessTypes::all(),
    );
    let venue: Entity = Entity::new(
        ids.entity_id(EntityKind::Venue)?,
        DEFAULT_VENUE_NAME,
        Placement::Venue,
        DEFAULT_VENUE_CAPACITY,
        AccessTypes::all(),
    );

    let mut topology: Topology = Topology::new(event_id);
    topology.upsert_entity(gate);
    topology.upsert_entity(venue);
    Ok(topology)
}
