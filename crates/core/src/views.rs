// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only views derived from a topology.
//!
//! Views are recomputed from the snapshot on every call and borrow from it.

use crate::state::Topology;
use accessmap_domain::{Checkpoint, Entity, EntityId, EntityKind};
use serde::Serialize;
use std::collections::BTreeMap;

/// Entities partitioned by kind, each list in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification<'a> {
    /// Entry gates.
    pub gates: Vec<&'a Entity>,
    /// Top-level venues.
    pub venues: Vec<&'a Entity>,
    /// Top-level zones.
    pub zones: Vec<&'a Entity>,
    /// Subzones.
    pub subzones: Vec<&'a Entity>,
}

impl Classification<'_> {
    /// Total number of classified entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.gates.len() + self.venues.len() + self.zones.len() + self.subzones.len()
    }

    /// Returns whether no entity was classified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Aggregate counts over a topology.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Number of top-level zones.
    pub total_zones: usize,
    /// Number of gates.
    pub total_gates: usize,
    /// Number of venues.
    pub total_venues: usize,
    /// Number of subzones.
    pub total_subzones: usize,
    /// Number of checkpoints across all entities.
    pub total_checkpoints: usize,
    /// Sum of `max_capacity` across all entities.
    pub total_capacity: u64,
    /// Sum of `current_occupancy` across all entities.
    pub total_occupancy: u64,
}

impl Topology {
    /// Partitions entities by kind.
    #[must_use]
    pub fn classify(&self) -> Classification<'_> {
        let mut classification: Classification<'_> = Classification::default();
        for entity in self.entities() {
            match entity.kind() {
                EntityKind::Gate => classification.gates.push(entity),
                EntityKind::Venue => classification.venues.push(entity),
                EntityKind::Zone => classification.zones.push(entity),
                EntityKind::Subzone => classification.subzones.push(entity),
            }
        }
        classification
    }

    /// Checkpoints of one entity; empty if the entity does not exist.
    #[must_use]
    pub fn checkpoints_of(&self, entity_id: &EntityId) -> Vec<&Checkpoint> {
        self.entity(entity_id)
            .map(|entity| entity.checkpoints().values().collect())
            .unwrap_or_default()
    }

    /// Every checkpoint of every entity, grouped by entity in creation order.
    #[must_use]
    pub fn all_checkpoints(&self) -> Vec<&Checkpoint> {
        self.entities()
            .iter()
            .flat_map(|entity| entity.checkpoints().values())
            .collect()
    }

    /// Subzones keyed by parent identifier, each list in creation order.
    ///
    /// Orphaned subzones are listed under their recorded parent as well.
    #[must_use]
    pub fn group_subzones_by_parent(&self) -> BTreeMap<EntityId, Vec<&Entity>> {
        let mut grouped: BTreeMap<EntityId, Vec<&Entity>> = BTreeMap::new();
        for entity in self.entities() {
            if let Some(parent_id) = entity.parent_id() {
                grouped.entry(parent_id.clone()).or_default().push(entity);
            }
        }
        grouped
    }

    /// Subzones whose recorded parent no longer exists.
    #[must_use]
    pub fn orphaned_subzones(&self) -> Vec<&Entity> {
        self.entities()
            .iter()
            .filter(|entity| {
                entity
                    .parent_id()
                    .is_some_and(|parent_id| !self.contains(parent_id))
            })
            .collect()
    }

    /// Counts per kind plus capacity and occupancy totals.
    #[must_use]
    pub fn summary(&self) -> Summary {
        let classification: Classification<'_> = self.classify();
        Summary {
            total_zones: classification.zones.len(),
            total_gates: classification.gates.len(),
            total_venues: classification.venues.len(),
            total_subzones: classification.subzones.len(),
            total_checkpoints: self.all_checkpoints().len(),
            total_capacity: self
                .entities()
                .iter()
                .map(|entity| u64::from(entity.max_capacity))
                .sum(),
            total_occupancy: self
                .entities()
                .iter()
                .map(|entity| u64::from(entity.current_occupancy))
                .sum(),
        }
    }
}
