// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Entity model for venue access-control topologies.
//!
//! Gates, venues and zones sit at the top level; subzones hang off exactly
//! one zone or venue. Every entity owns its checkpoints.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod defaults;
mod error;
mod ids;
mod links;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use defaults::{
    DEFAULT_CHECKPOINT_ROLE, DEFAULT_GATE_CAPACITY, DEFAULT_GATE_NAME, DEFAULT_GATE_ROLE,
    DEFAULT_VENUE_CAPACITY, DEFAULT_VENUE_NAME, GATE_DEVICE_ROLES, ZONE_DEVICE_ROLES,
    ZONES_DEFINITION,
};
pub use error::DomainError;
pub use ids::{IdGenerator, gate_entry_checkpoint_id};
pub use links::{LinkScope, SHARE_LINK_BASE, qr_share_link, share_link, slug};
pub use types::{
    AccessType, AccessTypes, Checkpoint, CheckpointId, Direction, Entity, EntityId, EntityKind,
    Placement,
};
pub use validation::{validate_checkpoint, validate_name};
