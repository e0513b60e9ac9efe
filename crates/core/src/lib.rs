// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Topology transitions for venue access control.
//!
//! A [`Topology`] is changed only by applying a [`Command`]; each
//! application yields a new topology and leaves the input untouched.

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

mod apply;
mod command;
mod error;
mod initialization;
mod state;
mod views;

#[cfg(test)]
mod tests;

use accessmap_domain::{DomainError, Entity, EntityId};

// Re-export public types and functions
pub use apply::apply;
pub use command::Command;
pub use error::CoreError;
pub use initialization::{is_first_visit, seed_default_topology};
pub use state::{Change, IgnoreReason, Outcome, Topology, TransitionResult};
pub use views::{Classification, Summary};

/// Validates that an entity exists and returns it.
///
/// This is a read-only validation for callers that want a hard failure
/// where `apply` would report an ignored command.
///
/// # Errors
///
/// Returns `DomainError::EntityNotFound` if the entity does not exist.
pub fn validate_entity_exists<'a>(
    topology: &'a Topology,
    entity_id: &EntityId,
) -> Result<&'a Entity, DomainError> {
    topology
        .entity(entity_id)
        .ok_or_else(|| DomainError::EntityNotFound(entity_id.clone()))
}
