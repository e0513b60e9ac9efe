// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{EntityId, EntityKind};

/// Errors that can occur while building or validating topology entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Entity name is empty or invalid.
    InvalidName(String),
    /// Checkpoint fields are empty or invalid.
    InvalidCheckpoint(String),
    /// The requested parent cannot hold subzones.
    InvalidParent {
        /// The parent that was requested.
        parent_id: EntityId,
        /// The kind of the requested parent.
        kind: EntityKind,
    },
    /// The parent of a new subzone does not exist.
    ParentNotFound(EntityId),
    /// The entity targeted by an operation does not exist.
    EntityNotFound(EntityId),
    /// Entity kind string is not recognized.
    InvalidKind(String),
    /// Checkpoint direction string is not recognized.
    InvalidDirection(String),
    /// Access type string is not recognized.
    InvalidAccessType(String),
    /// The id generator has no token left to issue.
    IdentifiersExhausted {
        /// The last token issued or observed.
        last_token: u64,
    },
    /// A stored entity record is internally inconsistent.
    MalformedEntity {
        /// The identifier of the offending record.
        entity_id: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidCheckpoint(msg) => write!(f, "Invalid checkpoint: {msg}"),
            Self::InvalidParent { parent_id, kind } => {
                write!(
                    f,
                    "Entity '{parent_id}' is a {kind} and cannot contain subzones"
                )
            }
            Self::ParentNotFound(id) => write!(f, "Parent entity '{id}' not found"),
            Self::EntityNotFound(id) => write!(f, "Entity '{id}' not found"),
            Self::InvalidKind(kind) => write!(f, "Invalid entity kind: {kind}"),
            Self::InvalidDirection(direction) => {
                write!(f, "Invalid checkpoint direction: {direction}")
            }
            Self::InvalidAccessType(access) => write!(f, "Invalid access type: {access}"),
            Self::IdentifiersExhausted { last_token } => {
                write!(f, "No identifiers left after token {last_token}")
            }
            Self::MalformedEntity { entity_id, reason } => {
                write!(f, "Malformed entity '{entity_id}': {reason}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
