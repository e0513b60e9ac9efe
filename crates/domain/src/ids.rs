// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{CheckpointId, Direction, EntityId, EntityKind};
use time::OffsetDateTime;

/// Generates identifier tokens for new entities and checkpoints.
///
/// Tokens follow the wall clock in milliseconds but are strictly
/// increasing: two requests within the same millisecond still receive
/// distinct tokens. Tokens observed in loaded documents are never handed
/// out again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdGenerator {
    last_token: u64,
}

impl IdGenerator {
    /// Creates a generator that has not issued any token.
    #[must_use]
    pub const fn new() -> Self {
        Self { last_token: 0 }
    }

    /// Creates a generator whose next token is greater than `token`.
    #[must_use]
    pub const fn starting_after(token: u64) -> Self {
        Self { last_token: token }
    }

    /// Returns the most recently issued or observed token.
    #[must_use]
    pub const fn last_token(&self) -> u64 {
        self.last_token
    }

    /// Issues the next token.
    ///
    /// # Errors
    ///
    /// Returns an error once `u64::MAX` has been issued or observed.
    pub fn next_token(&mut self) -> Result<u64, DomainError> {
        let successor: u64 = self
            .last_token
            .checked_add(1)
            .ok_or(DomainError::IdentifiersExhausted {
                last_token: self.last_token,
            })?;
        let token: u64 = now_millis().max(successor);
        self.last_token = token;
        Ok(token)
    }

    /// Issues a fresh `<kind-prefix>#<token>` entity identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is left to issue.
    pub fn entity_id(&mut self, kind: EntityKind) -> Result<EntityId, DomainError> {
        let token: u64 = self.next_token()?;
        Ok(EntityId::new(&format!("{}#{token}", kind.id_prefix())))
    }

    /// Issues a fresh `checkpoint#<token>` identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is left to issue.
    pub fn checkpoint_id(&mut self) -> Result<CheckpointId, DomainError> {
        let token: u64 = self.next_token()?;
        Ok(CheckpointId::new(&format!("checkpoint#{token}")))
    }

    /// Advances past the numeric token of an existing identifier, if it
    /// has one.
    pub fn observe(&mut self, id: &str) {
        if let Some(token) = token_of(id) {
            self.last_token = self.last_token.max(token);
        }
    }
}

/// The identifier of the entry checkpoint created with a gate.
#[must_use]
pub fn gate_entry_checkpoint_id(gate_name: &str) -> CheckpointId {
    CheckpointId::new(&format!("checkpoint#{gate_name}#{}", Direction::In))
}

fn token_of(id: &str) -> Option<u64> {
    id.rsplit('#').next()?.parse::<u64>().ok()
}

fn now_millis() -> u64 {
    let millis: i128 = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    u64::try_from(millis).unwrap_or(0)
}
