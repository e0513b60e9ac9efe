// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::Checkpoint;

/// Validates that an entity name is usable.
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the name is empty or only whitespace.
pub fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }
    Ok(())
}

/// Validates the caller-supplied fields of a checkpoint.
///
/// Identifier uniqueness is not checked here; colliding identifiers
/// overwrite on insert.
///
/// # Errors
///
/// Returns `DomainError::InvalidCheckpoint` if:
/// - The checkpoint identifier is blank
/// - The checkpoint name is blank
pub fn validate_checkpoint(checkpoint: &Checkpoint) -> Result<(), DomainError> {
    if checkpoint.checkpoint_id.value().trim().is_empty() {
        return Err(DomainError::InvalidCheckpoint(String::from(
            "Checkpoint id cannot be empty",
        )));
    }

    if checkpoint.name.trim().is_empty() {
        return Err(DomainError::InvalidCheckpoint(String::from(
            "Checkpoint name cannot be empty",
        )));
    }

    Ok(())
}
