// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Parsing of free-form user input into domain values.

use crate::error::{ApiError, translate_domain_error};
use accessmap_domain::{AccessType, AccessTypes, Direction, EntityId};
use std::str::FromStr;

/// Parses a checkpoint direction (`IN` or `OUT`, any case).
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for any other value.
pub fn parse_direction(value: &str) -> Result<Direction, ApiError> {
    Direction::from_str(value.trim()).map_err(translate_domain_error)
}

/// Parses a list of access type names into a flag set.
///
/// Names are case-insensitive; duplicates are harmless.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` naming the first unknown access type.
pub fn parse_access_types<S: AsRef<str>>(values: &[S]) -> Result<AccessTypes, ApiError> {
    values
        .iter()
        .map(|value| AccessType::from_str(value.as_ref().trim()))
        .try_fold(AccessTypes::none(), |flags, access| {
            access.map(|access| flags.with(access, true))
        })
        .map_err(translate_domain_error)
}

/// Parses an entity identifier.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the identifier is blank.
pub fn parse_entity_id(value: &str) -> Result<EntityId, ApiError> {
    let trimmed: &str = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("entity_id"),
            message: String::from("Entity id cannot be empty"),
        });
    }
    Ok(EntityId::new(trimmed))
}
