// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use accessmap::CoreError;
use accessmap_domain::DomainError;
use accessmap_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The backend could not load or store the topology.
    BackendUnavailable {
        /// A description of the backend failure.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::BackendUnavailable { message } => {
                write!(f, "Backend unavailable: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::InvalidEventId(event_id) => Self::InvalidInput {
                field: String::from("event_id"),
                message: format!("'{event_id}' cannot be used as an event id"),
            },
            PersistenceError::BackendUnavailable(message) => Self::BackendUnavailable { message },
            PersistenceError::Serialization(_) | PersistenceError::Io(_) => {
                Self::BackendUnavailable {
                    message: err.to_string(),
                }
            }
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidCheckpoint(msg) => ApiError::InvalidInput {
            field: String::from("checkpoint"),
            message: msg,
        },
        DomainError::InvalidKind(kind) => ApiError::InvalidInput {
            field: String::from("type"),
            message: format!("'{kind}' is not one of GATE, VENUE, ZONE, SUBZONE"),
        },
        DomainError::InvalidDirection(direction) => ApiError::InvalidInput {
            field: String::from("direction"),
            message: format!("'{direction}' is not one of IN, OUT"),
        },
        DomainError::InvalidAccessType(access) => ApiError::InvalidInput {
            field: String::from("access_types"),
            message: format!(
                "'{access}' is not one of GENERAL, BACKSTAGE, STAGE, COMPROMIS, VIP"
            ),
        },
        DomainError::ParentNotFound(parent_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Parent entity"),
            message: format!("Entity '{parent_id}' does not exist"),
        },
        DomainError::EntityNotFound(entity_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Entity"),
            message: format!("Entity '{entity_id}' does not exist"),
        },
        DomainError::InvalidParent { parent_id, kind } => ApiError::DomainRuleViolation {
            rule: String::from("subzone_parent"),
            message: format!(
                "Subzones can only be created in a venue or zone, '{parent_id}' is a {kind}"
            ),
        },
        err @ DomainError::IdentifiersExhausted { .. } => ApiError::DomainRuleViolation {
            rule: String::from("identifier_space"),
            message: err.to_string(),
        },
        err @ DomainError::MalformedEntity { .. } => ApiError::DomainRuleViolation {
            rule: String::from("well_formed_entity"),
            message: err.to_string(),
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}
