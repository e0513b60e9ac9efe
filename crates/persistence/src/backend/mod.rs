// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storage backends for topology documents.
//!
//! Every backend implements `EventGateway`. The Repository only talks to
//! the trait, so backends can be swapped without touching session logic.

mod json_file;
mod memory;

pub use json_file::JsonFileGateway;
pub use memory::MemoryGateway;

use crate::error::PersistenceError;
use accessmap::Topology;
use async_trait::async_trait;

/// Remote storage for one topology document per event.
#[async_trait]
pub trait EventGateway: Send + Sync {
    /// Loads the topology of an event.
    ///
    /// Returns an empty `zonesDefinition` topology when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or the stored
    /// document cannot be decoded.
    async fn fetch(&self, event_id: &str) -> Result<Topology, PersistenceError>;

    /// Stores a topology, replacing any previous document for its event.
    ///
    /// Returns the topology as stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or the document
    /// cannot be written.
    async fn save(&self, topology: &Topology) -> Result<Topology, PersistenceError>;
}

/// Rejects event ids that cannot be used as a storage key.
fn validate_event_id(event_id: &str) -> Result<(), PersistenceError> {
    let invalid: bool = event_id.trim().is_empty()
        || event_id == "."
        || event_id == ".."
        || event_id.contains(['/', '\\', '\0']);
    if invalid {
        return Err(PersistenceError::InvalidEventId(event_id.to_string()));
    }
    Ok(())
}
