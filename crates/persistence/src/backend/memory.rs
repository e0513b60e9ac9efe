// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{EventGateway, validate_event_id};
use crate::error::PersistenceError;
use accessmap::Topology;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// An in-process backend holding serialized documents keyed by event id.
///
/// Documents are stored as JSON text so every save and fetch goes through
/// the same encoding as a real backend. The gateway can be taken offline
/// with [`MemoryGateway::set_available`] to exercise failure handling.
#[derive(Debug)]
pub struct MemoryGateway {
    documents: Mutex<HashMap<String, String>>,
    available: AtomicBool,
    saves: AtomicU64,
}

impl MemoryGateway {
    /// Creates an empty, available gateway.
    #[must_use]
    pub fn new() -> Self {
        Self {
            documents: Mutex::new(HashMap::new()),
            available: AtomicBool::new(true),
            saves: AtomicU64::new(0),
        }
    }

    /// Creates a gateway that already holds the given topologies.
    ///
    /// # Errors
    ///
    /// Returns an error if a topology cannot be serialized.
    pub fn with_documents(topologies: &[Topology]) -> Result<Self, PersistenceError> {
        let mut documents: HashMap<String, String> = HashMap::new();
        for topology in topologies {
            documents.insert(topology.event_id.clone(), serde_json::to_string(topology)?);
        }
        Ok(Self {
            documents: Mutex::new(documents),
            available: AtomicBool::new(true),
            saves: AtomicU64::new(0),
        })
    }

    /// Switches the simulated backend on or off.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Returns whether the simulated backend is reachable.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    /// Number of successful saves since creation.
    #[must_use]
    pub fn save_count(&self) -> u64 {
        self.saves.load(Ordering::SeqCst)
    }

    /// Stores raw document text, bypassing encoding.
    pub async fn put_raw(&self, event_id: &str, document: &str) {
        self.documents
            .lock()
            .await
            .insert(event_id.to_string(), document.to_string());
    }

    /// Reads back what is stored for an event, ignoring availability.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored document cannot be decoded.
    pub async fn stored(&self, event_id: &str) -> Result<Option<Topology>, PersistenceError> {
        let documents = self.documents.lock().await;
        documents
            .get(event_id)
            .map(|text| serde_json::from_str::<Topology>(text))
            .transpose()
            .map_err(PersistenceError::from)
    }

    fn ensure_available(&self, operation: &str, event_id: &str) -> Result<(), PersistenceError> {
        if self.is_available() {
            return Ok(());
        }
        warn!("Memory backend offline, {operation} for {event_id} rejected");
        Err(PersistenceError::BackendUnavailable(format!(
            "memory backend is offline ({operation} {event_id})"
        )))
    }
}

impl Default for MemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventGateway for MemoryGateway {
    async fn fetch(&self, event_id: &str) -> Result<Topology, PersistenceError> {
        validate_event_id(event_id)?;
        self.ensure_available("fetch", event_id)?;

        let documents = self.documents.lock().await;
        match documents.get(event_id) {
            Some(text) => {
                debug!("Fetched {} bytes for {event_id}", text.len());
                Ok(serde_json::from_str(text)?)
            }
            None => {
                debug!("No document stored for {event_id}");
                Ok(Topology::new(event_id))
            }
        }
    }

    async fn save(&self, topology: &Topology) -> Result<Topology, PersistenceError> {
        validate_event_id(&topology.event_id)?;
        self.ensure_available("save", &topology.event_id)?;

        let text: String = serde_json::to_string(topology)?;
        let stored: Topology = serde_json::from_str(&text)?;
        self.documents
            .lock()
            .await
            .insert(topology.event_id.clone(), text);
        self.saves.fetch_add(1, Ordering::SeqCst);
        debug!("Saved {}", topology.describe());
        Ok(stored)
    }
}
