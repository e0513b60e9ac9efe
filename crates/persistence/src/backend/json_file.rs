// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{EventGateway, validate_event_id};
use crate::error::PersistenceError;
use accessmap::Topology;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A backend storing each event as `<event-id>.json` under one directory.
///
/// Writes go to a temporary file that is then renamed over the target, so
/// a reader never observes a partially written document.
#[derive(Debug, Clone)]
pub struct JsonFileGateway {
    root: PathBuf,
}

impl JsonFileGateway {
    /// Creates a gateway rooted at `root`. The directory is created on the
    /// first save.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory documents are stored in.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The file an event is stored in.
    #[must_use]
    pub fn document_path(&self, event_id: &str) -> PathBuf {
        self.root.join(format!("{event_id}.json"))
    }
}

#[async_trait]
impl EventGateway for JsonFileGateway {
    async fn fetch(&self, event_id: &str) -> Result<Topology, PersistenceError> {
        validate_event_id(event_id)?;
        let path: PathBuf = self.document_path(event_id);

        match tokio::fs::read_to_string(&path).await {
            Ok(text) => {
                debug!("Read {} bytes from {}", text.len(), path.display());
                Ok(serde_json::from_str(&text)?)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("No document at {}", path.display());
                Ok(Topology::new(event_id))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, topology: &Topology) -> Result<Topology, PersistenceError> {
        validate_event_id(&topology.event_id)?;
        let path: PathBuf = self.document_path(&topology.event_id);
        let temp_path: PathBuf = self.root.join(format!("{}.json.tmp", topology.event_id));

        let text: String = serde_json::to_string_pretty(topology)?;
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(&temp_path, text.as_bytes()).await?;
        tokio::fs::rename(&temp_path, &path).await?;

        info!("Saved {} to {}", topology.describe(), path.display());
        Ok(serde_json::from_str(&text)?)
    }
}
