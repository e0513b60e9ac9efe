// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Background saving of topology snapshots.
//!
//! One worker task runs per session. It saves snapshots strictly in
//! revision order and, when several are queued, saves only the newest.

use accessmap::Topology;
use accessmap_persistence::EventGateway;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// A message sent from the session to its sync worker.
pub enum SyncRequest {
    /// Save this snapshot.
    Save {
        /// The snapshot's revision.
        revision: u64,
        /// The snapshot to store.
        topology: Arc<Topology>,
    },
    /// Reply once every earlier save request has been handled.
    Flush(oneshot::Sender<()>),
}

/// The result of one save attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncReport {
    /// The snapshot at `revision` is stored.
    Saved {
        /// The stored revision.
        revision: u64,
    },
    /// Storing the snapshot at `revision` failed.
    Failed {
        /// The revision that was not stored.
        revision: u64,
        /// Why the save failed.
        error: String,
    },
}

/// Spawns the sync worker on the current tokio runtime.
pub fn spawn_sync_worker(
    gateway: Arc<dyn EventGateway>,
    requests: mpsc::UnboundedReceiver<SyncRequest>,
    reports: mpsc::UnboundedSender<SyncReport>,
) {
    tokio::spawn(run_sync_worker(gateway, requests, reports));
}

async fn run_sync_worker(
    gateway: Arc<dyn EventGateway>,
    mut requests: mpsc::UnboundedReceiver<SyncRequest>,
    reports: mpsc::UnboundedSender<SyncReport>,
) {
    while let Some(request) = requests.recv().await {
        let mut latest: Option<(u64, Arc<Topology>)> = None;
        let mut waiters: Vec<oneshot::Sender<()>> = Vec::new();
        collect(request, &mut latest, &mut waiters);
        while let Ok(request) = requests.try_recv() {
            collect(request, &mut latest, &mut waiters);
        }

        if let Some((revision, topology)) = latest {
            let report: SyncReport = match gateway.save(&topology).await {
                Ok(_) => {
                    info!("Saved revision {revision} of {}", topology.event_id);
                    SyncReport::Saved { revision }
                }
                Err(err) => {
                    warn!("Saving revision {revision} of {} failed: {err}", topology.event_id);
                    SyncReport::Failed {
                        revision,
                        error: err.to_string(),
                    }
                }
            };
            if reports.send(report).is_err() {
                debug!("Session closed, stopping sync worker");
                break;
            }
        }

        for waiter in waiters {
            if waiter.send(()).is_err() {
                debug!("Flush waiter went away before the save finished");
            }
        }
    }
}

/// Folds one request into the pending batch. Newer snapshots replace
/// older ones.
fn collect(
    request: SyncRequest,
    latest: &mut Option<(u64, Arc<Topology>)>,
    waiters: &mut Vec<oneshot::Sender<()>>,
) {
    match request {
        SyncRequest::Save { revision, topology } => {
            let newer: bool = latest
                .as_ref()
                .is_none_or(|(queued, _)| revision > *queued);
            if newer {
                if let Some((skipped, _)) = latest.as_ref() {
                    debug!("Revision {skipped} superseded by {revision}");
                }
                *latest = Some((revision, topology));
            }
        }
        SyncRequest::Flush(waiter) => waiters.push(waiter),
    }
}
