// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::notification::Notification;
use crate::sync::{SyncReport, SyncRequest, spawn_sync_worker};
use accessmap::{
    Command, Outcome, Summary, Topology, TransitionResult, apply, is_first_visit,
    seed_default_topology,
};
use accessmap_domain::{
    AccessTypes, Checkpoint, CheckpointId, DEFAULT_CHECKPOINT_ROLE, Direction, Entity, EntityId,
    IdGenerator, LinkScope,
};
use accessmap_persistence::EventGateway;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

/// One editing session over the topology of one event.
///
/// The session owns the current snapshot. Mutations run synchronously:
/// each one applies a command, publishes the resulting snapshot to
/// subscribers and queues it for saving. Saves happen on a background
/// task and never roll back the in-memory snapshot on failure; instead the
/// session stays dirty and raises an error notification.
///
/// A session must be opened inside a tokio runtime.
pub struct Repository {
    event_id: String,
    current: watch::Sender<Arc<Topology>>,
    ids: IdGenerator,
    revision: u64,
    saved_revision: u64,
    last_sync_error: Option<String>,
    notifications: VecDeque<Notification>,
    auto_seeded: bool,
    seed_banner_visible: bool,
    sync_requests: mpsc::UnboundedSender<SyncRequest>,
    sync_reports: mpsc::UnboundedReceiver<SyncReport>,
}

impl Repository {
    /// Opens a session, loading the event's topology from the gateway.
    ///
    /// Opening never fails. If the gateway has no usable topology, or
    /// cannot be reached, the session starts from the default topology
    /// (one gate and one venue) and shows the seed banner. A fetch failure
    /// also raises an error notification.
    pub async fn open(event_id: &str, gateway: Arc<dyn EventGateway>) -> Self {
        let mut ids: IdGenerator = IdGenerator::new();
        let mut notifications: VecDeque<Notification> = VecDeque::new();

        let loaded: Option<Topology> = match gateway.fetch(event_id).await {
            Ok(mut topology) => {
                if topology.event_id != event_id {
                    warn!(
                        "Document for {event_id} is tagged with event id '{}'",
                        topology.event_id
                    );
                    topology.event_id = event_id.to_string();
                }
                observe_identifiers(&mut ids, &topology);
                Some(topology)
            }
            Err(err) => {
                warn!("Failed to load {event_id}: {err}");
                notifications.push_back(Notification::error(format!(
                    "Failed to load event {event_id}: {err}"
                )));
                None
            }
        };

        let (topology, auto_seeded): (Topology, bool) = match loaded {
            Some(topology) if !is_first_visit(Some(&topology)) => {
                info!("Loaded {}", topology.describe());
                (topology, false)
            }
            _ => {
                // The loaded document is replaced, so its identifiers no longer count.
                ids = IdGenerator::new();
                match seed_default_topology(event_id, &mut ids) {
                    Ok(seeded) => {
                        info!("Seeded default topology for {event_id}");
                        (seeded, true)
                    }
                    Err(err) => {
                        warn!("Failed to seed {event_id}: {err}");
                        notifications.push_back(Notification::error(format!(
                            "Failed to seed event {event_id}: {err}"
                        )));
                        (Topology::new(event_id), true)
                    }
                }
            }
        };

        let (sync_requests, requests_rx) = mpsc::unbounded_channel::<SyncRequest>();
        let (reports_tx, sync_reports) = mpsc::unbounded_channel::<SyncReport>();
        spawn_sync_worker(gateway, requests_rx, reports_tx);
        let (current, _) = watch::channel(Arc::new(topology));

        Self {
            event_id: event_id.to_string(),
            current,
            ids,
            revision: u64::from(auto_seeded),
            saved_revision: 0,
            last_sync_error: None,
            notifications,
            auto_seeded,
            seed_banner_visible: auto_seeded,
            sync_requests,
            sync_reports,
        }
    }

    /// The event this session edits.
    #[must_use]
    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    /// The current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Topology> {
        Arc::clone(&self.current.borrow())
    }

    /// Subscribes to snapshot changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<Topology>> {
        self.current.subscribe()
    }

    /// Aggregate counts over the current snapshot.
    #[must_use]
    pub fn summary(&self) -> Summary {
        self.current.borrow().summary()
    }

    /// Creates a gate with its entry checkpoint.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` if the name is blank.
    pub fn create_gate(
        &mut self,
        name: &str,
        device_imei: Option<String>,
        device_role: Option<String>,
    ) -> Result<Entity, ApiError> {
        let result: TransitionResult = self.execute(Command::CreateGate {
            name: name.to_string(),
            device_imei,
            device_role,
        })?;
        created_entity(&result)
    }

    /// Creates a top-level zone.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` if the name is blank.
    pub fn create_zone(
        &mut self,
        name: &str,
        max_capacity: u32,
        access_types: AccessTypes,
    ) -> Result<Entity, ApiError> {
        let result: TransitionResult = self.execute(Command::CreateZone {
            name: name.to_string(),
            max_capacity,
            access_types,
        })?;
        created_entity(&result)
    }

    /// Creates a top-level venue.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` if the name is blank.
    pub fn create_venue(
        &mut self,
        name: &str,
        max_capacity: u32,
        access_types: AccessTypes,
    ) -> Result<Entity, ApiError> {
        let result: TransitionResult = self.execute(Command::CreateVenue {
            name: name.to_string(),
            max_capacity,
            access_types,
        })?;
        created_entity(&result)
    }

    /// Creates a subzone under an existing venue or zone.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The name is blank
    /// - The parent does not exist
    /// - The parent is a gate or a subzone
    pub fn create_subzone(
        &mut self,
        parent_id: &EntityId,
        name: &str,
        max_capacity: u32,
        access_types: AccessTypes,
    ) -> Result<Entity, ApiError> {
        let result: TransitionResult = self.execute(Command::CreateSubzone {
            parent_id: parent_id.clone(),
            name: name.to_string(),
            max_capacity,
            access_types,
        })?;
        created_entity(&result)
    }

    /// Adds a new checkpoint to an entity.
    ///
    /// The checkpoint receives a fresh identifier and share links under
    /// `/checkpoint/`. The role defaults to `STEWARD-ZONEIN`.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank, the entity does not exist or
    /// no checkpoint identifier is left to issue.
    pub fn add_checkpoint(
        &mut self,
        entity_id: &EntityId,
        name: &str,
        direction: Direction,
        role: Option<&str>,
        device_imei: Option<String>,
    ) -> Result<Checkpoint, ApiError> {
        let role: &str = role
            .filter(|role| !role.trim().is_empty())
            .unwrap_or(DEFAULT_CHECKPOINT_ROLE);
        let checkpoint_id: CheckpointId = self
            .ids
            .checkpoint_id()
            .map_err(translate_domain_error)?;
        let checkpoint: Checkpoint = Checkpoint::new(
            checkpoint_id,
            name,
            direction,
            role,
            LinkScope::Checkpoint,
            device_imei,
        );
        self.add_checkpoint_record(entity_id, checkpoint)
    }

    /// Adds a caller-built checkpoint to an entity, replacing any
    /// checkpoint with the same identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the checkpoint id or name is blank or the entity
    /// does not exist.
    pub fn add_checkpoint_record(
        &mut self,
        entity_id: &EntityId,
        checkpoint: Checkpoint,
    ) -> Result<Checkpoint, ApiError> {
        self.ids.observe(checkpoint.checkpoint_id.value());
        self.execute(Command::AddCheckpoint {
            entity_id: entity_id.clone(),
            checkpoint: checkpoint.clone(),
        })?;
        Ok(checkpoint)
    }

    /// Replaces an existing checkpoint.
    ///
    /// A missing entity or checkpoint leaves the topology unchanged and
    /// yields `Outcome::Ignored`.
    ///
    /// # Errors
    ///
    /// Returns an error if the checkpoint id or name is blank.
    pub fn update_checkpoint(
        &mut self,
        entity_id: &EntityId,
        checkpoint: Checkpoint,
    ) -> Result<Outcome, ApiError> {
        self.execute(Command::UpdateCheckpoint {
            entity_id: entity_id.clone(),
            checkpoint,
        })
        .map(|result| result.outcome)
    }

    /// Removes a checkpoint. A missing checkpoint yields `Outcome::Ignored`.
    ///
    /// # Errors
    ///
    /// This operation does not fail for missing targets.
    pub fn delete_checkpoint(
        &mut self,
        entity_id: &EntityId,
        checkpoint_id: &CheckpointId,
    ) -> Result<Outcome, ApiError> {
        self.execute(Command::DeleteCheckpoint {
            entity_id: entity_id.clone(),
            checkpoint_id: checkpoint_id.clone(),
        })
        .map(|result| result.outcome)
    }

    /// Enables or disables occupancy reports for an entity.
    ///
    /// # Errors
    ///
    /// This operation does not fail for missing targets.
    pub fn set_update_policy(
        &mut self,
        entity_id: &EntityId,
        enabled: bool,
    ) -> Result<Outcome, ApiError> {
        self.execute(Command::SetUpdatePolicy {
            entity_id: entity_id.clone(),
            enabled,
        })
        .map(|result| result.outcome)
    }

    /// Flips the update policy of an entity.
    ///
    /// # Errors
    ///
    /// This operation does not fail for missing targets.
    pub fn toggle_update_policy(&mut self, entity_id: &EntityId) -> Result<Outcome, ApiError> {
        let enabled: bool = self
            .current
            .borrow()
            .entity(entity_id)
            .is_none_or(|entity| !entity.update_policy);
        self.set_update_policy(entity_id, enabled)
    }

    /// Records an externally reported occupancy.
    ///
    /// Reports for entities whose update policy is disabled are ignored.
    ///
    /// # Errors
    ///
    /// This operation does not fail for missing targets.
    pub fn record_occupancy(
        &mut self,
        entity_id: &EntityId,
        occupancy: u32,
    ) -> Result<Outcome, ApiError> {
        self.execute(Command::RecordOccupancy {
            entity_id: entity_id.clone(),
            occupancy,
        })
        .map(|result| result.outcome)
    }

    /// Removes an entity and its checkpoints. Its subzones are kept.
    ///
    /// # Errors
    ///
    /// This operation does not fail for missing targets.
    pub fn delete_entity(&mut self, entity_id: &EntityId) -> Result<Outcome, ApiError> {
        self.execute(Command::DeleteEntity {
            entity_id: entity_id.clone(),
        })
        .map(|result| result.outcome)
    }

    /// Returns whether the topology was seeded because nothing was stored.
    #[must_use]
    pub const fn was_auto_seeded(&self) -> bool {
        self.auto_seeded
    }

    /// Returns whether the seed banner should be shown.
    #[must_use]
    pub const fn show_seed_banner(&self) -> bool {
        self.seed_banner_visible
    }

    /// Hides the seed banner for the rest of the session.
    pub const fn dismiss_seed_banner(&mut self) {
        self.seed_banner_visible = false;
    }

    /// Drains queued notifications, oldest first.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.poll_sync();
        self.notifications.drain(..).collect()
    }

    /// Returns whether the newest snapshot has not been saved.
    pub fn is_dirty(&mut self) -> bool {
        self.poll_sync();
        self.revision > self.saved_revision
    }

    /// The most recent save failure, cleared by the next successful save.
    pub fn last_sync_error(&mut self) -> Option<String> {
        self.poll_sync();
        self.last_sync_error.clone()
    }

    /// Applies the outcome of finished saves without waiting.
    pub fn poll_sync(&mut self) {
        while let Ok(report) = self.sync_reports.try_recv() {
            self.handle_report(report);
        }
    }

    /// Saves the current snapshot if it is dirty and waits until every
    /// queued save has finished.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::BackendUnavailable` if the newest snapshot could
    /// not be saved.
    pub async fn flush(&mut self) -> Result<(), ApiError> {
        self.poll_sync();
        if self.revision > self.saved_revision {
            self.queue_save(self.revision, self.snapshot());
        }

        let (done_tx, done_rx) = oneshot::channel::<()>();
        if self.sync_requests.send(SyncRequest::Flush(done_tx)).is_ok() && done_rx.await.is_err() {
            debug!("Sync worker stopped before acknowledging the flush");
        }
        self.poll_sync();

        if self.revision > self.saved_revision {
            return Err(ApiError::BackendUnavailable {
                message: self
                    .last_sync_error
                    .clone()
                    .unwrap_or_else(|| String::from("changes were not saved")),
            });
        }
        Ok(())
    }

    fn execute(&mut self, command: Command) -> Result<TransitionResult, ApiError> {
        self.poll_sync();
        let current: Arc<Topology> = self.snapshot();

        let result: TransitionResult = match apply(&current, command, &mut self.ids) {
            Ok(result) => result,
            Err(err) => {
                let api_err: ApiError = translate_core_error(err);
                debug!("Command rejected: {api_err}");
                self.notifications
                    .push_back(Notification::error(api_err.to_string()));
                return Err(api_err);
            }
        };

        if result.outcome.is_applied() {
            self.notifications
                .push_back(Notification::info(result.change.details.clone()));
            self.publish(result.new_topology.clone());
        }
        Ok(result)
    }

    fn publish(&mut self, topology: Topology) {
        self.revision += 1;
        let snapshot: Arc<Topology> = Arc::new(topology);
        self.current.send_replace(Arc::clone(&snapshot));
        self.queue_save(self.revision, snapshot);
    }

    fn queue_save(&mut self, revision: u64, topology: Arc<Topology>) {
        let request: SyncRequest = SyncRequest::Save { revision, topology };
        if self.sync_requests.send(request).is_err() {
            let message: String = String::from("sync worker is not running");
            warn!("Revision {revision} of {} not queued: {message}", self.event_id);
            self.last_sync_error = Some(message.clone());
            self.notifications
                .push_back(Notification::error(format!("Failed to save changes: {message}")));
        }
    }

    fn handle_report(&mut self, report: SyncReport) {
        match report {
            SyncReport::Saved { revision } => {
                self.saved_revision = self.saved_revision.max(revision);
                if self.saved_revision >= self.revision {
                    self.last_sync_error = None;
                }
            }
            SyncReport::Failed { revision, error } => {
                if revision > self.saved_revision {
                    self.notifications
                        .push_back(Notification::error(format!("Failed to save changes: {error}")));
                    self.last_sync_error = Some(error);
                }
            }
        }
    }
}

impl Drop for Repository {
    fn drop(&mut self) {
        if self.revision > self.saved_revision {
            debug!(
                "Closing {} with unsaved revision {}",
                self.event_id, self.revision
            );
        }
    }
}

fn created_entity(result: &TransitionResult) -> Result<Entity, ApiError> {
    result
        .new_topology
        .entity(&result.change.entity_id)
        .cloned()
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Entity"),
            message: format!("Entity '{}' does not exist", result.change.entity_id),
        })
}

/// Advances the id generator past every identifier in a loaded topology.
fn observe_identifiers(ids: &mut IdGenerator, topology: &Topology) {
    for entity in topology.entities() {
        ids.observe(entity.id().value());
        for checkpoint_id in entity.checkpoints().keys() {
            ids.observe(checkpoint_id.value());
        }
    }
}
