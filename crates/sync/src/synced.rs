use std::sync::Arc;

use ranch_core::{Record, RecordCollection};
use ranch_events::{Notification, NotificationBus};

use crate::backend::RecordBackend;
use crate::error::SyncError;

/// A [`RecordCollection`] whose updates and deletes are confirmed by a
/// backend before being applied locally.
pub struct SyncedCollection<R, B>
where
    R: Record,
{
    collection: RecordCollection<R>,
    backend: B,
    bus: Arc<NotificationBus>,
}

impl<R, B> SyncedCollection<R, B>
where
    R: Record + Send + Sync,
    R::Patch: Send + Sync,
    B: RecordBackend<R>,
{
    pub fn new(collection: RecordCollection<R>, backend: B, bus: Arc<NotificationBus>) -> Self {
        Self {
            collection,
            backend,
            bus,
        }
    }

    pub fn collection(&self) -> &RecordCollection<R> {
        &self.collection
    }

    /// Direct access for synchronous operations (add, filters, stats).
    pub fn collection_mut(&mut self) -> &mut RecordCollection<R> {
        &mut self.collection
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_inner(self) -> RecordCollection<R> {
        self.collection
    }

    /// Confirm `patch` with the backend, then merge it locally.
    ///
    /// Returns `Ok(false)` without contacting the backend when no local
    /// record has `id`. On backend failure the local record is left as it
    /// was and one error notification is published.
    pub async fn update(&mut self, id: &str, patch: R::Patch) -> Result<bool, SyncError> {
        if self.collection.get(id).is_none() {
            tracing::debug!(entity = R::ENTITY, id, "Synced update ignored: no such record");
            return Ok(false);
        }

        if let Err(e) = self.backend.update(id, &patch).await {
            tracing::warn!(entity = R::ENTITY, id, error = %e, "Record update failed");
            self.bus.publish(
                Notification::error(
                    "Update failed",
                    format!("Could not update {}. Please try again.", entity_label::<R>()),
                )
                .with_entity(R::ENTITY, id),
            );
            return Err(e);
        }

        let applied = self.collection.update(id, patch);
        self.bus.publish(
            Notification::success("Record updated", format!("{} updated", capitalized_label::<R>()))
                .with_entity(R::ENTITY, id),
        );
        Ok(applied)
    }

    /// Confirm the delete with the backend, then remove locally.
    ///
    /// Same failure contract as [`update`](Self::update).
    pub async fn remove(&mut self, id: &str) -> Result<bool, SyncError> {
        if self.collection.get(id).is_none() {
            tracing::debug!(entity = R::ENTITY, id, "Synced delete ignored: no such record");
            return Ok(false);
        }

        if let Err(e) = self.backend.delete(id).await {
            tracing::warn!(entity = R::ENTITY, id, error = %e, "Record delete failed");
            self.bus.publish(
                Notification::error(
                    "Delete failed",
                    format!("Could not delete {}. Please try again.", entity_label::<R>()),
                )
                .with_entity(R::ENTITY, id),
            );
            return Err(e);
        }

        let removed = self.collection.remove(id);
        self.bus.publish(
            Notification::success("Record deleted", format!("{} deleted", capitalized_label::<R>()))
                .with_entity(R::ENTITY, id),
        );
        Ok(removed)
    }
}

/// `"frozen_embryo"` -> `"frozen embryo"`.
fn entity_label<R: Record>() -> String {
    R::ENTITY.replace('_', " ")
}

/// `"frozen_embryo"` -> `"Frozen embryo"`.
fn capitalized_label<R: Record>() -> String {
    let label = entity_label::<R>();
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => label,
    }
}
