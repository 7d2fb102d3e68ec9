//! Remote backends a [`SyncedCollection`](crate::SyncedCollection) confirms
//! mutations with.

use async_trait::async_trait;
use ranch_core::Record;

use crate::error::SyncError;

/// A remote store for records of type `R`.
///
/// Each call is a single attempt; callers never retry.
#[async_trait]
pub trait RecordBackend<R>: Send + Sync
where
    R: Record + Send + Sync,
    R::Patch: Send + Sync,
{
    async fn update(&self, id: &str, patch: &R::Patch) -> Result<(), SyncError>;

    async fn delete(&self, id: &str) -> Result<(), SyncError>;
}

/// Backend with no remote: logs each call and reports success.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingBackend;

#[async_trait]
impl<R> RecordBackend<R> for LoggingBackend
where
    R: Record + Send + Sync,
    R::Patch: Send + Sync + std::fmt::Debug,
{
    async fn update(&self, id: &str, patch: &R::Patch) -> Result<(), SyncError> {
        tracing::info!(entity = R::ENTITY, id, ?patch, "Persisting record update");
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), SyncError> {
        tracing::info!(entity = R::ENTITY, id, "Persisting record delete");
        Ok(())
    }
}
