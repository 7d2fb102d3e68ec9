//! Asynchronous, single-shot record mutations.
//!
//! Some record screens (frozen embryo and semen inventory) confirm updates
//! and deletes with a remote backend before touching the in-memory list.
//! [`SyncedCollection`] wraps a [`RecordCollection`](ranch_core::RecordCollection)
//! for that flow: the backend is called once, the local list changes only on
//! success, and a failure produces exactly one notification on the
//! [`NotificationBus`](ranch_events::NotificationBus). There is no retry,
//! no timeout and no rollback.

pub mod backend;
pub mod error;
pub mod synced;

pub use backend::{LoggingBackend, RecordBackend};
pub use error::SyncError;
pub use synced::SyncedCollection;
