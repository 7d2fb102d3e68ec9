//! Failure handling of `SyncedCollection` against a backend that always
//! rejects: one error notification, no local change, error surfaced.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use assert_matches::assert_matches;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use ranch_core::records::frozen_embryo::{
    EmbryoGrade, EmbryoStage, FrozenEmbryoInventory, NewFrozenEmbryo, UpdateFrozenEmbryo,
};
use ranch_core::records::StorageStatus;
use ranch_core::{Record, RecordCollection};
use ranch_events::{NotificationBus, NotificationLevel};
use ranch_sync::{RecordBackend, SyncError, SyncedCollection};

/// Rejects every call and counts attempts.
#[derive(Default)]
struct RejectingBackend {
    calls: AtomicUsize,
}

#[async_trait]
impl RecordBackend<FrozenEmbryoInventory> for RejectingBackend {
    async fn update(&self, _id: &str, _patch: &UpdateFrozenEmbryo) -> Result<(), SyncError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(SyncError::Backend("connection reset by peer".to_string()))
    }

    async fn delete(&self, _id: &str) -> Result<(), SyncError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(SyncError::Backend("connection reset by peer".to_string()))
    }
}

fn embryo(id: &str) -> FrozenEmbryoInventory {
    FrozenEmbryoInventory::from_new(
        id.to_string(),
        NewFrozenEmbryo {
            donor_mare: "Bella".to_string(),
            sire: "Thunder".to_string(),
            collection_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            grade: EmbryoGrade::Grade2,
            stage: EmbryoStage::Morula,
            quantity: 3,
            tank: "T-4".to_string(),
            canister: "C-1".to_string(),
            status: StorageStatus::Available,
            cost: Some(1200.0),
            notes: None,
        },
        Utc::now(),
    )
}

fn setup() -> (
    SyncedCollection<FrozenEmbryoInventory, RejectingBackend>,
    Arc<NotificationBus>,
) {
    let bus = Arc::new(NotificationBus::default());
    let collection = RecordCollection::with_records([embryo("FE001"), embryo("FE002")]);
    (
        SyncedCollection::new(collection, RejectingBackend::default(), bus.clone()),
        bus,
    )
}

#[tokio::test]
async fn failed_update_leaves_record_and_notifies_once() {
    let (mut synced, bus) = setup();
    let mut rx = bus.subscribe();
    let before = synced.collection().records().to_vec();

    let result = synced
        .update(
            "FE001",
            UpdateFrozenEmbryo {
                quantity: Some(1),
                ..Default::default()
            },
        )
        .await;

    assert_matches!(result, Err(SyncError::Backend(_)));
    assert_eq!(synced.collection().records(), before.as_slice());
    assert_eq!(synced.backend().calls.load(Ordering::SeqCst), 1);

    let n = rx.try_recv().unwrap();
    assert_eq!(n.level, NotificationLevel::Error);
    assert_eq!(n.title, "Update failed");
    assert_eq!(n.entity_type.as_deref(), Some(FrozenEmbryoInventory::ENTITY));
    assert_eq!(n.entity_id.as_deref(), Some("FE001"));
    assert!(!n.message.contains("connection reset"));
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn failed_remove_keeps_record_and_notifies_once() {
    let (mut synced, bus) = setup();
    let mut rx = bus.subscribe();

    let result = synced.remove("FE002").await;

    assert_matches!(result, Err(SyncError::Backend(_)));
    assert_eq!(synced.collection().len(), 2);
    assert!(synced.collection().get("FE002").is_some());
    assert_eq!(synced.backend().calls.load(Ordering::SeqCst), 1);

    let n = rx.try_recv().unwrap();
    assert_eq!(n.level, NotificationLevel::Error);
    assert_eq!(n.title, "Delete failed");
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn failures_do_not_poison_later_local_operations() {
    let (mut synced, _bus) = setup();
    let _ = synced.remove("FE001").await;

    let stats = synced.collection().stats();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.units_available, 6);
    assert!(synced.collection_mut().remove("FE001"));
    assert_eq!(synced.into_inner().len(), 1);
}

#[tokio::test]
async fn unknown_id_never_reaches_the_backend() {
    let (mut synced, bus) = setup();
    let mut rx = bus.subscribe();

    let updated = synced
        .update("nope", UpdateFrozenEmbryo::default())
        .await;
    let removed = synced.remove("nope").await;

    assert_matches!(updated, Ok(false));
    assert_matches!(removed, Ok(false));
    assert_eq!(synced.backend().calls.load(Ordering::SeqCst), 0);
    assert_eq!(synced.collection().len(), 2);
    assert!(rx.try_recv().is_err());
}
