//! Command-line walkthrough of the record managers: seeds a few collections,
//! applies filters, prints the stats cards and exports the filtered view.

use std::sync::Arc;

use anyhow::Context;
use chrono::{Days, NaiveDate};
use ranch_core::metrics;
use ranch_core::records::breeding::{BreedingMethod, BreedingStatus};
use ranch_core::records::inventory::InventoryCategory;
use ranch_core::records::pregnancy::PregnancyStatus;
use ranch_core::records::{
    BreedingRecord, InventoryItem, NewBreedingRecord, NewInventoryItem, NewPregnancy,
    PregnancyRecord, UpdateInventoryItem,
};
use ranch_core::{FilterCriteria, RanchConfig, RecordCollection};
use ranch_events::{NotificationBus, NotificationLevel};
use ranch_sync::{LoggingBackend, SyncedCollection};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ranch_console=info,ranch_core=debug,ranch_sync=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = RanchConfig::from_env().context("Invalid RANCH_* configuration")?;
    tracing::info!(?config, "Configuration loaded");

    let today = metrics::today();

    // -- Breeding --------------------------------------------------------------
    let mut breeding: RecordCollection<BreedingRecord> = RecordCollection::with_config(config.clone());
    for (mare, method, status, days_ago) in [
        ("Bella", BreedingMethod::FreshAi, BreedingStatus::Completed, 60),
        ("Luna", BreedingMethod::FrozenAi, BreedingStatus::Active, 12),
        ("Alma", BreedingMethod::NaturalCover, BreedingStatus::Planned, 0),
    ] {
        breeding.add(NewBreedingRecord {
            mare_name: mare.to_string(),
            stallion_name: "Thunder".to_string(),
            breeding_date: days_back(today, days_ago),
            method,
            technician: "Dr. Reyes".to_string(),
            location: "North Barn".to_string(),
            status,
            pregnancy_confirmed: status == BreedingStatus::Completed,
            cost: Some(450.0),
            notes: None,
        });
    }
    breeding.set_filters(FilterCriteria::new().status([BreedingStatus::Active, BreedingStatus::Planned]));
    print_card("Breeding", &breeding.stats())?;
    println!("{}", breeding.export_default()?);

    // -- Pregnancies -----------------------------------------------------------
    let mut pregnancies: RecordCollection<PregnancyRecord> = RecordCollection::with_config(config.clone());
    for (mare, days_ago) in [("Bella", 300_u64), ("Nova", 120)] {
        let bred = days_back(today, days_ago);
        let input = NewPregnancy {
            mare_name: mare.to_string(),
            stallion_name: "Thunder".to_string(),
            breeding_date: bred,
            due_date: metrics::estimated_due_date(bred, config.gestation_days),
            veterinarian: "Dr. Okafor".to_string(),
            status: PregnancyStatus::Confirmed,
            last_check_date: Some(today),
            notes: None,
        };
        pregnancies.submit(input).context("Seeding pregnancy")?;
    }
    for p in pregnancies.records() {
        tracing::info!(
            mare = %p.mare_name,
            progress = p.progress(today, config.gestation_days),
            days_remaining = p.days_remaining(today),
            "Gestation"
        );
    }
    print_card("Pregnancies", &pregnancies.stats())?;

    // -- Inventory (synced) ----------------------------------------------------
    let bus = Arc::new(NotificationBus::default());
    let mut notifications = bus.subscribe();

    let mut inventory = SyncedCollection::new(
        RecordCollection::<InventoryItem>::with_config(config.clone()),
        LoggingBackend,
        bus.clone(),
    );
    let item_id = inventory
        .collection_mut()
        .add(NewInventoryItem {
            name: "Regu-Mate".to_string(),
            category: InventoryCategory::Medication,
            quantity: 4.0,
            unit: "bottle".to_string(),
            reorder_level: 2.0,
            unit_cost: Some(89.5),
            supplier: "Equine Supply Co".to_string(),
            location: "Vet Room".to_string(),
            batch_number: None,
            expiry_date: today.checked_add_days(Days::new(20)),
            notes: None,
        })
        .id
        .clone();

    inventory
        .update(
            &item_id,
            UpdateInventoryItem {
                quantity: Some(1.0),
                ..Default::default()
            },
        )
        .await?;
    while let Ok(n) = notifications.try_recv() {
        match n.level {
            NotificationLevel::Error => tracing::warn!(title = %n.title, "{}", n.message),
            _ => tracing::info!(title = %n.title, "{}", n.message),
        }
    }
    print_card("Inventory", &inventory.collection().stats())?;

    Ok(())
}

fn days_back(today: NaiveDate, days: u64) -> NaiveDate {
    today.checked_sub_days(Days::new(days)).unwrap_or(today)
}

fn print_card<T: serde::Serialize>(title: &str, stats: &T) -> anyhow::Result<()> {
    println!("== {title} ==");
    println!("{}", serde_json::to_string_pretty(stats)?);
    Ok(())
}
