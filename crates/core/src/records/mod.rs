//! Record types managed by the ranch.
//!
//! Each module defines the record struct, its creation DTO (`New*`), its
//! patch DTO (`Update*`), its closed enums and its summary statistics.

pub mod breeding;
pub mod collected_semen;
pub mod frozen_embryo;
pub mod frozen_semen;
pub mod heat_cycle;
pub mod horse;
pub mod inventory;
pub mod pregnancy;

pub use breeding::{BreedingRecord, NewBreedingRecord, UpdateBreedingRecord};
pub use collected_semen::{CollectedSemen, NewCollectedSemen, UpdateCollectedSemen};
pub use frozen_embryo::{FrozenEmbryoInventory, NewFrozenEmbryo, UpdateFrozenEmbryo};
pub use frozen_semen::{FrozenSemenInventory, NewFrozenSemen, UpdateFrozenSemen};
pub use heat_cycle::{HeatCycleRecord, NewHeatCycle, UpdateHeatCycle};
pub use horse::{Horse, NewHorse, UpdateHorse};
pub use inventory::{InventoryItem, NewInventoryItem, UpdateInventoryItem};
pub use pregnancy::{NewPregnancy, PregnancyRecord, UpdatePregnancy};

crate::define_record_enum! {
    /// Lifecycle of a cryopreserved unit (embryo or semen straw batch).
    StorageStatus {
        Available => "available",
        Reserved => "reserved",
        Transferred => "transferred",
        Discarded => "discarded",
    }
}

/// Push `value` into `fields` when present. Used by `searchable_fields`.
pub(crate) fn push_opt<'a>(fields: &mut Vec<&'a str>, value: &'a Option<String>) {
    if let Some(v) = value.as_deref() {
        fields.push(v);
    }
}
