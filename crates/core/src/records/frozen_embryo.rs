//! Frozen embryo inventory held in liquid-nitrogen tanks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::StorageStatus;
use crate::config::RanchConfig;
use crate::record::Record;
use crate::types::{Date, RecordId, Timestamp};

crate::define_record_enum! {
    /// IETS morphological grade; grade 1 is best.
    EmbryoGrade {
        Grade1 => "grade_1",
        Grade2 => "grade_2",
        Grade3 => "grade_3",
        Grade4 => "grade_4",
    }
}

crate::define_record_enum! {
    EmbryoStage {
        Morula => "morula",
        EarlyBlastocyst => "early_blastocyst",
        Blastocyst => "blastocyst",
        ExpandedBlastocyst => "expanded_blastocyst",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrozenEmbryoInventory {
    pub id: RecordId,
    pub donor_mare: String,
    pub sire: String,
    pub collection_date: Date,
    pub grade: EmbryoGrade,
    pub stage: EmbryoStage,
    pub quantity: u32,
    pub tank: String,
    pub canister: String,
    pub status: StorageStatus,
    pub cost: Option<f64>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewFrozenEmbryo {
    #[validate(length(min = 1, message = "Donor mare is required"))]
    pub donor_mare: String,
    #[validate(length(min = 1, message = "Sire is required"))]
    pub sire: String,
    pub collection_date: Date,
    pub grade: EmbryoGrade,
    pub stage: EmbryoStage,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: u32,
    #[validate(length(min = 1, message = "Storage tank is required"))]
    pub tank: String,
    pub canister: String,
    pub status: StorageStatus,
    #[validate(range(min = 0.0, message = "Cost cannot be negative"))]
    pub cost: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFrozenEmbryo {
    pub donor_mare: Option<String>,
    pub sire: Option<String>,
    pub collection_date: Option<Date>,
    pub grade: Option<EmbryoGrade>,
    pub stage: Option<EmbryoStage>,
    pub quantity: Option<u32>,
    pub tank: Option<String>,
    pub canister: Option<String>,
    pub status: Option<StorageStatus>,
    pub cost: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrozenEmbryoStats {
    pub total: usize,
    pub by_status: BTreeMap<StorageStatus, usize>,
    pub by_grade: BTreeMap<EmbryoGrade, usize>,
    /// Embryos (not records) still available for transfer.
    pub units_available: u64,
}

impl Record for FrozenEmbryoInventory {
    type New = NewFrozenEmbryo;
    type Patch = UpdateFrozenEmbryo;
    type Status = StorageStatus;
    type Quality = EmbryoGrade;
    type Stats = FrozenEmbryoStats;

    const ENTITY: &'static str = "frozen_embryo";
    const ID_PREFIX: &'static str = "FE";

    fn from_new(id: RecordId, input: NewFrozenEmbryo, now: Timestamp) -> Self {
        Self {
            id,
            donor_mare: input.donor_mare,
            sire: input.sire,
            collection_date: input.collection_date,
            grade: input.grade,
            stage: input.stage,
            quantity: input.quantity,
            tank: input.tank,
            canister: input.canister,
            status: input.status,
            cost: input.cost,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn apply_patch(&mut self, patch: UpdateFrozenEmbryo, now: Timestamp) {
        if let Some(v) = patch.donor_mare {
            self.donor_mare = v;
        }
        if let Some(v) = patch.sire {
            self.sire = v;
        }
        if let Some(v) = patch.collection_date {
            self.collection_date = v;
        }
        if let Some(v) = patch.grade {
            self.grade = v;
        }
        if let Some(v) = patch.stage {
            self.stage = v;
        }
        if let Some(v) = patch.quantity {
            self.quantity = v;
        }
        if let Some(v) = patch.tank {
            self.tank = v;
        }
        if let Some(v) = patch.canister {
            self.canister = v;
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
        if patch.cost.is_some() {
            self.cost = patch.cost;
        }
        if patch.notes.is_some() {
            self.notes = patch.notes;
        }
        self.updated_at = now;
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![
            self.id.as_str(),
            self.donor_mare.as_str(),
            self.sire.as_str(),
            self.tank.as_str(),
        ]
    }

    fn status(&self) -> StorageStatus {
        self.status
    }

    fn quality(&self) -> Option<EmbryoGrade> {
        Some(self.grade)
    }

    fn filter_date(&self) -> Option<Date> {
        Some(self.collection_date)
    }

    fn summarize(records: &[Self], _today: Date, _config: &RanchConfig) -> FrozenEmbryoStats {
        let mut by_status = BTreeMap::new();
        let mut by_grade = BTreeMap::new();
        let mut units_available = 0u64;
        for r in records {
            *by_status.entry(r.status).or_insert(0) += 1;
            *by_grade.entry(r.grade).or_insert(0) += 1;
            if r.status == StorageStatus::Available {
                units_available += u64::from(r.quantity);
            }
        }
        FrozenEmbryoStats {
            total: records.len(),
            by_status,
            by_grade,
            units_available,
        }
    }
}
