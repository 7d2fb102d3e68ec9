//! Fresh semen collections, before processing or freezing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::config::RanchConfig;
use crate::metrics::mean;
use crate::record::{Record, Ungraded};
use crate::types::{Date, RecordId, Timestamp};

crate::define_record_enum! {
    CollectionStatus {
        Fresh => "fresh",
        Processed => "processed",
        Frozen => "frozen",
        Shipped => "shipped",
        Discarded => "discarded",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectedSemen {
    pub id: RecordId,
    pub stallion_name: String,
    pub collection_date: Date,
    pub volume_ml: f64,
    pub concentration_million_per_ml: f64,
    pub motility_percent: f64,
    pub technician: String,
    pub status: CollectionStatus,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewCollectedSemen {
    #[validate(length(min = 1, message = "Stallion name is required"))]
    pub stallion_name: String,
    pub collection_date: Date,
    #[validate(range(min = 0.0, message = "Volume cannot be negative"))]
    pub volume_ml: f64,
    #[validate(range(min = 0.0, message = "Concentration cannot be negative"))]
    pub concentration_million_per_ml: f64,
    #[validate(range(min = 0.0, max = 100.0, message = "Motility must be between 0 and 100"))]
    pub motility_percent: f64,
    pub technician: String,
    pub status: CollectionStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCollectedSemen {
    pub stallion_name: Option<String>,
    pub collection_date: Option<Date>,
    pub volume_ml: Option<f64>,
    pub concentration_million_per_ml: Option<f64>,
    pub motility_percent: Option<f64>,
    pub technician: Option<String>,
    pub status: Option<CollectionStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectedSemenStats {
    pub total: usize,
    pub by_status: BTreeMap<CollectionStatus, usize>,
    pub average_volume_ml: Option<f64>,
    pub average_motility: Option<f64>,
}

impl CollectedSemen {
    /// Progressively motile sperm in the ejaculate, in billions.
    pub fn total_motile_billions(&self) -> f64 {
        self.volume_ml * self.concentration_million_per_ml * (self.motility_percent / 100.0) / 1000.0
    }
}

impl Record for CollectedSemen {
    type New = NewCollectedSemen;
    type Patch = UpdateCollectedSemen;
    type Status = CollectionStatus;
    type Quality = Ungraded;
    type Stats = CollectedSemenStats;

    const ENTITY: &'static str = "collected_semen";
    const ID_PREFIX: &'static str = "CS";

    fn from_new(id: RecordId, input: NewCollectedSemen, now: Timestamp) -> Self {
        Self {
            id,
            stallion_name: input.stallion_name,
            collection_date: input.collection_date,
            volume_ml: input.volume_ml,
            concentration_million_per_ml: input.concentration_million_per_ml,
            motility_percent: input.motility_percent,
            technician: input.technician,
            status: input.status,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn apply_patch(&mut self, patch: UpdateCollectedSemen, now: Timestamp) {
        if let Some(v) = patch.stallion_name {
            self.stallion_name = v;
        }
        if let Some(v) = patch.collection_date {
            self.collection_date = v;
        }
        if let Some(v) = patch.volume_ml {
            self.volume_ml = v;
        }
        if let Some(v) = patch.concentration_million_per_ml {
            self.concentration_million_per_ml = v;
        }
        if let Some(v) = patch.motility_percent {
            self.motility_percent = v;
        }
        if let Some(v) = patch.technician {
            self.technician = v;
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
        if patch.notes.is_some() {
            self.notes = patch.notes;
        }
        self.updated_at = now;
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![
            self.id.as_str(),
            self.stallion_name.as_str(),
            self.technician.as_str(),
        ]
    }

    fn status(&self) -> CollectionStatus {
        self.status
    }

    fn filter_date(&self) -> Option<Date> {
        Some(self.collection_date)
    }

    fn summarize(records: &[Self], _today: Date, _config: &RanchConfig) -> CollectedSemenStats {
        let mut by_status = BTreeMap::new();
        for r in records {
            *by_status.entry(r.status).or_insert(0) += 1;
        }
        CollectedSemenStats {
            total: records.len(),
            by_status,
            average_volume_ml: mean(records.iter().map(|r| r.volume_ml)),
            average_motility: mean(records.iter().map(|r| r.motility_percent)),
        }
    }
}
