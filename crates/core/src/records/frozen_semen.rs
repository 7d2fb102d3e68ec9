//! Frozen semen straws in storage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{push_opt, StorageStatus};
use crate::config::RanchConfig;
use crate::metrics::mean;
use crate::record::Record;
use crate::types::{Date, RecordId, Timestamp};

crate::define_record_enum! {
    /// Post-thaw quality assessment.
    SemenQuality {
        Excellent => "excellent",
        Good => "good",
        Fair => "fair",
        Poor => "poor",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrozenSemenInventory {
    pub id: RecordId,
    pub stallion_name: String,
    pub collection_date: Date,
    pub straws: u32,
    pub motility_percent: f64,
    pub quality: SemenQuality,
    pub tank: String,
    pub canister: String,
    pub batch_number: Option<String>,
    pub status: StorageStatus,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewFrozenSemen {
    #[validate(length(min = 1, message = "Stallion name is required"))]
    pub stallion_name: String,
    pub collection_date: Date,
    #[validate(range(min = 1, message = "At least one straw is required"))]
    pub straws: u32,
    #[validate(range(min = 0.0, max = 100.0, message = "Motility must be between 0 and 100"))]
    pub motility_percent: f64,
    pub quality: SemenQuality,
    #[validate(length(min = 1, message = "Storage tank is required"))]
    pub tank: String,
    pub canister: String,
    pub batch_number: Option<String>,
    pub status: StorageStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFrozenSemen {
    pub stallion_name: Option<String>,
    pub collection_date: Option<Date>,
    pub straws: Option<u32>,
    pub motility_percent: Option<f64>,
    pub quality: Option<SemenQuality>,
    pub tank: Option<String>,
    pub canister: Option<String>,
    pub batch_number: Option<String>,
    pub status: Option<StorageStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrozenSemenStats {
    pub total: usize,
    pub by_status: BTreeMap<StorageStatus, usize>,
    pub by_quality: BTreeMap<SemenQuality, usize>,
    pub straws_available: u64,
    pub average_motility: Option<f64>,
}

impl Record for FrozenSemenInventory {
    type New = NewFrozenSemen;
    type Patch = UpdateFrozenSemen;
    type Status = StorageStatus;
    type Quality = SemenQuality;
    type Stats = FrozenSemenStats;

    const ENTITY: &'static str = "frozen_semen";
    const ID_PREFIX: &'static str = "FS";

    fn from_new(id: RecordId, input: NewFrozenSemen, now: Timestamp) -> Self {
        Self {
            id,
            stallion_name: input.stallion_name,
            collection_date: input.collection_date,
            straws: input.straws,
            motility_percent: input.motility_percent,
            quality: input.quality,
            tank: input.tank,
            canister: input.canister,
            batch_number: input.batch_number,
            status: input.status,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn apply_patch(&mut self, patch: UpdateFrozenSemen, now: Timestamp) {
        if let Some(v) = patch.stallion_name {
            self.stallion_name = v;
        }
        if let Some(v) = patch.collection_date {
            self.collection_date = v;
        }
        if let Some(v) = patch.straws {
            self.straws = v;
        }
        if let Some(v) = patch.motility_percent {
            self.motility_percent = v;
        }
        if let Some(v) = patch.quality {
            self.quality = v;
        }
        if let Some(v) = patch.tank {
            self.tank = v;
        }
        if let Some(v) = patch.canister {
            self.canister = v;
        }
        if patch.batch_number.is_some() {
            self.batch_number = patch.batch_number;
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
        let mut fields = vec![self.id.as_str(), self.stallion_name.as_str(), self.tank.as_str()];
        push_opt(&mut fields, &self.batch_number);
        fields
    }

    fn status(&self) -> StorageStatus {
        self.status
    }

    fn quality(&self) -> Option<SemenQuality> {
        Some(self.quality)
    }

    fn filter_date(&self) -> Option<Date> {
        Some(self.collection_date)
    }

    fn summarize(records: &[Self], _today: Date, _config: &RanchConfig) -> FrozenSemenStats {
        let mut by_status = BTreeMap::new();
        let mut by_quality = BTreeMap::new();
        for r in records {
            *by_status.entry(r.status).or_insert(0) += 1;
            *by_quality.entry(r.quality).or_insert(0) += 1;
        }
        FrozenSemenStats {
            total: records.len(),
            by_status,
            by_quality,
            straws_available: records
                .iter()
                .filter(|r| r.status == StorageStatus::Available)
                .map(|r| u64::from(r.straws))
                .sum(),
            average_motility: mean(records.iter().map(|r| r.motility_percent)),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;
    use crate::filter::FilterCriteria;

    fn batch(id: &str, batch_number: Option<&str>, motility: f64) -> FrozenSemenInventory {
        FrozenSemenInventory::from_new(
            id.to_string(),
            NewFrozenSemen {
                stallion_name: "Thunder".to_string(),
                collection_date: NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(),
                straws: 10,
                motility_percent: motility,
                quality: SemenQuality::Good,
                tank: "T-2".to_string(),
                canister: "C-1".to_string(),
                batch_number: batch_number.map(String::from),
                status: StorageStatus::Available,
                notes: None,
            },
            Utc::now(),
        )
    }

    #[test]
    fn batch_number_is_searchable_when_present() {
        let with = batch("1", Some("LOT-77"), 60.0);
        let without = batch("2", None, 60.0);
        let criteria = FilterCriteria::new().search("lot-77");
        assert!(criteria.matches(&with));
        assert!(!criteria.matches(&without));
    }

    #[test]
    fn stats_average_motility_and_straws() {
        let records = vec![batch("1", None, 50.0), batch("2", None, 70.0)];
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let stats = FrozenSemenInventory::summarize(&records, today, &RanchConfig::default());
        assert_eq!(stats.straws_available, 20);
        assert_eq!(stats.average_motility, Some(60.0));
    }

    #[test]
    fn motility_over_one_hundred_is_rejected() {
        let input = NewFrozenSemen {
            stallion_name: "Thunder".to_string(),
            collection_date: NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(),
            straws: 4,
            motility_percent: 140.0,
            quality: SemenQuality::Excellent,
            tank: "T-2".to_string(),
            canister: String::new(),
            batch_number: None,
            status: StorageStatus::Available,
            notes: None,
        };
        assert!(input.validate().is_err());
    }
}
