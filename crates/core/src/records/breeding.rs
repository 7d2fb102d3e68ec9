//! Breeding records: one mare/stallion pairing event.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::config::RanchConfig;
use crate::metrics::percentage;
use crate::record::Record;
use crate::types::{Date, RecordId, Timestamp};

crate::define_record_enum! {
    /// Breeding lifecycle.
    BreedingStatus {
        Planned => "planned",
        Active => "active",
        Completed => "completed",
        Cancelled => "cancelled",
        Failed => "failed",
    }
}

crate::define_record_enum! {
    /// How the mare was bred.
    BreedingMethod {
        NaturalCover => "natural_cover",
        FreshAi => "fresh_ai",
        CooledAi => "cooled_ai",
        FrozenAi => "frozen_ai",
        EmbryoTransfer => "embryo_transfer",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreedingRecord {
    pub id: RecordId,
    pub mare_name: String,
    pub stallion_name: String,
    pub breeding_date: Date,
    pub method: BreedingMethod,
    pub technician: String,
    pub location: String,
    pub status: BreedingStatus,
    /// Set once an ultrasound confirms pregnancy.
    pub pregnancy_confirmed: bool,
    pub cost: Option<f64>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a breeding record.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewBreedingRecord {
    #[validate(length(min = 1, message = "Mare name is required"))]
    pub mare_name: String,
    #[validate(length(min = 1, message = "Stallion name is required"))]
    pub stallion_name: String,
    pub breeding_date: Date,
    pub method: BreedingMethod,
    #[validate(length(min = 1, message = "Technician is required"))]
    pub technician: String,
    pub location: String,
    pub status: BreedingStatus,
    #[serde(default)]
    pub pregnancy_confirmed: bool,
    #[validate(range(min = 0.0, message = "Cost cannot be negative"))]
    pub cost: Option<f64>,
    pub notes: Option<String>,
}

/// DTO for updating a breeding record. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBreedingRecord {
    pub mare_name: Option<String>,
    pub stallion_name: Option<String>,
    pub breeding_date: Option<Date>,
    pub method: Option<BreedingMethod>,
    pub technician: Option<String>,
    pub location: Option<String>,
    pub status: Option<BreedingStatus>,
    pub pregnancy_confirmed: Option<bool>,
    pub cost: Option<f64>,
    pub notes: Option<String>,
}

/// Summary cards for the breeding dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreedingStats {
    pub total: usize,
    pub by_status: BTreeMap<BreedingStatus, usize>,
    /// Completed breedings with a confirmed pregnancy, as a percentage of all
    /// concluded (completed or failed) breedings.
    pub success_rate: f64,
    pub total_cost: f64,
}

impl Record for BreedingRecord {
    type New = NewBreedingRecord;
    type Patch = UpdateBreedingRecord;
    type Status = BreedingStatus;
    type Quality = BreedingMethod;
    type Stats = BreedingStats;

    const ENTITY: &'static str = "breeding_record";
    const ID_PREFIX: &'static str = "BR";

    fn from_new(id: RecordId, input: NewBreedingRecord, now: Timestamp) -> Self {
        Self {
            id,
            mare_name: input.mare_name,
            stallion_name: input.stallion_name,
            breeding_date: input.breeding_date,
            method: input.method,
            technician: input.technician,
            location: input.location,
            status: input.status,
            pregnancy_confirmed: input.pregnancy_confirmed,
            cost: input.cost,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn apply_patch(&mut self, patch: UpdateBreedingRecord, now: Timestamp) {
        if let Some(v) = patch.mare_name {
            self.mare_name = v;
        }
        if let Some(v) = patch.stallion_name {
            self.stallion_name = v;
        }
        if let Some(v) = patch.breeding_date {
            self.breeding_date = v;
        }
        if let Some(v) = patch.method {
            self.method = v;
        }
        if let Some(v) = patch.technician {
            self.technician = v;
        }
        if let Some(v) = patch.location {
            self.location = v;
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
        if let Some(v) = patch.pregnancy_confirmed {
            self.pregnancy_confirmed = v;
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
            self.mare_name.as_str(),
            self.stallion_name.as_str(),
            self.technician.as_str(),
            self.location.as_str(),
        ]
    }

    fn status(&self) -> BreedingStatus {
        self.status
    }

    fn quality(&self) -> Option<BreedingMethod> {
        Some(self.method)
    }

    fn filter_date(&self) -> Option<Date> {
        Some(self.breeding_date)
    }

    fn summarize(records: &[Self], _today: Date, _config: &RanchConfig) -> BreedingStats {
        let mut by_status = BTreeMap::new();
        for r in records {
            *by_status.entry(r.status).or_insert(0) += 1;
        }
        let successes = records
            .iter()
            .filter(|r| r.status == BreedingStatus::Completed && r.pregnancy_confirmed)
            .count();
        let concluded = records
            .iter()
            .filter(|r| matches!(r.status, BreedingStatus::Completed | BreedingStatus::Failed))
            .count();

        BreedingStats {
            total: records.len(),
            by_status,
            success_rate: percentage(successes, concluded),
            total_cost: records.iter().filter_map(|r| r.cost).sum(),
        }
    }
}

impl BreedingStats {
    pub fn count(&self, status: BreedingStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;

    fn record(id: &str, status: BreedingStatus, confirmed: bool, cost: Option<f64>) -> BreedingRecord {
        BreedingRecord::from_new(
            id.to_string(),
            NewBreedingRecord {
                mare_name: "Bella".to_string(),
                stallion_name: "Thunder".to_string(),
                breeding_date: NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
                method: BreedingMethod::FrozenAi,
                technician: "Dr. Reyes".to_string(),
                location: "Barn A".to_string(),
                status,
                pregnancy_confirmed: confirmed,
                cost,
                notes: None,
            },
            Utc::now(),
        )
    }

    #[test]
    fn success_rate_counts_confirmed_completions_over_concluded() {
        let records = vec![
            record("a", BreedingStatus::Completed, true, Some(500.0)),
            record("b", BreedingStatus::Completed, false, None),
            record("c", BreedingStatus::Failed, false, Some(250.0)),
            record("d", BreedingStatus::Active, false, None),
        ];
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let stats = BreedingRecord::summarize(&records, today, &RanchConfig::default());
        assert_eq!(stats.total, 4);
        assert_eq!(stats.count(BreedingStatus::Completed), 2);
        assert_eq!(stats.count(BreedingStatus::Planned), 0);
        assert!((stats.success_rate - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.total_cost, 750.0);
    }

    #[test]
    fn success_rate_is_zero_without_concluded_breedings() {
        let records = vec![record("a", BreedingStatus::Planned, false, None)];
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let stats = BreedingRecord::summarize(&records, today, &RanchConfig::default());
        assert_eq!(stats.success_rate, 0.0);
    }

    #[test]
    fn patch_overwrites_only_present_fields() {
        let mut r = record("a", BreedingStatus::Active, false, Some(100.0));
        let created = r.created_at;
        r.apply_patch(
            UpdateBreedingRecord {
                status: Some(BreedingStatus::Completed),
                pregnancy_confirmed: Some(true),
                ..Default::default()
            },
            Utc::now(),
        );
        assert_eq!(r.status, BreedingStatus::Completed);
        assert!(r.pregnancy_confirmed);
        assert_eq!(r.cost, Some(100.0));
        assert_eq!(r.mare_name, "Bella");
        assert_eq!(r.created_at, created);
    }

    #[test]
    fn method_serialises_snake_case() {
        let json = serde_json::to_value(BreedingMethod::EmbryoTransfer).unwrap();
        assert_eq!(json, "embryo_transfer");
    }
}
