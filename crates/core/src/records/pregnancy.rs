//! Pregnancy tracking from confirmation to foaling.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::config::RanchConfig;
use crate::metrics::{self, mean};
use crate::record::{Record, Ungraded};
use crate::types::{Date, RecordId, Timestamp};

/// Active pregnancies due within this many days are highlighted.
pub const DUE_SOON_DAYS: i64 = 30;

crate::define_record_enum! {
    PregnancyStatus {
        Confirmed => "confirmed",
        Monitoring => "monitoring",
        HighRisk => "high_risk",
        Foaled => "foaled",
        Lost => "lost",
    }
}

impl PregnancyStatus {
    /// Whether the mare is still carrying.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            PregnancyStatus::Confirmed | PregnancyStatus::Monitoring | PregnancyStatus::HighRisk
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PregnancyRecord {
    pub id: RecordId,
    pub mare_name: String,
    pub stallion_name: String,
    pub breeding_date: Date,
    pub due_date: Date,
    pub veterinarian: String,
    pub status: PregnancyStatus,
    pub last_check_date: Option<Date>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a confirmed pregnancy.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_pregnancy_dates"))]
pub struct NewPregnancy {
    #[validate(length(min = 1, message = "Mare name is required"))]
    pub mare_name: String,
    #[validate(length(min = 1, message = "Stallion name is required"))]
    pub stallion_name: String,
    pub breeding_date: Date,
    pub due_date: Date,
    pub veterinarian: String,
    pub status: PregnancyStatus,
    pub last_check_date: Option<Date>,
    pub notes: Option<String>,
}

fn validate_pregnancy_dates(input: &NewPregnancy) -> Result<(), ValidationError> {
    if input.due_date <= input.breeding_date {
        let mut err = ValidationError::new("due_date_order");
        err.message = Some("Due date must be after the breeding date".into());
        return Err(err);
    }
    Ok(())
}

/// DTO for updating a pregnancy. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePregnancy {
    pub mare_name: Option<String>,
    pub stallion_name: Option<String>,
    pub breeding_date: Option<Date>,
    pub due_date: Option<Date>,
    pub veterinarian: Option<String>,
    pub status: Option<PregnancyStatus>,
    pub last_check_date: Option<Date>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PregnancyStats {
    pub total: usize,
    pub by_status: BTreeMap<PregnancyStatus, usize>,
    pub active: usize,
    /// Active pregnancies due between today and [`DUE_SOON_DAYS`] from now.
    pub due_soon: usize,
    /// Mean gestation progress of active pregnancies, in percent.
    pub average_progress: Option<f64>,
}

impl PregnancyRecord {
    pub fn gestation_day(&self, today: Date) -> i64 {
        metrics::gestation_day(self.breeding_date, today)
    }

    pub fn progress(&self, today: Date, gestation_days: u32) -> f64 {
        metrics::gestation_progress(self.breeding_date, today, gestation_days)
    }

    pub fn days_remaining(&self, today: Date) -> i64 {
        metrics::days_until(self.due_date, today)
    }

    pub fn is_overdue(&self, today: Date) -> bool {
        self.status.is_active() && self.days_remaining(today) < 0
    }
}

impl Record for PregnancyRecord {
    type New = NewPregnancy;
    type Patch = UpdatePregnancy;
    type Status = PregnancyStatus;
    type Quality = Ungraded;
    type Stats = PregnancyStats;

    const ENTITY: &'static str = "pregnancy";
    const ID_PREFIX: &'static str = "PG";

    fn from_new(id: RecordId, input: NewPregnancy, now: Timestamp) -> Self {
        Self {
            id,
            mare_name: input.mare_name,
            stallion_name: input.stallion_name,
            breeding_date: input.breeding_date,
            due_date: input.due_date,
            veterinarian: input.veterinarian,
            status: input.status,
            last_check_date: input.last_check_date,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn apply_patch(&mut self, patch: UpdatePregnancy, now: Timestamp) {
        if let Some(v) = patch.mare_name {
            self.mare_name = v;
        }
        if let Some(v) = patch.stallion_name {
            self.stallion_name = v;
        }
        if let Some(v) = patch.breeding_date {
            self.breeding_date = v;
        }
        if let Some(v) = patch.due_date {
            self.due_date = v;
        }
        if let Some(v) = patch.veterinarian {
            self.veterinarian = v;
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
        if patch.last_check_date.is_some() {
            self.last_check_date = patch.last_check_date;
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
            self.veterinarian.as_str(),
        ]
    }

    fn status(&self) -> PregnancyStatus {
        self.status
    }

    fn filter_date(&self) -> Option<Date> {
        Some(self.due_date)
    }

    fn summarize(records: &[Self], today: Date, config: &RanchConfig) -> PregnancyStats {
        let mut by_status = BTreeMap::new();
        for r in records {
            *by_status.entry(r.status).or_insert(0) += 1;
        }
        let active: Vec<&PregnancyRecord> = records.iter().filter(|r| r.status.is_active()).collect();
        let due_soon = active
            .iter()
            .filter(|r| (0..=DUE_SOON_DAYS).contains(&r.days_remaining(today)))
            .count();

        PregnancyStats {
            total: records.len(),
            by_status,
            active: active.len(),
            due_soon,
            average_progress: mean(active.iter().map(|r| r.progress(today, config.gestation_days))),
        }
    }
}
