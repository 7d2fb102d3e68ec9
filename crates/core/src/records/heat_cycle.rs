//! Heat (estrous) cycle observations per mare.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::config::RanchConfig;
use crate::metrics;
use crate::record::{Record, Ungraded};
use crate::types::{Date, RecordId, Timestamp};

crate::define_record_enum! {
    HeatStatus {
        InHeat => "in_heat",
        Ovulated => "ovulated",
        Bred => "bred",
        Diestrus => "diestrus",
        Missed => "missed",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatCycleRecord {
    pub id: RecordId,
    pub mare_name: String,
    pub cycle_start: Date,
    pub ovulation_date: Option<Date>,
    /// Dominant follicle diameter at last scan.
    pub follicle_size_mm: Option<f64>,
    pub status: HeatStatus,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewHeatCycle {
    #[validate(length(min = 1, message = "Mare name is required"))]
    pub mare_name: String,
    pub cycle_start: Date,
    pub ovulation_date: Option<Date>,
    #[validate(range(min = 0.0, max = 80.0, message = "Follicle size must be between 0 and 80 mm"))]
    pub follicle_size_mm: Option<f64>,
    pub status: HeatStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateHeatCycle {
    pub mare_name: Option<String>,
    pub cycle_start: Option<Date>,
    pub ovulation_date: Option<Date>,
    pub follicle_size_mm: Option<f64>,
    pub status: Option<HeatStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatCycleStats {
    pub total: usize,
    pub by_status: BTreeMap<HeatStatus, usize>,
    /// Distinct mares with a cycle currently marked in heat.
    pub mares_in_heat: usize,
}

impl HeatCycleRecord {
    /// 1-based day of this cycle, `None` before it starts.
    pub fn cycle_day(&self, today: Date) -> Option<i64> {
        metrics::cycle_day(self.cycle_start, today)
    }

    pub fn next_expected_heat(&self, cycle_days: u32) -> Date {
        metrics::next_heat_date(self.cycle_start, cycle_days)
    }
}

impl Record for HeatCycleRecord {
    type New = NewHeatCycle;
    type Patch = UpdateHeatCycle;
    type Status = HeatStatus;
    type Quality = Ungraded;
    type Stats = HeatCycleStats;

    const ENTITY: &'static str = "heat_cycle";
    const ID_PREFIX: &'static str = "HC";

    fn from_new(id: RecordId, input: NewHeatCycle, now: Timestamp) -> Self {
        Self {
            id,
            mare_name: input.mare_name,
            cycle_start: input.cycle_start,
            ovulation_date: input.ovulation_date,
            follicle_size_mm: input.follicle_size_mm,
            status: input.status,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn apply_patch(&mut self, patch: UpdateHeatCycle, now: Timestamp) {
        if let Some(v) = patch.mare_name {
            self.mare_name = v;
        }
        if let Some(v) = patch.cycle_start {
            self.cycle_start = v;
        }
        if patch.ovulation_date.is_some() {
            self.ovulation_date = patch.ovulation_date;
        }
        if patch.follicle_size_mm.is_some() {
            self.follicle_size_mm = patch.follicle_size_mm;
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
        vec![self.id.as_str(), self.mare_name.as_str()]
    }

    fn status(&self) -> HeatStatus {
        self.status
    }

    fn filter_date(&self) -> Option<Date> {
        Some(self.cycle_start)
    }

    fn summarize(records: &[Self], _today: Date, _config: &RanchConfig) -> HeatCycleStats {
        let mut by_status = BTreeMap::new();
        for r in records {
            *by_status.entry(r.status).or_insert(0) += 1;
        }
        let mares_in_heat: BTreeSet<&str> = records
            .iter()
            .filter(|r| r.status == HeatStatus::InHeat)
            .map(|r| r.mare_name.as_str())
            .collect();

        HeatCycleStats {
            total: records.len(),
            by_status,
            mares_in_heat: mares_in_heat.len(),
        }
    }
}
