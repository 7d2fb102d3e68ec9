//! Horses on the ranch: mares, stallions and geldings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::push_opt;
use crate::config::RanchConfig;
use crate::metrics::{age_in_years, mean};
use crate::record::Record;
use crate::types::{Date, RecordId, Timestamp};

crate::define_record_enum! {
    HorseSex {
        Mare => "mare",
        Stallion => "stallion",
        Gelding => "gelding",
    }
}

crate::define_record_enum! {
    HorseStatus {
        Active => "active",
        Retired => "retired",
        Sold => "sold",
        Deceased => "deceased",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Horse {
    pub id: RecordId,
    pub name: String,
    pub registration_number: Option<String>,
    pub breed: String,
    pub color: String,
    pub sex: HorseSex,
    pub date_of_birth: Date,
    /// Only meaningful for geldings.
    pub castration_date: Option<Date>,
    pub owner: String,
    pub location: String,
    pub status: HorseStatus,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewHorse {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    pub registration_number: Option<String>,
    #[validate(length(min = 1, message = "Breed is required"))]
    pub breed: String,
    pub color: String,
    pub sex: HorseSex,
    pub date_of_birth: Date,
    pub castration_date: Option<Date>,
    pub owner: String,
    pub location: String,
    pub status: HorseStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateHorse {
    pub name: Option<String>,
    pub registration_number: Option<String>,
    pub breed: Option<String>,
    pub color: Option<String>,
    pub sex: Option<HorseSex>,
    pub date_of_birth: Option<Date>,
    pub castration_date: Option<Date>,
    pub owner: Option<String>,
    pub location: Option<String>,
    pub status: Option<HorseStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HorseStats {
    pub total: usize,
    pub by_status: BTreeMap<HorseStatus, usize>,
    pub by_sex: BTreeMap<HorseSex, usize>,
    /// Mean age in completed years of horses not marked deceased.
    pub average_age_years: Option<f64>,
}

impl Horse {
    pub fn age(&self, today: Date) -> u32 {
        age_in_years(self.date_of_birth, today)
    }
}

impl Record for Horse {
    type New = NewHorse;
    type Patch = UpdateHorse;
    type Status = HorseStatus;
    type Quality = HorseSex;
    type Stats = HorseStats;

    const ENTITY: &'static str = "horse";
    const ID_PREFIX: &'static str = "HR";

    fn from_new(id: RecordId, input: NewHorse, now: Timestamp) -> Self {
        Self {
            id,
            name: input.name,
            registration_number: input.registration_number,
            breed: input.breed,
            color: input.color,
            sex: input.sex,
            date_of_birth: input.date_of_birth,
            castration_date: input.castration_date,
            owner: input.owner,
            location: input.location,
            status: input.status,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn apply_patch(&mut self, patch: UpdateHorse, now: Timestamp) {
        if let Some(v) = patch.name {
            self.name = v;
        }
        if patch.registration_number.is_some() {
            self.registration_number = patch.registration_number;
        }
        if let Some(v) = patch.breed {
            self.breed = v;
        }
        if let Some(v) = patch.color {
            self.color = v;
        }
        if let Some(v) = patch.sex {
            self.sex = v;
        }
        if let Some(v) = patch.date_of_birth {
            self.date_of_birth = v;
        }
        if patch.castration_date.is_some() {
            self.castration_date = patch.castration_date;
        }
        if let Some(v) = patch.owner {
            self.owner = v;
        }
        if let Some(v) = patch.location {
            self.location = v;
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
        let mut fields = vec![
            self.id.as_str(),
            self.name.as_str(),
            self.breed.as_str(),
            self.owner.as_str(),
            self.location.as_str(),
        ];
        push_opt(&mut fields, &self.registration_number);
        fields
    }

    fn status(&self) -> HorseStatus {
        self.status
    }

    fn quality(&self) -> Option<HorseSex> {
        Some(self.sex)
    }

    fn filter_date(&self) -> Option<Date> {
        Some(self.date_of_birth)
    }

    fn summarize(records: &[Self], today: Date, _config: &RanchConfig) -> HorseStats {
        let mut by_status = BTreeMap::new();
        let mut by_sex = BTreeMap::new();
        for r in records {
            *by_status.entry(r.status).or_insert(0) += 1;
            *by_sex.entry(r.sex).or_insert(0) += 1;
        }
        HorseStats {
            total: records.len(),
            by_status,
            by_sex,
            average_age_years: mean(
                records
                    .iter()
                    .filter(|r| r.status != HorseStatus::Deceased)
                    .map(|r| f64::from(r.age(today))),
            ),
        }
    }
}
