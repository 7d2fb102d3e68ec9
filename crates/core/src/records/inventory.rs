//! Pharmacy and general ranch inventory, including paddock soil amendments.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::push_opt;
use crate::config::RanchConfig;
use crate::metrics::{self, days_until};
use crate::record::Record;
use crate::types::{Date, RecordId, Timestamp};

crate::define_record_enum! {
    InventoryCategory {
        Medication => "medication",
        Vaccine => "vaccine",
        Supplement => "supplement",
        Equipment => "equipment",
        Feed => "feed",
        Supplies => "supplies",
        SoilAmendment => "soil_amendment",
    }
}

crate::define_record_enum! {
    /// Derived from expiry and quantity against the reorder level; never
    /// stored. `Expired` takes precedence over the quantity states.
    StockStatus {
        InStock => "in_stock",
        LowStock => "low_stock",
        OutOfStock => "out_of_stock",
        Expired => "expired",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: RecordId,
    pub name: String,
    pub category: InventoryCategory,
    pub quantity: f64,
    /// Unit of measure, e.g. "ml", "dose", "bag".
    pub unit: String,
    pub reorder_level: f64,
    pub unit_cost: Option<f64>,
    pub supplier: String,
    pub location: String,
    pub batch_number: Option<String>,
    pub expiry_date: Option<Date>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewInventoryItem {
    #[validate(length(min = 1, message = "Item name is required"))]
    pub name: String,
    pub category: InventoryCategory,
    #[validate(range(min = 0.0, message = "Quantity cannot be negative"))]
    pub quantity: f64,
    #[validate(length(min = 1, message = "Unit is required"))]
    pub unit: String,
    #[validate(range(min = 0.0, message = "Reorder level cannot be negative"))]
    pub reorder_level: f64,
    #[validate(range(min = 0.0, message = "Unit cost cannot be negative"))]
    pub unit_cost: Option<f64>,
    pub supplier: String,
    pub location: String,
    pub batch_number: Option<String>,
    pub expiry_date: Option<Date>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateInventoryItem {
    pub name: Option<String>,
    pub category: Option<InventoryCategory>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub reorder_level: Option<f64>,
    pub unit_cost: Option<f64>,
    pub supplier: Option<String>,
    pub location: Option<String>,
    pub batch_number: Option<String>,
    pub expiry_date: Option<Date>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryStats {
    pub total: usize,
    pub by_stock_status: BTreeMap<StockStatus, usize>,
    pub by_category: BTreeMap<InventoryCategory, usize>,
    /// Sum of quantity × unit cost over items with a known cost.
    pub total_value: f64,
    pub expired: usize,
    /// Not yet expired but expiring within the configured warning window.
    pub expiring_soon: usize,
}

impl InventoryItem {
    /// Stock status as of today.
    pub fn stock_status(&self) -> StockStatus {
        self.stock_status_as_of(metrics::today())
    }

    pub fn stock_status_as_of(&self, today: Date) -> StockStatus {
        if self.is_expired(today) {
            StockStatus::Expired
        } else if self.quantity <= 0.0 {
            StockStatus::OutOfStock
        } else if self.quantity <= self.reorder_level {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    pub fn is_expired(&self, today: Date) -> bool {
        self.expiry_date.is_some_and(|e| e < today)
    }

    pub fn expires_within(&self, today: Date, days: u32) -> bool {
        self.expiry_date
            .is_some_and(|e| (0..=i64::from(days)).contains(&days_until(e, today)))
    }

    pub fn value(&self) -> Option<f64> {
        self.unit_cost.map(|c| c * self.quantity)
    }
}

impl Record for InventoryItem {
    type New = NewInventoryItem;
    type Patch = UpdateInventoryItem;
    type Status = StockStatus;
    type Quality = InventoryCategory;
    type Stats = InventoryStats;

    const ENTITY: &'static str = "inventory_item";
    const ID_PREFIX: &'static str = "INV";

    fn from_new(id: RecordId, input: NewInventoryItem, now: Timestamp) -> Self {
        Self {
            id,
            name: input.name,
            category: input.category,
            quantity: input.quantity,
            unit: input.unit,
            reorder_level: input.reorder_level,
            unit_cost: input.unit_cost,
            supplier: input.supplier,
            location: input.location,
            batch_number: input.batch_number,
            expiry_date: input.expiry_date,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn apply_patch(&mut self, patch: UpdateInventoryItem, now: Timestamp) {
        if let Some(v) = patch.name {
            self.name = v;
        }
        if let Some(v) = patch.category {
            self.category = v;
        }
        if let Some(v) = patch.quantity {
            self.quantity = v;
        }
        if let Some(v) = patch.unit {
            self.unit = v;
        }
        if let Some(v) = patch.reorder_level {
            self.reorder_level = v;
        }
        if patch.unit_cost.is_some() {
            self.unit_cost = patch.unit_cost;
        }
        if let Some(v) = patch.supplier {
            self.supplier = v;
        }
        if let Some(v) = patch.location {
            self.location = v;
        }
        if patch.batch_number.is_some() {
            self.batch_number = patch.batch_number;
        }
        if patch.expiry_date.is_some() {
            self.expiry_date = patch.expiry_date;
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
            self.supplier.as_str(),
            self.location.as_str(),
        ];
        push_opt(&mut fields, &self.batch_number);
        fields
    }

    fn status(&self) -> StockStatus {
        self.stock_status()
    }

    fn quality(&self) -> Option<InventoryCategory> {
        Some(self.category)
    }

    fn filter_date(&self) -> Option<Date> {
        self.expiry_date
    }

    fn summarize(records: &[Self], today: Date, config: &RanchConfig) -> InventoryStats {
        let mut by_stock_status = BTreeMap::new();
        let mut by_category = BTreeMap::new();
        for r in records {
            *by_stock_status.entry(r.stock_status_as_of(today)).or_insert(0) += 1;
            *by_category.entry(r.category).or_insert(0) += 1;
        }
        InventoryStats {
            total: records.len(),
            by_stock_status,
            by_category,
            total_value: records.iter().filter_map(InventoryItem::value).sum(),
            expired: records.iter().filter(|r| r.is_expired(today)).count(),
            expiring_soon: records
                .iter()
                .filter(|r| r.expires_within(today, config.expiry_warning_days))
                .count(),
        }
    }
}
