//! The filtered collection manager.
//!
//! A [`RecordCollection`] owns one growable list of records and the active
//! [`FilterCriteria`](crate::FilterCriteria). The filtered view is never
//! stored: it is recomputed from the base list on every call. Statistics are
//! always computed from the full base list, so changing filters changes what
//! is listed but never what is counted.

use std::collections::BTreeMap;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::config::RanchConfig;
use crate::error::CoreError;
use crate::export::{self, ExportFormat};
use crate::filter::{Criteria, FilterCriteria};
use crate::metrics;
use crate::record::Record;
use crate::types::{Date, RecordId};

/// Result of looking up a record for a detail view.
#[derive(Debug)]
pub enum Lookup<'a, R> {
    Found(&'a R),
    /// Rendered as an explicit "not found" state rather than raised.
    NotFound { entity: &'static str, id: RecordId },
}

impl<'a, R> Lookup<'a, R> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    /// Convert into a `Result` for callers that do want to propagate.
    pub fn into_result(self) -> Result<&'a R, CoreError> {
        match self {
            Lookup::Found(record) => Ok(record),
            Lookup::NotFound { entity, id } => Err(CoreError::NotFound { entity, id }),
        }
    }
}

/// Owned, single-writer collection of `R` plus its display filters.
#[derive(Debug, Clone)]
pub struct RecordCollection<R: Record> {
    records: Vec<R>,
    filters: Criteria<R>,
    config: RanchConfig,
}

impl<R: Record> Default for RecordCollection<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> RecordCollection<R> {
    pub fn new() -> Self {
        Self::with_config(RanchConfig::default())
    }

    pub fn with_config(config: RanchConfig) -> Self {
        Self {
            records: Vec::new(),
            filters: FilterCriteria::default(),
            config,
        }
    }

    /// Seed the collection. Later duplicates of an id already seen are dropped.
    pub fn with_records(records: impl IntoIterator<Item = R>) -> Self {
        let mut collection = Self::new();
        collection.extend(records);
        collection
    }

    /// Append existing records (e.g. loaded fixtures) in the given order,
    /// skipping any whose id is already present.
    pub fn extend(&mut self, records: impl IntoIterator<Item = R>) {
        for record in records {
            if self.get(record.id()).is_some() {
                tracing::warn!(entity = R::ENTITY, id = record.id(), "Skipping duplicate record id");
                continue;
            }
            self.records.push(record);
        }
    }

    pub fn config(&self) -> &RanchConfig {
        &self.config
    }

    /// The full, unfiltered list in iteration order.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // -----------------------------------------------------------------------
    // Filtering
    // -----------------------------------------------------------------------

    pub fn filters(&self) -> &Criteria<R> {
        &self.filters
    }

    /// Replace the active criteria wholesale.
    pub fn set_filters(&mut self, criteria: Criteria<R>) {
        self.filters = criteria;
    }

    pub fn clear_filters(&mut self) {
        self.filters = FilterCriteria::default();
    }

    /// Records satisfying the active criteria, in collection order.
    pub fn filtered(&self) -> Vec<&R> {
        self.records
            .iter()
            .filter(|r| self.filters.matches(*r))
            .collect()
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    pub fn get(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn lookup(&self, id: &str) -> Lookup<'_, R> {
        match self.get(id) {
            Some(record) => Lookup::Found(record),
            None => Lookup::NotFound {
                entity: R::ENTITY,
                id: id.to_string(),
            },
        }
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Create a record from `input`, assign a fresh id and prepend it.
    pub fn add(&mut self, input: R::New) -> &R {
        let id = self.fresh_id();
        let record = R::from_new(id, input, Utc::now());
        tracing::debug!(entity = R::ENTITY, id = record.id(), "Record added");
        self.records.insert(0, record);
        &self.records[0]
    }

    /// Form-submission path: validate `input`, then [`add`](Self::add) it.
    pub fn submit(&mut self, input: R::New) -> Result<RecordId, CoreError> {
        input
            .validate()
            .map_err(|errors| CoreError::from_validation(R::ENTITY, &errors))?;
        Ok(self.add(input).id().to_string())
    }

    /// Merge `patch` onto the record with `id`.
    ///
    /// Returns `false` and leaves the collection untouched when no record
    /// has that id.
    pub fn update(&mut self, id: &str, patch: R::Patch) -> bool {
        let Some(record) = self.records.iter_mut().find(|r| r.id() == id) else {
            tracing::debug!(entity = R::ENTITY, id, "Update ignored: no such record");
            return false;
        };
        record.apply_patch(patch, Utc::now());
        tracing::debug!(entity = R::ENTITY, id, "Record updated");
        true
    }

    /// Delete the record with `id`. Returns whether one was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        let removed = self.records.len() != before;
        tracing::debug!(entity = R::ENTITY, id, removed, "Record remove requested");
        removed
    }

    fn fresh_id(&self) -> RecordId {
        loop {
            let id = format!("{}-{}", R::ID_PREFIX, Uuid::now_v7());
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Derived views
    // -----------------------------------------------------------------------

    /// Count of records per status over the full collection.
    pub fn status_counts(&self) -> BTreeMap<R::Status, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.status()).or_insert(0) += 1;
        }
        counts
    }

    /// Summary statistics as of today.
    pub fn stats(&self) -> R::Stats {
        self.stats_as_of(metrics::today())
    }

    /// Summary statistics over the full collection as of `today`.
    pub fn stats_as_of(&self, today: Date) -> R::Stats {
        R::summarize(&self.records, today, &self.config)
    }

    /// Serialise the filtered view.
    pub fn export(&self, format: ExportFormat) -> Result<String, CoreError> {
        let rows = self.filtered();
        let output = export::render(&rows, format)?;
        tracing::info!(
            entity = R::ENTITY,
            format = format.as_str(),
            rows = rows.len(),
            bytes = output.len(),
            "Exported records"
        );
        Ok(output)
    }

    /// Serialise the filtered view in the configured default format.
    pub fn export_default(&self) -> Result<String, CoreError> {
        self.export(self.config.export_format)
    }
}
