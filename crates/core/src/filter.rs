//! Filter criteria applied to a collection for display.
//!
//! Criteria combine conjunctively: a record is shown only when it satisfies
//! the search term, the status allow-list, the quality allow-list and the
//! date range. An absent or empty constraint never restricts.

use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::types::Date;

/// Criteria shaped for record type `R`.
pub type Criteria<R> = FilterCriteria<<R as Record>::Status, <R as Record>::Quality>;

/// Inclusive date range. Either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<Date>,
    pub end: Option<Date>,
}

impl DateRange {
    pub fn new(start: Option<Date>, end: Option<Date>) -> Self {
        Self { start, end }
    }

    /// Whether `date` lies within `[start, end]`.
    pub fn contains(&self, date: Date) -> bool {
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
    }

    fn is_open(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// Active search, status, quality and date constraints.
///
/// Replaced wholesale by [`RecordCollection::set_filters`](crate::RecordCollection::set_filters);
/// there is no partial patching of criteria.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria<S, Q> {
    #[serde(default)]
    pub search_term: Option<String>,
    #[serde(default = "Vec::new")]
    pub status: Vec<S>,
    #[serde(default = "Vec::new")]
    pub quality: Vec<Q>,
    #[serde(default)]
    pub date_range: Option<DateRange>,
}

impl<S, Q> Default for FilterCriteria<S, Q> {
    fn default() -> Self {
        Self {
            search_term: None,
            status: Vec::new(),
            quality: Vec::new(),
            date_range: None,
        }
    }
}

impl<S, Q> FilterCriteria<S, Q> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn status(mut self, allowed: impl IntoIterator<Item = S>) -> Self {
        self.status = allowed.into_iter().collect();
        self
    }

    pub fn quality(mut self, allowed: impl IntoIterator<Item = Q>) -> Self {
        self.quality = allowed.into_iter().collect();
        self
    }

    pub fn between(mut self, start: Option<Date>, end: Option<Date>) -> Self {
        self.date_range = Some(DateRange::new(start, end));
        self
    }

    /// True when no constraint is active.
    pub fn is_empty(&self) -> bool {
        normalized_term(self.search_term.as_deref()).is_none()
            && self.status.is_empty()
            && self.quality.is_empty()
            && self.date_range.map_or(true, |r| r.is_open())
    }
}

impl<S: PartialEq, Q: PartialEq> FilterCriteria<S, Q> {
    /// Evaluate every constraint against `record`.
    pub fn matches<R>(&self, record: &R) -> bool
    where
        R: Record<Status = S, Quality = Q>,
    {
        self.matches_search(record)
            && self.matches_status(record)
            && self.matches_quality(record)
            && self.matches_date(record)
    }

    fn matches_search<R>(&self, record: &R) -> bool
    where
        R: Record<Status = S, Quality = Q>,
    {
        let Some(needle) = normalized_term(self.search_term.as_deref()) else {
            return true;
        };
        record
            .searchable_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    fn matches_status<R>(&self, record: &R) -> bool
    where
        R: Record<Status = S, Quality = Q>,
    {
        self.status.is_empty() || self.status.contains(&record.status())
    }

    fn matches_quality<R>(&self, record: &R) -> bool
    where
        R: Record<Status = S, Quality = Q>,
    {
        if self.quality.is_empty() {
            return true;
        }
        record
            .quality()
            .is_some_and(|q| self.quality.contains(&q))
    }

    fn matches_date<R>(&self, record: &R) -> bool
    where
        R: Record<Status = S, Quality = Q>,
    {
        match self.date_range {
            None => true,
            Some(range) if range.is_open() => true,
            Some(range) => record.filter_date().is_some_and(|d| range.contains(d)),
        }
    }
}

/// Trim and lowercase a search term; blank terms impose no restriction.
fn normalized_term(term: Option<&str>) -> Option<String> {
    let trimmed = term?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}
