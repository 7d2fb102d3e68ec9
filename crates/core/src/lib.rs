//! Ranch record management core.
//!
//! Owns the record types for breeding, pregnancy, heat-cycle, frozen
//! embryo/semen, collected semen, inventory and horse management, plus the
//! generic [`RecordCollection`] that filters, summarises and exports them.
//! This crate has no async or I/O dependencies; callers pass "today" in
//! wherever a result depends on the calendar.

pub mod actions;
pub mod collection;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod metrics;
pub mod record;
pub mod records;
pub mod types;

pub use collection::{Lookup, RecordCollection};
pub use config::RanchConfig;
pub use error::CoreError;
pub use export::ExportFormat;
pub use filter::{Criteria, DateRange, FilterCriteria};
pub use record::{Record, Ungraded};
