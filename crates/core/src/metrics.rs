//! Presentation-only day counts derived from stored dates.
//!
//! Every function is pure: "now" or "today" is an argument. Day counts use
//! calendar-day truncation, i.e. the floor of elapsed milliseconds divided
//! by [`MS_PER_DAY`].

use chrono::{Datelike, Duration, Utc};

use crate::types::{Date, Timestamp};

/// Milliseconds in one calendar day.
pub const MS_PER_DAY: i64 = 86_400_000;

/// Today's date in UTC.
pub fn today() -> Date {
    Utc::now().date_naive()
}

/// Whole days elapsed from `from` to `to`, floored. Negative if `to` is earlier.
pub fn elapsed_days(from: Timestamp, to: Timestamp) -> i64 {
    (to - from).num_milliseconds().div_euclid(MS_PER_DAY)
}

/// Whole days from `from` to `to` (both taken at midnight).
pub fn days_between_dates(from: Date, to: Date) -> i64 {
    (to - from).num_days()
}

// ---------------------------------------------------------------------------
// Pregnancy
// ---------------------------------------------------------------------------

/// Days since breeding. Zero on the breeding day itself.
pub fn gestation_day(breeding_date: Date, today: Date) -> i64 {
    days_between_dates(breeding_date, today)
}

/// Gestation progress as a percentage in `[0, 100]`.
///
/// Elapsed days are clamped to `gestation_days` before dividing, so an
/// overdue pregnancy reports exactly 100.
pub fn gestation_progress(breeding_date: Date, today: Date, gestation_days: u32) -> f64 {
    if gestation_days == 0 {
        return 100.0;
    }
    let total = i64::from(gestation_days);
    let elapsed = gestation_day(breeding_date, today).clamp(0, total);
    (elapsed as f64 / total as f64 * 100.0).min(100.0)
}

/// Days from `today` to `due_date`. Negative once overdue.
pub fn days_until(due_date: Date, today: Date) -> i64 {
    days_between_dates(today, due_date)
}

/// Breeding date plus the configured gestation length.
pub fn estimated_due_date(breeding_date: Date, gestation_days: u32) -> Date {
    breeding_date + Duration::days(i64::from(gestation_days))
}

// ---------------------------------------------------------------------------
// Heat cycle
// ---------------------------------------------------------------------------

/// 1-based day within the current cycle; the start date is day 1.
///
/// Returns `None` when `today` precedes `cycle_start`.
pub fn cycle_day(cycle_start: Date, today: Date) -> Option<i64> {
    let elapsed = days_between_dates(cycle_start, today);
    (elapsed >= 0).then_some(elapsed + 1)
}

/// Predicted start of the next heat.
pub fn next_heat_date(cycle_start: Date, cycle_days: u32) -> Date {
    cycle_start + Duration::days(i64::from(cycle_days))
}

// ---------------------------------------------------------------------------
// Age
// ---------------------------------------------------------------------------

/// Completed years between `date_of_birth` and `today`. Never negative.
pub fn age_in_years(date_of_birth: Date, today: Date) -> u32 {
    if today <= date_of_birth {
        return 0;
    }
    let mut years = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        years -= 1;
    }
    u32::try_from(years).unwrap_or(0)
}

/// Percentage of `part` over `whole`, zero when `whole` is zero.
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Arithmetic mean, `None` for an empty input.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}
