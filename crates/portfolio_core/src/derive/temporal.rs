//! Schedule arithmetic over calendar dates.
//!
//! # Invariants
//! - Dates carry no time-of-day, so day differences are exact integers.
//! - Working days are Monday through Friday; no holiday calendar applies.

use chrono::{Datelike, NaiveDate};

const DAYS_PER_WEEK: i64 = 7;
const WORKING_DAYS_PER_WEEK: i64 = 5;

/// Counts weekdays in `start..=end`.
///
/// Returns `None` when either date is missing and `Some(0)` when `start > end`.
pub fn working_days(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<i64> {
    let (start, end) = (start?, end?);
    if start > end {
        return Some(0);
    }

    let total_days = (end - start).num_days() + 1;
    let full_weeks = total_days / DAYS_PER_WEEK;
    let first_weekday = i64::from(start.weekday().num_days_from_monday());
    let trailing = (0..total_days % DAYS_PER_WEEK)
        .filter(|offset| (first_weekday + offset) % DAYS_PER_WEEK < WORKING_DAYS_PER_WEEK)
        .count() as i64;

    Some(full_weeks * WORKING_DAYS_PER_WEEK + trailing)
}

/// Signed whole days from `today` to `end`; negative means overdue.
pub fn days_remaining(end: Option<NaiveDate>, today: NaiveDate) -> Option<i64> {
    end.map(|end| (end - today).num_days())
}

/// Fraction of the scheduled calendar span already elapsed at `today`.
///
/// Unclamped: before `start` it is negative, after `end` it exceeds 1.
/// A zero-length or inverted schedule reports `1.0` once `today >= start`.
pub fn elapsed_fraction(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    today: NaiveDate,
) -> Option<f64> {
    let (start, end) = (start?, end?);
    let span = (end - start).num_days();
    if span <= 0 {
        return Some(if today >= start { 1.0 } else { 0.0 });
    }
    Some((today - start).num_days() as f64 / span as f64)
}
