//! Value-to-string normalization for dashboard panels.
//!
//! # Invariants
//! - Functions are total: absent or non-finite input yields a fixed placeholder.
//! - Rounding is half-away-from-zero (`f64::round`) everywhere.

use chrono::NaiveDate;

/// Placeholder shown for absent dates and effort.
pub const EMPTY_PLACEHOLDER: &str = "—";
pub const HOURS_PER_MAN_DAY: f64 = 8.0;

const MILLION: f64 = 1_000_000.0;
const THOUSAND: f64 = 1_000.0;

/// Formats an amount as `$X.YM`, `$XK` or `$X`.
///
/// The sign travels with the scaled value, so `-1500` renders as `$-2K`.
pub fn format_currency_compact(amount: Option<f64>) -> String {
    let Some(amount) = finite(amount) else {
        return "$0".to_string();
    };

    let magnitude = amount.abs();
    if magnitude >= MILLION {
        format!("${:.1}M", round_to_tenths(amount / MILLION))
    } else if magnitude >= THOUSAND {
        format!("${}K", (amount / THOUSAND).round() as i64)
    } else {
        format!("${}", amount.round() as i64)
    }
}

/// Formats an amount as en-US currency without fraction digits (`$1,234,567`).
pub fn format_currency_full(amount: Option<f64>) -> String {
    let Some(amount) = finite(amount) else {
        return "$0".to_string();
    };

    let rounded = amount.round();
    let digits = group_thousands(rounded.abs() as u64);
    if rounded < 0.0 {
        format!("-${digits}")
    } else {
        format!("${digits}")
    }
}

/// Formats a percentage with one decimal (`42.5%`); absent or NaN gives `0%`.
pub fn format_percent(value: Option<f64>) -> String {
    match finite(value) {
        // `+ 0.0` folds negative zero so `-0.04` prints as `0.0%`.
        Some(value) => format!("{:.1}%", round_to_tenths(value) + 0.0),
        None => "0%".to_string(),
    }
}

/// Formats a date as `Jan 6, 2025`.
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => EMPTY_PLACEHOLDER.to_string(),
    }
}

/// Formats estimated hours as `N man-days`.
pub fn format_effort(hours: Option<f64>) -> String {
    match man_days(hours) {
        Some(days) => format!("{days} man-days"),
        None => EMPTY_PLACEHOLDER.to_string(),
    }
}

/// Converts hours to whole man-days; `None` for absent, zero or negative input.
pub fn man_days(hours: Option<f64>) -> Option<i64> {
    finite(hours)
        .filter(|value| *value > 0.0)
        .map(|value| (value / HOURS_PER_MAN_DAY).round() as i64)
}

/// Rounds half-away-from-zero to one decimal place.
pub fn round_to_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|value| value.is_finite())
}

fn group_thousands(value: u64) -> String {
    let raw = value.to_string();
    let mut grouped = String::with_capacity(raw.len() + raw.len() / 3);
    for (index, digit) in raw.chars().enumerate() {
        if index > 0 && (raw.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::{group_thousands, man_days, round_to_tenths};

    #[test]
    fn group_thousands_inserts_commas() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn round_to_tenths_is_half_away_from_zero() {
        assert_eq!(round_to_tenths(2.25), 2.3);
        assert_eq!(round_to_tenths(-2.25), -2.3);
        assert_eq!(round_to_tenths(120.0), 120.0);
    }

    #[test]
    fn man_days_rejects_empty_effort() {
        assert_eq!(man_days(None), None);
        assert_eq!(man_days(Some(0.0)), None);
        assert_eq!(man_days(Some(f64::NAN)), None);
        assert_eq!(man_days(Some(12.0)), Some(2));
    }
}
