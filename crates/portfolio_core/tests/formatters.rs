use chrono::NaiveDate;
use portfolio_core::{
    format_currency_compact, format_currency_full, format_date, format_effort, format_percent,
};

#[test]
fn currency_compact_boundaries() {
    assert_eq!(format_currency_compact(Some(999.0)), "$999");
    assert_eq!(format_currency_compact(Some(1_000.0)), "$1K");
    assert_eq!(format_currency_compact(Some(999_999.0)), "$1000K");
    assert_eq!(format_currency_compact(Some(1_000_000.0)), "$1.0M");
    assert_eq!(format_currency_compact(None), "$0");
}

#[test]
fn currency_compact_rounds_and_keeps_sign_on_scaled_value() {
    assert_eq!(format_currency_compact(Some(120_000.0)), "$120K");
    assert_eq!(format_currency_compact(Some(1_500.0)), "$2K");
    assert_eq!(format_currency_compact(Some(2_450_000.0)), "$2.5M");
    assert_eq!(format_currency_compact(Some(999.5)), "$1000");
    assert_eq!(format_currency_compact(Some(-1_500.0)), "$-2K");
    assert_eq!(format_currency_compact(Some(-3_200_000.0)), "$-3.2M");
    assert_eq!(format_currency_compact(Some(f64::NAN)), "$0");
}

#[test]
fn currency_full_uses_us_grouping_without_fraction() {
    assert_eq!(format_currency_full(Some(1_234_567.89)), "$1,234,568");
    assert_eq!(format_currency_full(Some(100_000.0)), "$100,000");
    assert_eq!(format_currency_full(Some(42.4)), "$42");
    assert_eq!(format_currency_full(Some(-1_250.0)), "-$1,250");
    assert_eq!(format_currency_full(None), "$0");
}

#[test]
fn percent_has_one_decimal() {
    assert_eq!(format_percent(Some(40.0)), "40.0%");
    assert_eq!(format_percent(Some(33.333)), "33.3%");
    assert_eq!(format_percent(Some(120.0)), "120.0%");
    assert_eq!(format_percent(Some(-0.04)), "0.0%");
    assert_eq!(format_percent(Some(f64::NAN)), "0%");
    assert_eq!(format_percent(None), "0%");
}

#[test]
fn date_uses_short_month_and_unpadded_day() {
    let date = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
    assert_eq!(format_date(Some(date)), "Jan 6, 2025");
    let date = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
    assert_eq!(format_date(Some(date)), "Dec 25, 2024");
    assert_eq!(format_date(None), "—");
}

#[test]
fn effort_is_rounded_man_days() {
    assert_eq!(format_effort(Some(80.0)), "10 man-days");
    assert_eq!(format_effort(Some(12.0)), "2 man-days");
    assert_eq!(format_effort(Some(11.9)), "1 man-days");
    assert_eq!(format_effort(Some(0.0)), "—");
    assert_eq!(format_effort(None), "—");
}
