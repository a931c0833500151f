// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use debtmeter::engine::error::EngineError;
use debtmeter::engine::period::{Month, MonthWindow, is_within, month_gap, months_between};

#[test]
fn months_between_counts_whole_calendar_months() {
    let a = Month::new(2025, 3).unwrap();
    let b = Month::new(2025, 8).unwrap();
    assert_eq!(months_between(a, b).unwrap(), 5);
    assert_eq!(months_between(a, a).unwrap(), 0);
    assert_eq!(
        months_between(Month::new(2024, 11).unwrap(), Month::new(2025, 2).unwrap()).unwrap(),
        3
    );
}

#[test]
fn reversed_range_is_rejected() {
    let a = Month::new(2025, 8).unwrap();
    let b = Month::new(2025, 3).unwrap();
    let err = months_between(a, b).unwrap_err();
    assert!(matches!(err, EngineError::InvalidRange { .. }));
}

#[test]
fn month_gap_is_signed() {
    let a = Month::new(2025, 8).unwrap();
    let b = Month::new(2025, 3).unwrap();
    assert_eq!(month_gap(a, b), -5);
    assert_eq!(month_gap(b, a), 5);
}

#[test]
fn is_within_treats_missing_end_as_unbounded() {
    let start = Month::new(2025, 1).unwrap();
    let end = Month::new(2025, 6).unwrap();
    let m = Month::new(2025, 4).unwrap();
    assert!(is_within(m, start, Some(end)));
    assert!(is_within(end, start, Some(end)));
    assert!(!is_within(Month::new(2025, 7).unwrap(), start, Some(end)));
    assert!(!is_within(Month::new(2024, 12).unwrap(), start, Some(end)));
    assert!(is_within(Month::new(2099, 1).unwrap(), start, None));
}

#[test]
fn month_parses_and_formats_round_trip() {
    let m = Month::from_ym_str("2025-08").unwrap();
    assert_eq!(m.to_string(), "2025-08");
    assert!(Month::from_ym_str("2025-13").is_none());
    assert!(Month::from_ym_str("25-08").is_none());
    assert!(Month::from_ym_str("garbage").is_none());
}

#[test]
fn day_clamping_respects_month_length() {
    let feb = Month::new(2025, 2).unwrap();
    assert_eq!(feb.day_clamped(31).to_string(), "2025-02-28");
    let leap_feb = Month::new(2024, 2).unwrap();
    assert_eq!(leap_feb.day_clamped(31).to_string(), "2024-02-29");
    let aug = Month::new(2025, 8).unwrap();
    assert_eq!(aug.day_clamped(15).to_string(), "2025-08-15");
}

#[test]
fn window_walks_across_year_boundaries() {
    let window = MonthWindow::new(Month::new(2025, 11).unwrap(), 4);
    let months: Vec<String> = window.iter().map(|m| m.to_string()).collect();
    assert_eq!(months, vec!["2025-11", "2025-12", "2026-01", "2026-02"]);
    assert_eq!(window.last(), Month::new(2026, 2).unwrap());
}
