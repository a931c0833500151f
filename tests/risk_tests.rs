// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use debtmeter::engine::error::EngineError;
use debtmeter::engine::risk::{RiskTier, assess};
use rust_decimal::Decimal;

fn dec(v: i64) -> Decimal {
    Decimal::from(v)
}

#[test]
fn comfortable_burden_is_safe() {
    // 12000 / 50000 = 0.24
    let a = assess(dec(50000), dec(12000), Decimal::ZERO).unwrap();
    assert_eq!(a.tier, RiskTier::Safe);
    assert!((a.ratio - 0.24).abs() < 1e-9);
}

#[test]
fn overspend_escalates_safe_to_watch() {
    let a = assess(dec(50000), dec(12000), dec(500)).unwrap();
    assert_eq!(a.tier, RiskTier::Watch);
}

#[test]
fn overspend_escalates_watch_to_stretched() {
    // 20000 / 50000 = 0.40 -> Watch
    let a = assess(dec(50000), dec(20000), dec(1)).unwrap();
    assert_eq!(a.tier, RiskTier::Stretched);
}

#[test]
fn overspend_leaves_stretched_and_critical_alone() {
    // 35000 / 50000 = 0.70 -> Stretched
    let a = assess(dec(50000), dec(35000), dec(9999)).unwrap();
    assert_eq!(a.tier, RiskTier::Stretched);
    // 45000 / 50000 = 0.90 -> Critical
    let b = assess(dec(50000), dec(45000), dec(9999)).unwrap();
    assert_eq!(b.tier, RiskTier::Critical);
}

#[test]
fn band_edges_are_inclusive() {
    assert_eq!(assess(dec(100), dec(30), dec(0)).unwrap().tier, RiskTier::Safe);
    assert_eq!(assess(dec(100), dec(31), dec(0)).unwrap().tier, RiskTier::Watch);
    assert_eq!(assess(dec(100), dec(50), dec(0)).unwrap().tier, RiskTier::Watch);
    assert_eq!(
        assess(dec(100), dec(51), dec(0)).unwrap().tier,
        RiskTier::Stretched
    );
    assert_eq!(
        assess(dec(100), dec(75), dec(0)).unwrap().tier,
        RiskTier::Stretched
    );
    assert_eq!(
        assess(dec(100), dec(76), dec(0)).unwrap().tier,
        RiskTier::Critical
    );
}

#[test]
fn no_income_with_debt_is_critical() {
    let a = assess(Decimal::ZERO, dec(5000), Decimal::ZERO).unwrap();
    assert_eq!(a.tier, RiskTier::Critical);
    assert!(a.ratio.is_infinite());
}

#[test]
fn no_income_and_no_debt_is_safe() {
    let a = assess(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO).unwrap();
    assert_eq!(a.tier, RiskTier::Safe);
    assert_eq!(a.ratio, 0.0);
}

#[test]
fn negative_income_is_rejected() {
    let err = assess(dec(-1), dec(5000), Decimal::ZERO).unwrap_err();
    assert!(matches!(err, EngineError::InvalidIncome(_)));
}

#[test]
fn assessment_is_deterministic() {
    let a = assess(dec(40000), dec(21000), dec(250)).unwrap();
    let b = assess(dec(40000), dec(21000), dec(250)).unwrap();
    assert_eq!(a.tier, b.tier);
    assert_eq!(a.message, b.message);
    assert_eq!(a.ratio, b.ratio);
}

#[test]
fn message_comes_from_the_tier_template() {
    let a = assess(dec(50000), dec(45000), Decimal::ZERO).unwrap();
    assert_eq!(a.message, RiskTier::Critical.advisory());
}
