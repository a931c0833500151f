// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use debtmeter::engine::amortization::amortize;
use debtmeter::engine::error::EngineError;
use debtmeter::engine::period::Month;
use debtmeter::models::CreditCardEntry;
use rust_decimal::Decimal;

fn entry(amount: i64, tenure: u32) -> CreditCardEntry {
    CreditCardEntry {
        id: 1,
        card_id: 1,
        card_name: "Visa Gold".into(),
        amount: Decimal::from(amount),
        tenure_months: tenure,
        start_month: Month::new(2025, 1).unwrap(),
        description: String::new(),
    }
}

#[test]
fn flat_schedule_midway() {
    // 12000 over 12 months, queried 5 months in
    let e = entry(12000, 12);
    let sched = amortize(&e, Month::new(2025, 6).unwrap()).unwrap();
    assert_eq!(sched.elapsed_months, 5);
    assert_eq!(sched.remaining_tenure, 7);
    assert_eq!(sched.per_month_amount, Decimal::from(1000));
    assert_eq!(sched.due_this_month, Decimal::from(1000));
    assert_eq!(sched.outstanding_balance, Decimal::from(7000));
    assert!(!sched.closed);
}

#[test]
fn schedule_closes_after_tenure() {
    let e = entry(12000, 12);
    let sched = amortize(&e, Month::new(2026, 1).unwrap()).unwrap();
    assert_eq!(sched.elapsed_months, 12);
    assert_eq!(sched.remaining_tenure, 0);
    assert_eq!(sched.outstanding_balance, Decimal::ZERO);
    assert_eq!(sched.due_this_month, Decimal::ZERO);
    assert!(sched.closed);
}

#[test]
fn installments_sum_to_financed_amount() {
    let start = Month::new(2025, 1).unwrap();
    for (amount, tenure) in [(12000, 12), (1000, 3), (999, 4), (50000, 7), (1, 2), (100, 6)] {
        let e = entry(amount, tenure);
        let mut sum = Decimal::ZERO;
        for i in 0..tenure {
            sum += amortize(&e, start.offset(i as i64)).unwrap().due_this_month;
        }
        assert_eq!(sum, Decimal::from(amount), "drift for {}/{}", amount, tenure);
    }
}

#[test]
fn last_installment_absorbs_rounding_remainder() {
    // 1000 / 3 = 333 rounded; last month pays 334
    let e = entry(1000, 3);
    let last = amortize(&e, Month::new(2025, 3).unwrap()).unwrap();
    assert_eq!(last.per_month_amount, Decimal::from(333));
    assert_eq!(last.due_this_month, Decimal::from(334));
    assert_eq!(last.remaining_tenure, 1);
}

#[test]
fn outstanding_never_increases() {
    let e = entry(999, 4);
    let start = Month::new(2024, 11).unwrap();
    let e = CreditCardEntry {
        start_month: start,
        ..e
    };
    let mut prev = e.amount;
    for i in 0..8 {
        let sched = amortize(&e, start.offset(i)).unwrap();
        assert!(sched.outstanding_balance <= prev);
        prev = sched.outstanding_balance;
    }
    assert_eq!(prev, Decimal::ZERO);
}

#[test]
fn before_start_reports_untouched_schedule() {
    let e = entry(6000, 6);
    let sched = amortize(&e, Month::new(2024, 10).unwrap()).unwrap();
    assert_eq!(sched.elapsed_months, 0);
    assert_eq!(sched.remaining_tenure, 6);
    assert_eq!(sched.due_this_month, Decimal::ZERO);
    assert_eq!(sched.outstanding_balance, Decimal::from(6000));
    assert!(!sched.closed);
}

#[test]
fn zero_tenure_is_rejected() {
    let e = entry(5000, 0);
    let err = amortize(&e, Month::new(2025, 1).unwrap()).unwrap_err();
    assert!(matches!(err, EngineError::InvalidTenure(0)));
}

#[test]
fn negative_amount_is_rejected() {
    let mut e = entry(5000, 5);
    e.amount = Decimal::from(-5000);
    let err = amortize(&e, Month::new(2025, 1).unwrap()).unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));
}

#[test]
fn compute_amortization_matches_the_schedule_fn() {
    let e = entry(12000, 12);
    let month = Month::new(2025, 6).unwrap();
    let direct = amortize(&e, month).unwrap();
    let exposed = debtmeter::engine::compute_amortization(&e, month).unwrap();
    assert_eq!(exposed.per_month_amount, direct.per_month_amount);
    assert_eq!(exposed.outstanding_balance, direct.outstanding_balance);
    assert_eq!(exposed.remaining_tenure, direct.remaining_tenure);
}

#[test]
fn zero_amount_entry_is_valid_with_nothing_due() {
    let e = entry(0, 4);
    let sched = amortize(&e, Month::new(2025, 2).unwrap()).unwrap();
    assert_eq!(sched.due_this_month, Decimal::ZERO);
    assert_eq!(sched.outstanding_balance, Decimal::ZERO);
    assert_eq!(sched.remaining_tenure, 3);
}
