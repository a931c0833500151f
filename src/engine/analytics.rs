// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use std::collections::BTreeMap;

use super::amortization::amortize;
use super::error::EngineError;
use super::obligations::{Obligation, aggregate, loan_balance_at};
use super::period::{Month, MonthWindow};
use crate::models::{CreditCardEntry, Income, Loan};

/// Chart-ready series. `labels` and `values` always have equal length.
#[derive(Debug, Clone, Serialize)]
pub struct Series {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsBundle {
    pub distribution: Series,
    pub cashflow: Series,
    pub timeline: Series,
}

fn value_of(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

/// Debt-mix distribution: due amounts summed per category label, largest
/// first, ties broken by label.
pub fn distribution(obligations: &[Obligation]) -> Series {
    let mut by_cat: BTreeMap<String, Decimal> = BTreeMap::new();
    for o in obligations {
        *by_cat.entry(o.category.clone()).or_default() += o.amount_due;
    }
    let mut items: Vec<(String, Decimal)> = by_cat.into_iter().collect();
    items.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    Series {
        labels: items.iter().map(|(label, _)| label.clone()).collect(),
        values: items.iter().map(|(_, amount)| value_of(*amount)).collect(),
    }
}

/// Per-month net cashflow (income minus total obligations) across the
/// window. Each month is recomputed from scratch; income counts from its
/// effective month onward.
pub fn cashflow(
    income: Option<&Income>,
    loans: &[Loan],
    entries: &[CreditCardEntry],
    window: MonthWindow,
) -> Result<Series, EngineError> {
    let mut labels = Vec::with_capacity(window.len as usize);
    let mut values = Vec::with_capacity(window.len as usize);
    for month in window.iter() {
        let due: Decimal = aggregate(loans, entries, month)?
            .iter()
            .map(|o| o.amount_due)
            .sum();
        let month_income = income
            .filter(|i| Month::from_date(i.effective) <= month)
            .map(Income::total)
            .unwrap_or(Decimal::ZERO);
        labels.push(month.label());
        values.push(value_of(month_income - due));
    }
    Ok(Series { labels, values })
}

/// Aggregate remaining loan/card balance per month across the window.
pub fn timeline(
    loans: &[Loan],
    entries: &[CreditCardEntry],
    window: MonthWindow,
) -> Result<Series, EngineError> {
    let mut labels = Vec::with_capacity(window.len as usize);
    let mut values = Vec::with_capacity(window.len as usize);
    for month in window.iter() {
        let mut total = Decimal::ZERO;
        for loan in loans {
            total += loan_balance_at(loan, month);
        }
        for entry in entries {
            total += amortize(entry, month)?.outstanding_balance;
        }
        labels.push(month.label());
        values.push(value_of(total));
    }
    Ok(Series { labels, values })
}
