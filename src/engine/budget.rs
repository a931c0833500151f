// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::Budget;

/// One category's planned-versus-actual line for a period.
#[derive(Debug, Clone, Serialize)]
pub struct BudgetLine {
    pub category: String,
    pub planned: Decimal,
    pub actual: Decimal,
    pub delta: Decimal,
    pub overspent: bool,
}

/// Compare planned budgets against actual per-category amounts.
///
/// Categories with actual spend but no budget row report `planned = 0`.
/// Overspent iff actual > planned; equality is not overspend. Lines come
/// back sorted by category.
pub fn compare(budgets: &[Budget], actuals: &[(String, Decimal)]) -> Vec<BudgetLine> {
    let mut by_cat: BTreeMap<&str, (Decimal, Decimal)> = BTreeMap::new();
    for b in budgets {
        by_cat.entry(b.category.as_str()).or_default().0 += b.amount;
    }
    for (cat, amount) in actuals {
        by_cat.entry(cat.as_str()).or_default().1 += *amount;
    }

    by_cat
        .into_iter()
        .map(|(category, (planned, actual))| BudgetLine {
            category: category.to_string(),
            planned,
            actual,
            delta: actual - planned,
            overspent: actual > planned,
        })
        .collect()
}

/// Aggregate overspend: the sum of positive deltas across categories.
pub fn overspend_total(lines: &[BudgetLine]) -> Decimal {
    lines
        .iter()
        .filter(|l| l.delta > Decimal::ZERO)
        .map(|l| l.delta)
        .sum()
}
