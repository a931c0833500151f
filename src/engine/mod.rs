// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Obligation aggregation and risk analytics. Pure given the owner's
//! records as of query time: no cache, no shared state, no I/O beyond
//! the record source handed in.

pub mod amortization;
pub mod analytics;
pub mod budget;
pub mod error;
pub mod obligations;
pub mod period;
pub mod risk;
pub mod source;

use rust_decimal::Decimal;

pub use amortization::{Amortization, amortize};
pub use analytics::{AnalyticsBundle, Series};
pub use budget::BudgetLine;
pub use error::EngineError;
pub use obligations::{Obligation, ObligationKind};
pub use period::{Month, MonthWindow, is_within, month_gap, months_between};
pub use risk::{RiskAssessment, RiskTier};
pub use source::RecordSource;

use crate::models::{CreditCardEntry, Owner};

fn require_owner(src: &dyn RecordSource, name: &str) -> Result<Owner, EngineError> {
    src.owner(name)?
        .ok_or_else(|| EngineError::UnknownOwner(name.to_string()))
}

/// Ordered obligation rows for an owner and target month.
pub fn compute_obligations(
    src: &dyn RecordSource,
    owner: &str,
    month: Month,
) -> Result<Vec<Obligation>, EngineError> {
    let owner = require_owner(src, owner)?;
    let loans = src.loans(&owner)?;
    let entries = src.card_entries(&owner)?;
    obligations::aggregate(&loans, &entries, month)
}

/// Schedule position of a single card entry at a month.
pub fn compute_amortization(
    entry: &CreditCardEntry,
    month: Month,
) -> Result<Amortization, EngineError> {
    amortization::amortize(entry, month)
}

/// Per-category planned-versus-actual lines for an owner and period.
/// Actuals are the period's obligation totals keyed by category label.
pub fn compute_budget_comparison(
    src: &dyn RecordSource,
    owner: &str,
    period: Month,
) -> Result<Vec<BudgetLine>, EngineError> {
    let owner = require_owner(src, owner)?;
    let loans = src.loans(&owner)?;
    let entries = src.card_entries(&owner)?;
    let rows = obligations::aggregate(&loans, &entries, period)?;
    let actuals: Vec<(String, Decimal)> = rows
        .iter()
        .map(|o| (o.category.clone(), o.amount_due))
        .collect();
    Ok(budget::compare(&src.budgets(&owner, period)?, &actuals))
}

/// Risk tier and advisory for an owner's month: burden ratio from income
/// and obligation totals, escalated by budget overspend.
pub fn compute_risk(
    src: &dyn RecordSource,
    owner: &str,
    month: Month,
) -> Result<RiskAssessment, EngineError> {
    let owner_rec = require_owner(src, owner)?;
    let income = src
        .income(&owner_rec)?
        .map(|i| i.total())
        .unwrap_or(Decimal::ZERO);

    let loans = src.loans(&owner_rec)?;
    let entries = src.card_entries(&owner_rec)?;
    let rows = obligations::aggregate(&loans, &entries, month)?;
    let total_due: Decimal = rows.iter().map(|o| o.amount_due).sum();

    let actuals: Vec<(String, Decimal)> = rows
        .iter()
        .map(|o| (o.category.clone(), o.amount_due))
        .collect();
    let lines = budget::compare(&src.budgets(&owner_rec, month)?, &actuals);
    let overspend = budget::overspend_total(&lines);

    risk::assess(income, total_due, overspend)
}

/// The three presentation series for an owner over a month window. The
/// debt-mix distribution snapshots the window's first month; cashflow and
/// timeline walk the whole window.
pub fn compute_analytics(
    src: &dyn RecordSource,
    owner: &str,
    window: MonthWindow,
) -> Result<AnalyticsBundle, EngineError> {
    let owner = require_owner(src, owner)?;
    let loans = src.loans(&owner)?;
    let entries = src.card_entries(&owner)?;
    let income = src.income(&owner)?;

    let rows = obligations::aggregate(&loans, &entries, window.first)?;
    Ok(AnalyticsBundle {
        distribution: analytics::distribution(&rows),
        cashflow: analytics::cashflow(income.as_ref(), &loans, &entries, window)?,
        timeline: analytics::timeline(&loans, &entries, window)?,
    })
}
