// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use super::amortization::amortize;
use super::error::EngineError;
use super::period::{Month, is_within, month_gap};
use crate::models::{CreditCardEntry, Loan};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ObligationKind {
    Loan,
    CardEmi,
}

impl ObligationKind {
    pub fn label(self) -> &'static str {
        match self {
            ObligationKind::Loan => "Loan",
            ObligationKind::CardEmi => "Card EMI",
        }
    }
}

/// A derived per-month payment requirement. Never persisted; recomputed
/// on every query.
#[derive(Debug, Clone, Serialize)]
pub struct Obligation {
    pub kind: ObligationKind,
    pub source_id: i64,
    pub category: String,
    pub amount_due: Decimal,
    pub due_date: NaiveDate,
    pub remaining_balance: Decimal,
    pub closed: bool,
    pub actionable: bool,
}

/// Normalize active loans and open card EMI entries into the target
/// month's obligation rows, ordered by due date, then kind, then id.
///
/// Card entries whose tenure has fully elapsed are excluded entirely.
/// Zero-due rows (zero-amount entries, entries not yet started) are kept
/// and flagged `actionable: false`.
pub fn aggregate(
    loans: &[Loan],
    entries: &[CreditCardEntry],
    month: Month,
) -> Result<Vec<Obligation>, EngineError> {
    let mut out = Vec::with_capacity(loans.len() + entries.len());

    for loan in loans {
        let start = Month::from_date(loan.start_date);
        let end = loan.end_date.map(Month::from_date);
        if !is_within(month, start, end) {
            continue;
        }
        out.push(Obligation {
            kind: ObligationKind::Loan,
            source_id: loan.id,
            category: loan.loan_type.clone(),
            amount_due: loan.monthly_emi,
            due_date: month.day_clamped(loan.start_date.day()),
            remaining_balance: loan_balance_at(loan, month),
            closed: false,
            actionable: !loan.monthly_emi.is_zero(),
        });
    }

    for entry in entries {
        let sched = amortize(entry, month)?;
        if sched.remaining_tenure == 0 {
            continue;
        }
        out.push(Obligation {
            kind: ObligationKind::CardEmi,
            source_id: entry.id,
            category: entry.card_name.clone(),
            amount_due: sched.due_this_month,
            due_date: month.first_day(),
            remaining_balance: sched.outstanding_balance,
            closed: false,
            actionable: !sched.due_this_month.is_zero(),
        });
    }

    out.sort_by(|a, b| {
        a.due_date
            .cmp(&b.due_date)
            .then(a.kind.cmp(&b.kind))
            .then(a.source_id.cmp(&b.source_id))
    });
    Ok(out)
}

/// Remaining loan balance at a month under the flat EMI model: EMI times
/// the installments left through the end month (the full span before the
/// loan starts, zero after it ends). Open-ended loans have no computable
/// balance and report the current installment only.
pub fn loan_balance_at(loan: &Loan, month: Month) -> Decimal {
    let Some(end) = loan.end_date.map(Month::from_date) else {
        return loan.monthly_emi;
    };
    if month > end {
        return Decimal::ZERO;
    }
    let start = Month::from_date(loan.start_date);
    let from = if month < start { start } else { month };
    let left = month_gap(from, end) + 1;
    loan.monthly_emi * Decimal::from(left.max(0))
}
