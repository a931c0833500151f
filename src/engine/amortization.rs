// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::error::EngineError;
use super::period::{Month, month_gap};
use crate::models::CreditCardEntry;

/// A card entry's schedule position as of a query month.
#[derive(Debug, Clone, Serialize)]
pub struct Amortization {
    pub elapsed_months: u32,
    pub remaining_tenure: u32,
    pub per_month_amount: Decimal,
    pub last_installment: Decimal,
    pub due_this_month: Decimal,
    pub outstanding_balance: Decimal,
    pub closed: bool,
}

/// Flat EMI schedule for a card entry at `query`.
///
/// Non-terminal installments are `amount / tenure` rounded to whole
/// currency units with banker's rounding (MidpointNearestEven); the last
/// installment absorbs the remainder, so installments always sum to
/// exactly `amount`. Query months before the start report the untouched
/// schedule with nothing due.
pub fn amortize(entry: &CreditCardEntry, query: Month) -> Result<Amortization, EngineError> {
    if entry.tenure_months == 0 {
        return Err(EngineError::InvalidTenure(entry.tenure_months));
    }
    if entry.amount < Decimal::ZERO {
        return Err(EngineError::InvalidAmount(entry.amount));
    }

    let tenure = entry.tenure_months;
    let gap = month_gap(entry.start_month, query);
    let elapsed = gap.clamp(0, i64::from(u32::MAX)) as u32;
    let remaining = tenure.saturating_sub(elapsed);

    let per_month = (entry.amount / Decimal::from(tenure))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
    let last_installment = entry.amount - per_month * Decimal::from(tenure - 1);

    let outstanding_balance = if elapsed >= tenure {
        Decimal::ZERO
    } else {
        (entry.amount - per_month * Decimal::from(elapsed)).clamp(Decimal::ZERO, entry.amount)
    };

    let due_this_month = if gap < 0 || remaining == 0 {
        Decimal::ZERO
    } else if elapsed == tenure - 1 {
        last_installment
    } else {
        per_month
    };

    Ok(Amortization {
        elapsed_months: elapsed,
        remaining_tenure: remaining,
        per_month_amount: per_month,
        last_installment,
        due_this_month,
        outstanding_balance,
        closed: remaining == 0,
    })
}
