// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::engine::period::Month;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Income {
    pub id: i64,
    pub owner_id: i64,
    pub monthly_salary: Decimal,
    pub other_income: Decimal,
    pub effective: NaiveDate,
}

impl Income {
    pub fn total(&self) -> Decimal {
        self.monthly_salary + self.other_income
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    pub id: i64,
    pub owner_id: i64,
    pub loan_type: String,
    pub lender: String,
    pub monthly_emi: Decimal,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>, // absent = open-ended
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditCardAccount {
    pub id: i64,
    pub owner_id: i64,
    pub card_name: String,
    pub issuer: String,
    pub credit_limit: Decimal,
    pub emi_interest_rate: Decimal, // % p.a., metadata only
    pub reward_percent: Decimal,
}

impl CreditCardAccount {
    /// Display-only estimate: one month of interest on an outstanding
    /// balance at this card's annual rate.
    pub fn monthly_interest_estimate(&self, outstanding: Decimal) -> Decimal {
        (outstanding * self.emi_interest_rate / Decimal::from(1200)).round_dp(2)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditCardEntry {
    pub id: i64,
    pub card_id: i64,
    pub card_name: String,
    pub amount: Decimal,
    pub tenure_months: u32,
    pub start_month: Month,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub owner_id: i64,
    pub month: Month,
    pub category: String,
    pub amount: Decimal,
}
