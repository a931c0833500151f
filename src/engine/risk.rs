// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use super::error::EngineError;

/// Debt-burden tier, ordered from healthiest to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum RiskTier {
    Safe,
    Watch,
    Stretched,
    Critical,
}

impl RiskTier {
    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Safe => "Safe",
            RiskTier::Watch => "Watch",
            RiskTier::Stretched => "Stretched",
            RiskTier::Critical => "Critical",
        }
    }

    /// Fixed advisory template per tier. A closed mapping keeps the
    /// policy exhaustively testable.
    pub fn advisory(self) -> &'static str {
        match self {
            RiskTier::Safe => "Debt burden is comfortable. Keep the current repayment discipline.",
            RiskTier::Watch => {
                "Debt burden is creeping up. Trim discretionary spend and avoid new EMIs."
            }
            RiskTier::Stretched => {
                "Debt burden is high. Cut expenses 10-15% and consider refinancing costly loans."
            }
            RiskTier::Critical => {
                "Debt burden is severe. Prioritize repayment of the costliest debt first and pause new card spends."
            }
        }
    }

    /// One step worse. Saturates at Critical.
    fn escalate(self) -> Self {
        match self {
            RiskTier::Safe => RiskTier::Watch,
            RiskTier::Watch => RiskTier::Stretched,
            RiskTier::Stretched => RiskTier::Critical,
            RiskTier::Critical => RiskTier::Critical,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RiskAssessment {
    pub ratio: f64,
    pub tier: RiskTier,
    pub message: &'static str,
}

/// Tier the burden ratio (obligations / income) against the 30/50/75%
/// bands. Zero income with obligations is an unbounded ratio, reported as
/// infinity. Overspend pushes Safe or Watch exactly one step up and
/// leaves Stretched and Critical unchanged.
pub fn assess(
    income: Decimal,
    total_obligations: Decimal,
    overspend: Decimal,
) -> Result<RiskAssessment, EngineError> {
    if income < Decimal::ZERO {
        return Err(EngineError::InvalidIncome(income));
    }

    let (ratio, base) = if income.is_zero() {
        if total_obligations > Decimal::ZERO {
            (f64::INFINITY, RiskTier::Critical)
        } else {
            (0.0, RiskTier::Safe)
        }
    } else {
        let r = total_obligations / income;
        (r.to_f64().unwrap_or(f64::INFINITY), tier_for(r))
    };

    let tier = if overspend > Decimal::ZERO && base < RiskTier::Stretched {
        base.escalate()
    } else {
        base
    };

    Ok(RiskAssessment {
        ratio,
        tier,
        message: tier.advisory(),
    })
}

fn tier_for(ratio: Decimal) -> RiskTier {
    if ratio <= Decimal::new(30, 2) {
        RiskTier::Safe
    } else if ratio <= Decimal::new(50, 2) {
        RiskTier::Watch
    } else if ratio <= Decimal::new(75, 2) {
        RiskTier::Stretched
    } else {
        RiskTier::Critical
    }
}
