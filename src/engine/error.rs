// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

use super::period::Month;

/// Engine failure taxonomy. Everything except `StorageUnavailable` is a
/// local validation failure; storage errors originate in the record
/// source and are surfaced unchanged.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid month range: {start} is after {end}")]
    InvalidRange { start: Month, end: Month },

    #[error("invalid tenure {0}: an EMI schedule needs at least one month")]
    InvalidTenure(u32),

    #[error("invalid amount {0}: negative amounts are not allowed")]
    InvalidAmount(Decimal),

    #[error("invalid income {0}: income cannot be negative")]
    InvalidIncome(Decimal),

    #[error("no profile found for owner '{0}'")]
    UnknownOwner(String),

    #[error("record store unavailable: {0}")]
    StorageUnavailable(String),
}
