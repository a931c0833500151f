// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::error::EngineError;
use super::period::Month;
use crate::models::{Budget, CreditCardEntry, Income, Loan, Owner};

/// Narrow read-only view of the record store. The engine only ever reads
/// through this interface; it never mutates records and never binds to a
/// storage technology. Retrieval failures surface as
/// `EngineError::StorageUnavailable`.
pub trait RecordSource {
    fn owner(&self, name: &str) -> Result<Option<Owner>, EngineError>;
    fn loans(&self, owner: &Owner) -> Result<Vec<Loan>, EngineError>;
    fn card_entries(&self, owner: &Owner) -> Result<Vec<CreditCardEntry>, EngineError>;
    fn budgets(&self, owner: &Owner, month: Month) -> Result<Vec<Budget>, EngineError>;
    fn income(&self, owner: &Owner) -> Result<Option<Income>, EngineError>;
}
