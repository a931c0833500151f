// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use crate::engine::error::EngineError;
use crate::engine::period::Month;
use crate::engine::source::RecordSource;
use crate::models::{Budget, CreditCardEntry, Income, Loan, Owner};

/// Read-only record source over the SQLite store. Amounts are stored as
/// TEXT decimals and dates as ISO strings; anything unreadable is a
/// storage fault, not a validation failure.
pub struct SqliteSource<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteSource<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

fn storage_err(e: impl std::fmt::Display) -> EngineError {
    EngineError::StorageUnavailable(e.to_string())
}

fn decimal_col(s: &str) -> Result<Decimal, EngineError> {
    s.parse::<Decimal>()
        .map_err(|_| storage_err(format!("invalid stored amount '{}'", s)))
}

fn date_col(s: &str) -> Result<NaiveDate, EngineError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| storage_err(format!("invalid stored date '{}'", s)))
}

fn month_col(s: &str) -> Result<Month, EngineError> {
    Month::from_ym_str(s).ok_or_else(|| storage_err(format!("invalid stored month '{}'", s)))
}

impl RecordSource for SqliteSource<'_> {
    fn owner(&self, name: &str) -> Result<Option<Owner>, EngineError> {
        self.conn
            .query_row(
                "SELECT id, name FROM owners WHERE name=?1",
                params![name],
                |r| {
                    Ok(Owner {
                        id: r.get(0)?,
                        name: r.get(1)?,
                    })
                },
            )
            .optional()
            .map_err(storage_err)
    }

    fn loans(&self, owner: &Owner) -> Result<Vec<Loan>, EngineError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, owner_id, loan_type, lender, monthly_emi, start_date, end_date
                 FROM loans WHERE owner_id=?1 ORDER BY end_date, id",
            )
            .map_err(storage_err)?;
        let mut rows = stmt.query(params![owner.id]).map_err(storage_err)?;
        let mut out = Vec::new();
        while let Some(r) = rows.next().map_err(storage_err)? {
            let emi: String = r.get(4).map_err(storage_err)?;
            let start: String = r.get(5).map_err(storage_err)?;
            let end: Option<String> = r.get(6).map_err(storage_err)?;
            out.push(Loan {
                id: r.get(0).map_err(storage_err)?,
                owner_id: r.get(1).map_err(storage_err)?,
                loan_type: r.get(2).map_err(storage_err)?,
                lender: r.get(3).map_err(storage_err)?,
                monthly_emi: decimal_col(&emi)?,
                start_date: date_col(&start)?,
                end_date: end.as_deref().map(date_col).transpose()?,
            });
        }
        Ok(out)
    }

    fn card_entries(&self, owner: &Owner) -> Result<Vec<CreditCardEntry>, EngineError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT e.id, e.card_id, c.card_name, e.amount, e.tenure_months, e.start_month, e.description
                 FROM card_entries e JOIN cards c ON e.card_id=c.id
                 WHERE c.owner_id=?1 ORDER BY e.start_month DESC, e.id DESC",
            )
            .map_err(storage_err)?;
        let mut rows = stmt.query(params![owner.id]).map_err(storage_err)?;
        let mut out = Vec::new();
        while let Some(r) = rows.next().map_err(storage_err)? {
            let amount: String = r.get(3).map_err(storage_err)?;
            let month: String = r.get(5).map_err(storage_err)?;
            out.push(CreditCardEntry {
                id: r.get(0).map_err(storage_err)?,
                card_id: r.get(1).map_err(storage_err)?,
                card_name: r.get(2).map_err(storage_err)?,
                amount: decimal_col(&amount)?,
                tenure_months: r.get(4).map_err(storage_err)?,
                start_month: month_col(&month)?,
                description: r.get(6).map_err(storage_err)?,
            });
        }
        Ok(out)
    }

    fn budgets(&self, owner: &Owner, month: Month) -> Result<Vec<Budget>, EngineError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, owner_id, month, category, amount
                 FROM budgets WHERE owner_id=?1 AND month=?2 ORDER BY category",
            )
            .map_err(storage_err)?;
        let mut rows = stmt
            .query(params![owner.id, month.to_string()])
            .map_err(storage_err)?;
        let mut out = Vec::new();
        while let Some(r) = rows.next().map_err(storage_err)? {
            let m: String = r.get(2).map_err(storage_err)?;
            let amount: String = r.get(4).map_err(storage_err)?;
            out.push(Budget {
                id: r.get(0).map_err(storage_err)?,
                owner_id: r.get(1).map_err(storage_err)?,
                month: month_col(&m)?,
                category: r.get(3).map_err(storage_err)?,
                amount: decimal_col(&amount)?,
            });
        }
        Ok(out)
    }

    fn income(&self, owner: &Owner) -> Result<Option<Income>, EngineError> {
        let row = self
            .conn
            .query_row(
                "SELECT id, owner_id, monthly_salary, other_income, effective
                 FROM incomes WHERE owner_id=?1",
                params![owner.id],
                |r| {
                    Ok((
                        r.get::<_, i64>(0)?,
                        r.get::<_, i64>(1)?,
                        r.get::<_, String>(2)?,
                        r.get::<_, String>(3)?,
                        r.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()
            .map_err(storage_err)?;
        match row {
            Some((id, owner_id, salary, other, effective)) => Ok(Some(Income {
                id,
                owner_id,
                monthly_salary: decimal_col(&salary)?,
                other_income: decimal_col(&other)?,
                effective: date_col(&effective)?,
            })),
            None => Ok(None),
        }
    }
}
