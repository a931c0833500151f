// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Loans ending before they start
    let mut stmt = conn.prepare(
        "SELECT id, loan_type FROM loans WHERE end_date IS NOT NULL AND end_date < start_date",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let t: String = r.get(1)?;
        rows.push(vec!["loan_ends_before_start".into(), format!("#{} {}", id, t)]);
    }

    // 2) Card entries with an impossible tenure
    let mut stmt2 = conn.prepare("SELECT id FROM card_entries WHERE tenure_months < 1")?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: i64 = r.get(0)?;
        rows.push(vec!["entry_zero_tenure".into(), format!("#{}", id)]);
    }

    // 3) Negative stored amounts (stored as TEXT, compare numerically)
    for (check, sql) in [
        (
            "loan_negative_emi",
            "SELECT id FROM loans WHERE CAST(monthly_emi AS REAL) < 0",
        ),
        (
            "entry_negative_amount",
            "SELECT id FROM card_entries WHERE CAST(amount AS REAL) < 0",
        ),
        (
            "budget_negative_amount",
            "SELECT id FROM budgets WHERE CAST(amount AS REAL) < 0",
        ),
        (
            "income_negative",
            "SELECT id FROM incomes WHERE CAST(monthly_salary AS REAL) < 0 OR CAST(other_income AS REAL) < 0",
        ),
    ] {
        let mut stmt = conn.prepare(sql)?;
        let mut cur = stmt.query([])?;
        while let Some(r) = cur.next()? {
            let id: i64 = r.get(0)?;
            rows.push(vec![check.into(), format!("#{}", id)]);
        }
    }

    // 4) Cards without a usable limit (e.g. created by the legacy migration)
    let mut stmt3 =
        conn.prepare("SELECT id, card_name FROM cards WHERE CAST(credit_limit AS REAL) <= 0")?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let id: i64 = r.get(0)?;
        let name: String = r.get(1)?;
        rows.push(vec!["card_no_limit".into(), format!("#{} {}", id, name)]);
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
