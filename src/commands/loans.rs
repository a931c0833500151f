// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::obligations::loan_balance_at;
use crate::engine::period::{Month, month_gap};
use crate::store::SqliteSource;
use crate::utils::{
    current_month, id_for_owner, maybe_print_json, parse_date, parse_decimal, parse_month,
    pretty_table,
};
use anyhow::{Result, bail};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::engine::source::RecordSource;
use crate::models::Owner;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            conn.execute("DELETE FROM loans WHERE id=?1", params![id])?;
            println!("Removed loan #{}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = sub.get_one::<String>("owner").unwrap();
    let loan_type = sub.get_one::<String>("type").unwrap().trim().to_string();
    let lender = sub.get_one::<String>("lender").unwrap().trim().to_string();
    let emi = parse_decimal(sub.get_one::<String>("emi").unwrap())?;
    let start = parse_date(sub.get_one::<String>("start").unwrap())?;
    let end = sub
        .get_one::<String>("end")
        .map(|s| parse_date(s))
        .transpose()?;

    if emi < Decimal::ZERO {
        bail!("EMI amount cannot be negative");
    }
    if let Some(end) = end {
        if end < start {
            bail!("Loan end date {} is before start date {}", end, start);
        }
    }

    let owner_id = id_for_owner(conn, owner)?;
    conn.execute(
        "INSERT INTO loans(owner_id, loan_type, lender, monthly_emi, start_date, end_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            owner_id,
            loan_type,
            lender,
            emi.to_string(),
            start.to_string(),
            end.map(|d| d.to_string())
        ],
    )?;
    println!("Added {} ({}) with EMI {} from {}", loan_type, lender, emi, start);
    Ok(())
}

#[derive(Serialize)]
pub struct LoanRow {
    pub id: i64,
    pub loan_type: String,
    pub lender: String,
    pub monthly_emi: String,
    pub status: String,
    pub elapsed_months: i64,
    pub remaining_months: Option<i64>,
    pub balance: String,
}

/// Runtime view of an owner's loans at a month: active/upcoming/closed
/// with elapsed and remaining installments.
pub fn loan_rows(conn: &Connection, owner: &str, month: Month) -> Result<Vec<LoanRow>> {
    let src = SqliteSource::new(conn);
    let owner_id = id_for_owner(conn, owner)?;
    let owner = Owner {
        id: owner_id,
        name: owner.to_string(),
    };
    let mut out = Vec::new();
    for loan in src.loans(&owner)? {
        let start = Month::from_date(loan.start_date);
        let end = loan.end_date.map(Month::from_date);
        let gap = month_gap(start, month);
        let (status, elapsed, remaining) = match end {
            Some(end) if month > end => {
                let total = month_gap(start, end) + 1;
                ("closed", total, Some(0))
            }
            _ if gap < 0 => {
                let total = end.map(|e| month_gap(start, e) + 1);
                ("upcoming", 0, total)
            }
            Some(end) => ("active", gap, Some(month_gap(month, end) + 1)),
            None => ("active", gap, None),
        };
        out.push(LoanRow {
            id: loan.id,
            loan_type: loan.loan_type.clone(),
            lender: loan.lender.clone(),
            monthly_emi: loan.monthly_emi.to_string(),
            status: status.to_string(),
            elapsed_months: elapsed,
            remaining_months: remaining,
            balance: loan_balance_at(&loan, month).to_string(),
        });
    }
    Ok(out)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let owner = sub.get_one::<String>("owner").unwrap();
    let month = match sub.get_one::<String>("month") {
        Some(s) => parse_month(s)?,
        None => current_month(),
    };
    let rows = loan_rows(conn, owner, month)?;
    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let data = rows
            .into_iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.loan_type,
                    r.lender,
                    r.monthly_emi,
                    r.status,
                    r.elapsed_months.to_string(),
                    r.remaining_months
                        .map(|v| v.to_string())
                        .unwrap_or_else(|| "open".into()),
                    r.balance,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Type", "Lender", "EMI", "Status", "Elapsed", "Remaining", "Balance"],
                data
            )
        );
    }
    Ok(())
}
