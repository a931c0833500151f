// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{id_for_owner, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{Result, bail};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = sub.get_one::<String>("owner").unwrap();
    let salary = parse_decimal(sub.get_one::<String>("salary").unwrap())?;
    let other = parse_decimal(sub.get_one::<String>("other").unwrap())?;
    if salary < Decimal::ZERO || other < Decimal::ZERO {
        bail!("Income amounts cannot be negative");
    }
    let effective = match sub.get_one::<String>("effective") {
        Some(s) => parse_date(s)?,
        None => chrono::Utc::now().date_naive(),
    };
    let owner_id = id_for_owner(conn, owner)?;
    conn.execute(
        "INSERT INTO incomes(owner_id, monthly_salary, other_income, effective)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(owner_id) DO UPDATE SET
             monthly_salary=excluded.monthly_salary,
             other_income=excluded.other_income,
             effective=excluded.effective",
        params![
            owner_id,
            salary.to_string(),
            other.to_string(),
            effective.to_string()
        ],
    )?;
    println!(
        "Income for '{}' set to {} (+{} other) from {}",
        owner, salary, other, effective
    );
    Ok(())
}

#[derive(Serialize)]
struct IncomeRow {
    owner: String,
    monthly_salary: String,
    other_income: String,
    total: String,
    effective: String,
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let owner = sub.get_one::<String>("owner").unwrap();
    let owner_id = id_for_owner(conn, owner)?;
    let row = conn.query_row(
        "SELECT monthly_salary, other_income, effective FROM incomes WHERE owner_id=?1",
        params![owner_id],
        |r| {
            Ok((
                r.get::<_, String>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
            ))
        },
    );
    let (salary_s, other_s, effective) = match row {
        Ok(v) => v,
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            println!("No income declared for '{}'", owner);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    let salary = parse_decimal(&salary_s)?;
    let other = parse_decimal(&other_s)?;
    let data = IncomeRow {
        owner: owner.clone(),
        monthly_salary: salary.to_string(),
        other_income: other.to_string(),
        total: (salary + other).to_string(),
        effective,
    };
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(
                &["Owner", "Salary", "Other", "Total", "Effective"],
                vec![vec![
                    data.owner,
                    data.monthly_salary,
                    data.other_income,
                    data.total,
                    data.effective,
                ]],
            )
        );
    }
    Ok(())
}
