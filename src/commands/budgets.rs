// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine;
use crate::engine::budget::overspend_total;
use crate::store::SqliteSource;
use crate::utils::{
    current_month, id_for_owner, maybe_print_json, parse_decimal, parse_month, pretty_table,
};
use anyhow::{Result, bail};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("report", sub)) => report(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = sub.get_one::<String>("owner").unwrap();
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;
    let category = sub
        .get_one::<String>("category")
        .unwrap()
        .trim()
        .to_string();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    if amount < Decimal::ZERO {
        bail!("Budget amount cannot be negative");
    }
    let owner_id = id_for_owner(conn, owner)?;
    conn.execute(
        "INSERT INTO budgets(owner_id, month, category, amount) VALUES (?1,?2,?3,?4)
         ON CONFLICT(owner_id, month, category) DO UPDATE SET amount=excluded.amount",
        params![owner_id, month.to_string(), category, amount.to_string()],
    )?;
    println!("Budget set for {} / {} = {}", month, category, amount);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = sub.get_one::<String>("owner").unwrap();
    let owner_id = id_for_owner(conn, owner)?;
    let mut data = Vec::new();
    if let Some(month) = sub.get_one::<String>("month") {
        let month = parse_month(month)?;
        let mut stmt = conn.prepare(
            "SELECT month, category, amount FROM budgets
             WHERE owner_id=?1 AND month=?2 ORDER BY category",
        )?;
        let rows = stmt.query_map(params![owner_id, month.to_string()], |r| {
            Ok((
                r.get::<_, String>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
            ))
        })?;
        for row in rows {
            let (m, c, a) = row?;
            data.push(vec![m, c, a]);
        }
    } else {
        let mut stmt = conn.prepare(
            "SELECT month, category, amount FROM budgets
             WHERE owner_id=?1 ORDER BY month DESC, category",
        )?;
        let rows = stmt.query_map(params![owner_id], |r| {
            Ok((
                r.get::<_, String>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
            ))
        })?;
        for row in rows {
            let (m, c, a) = row?;
            data.push(vec![m, c, a]);
        }
    }
    println!("{}", pretty_table(&["Month", "Category", "Planned"], data));
    Ok(())
}

fn report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let owner = sub.get_one::<String>("owner").unwrap();
    let month = match sub.get_one::<String>("month") {
        Some(s) => parse_month(s)?,
        None => current_month(),
    };

    let src = SqliteSource::new(conn);
    let lines = engine::compute_budget_comparison(&src, owner, month)?;
    let overspend = overspend_total(&lines);

    if !maybe_print_json(json_flag, jsonl_flag, &lines)? {
        let data = lines
            .iter()
            .map(|l| {
                vec![
                    l.category.clone(),
                    l.planned.to_string(),
                    l.actual.to_string(),
                    l.delta.to_string(),
                    if l.overspent { "yes".into() } else { "no".into() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Planned", "Actual", "Delta", "Overspent"], data)
        );
        if overspend > Decimal::ZERO {
            println!("Overspending detected: {} over budget in {}", overspend, month);
        }
    }
    Ok(())
}
