// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::amortization::amortize;
use crate::engine::period::Month;
use crate::engine::source::RecordSource;
use crate::models::{CreditCardAccount, Owner};
use crate::store::SqliteSource;
use crate::utils::{
    current_month, id_for_card, id_for_owner, maybe_print_json, parse_decimal, parse_month,
    pretty_table,
};
use anyhow::{Context, Result, bail};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add_card(conn, sub)?,
        Some(("list", sub)) => list_cards(conn, sub)?,
        Some(("rm", sub)) => {
            let owner = sub.get_one::<String>("owner").unwrap();
            let name = sub.get_one::<String>("name").unwrap();
            let owner_id = id_for_owner(conn, owner)?;
            conn.execute(
                "DELETE FROM cards WHERE owner_id=?1 AND card_name=?2",
                params![owner_id, name],
            )?;
            println!("Removed card '{}'", name);
        }
        Some(("entry", sub)) => match sub.subcommand() {
            Some(("add", sub)) => add_entry(conn, sub)?,
            Some(("list", sub)) => list_entries(conn, sub)?,
            _ => {}
        },
        Some(("schedule", sub)) => schedule(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add_card(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = sub.get_one::<String>("owner").unwrap();
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let issuer = sub.get_one::<String>("issuer").unwrap().trim().to_string();
    let limit = parse_decimal(sub.get_one::<String>("limit").unwrap())?;
    let rate = parse_decimal(sub.get_one::<String>("rate").unwrap())?;
    let reward = parse_decimal(sub.get_one::<String>("reward").unwrap())?;

    if limit <= Decimal::ZERO {
        bail!("Credit limit must be positive");
    }
    if rate < Decimal::ZERO {
        bail!("Interest rate cannot be negative");
    }

    let owner_id = id_for_owner(conn, owner)?;
    conn.execute(
        "INSERT INTO cards(owner_id, card_name, issuer, credit_limit, emi_interest_rate, reward_percent)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            owner_id,
            name,
            issuer,
            limit.to_string(),
            rate.to_string(),
            reward.to_string()
        ],
    )?;
    println!("Added card '{}' ({}, limit {})", name, issuer, limit);
    Ok(())
}

fn owner_record(conn: &Connection, name: &str) -> Result<Owner> {
    let id = id_for_owner(conn, name)?;
    Ok(Owner {
        id,
        name: name.to_string(),
    })
}

fn cards_for(conn: &Connection, owner_id: i64) -> Result<Vec<CreditCardAccount>> {
    let mut stmt = conn.prepare(
        "SELECT id, owner_id, card_name, issuer, credit_limit, emi_interest_rate, reward_percent
         FROM cards WHERE owner_id=?1 ORDER BY card_name, id",
    )?;
    let rows = stmt.query_map(params![owner_id], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, i64>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, String>(5)?,
            r.get::<_, String>(6)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, owner_id, card_name, issuer, limit, rate, reward) = row?;
        out.push(CreditCardAccount {
            id,
            owner_id,
            card_name,
            issuer,
            credit_limit: parse_decimal(&limit)?,
            emi_interest_rate: parse_decimal(&rate)?,
            reward_percent: parse_decimal(&reward)?,
        });
    }
    Ok(out)
}

#[derive(Serialize)]
struct CardRow {
    card_name: String,
    issuer: String,
    credit_limit: String,
    outstanding: String,
    utilization_percent: String,
    monthly_interest_estimate: String,
    reward_percent: String,
    active_entries: usize,
}

fn list_cards(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let owner = sub.get_one::<String>("owner").unwrap();
    let month = match sub.get_one::<String>("month") {
        Some(s) => parse_month(s)?,
        None => current_month(),
    };

    let owner_rec = owner_record(conn, owner)?;
    let src = SqliteSource::new(conn);
    let entries = src.card_entries(&owner_rec)?;

    let mut rows = Vec::new();
    for card in cards_for(conn, owner_rec.id)? {
        let mut outstanding = Decimal::ZERO;
        let mut active = 0usize;
        for entry in entries.iter().filter(|e| e.card_id == card.id) {
            let sched = amortize(entry, month)?;
            outstanding += sched.outstanding_balance;
            if !sched.closed {
                active += 1;
            }
        }
        let utilization = if card.credit_limit > Decimal::ZERO {
            (outstanding / card.credit_limit * Decimal::from(100)).round_dp(1)
        } else {
            Decimal::ZERO
        };
        rows.push(CardRow {
            monthly_interest_estimate: card.monthly_interest_estimate(outstanding).to_string(),
            reward_percent: card.reward_percent.to_string(),
            card_name: card.card_name,
            issuer: card.issuer,
            credit_limit: card.credit_limit.to_string(),
            outstanding: outstanding.to_string(),
            utilization_percent: utilization.to_string(),
            active_entries: active,
        });
    }

    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let data = rows
            .into_iter()
            .map(|r| {
                vec![
                    r.card_name,
                    r.issuer,
                    r.credit_limit,
                    r.outstanding,
                    r.utilization_percent,
                    r.monthly_interest_estimate,
                    r.reward_percent,
                    r.active_entries.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "Card", "Issuer", "Limit", "Outstanding", "Util %", "Interest/mo", "Reward %",
                    "Active",
                ],
                data
            )
        );
    }
    Ok(())
}

fn add_entry(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = sub.get_one::<String>("owner").unwrap();
    let card = sub.get_one::<String>("card").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let tenure = *sub.get_one::<u32>("tenure").unwrap();
    let start = parse_month(sub.get_one::<String>("start").unwrap())?;
    let note = sub.get_one::<String>("note").unwrap().trim().to_string();

    if amount < Decimal::ZERO {
        bail!("Financed amount cannot be negative");
    }
    if tenure == 0 {
        bail!("Tenure must be at least one month");
    }

    let owner_id = id_for_owner(conn, owner)?;
    let card_id = id_for_card(conn, owner_id, card)?;
    conn.execute(
        "INSERT INTO card_entries(card_id, start_month, amount, tenure_months, description)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![card_id, start.to_string(), amount.to_string(), tenure, note],
    )?;
    println!(
        "Added EMI entry of {} over {} months on '{}' from {}",
        amount, tenure, card, start
    );
    Ok(())
}

#[derive(Serialize)]
struct EntryRow {
    id: i64,
    card_name: String,
    description: String,
    amount: String,
    tenure_months: u32,
    start_month: Month,
    elapsed: u32,
    remaining: u32,
    per_month: String,
    outstanding: String,
    closed: bool,
}

fn list_entries(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let owner = sub.get_one::<String>("owner").unwrap();
    let month = match sub.get_one::<String>("month") {
        Some(s) => parse_month(s)?,
        None => current_month(),
    };

    let owner_rec = owner_record(conn, owner)?;
    let src = SqliteSource::new(conn);
    let mut rows = Vec::new();
    for entry in src.card_entries(&owner_rec)? {
        let sched = amortize(&entry, month)?;
        rows.push(EntryRow {
            id: entry.id,
            card_name: entry.card_name,
            description: entry.description,
            amount: entry.amount.to_string(),
            tenure_months: entry.tenure_months,
            start_month: entry.start_month,
            elapsed: sched.elapsed_months,
            remaining: sched.remaining_tenure,
            per_month: sched.per_month_amount.to_string(),
            outstanding: sched.outstanding_balance.to_string(),
            closed: sched.closed,
        });
    }

    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let data = rows
            .into_iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.card_name,
                    r.description,
                    r.amount,
                    r.tenure_months.to_string(),
                    r.start_month.to_string(),
                    r.elapsed.to_string(),
                    r.remaining.to_string(),
                    r.per_month,
                    r.outstanding,
                    if r.closed { "yes".into() } else { "no".into() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "Id", "Card", "Note", "Amount", "Tenure", "Start", "Elapsed", "Remaining",
                    "EMI", "Outstanding", "Closed",
                ],
                data
            )
        );
    }
    Ok(())
}

fn schedule(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let owner = sub.get_one::<String>("owner").unwrap();
    let entry_id = *sub.get_one::<i64>("entry").unwrap();
    let month = match sub.get_one::<String>("month") {
        Some(s) => parse_month(s)?,
        None => current_month(),
    };

    let owner_rec = owner_record(conn, owner)?;
    let src = SqliteSource::new(conn);
    let entry = src
        .card_entries(&owner_rec)?
        .into_iter()
        .find(|e| e.id == entry_id)
        .with_context(|| format!("Entry #{} not found for '{}'", entry_id, owner))?;

    let sched = amortize(&entry, month)?;
    if !maybe_print_json(json_flag, jsonl_flag, &sched)? {
        println!(
            "{}",
            pretty_table(
                &[
                    "Month", "Elapsed", "Remaining", "EMI", "Last EMI", "Due", "Outstanding",
                    "Closed",
                ],
                vec![vec![
                    month.to_string(),
                    sched.elapsed_months.to_string(),
                    sched.remaining_tenure.to_string(),
                    sched.per_month_amount.to_string(),
                    sched.last_installment.to_string(),
                    sched.due_this_month.to_string(),
                    sched.outstanding_balance.to_string(),
                    if sched.closed { "yes".into() } else { "no".into() },
                ]],
            )
        );
    }
    Ok(())
}
