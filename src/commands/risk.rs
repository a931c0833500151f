// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine;
use crate::engine::period::Month;
use crate::engine::source::RecordSource;
use crate::store::SqliteSource;
use crate::utils::{current_month, id_for_owner, maybe_print_json, parse_month, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

use crate::models::Owner;

#[derive(Serialize)]
struct RiskReport {
    owner: String,
    month: Month,
    ratio: f64,
    tier: String,
    message: String,
    debt_free_by: Option<Month>,
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let owner = m.get_one::<String>("owner").unwrap();
    let month = match m.get_one::<String>("month") {
        Some(s) => parse_month(s)?,
        None => current_month(),
    };

    let src = SqliteSource::new(conn);
    let assessment = engine::compute_risk(&src, owner, month)?;

    let report = RiskReport {
        owner: owner.clone(),
        month,
        ratio: assessment.ratio,
        tier: assessment.tier.label().to_string(),
        message: assessment.message.to_string(),
        debt_free_by: debt_free_month(conn, owner)?,
    };

    if !maybe_print_json(json_flag, jsonl_flag, &report)? {
        let ratio = if report.ratio.is_infinite() {
            "inf".to_string()
        } else {
            format!("{:.2}", report.ratio)
        };
        let horizon = report
            .debt_free_by
            .map(|m| m.label())
            .unwrap_or_else(|| "no dated debt".into());
        println!(
            "{}",
            pretty_table(
                &["Owner", "Month", "Burden ratio", "Tier", "Debt-free by"],
                vec![vec![
                    report.owner,
                    report.month.to_string(),
                    ratio,
                    report.tier,
                    horizon,
                ]],
            )
        );
        println!("{}", report.message);
    }
    Ok(())
}

/// The last month any currently-known dated debt is still open: the
/// latest loan end month or card entry's final installment month.
fn debt_free_month(conn: &Connection, owner: &str) -> Result<Option<Month>> {
    let src = SqliteSource::new(conn);
    let owner = Owner {
        id: id_for_owner(conn, owner)?,
        name: owner.to_string(),
    };
    let mut latest: Option<Month> = None;
    let mut push = |m: Month| {
        latest = Some(match latest {
            Some(cur) if cur >= m => cur,
            _ => m,
        });
    };
    for loan in src.loans(&owner)? {
        if let Some(end) = loan.end_date {
            push(Month::from_date(end));
        }
    }
    for entry in src.card_entries(&owner)? {
        push(entry.start_month.offset(i64::from(entry.tenure_months) - 1));
    }
    Ok(latest)
}
