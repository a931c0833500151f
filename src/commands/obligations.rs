// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine;
use crate::store::SqliteSource;
use crate::utils::{current_month, maybe_print_json, parse_month, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let owner = m.get_one::<String>("owner").unwrap();
    let month = match m.get_one::<String>("month") {
        Some(s) => parse_month(s)?,
        None => current_month(),
    };

    let src = SqliteSource::new(conn);
    let rows = engine::compute_obligations(&src, owner, month)?;

    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let total: Decimal = rows.iter().map(|o| o.amount_due).sum();
        let data = rows
            .iter()
            .map(|o| {
                vec![
                    o.due_date.to_string(),
                    o.kind.label().to_string(),
                    o.category.clone(),
                    o.amount_due.to_string(),
                    o.remaining_balance.to_string(),
                    if o.actionable { "yes".into() } else { "no".into() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Due", "Kind", "Category", "Amount", "Remaining", "Actionable"],
                data
            )
        );
        println!("Total due in {}: {}", month, total);
    }
    Ok(())
}
