// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine;
use crate::store::SqliteSource;
use crate::utils::{current_month, parse_month};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("obligations", sub)) => export_obligations(conn, sub),
        Some(("analytics", sub)) => export_analytics(conn, sub),
        _ => Ok(()),
    }
}

fn export_obligations(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = sub.get_one::<String>("owner").unwrap();
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let month = match sub.get_one::<String>("month") {
        Some(s) => parse_month(s)?,
        None => current_month(),
    };

    let src = SqliteSource::new(conn);
    let rows = engine::compute_obligations(&src, owner, month)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "due_date",
                "kind",
                "category",
                "amount_due",
                "remaining_balance",
                "actionable",
            ])?;
            for o in rows {
                wtr.write_record([
                    o.due_date.to_string(),
                    o.kind.label().to_string(),
                    o.category,
                    o.amount_due.to_string(),
                    o.remaining_balance.to_string(),
                    o.actionable.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&rows)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported obligations for {} to {}", month, out);
    Ok(())
}

fn export_analytics(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = sub.get_one::<String>("owner").unwrap();
    let out = sub.get_one::<String>("out").unwrap();
    let window = crate::commands::analytics::window_from_args(sub)?;

    let src = SqliteSource::new(conn);
    let bundle = engine::compute_analytics(&src, owner, window)?;
    std::fs::write(out, serde_json::to_string_pretty(&bundle)?)?;
    println!("Exported analytics to {}", out);
    Ok(())
}
