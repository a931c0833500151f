// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine;
use crate::engine::analytics::Series;
use crate::engine::period::MonthWindow;
use crate::store::SqliteSource;
use crate::utils::{current_month, maybe_print_json, parse_month, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn window_from_args(m: &clap::ArgMatches) -> Result<MonthWindow> {
    let first = match m.get_one::<String>("start") {
        Some(s) => parse_month(s)?,
        None => current_month(),
    };
    let months = *m.get_one::<u32>("months").unwrap();
    Ok(MonthWindow::new(first, months))
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let owner = m.get_one::<String>("owner").unwrap();
    let window = window_from_args(m)?;

    let src = SqliteSource::new(conn);
    let bundle = engine::compute_analytics(&src, owner, window)?;

    if !maybe_print_json(json_flag, jsonl_flag, &bundle)? {
        print_series("Debt mix", &bundle.distribution);
        print_series("Cashflow (net)", &bundle.cashflow);
        print_series("Remaining balance", &bundle.timeline);
    }
    Ok(())
}

fn print_series(title: &str, series: &Series) {
    let data = series
        .labels
        .iter()
        .zip(series.values.iter())
        .map(|(label, value)| vec![label.clone(), format!("{:.2}", value)])
        .collect();
    println!("{}", pretty_table(&[title, "Value"], data));
}
