// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim().to_string();
            conn.execute("INSERT INTO owners(name) VALUES (?1)", params![name])?;
            println!("Added owner '{}'", name);
        }
        Some(("list", _)) => {
            let mut stmt = conn.prepare("SELECT name, created_at FROM owners ORDER BY name")?;
            let rows = stmt.query_map([], |r| {
                Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?))
            })?;
            let mut data = Vec::new();
            for row in rows {
                let (n, cr) = row?;
                data.push(vec![n, cr]);
            }
            println!("{}", pretty_table(&["Name", "Created"], data));
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            conn.execute("DELETE FROM owners WHERE name=?1", params![name])?;
            println!("Removed owner '{}'", name);
        }
        _ => {}
    }
    Ok(())
}
