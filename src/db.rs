// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Debtmeter", "debtmeter"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("debtmeter.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    migrate_legacy_spends(&mut conn)?;
    Ok(conn)
}

fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS owners(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS incomes(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        owner_id INTEGER NOT NULL UNIQUE,
        monthly_salary TEXT NOT NULL DEFAULT '0',
        other_income TEXT NOT NULL DEFAULT '0',
        effective TEXT NOT NULL,
        FOREIGN KEY(owner_id) REFERENCES owners(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS loans(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        owner_id INTEGER NOT NULL,
        loan_type TEXT NOT NULL,
        lender TEXT NOT NULL DEFAULT '',
        monthly_emi TEXT NOT NULL,
        start_date TEXT NOT NULL,
        end_date TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(owner_id) REFERENCES owners(id) ON DELETE CASCADE
    );
    CREATE INDEX IF NOT EXISTS idx_loans_owner ON loans(owner_id);

    CREATE TABLE IF NOT EXISTS cards(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        owner_id INTEGER NOT NULL,
        card_name TEXT NOT NULL,
        issuer TEXT NOT NULL DEFAULT '',
        credit_limit TEXT NOT NULL,
        emi_interest_rate TEXT NOT NULL DEFAULT '0',
        reward_percent TEXT NOT NULL DEFAULT '0',
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        UNIQUE(owner_id, card_name),
        FOREIGN KEY(owner_id) REFERENCES owners(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS card_entries(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        card_id INTEGER NOT NULL,
        start_month TEXT NOT NULL,
        amount TEXT NOT NULL,
        tenure_months INTEGER NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(card_id) REFERENCES cards(id) ON DELETE CASCADE
    );
    CREATE INDEX IF NOT EXISTS idx_card_entries_card ON card_entries(card_id);

    CREATE TABLE IF NOT EXISTS budgets(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        owner_id INTEGER NOT NULL,
        month TEXT NOT NULL,
        category TEXT NOT NULL,
        amount TEXT NOT NULL,
        UNIQUE(owner_id, month, category),
        FOREIGN KEY(owner_id) REFERENCES owners(id) ON DELETE CASCADE
    );
    "#,
    )?;
    Ok(())
}

/// One-time migration of the deprecated statement-spend model: each
/// legacy row becomes a tenure-1 EMI entry for its remaining unpaid
/// amount, then the legacy table is dropped. The engine never sees the
/// old representation.
fn migrate_legacy_spends(conn: &mut Connection) -> Result<()> {
    let present: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type='table' AND name='card_spends'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    if present.is_none() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(
            "SELECT owner_id, card_name, substr(statement_month,1,7), total_spend, amount_paid
             FROM card_spends ORDER BY id",
        )?;
        let mut rows = stmt.query([])?;
        while let Some(r) = rows.next()? {
            let owner_id: i64 = r.get(0)?;
            let card_name: String = r.get(1)?;
            let month: String = r.get(2)?;
            let total_spend: i64 = r.get(3)?;
            let amount_paid: i64 = r.get(4)?;
            let outstanding = (total_spend - amount_paid).max(0);
            if outstanding == 0 {
                continue;
            }
            tx.execute(
                "INSERT OR IGNORE INTO cards(owner_id, card_name, credit_limit) VALUES (?1, ?2, '0')",
                params![owner_id, card_name],
            )?;
            let card_id: i64 = tx.query_row(
                "SELECT id FROM cards WHERE owner_id=?1 AND card_name=?2",
                params![owner_id, card_name],
                |r| r.get(0),
            )?;
            tx.execute(
                "INSERT INTO card_entries(card_id, start_month, amount, tenure_months, description)
                 VALUES (?1, ?2, ?3, 1, 'migrated statement spend')",
                params![card_id, month, outstanding.to_string()],
            )?;
        }
    }
    tx.execute("DROP TABLE card_spends", [])?;
    tx.commit()?;
    Ok(())
}
