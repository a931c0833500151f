// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use debtmeter::cli;
use debtmeter::commands::budgets;
use debtmeter::engine;
use debtmeter::engine::budget::{compare, overspend_total};
use debtmeter::engine::period::Month;
use debtmeter::models::Budget;
use debtmeter::store::SqliteSource;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn budget(category: &str, amount: i64) -> Budget {
    Budget {
        id: 1,
        owner_id: 1,
        month: Month::new(2025, 8).unwrap(),
        category: category.into(),
        amount: Decimal::from(amount),
    }
}

#[test]
fn equality_is_not_overspend() {
    let lines = compare(
        &[budget("Car Loan", 5000)],
        &[("Car Loan".into(), Decimal::from(5000))],
    );
    assert_eq!(lines.len(), 1);
    assert!(!lines[0].overspent);
    assert_eq!(lines[0].delta, Decimal::ZERO);
}

#[test]
fn actual_above_planned_is_overspend() {
    let lines = compare(
        &[budget("Car Loan", 5000)],
        &[("Car Loan".into(), Decimal::from(5200))],
    );
    assert!(lines[0].overspent);
    assert_eq!(lines[0].delta, Decimal::from(200));
}

#[test]
fn unbudgeted_category_reports_zero_planned() {
    let lines = compare(&[], &[("Visa Gold".into(), Decimal::from(900))]);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].planned, Decimal::ZERO);
    assert!(lines[0].overspent);
}

#[test]
fn overspend_total_sums_only_positive_deltas() {
    let lines = compare(
        &[budget("Car Loan", 5000), budget("Visa Gold", 2000)],
        &[
            ("Car Loan".into(), Decimal::from(5600)),
            ("Visa Gold".into(), Decimal::from(1000)),
        ],
    );
    assert_eq!(overspend_total(&lines), Decimal::from(600));
}

#[test]
fn budgeted_category_with_no_actual_is_not_overspent() {
    let lines = compare(&[budget("Groceries", 4000)], &[]);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].actual, Decimal::ZERO);
    assert!(!lines[0].overspent);
}

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        PRAGMA foreign_keys = ON;
        CREATE TABLE owners(id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL UNIQUE, created_at TEXT NOT NULL DEFAULT (datetime('now')));
        CREATE TABLE incomes(id INTEGER PRIMARY KEY AUTOINCREMENT, owner_id INTEGER NOT NULL UNIQUE, monthly_salary TEXT NOT NULL DEFAULT '0', other_income TEXT NOT NULL DEFAULT '0', effective TEXT NOT NULL);
        CREATE TABLE loans(id INTEGER PRIMARY KEY AUTOINCREMENT, owner_id INTEGER NOT NULL, loan_type TEXT NOT NULL, lender TEXT NOT NULL DEFAULT '', monthly_emi TEXT NOT NULL, start_date TEXT NOT NULL, end_date TEXT, created_at TEXT NOT NULL DEFAULT (datetime('now')));
        CREATE TABLE cards(id INTEGER PRIMARY KEY AUTOINCREMENT, owner_id INTEGER NOT NULL, card_name TEXT NOT NULL, issuer TEXT NOT NULL DEFAULT '', credit_limit TEXT NOT NULL, emi_interest_rate TEXT NOT NULL DEFAULT '0', reward_percent TEXT NOT NULL DEFAULT '0', UNIQUE(owner_id, card_name));
        CREATE TABLE card_entries(id INTEGER PRIMARY KEY AUTOINCREMENT, card_id INTEGER NOT NULL, start_month TEXT NOT NULL, amount TEXT NOT NULL, tenure_months INTEGER NOT NULL, description TEXT NOT NULL DEFAULT '');
        CREATE TABLE budgets(id INTEGER PRIMARY KEY AUTOINCREMENT, owner_id INTEGER NOT NULL, month TEXT NOT NULL, category TEXT NOT NULL, amount TEXT NOT NULL, UNIQUE(owner_id, month, category));
        "#,
    )
    .unwrap();
    conn.execute("INSERT INTO owners(name) VALUES('asha')", [])
        .unwrap();
    conn
}

#[test]
fn budget_set_trims_inputs() {
    let conn = setup();
    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "debtmeter",
        "budget",
        "set",
        "--owner",
        "asha",
        "--month",
        " 2025-08 ",
        "--category",
        " Car Loan ",
        "--amount",
        " 5000 ",
    ]);
    if let Some(("budget", budget_m)) = matches.subcommand() {
        budgets::handle(&conn, budget_m).unwrap();
    } else {
        panic!("budget command not parsed");
    }

    let amount: String = conn
        .query_row(
            "SELECT amount FROM budgets WHERE owner_id=1 AND month='2025-08' AND category='Car Loan'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(amount, "5000");
}

#[test]
fn comparison_joins_budgets_to_obligation_totals() {
    let conn = setup();
    conn.execute(
        "INSERT INTO loans(owner_id, loan_type, lender, monthly_emi, start_date, end_date)
         VALUES (1,'Car Loan','Axis Bank','6000','2025-01-10','2026-01-10')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO budgets(owner_id, month, category, amount) VALUES (1,'2025-08','Car Loan','5000')",
        [],
    )
    .unwrap();

    let src = SqliteSource::new(&conn);
    let lines =
        engine::compute_budget_comparison(&src, "asha", Month::new(2025, 8).unwrap()).unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].planned, Decimal::from(5000));
    assert_eq!(lines[0].actual, Decimal::from(6000));
    assert!(lines[0].overspent);
    assert_eq!(overspend_total(&lines), Decimal::from(1000));
}

#[test]
fn risk_escalates_when_budgets_overspend() {
    let conn = setup();
    conn.execute(
        "INSERT INTO incomes(owner_id, monthly_salary, other_income, effective)
         VALUES (1,'50000','0','2024-01-01')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO loans(owner_id, loan_type, lender, monthly_emi, start_date, end_date)
         VALUES (1,'Car Loan','Axis Bank','12000','2025-01-10','2026-01-10')",
        [],
    )
    .unwrap();
    // planned below the EMI: 500 overspend escalates Safe to Watch
    conn.execute(
        "INSERT INTO budgets(owner_id, month, category, amount) VALUES (1,'2025-08','Car Loan','11500')",
        [],
    )
    .unwrap();

    let src = SqliteSource::new(&conn);
    let a = engine::compute_risk(&src, "asha", Month::new(2025, 8).unwrap()).unwrap();
    assert_eq!(a.tier, debtmeter::engine::risk::RiskTier::Watch);
}
