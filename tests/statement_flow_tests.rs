// Copyright (c) 2026 Bahikhata.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use bahikhata::engine::{self, SettlementState};
use bahikhata::models::NewTransaction;
use bahikhata::{cli, commands, db, fy, ledger, registry};
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::collections::HashMap;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn sales_to_cash_statement_scenario() {
    let mut conn = setup();
    let year = fy::add(&conn, "2026-27").unwrap();
    fy::set_active(&mut conn, year).unwrap();

    let income = registry::add_group(&conn, "Income").unwrap();
    let assets = registry::add_group(&conn, "Assets").unwrap();
    let sales = registry::add_account(&conn, "Sales Income", Some(income), None, None).unwrap();
    let cash = registry::add_account(&conn, "Cash", Some(assets), None, None).unwrap();

    ledger::add_transaction(
        &conn,
        &NewTransaction {
            date: d(2026, 4, 10),
            from_account_id: sales,
            to_account_id: cash,
            amount: "5000".parse().unwrap(),
            note: Some("April sales".into()),
            financial_year_id: year,
            created_by: "test".into(),
        },
    )
    .unwrap();

    let rows = ledger::by_account(&conn, cash, d(2026, 4, 1), d(2026, 4, 30)).unwrap();
    let stmt = engine::statement(cash, "Cash", &rows, d(2026, 4, 1), d(2026, 4, 30), None);

    assert_eq!(stmt.money_in, Decimal::from(5000));
    assert_eq!(stmt.money_out, Decimal::ZERO);
    assert_eq!(stmt.net_balance, Decimal::from(5000));
    assert_eq!(stmt.state, SettlementState::OwesYou);
    assert_eq!(stmt.subject_account, "Cash");
}

#[test]
fn dashboard_over_stored_rows_matches_entry_conventions() {
    let mut conn = setup();
    db::seed_defaults(&mut conn).unwrap();
    let year = fy::add(&conn, "2026-27").unwrap();
    fy::set_active(&mut conn, year).unwrap();

    let cash = registry::account_id_by_name(&conn, "Cash").unwrap().unwrap();
    let bank = registry::account_id_by_name(&conn, "Bank").unwrap().unwrap();
    let sales = registry::account_id_by_name(&conn, "Sales Income").unwrap().unwrap();
    let expense = registry::account_id_by_name(&conn, "Personal Expense").unwrap().unwrap();

    let add = |from, to, amount: &str, day| {
        ledger::add_transaction(
            &conn,
            &NewTransaction {
                date: d(2026, 4, day),
                from_account_id: from,
                to_account_id: to,
                amount: amount.parse().unwrap(),
                note: None,
                financial_year_id: year,
                created_by: "test".into(),
            },
        )
        .unwrap()
    };
    add(sales, cash, "8000", 5); // sale received in cash
    add(sales, bank, "2000", 6); // sale received in bank
    add(cash, expense, "3000", 7); // expense paid from cash
    add(cash, bank, "1000", 8); // deposit

    ledger::set_opening_balance(&conn, cash, year, "500".parse().unwrap()).unwrap();

    let rows = ledger::by_year(&conn, year).unwrap();
    let openings: HashMap<String, Decimal> = ledger::opening_balances(&conn, year)
        .unwrap()
        .into_iter()
        .map(|b| (b.account_name, b.amount))
        .collect();
    let summary = engine::dashboard(&rows, &openings);

    assert_eq!(summary.total_sales, Decimal::from(10000));
    assert_eq!(summary.total_expenses, Decimal::from(3000));
    assert_eq!(summary.profit, Decimal::from(7000));
    assert_eq!(summary.margin_pct, Decimal::from(70));
    assert_eq!(summary.cash, Decimal::from(4500)); // 500 + 8000 - 3000 - 1000
    assert_eq!(summary.bank, Decimal::from(3000));
}

#[test]
fn tx_add_via_cli_matches() {
    let mut conn = setup();
    db::seed_defaults(&mut conn).unwrap();
    let year = fy::add(&conn, "2026-27").unwrap();
    fy::set_active(&mut conn, year).unwrap();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "bahikhata", "tx", "add", "--date", "2026-04-10", "--from", "Sales Income", "--to",
        "Cash", "--amount", "5000", "--note", "April sales",
    ]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        commands::transactions::handle(&conn, tx_m).unwrap();
    } else {
        panic!("no tx subcommand");
    }

    let rows = ledger::by_year(&conn, year).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].from_account, "Sales Income");
    assert_eq!(rows[0].amount, Decimal::from(5000));
    let stored = ledger::get_transaction(&conn, rows[0].id).unwrap();
    assert_eq!(stored.created_by, "cli");
}

#[test]
fn tx_list_limit_respected() {
    let mut conn = setup();
    db::seed_defaults(&mut conn).unwrap();
    let year = fy::add(&conn, "2026-27").unwrap();
    fy::set_active(&mut conn, year).unwrap();
    let cash = registry::account_id_by_name(&conn, "Cash").unwrap().unwrap();
    let bank = registry::account_id_by_name(&conn, "Bank").unwrap().unwrap();
    for day in 1..=3 {
        ledger::add_transaction(
            &conn,
            &NewTransaction {
                date: d(2026, 4, day),
                from_account_id: cash,
                to_account_id: bank,
                amount: "10".parse().unwrap(),
                note: None,
                financial_year_id: year,
                created_by: "test".into(),
            },
        )
        .unwrap();
    }
    let mut rows = ledger::by_year(&conn, year).unwrap();
    rows.truncate(2);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, d(2026, 4, 3));
}

#[test]
fn export_transactions_csv_via_cli() {
    let mut conn = setup();
    db::seed_defaults(&mut conn).unwrap();
    let year = fy::add(&conn, "2026-27").unwrap();
    fy::set_active(&mut conn, year).unwrap();
    let cash = registry::account_id_by_name(&conn, "Cash").unwrap().unwrap();
    let bank = registry::account_id_by_name(&conn, "Bank").unwrap().unwrap();
    ledger::add_transaction(
        &conn,
        &NewTransaction {
            date: d(2026, 4, 10),
            from_account_id: cash,
            to_account_id: bank,
            amount: "750.50".parse().unwrap(),
            note: Some("deposit".into()),
            financial_year_id: year,
            created_by: "test".into(),
        },
    )
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("ledger.csv");
    let out_str = out.to_str().unwrap().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "bahikhata",
        "export",
        "transactions",
        "--format",
        "csv",
        "--out",
        &out_str,
    ]);
    if let Some(("export", ex_m)) = matches.subcommand() {
        commands::exporter::handle(&conn, ex_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let body = std::fs::read_to_string(&out).unwrap();
    let mut lines = body.lines();
    assert_eq!(
        lines.next().unwrap(),
        "id,date,from_account,to_account,amount,note"
    );
    let row = lines.next().unwrap();
    assert!(row.contains("2026-04-10"));
    assert!(row.contains("Cash"));
    assert!(row.contains("Bank"));
    assert!(row.contains("750.50"));
}
