// Copyright (c) 2026 Bahikhata.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use bahikhata::errors::LedgerError;
use bahikhata::models::NewTransaction;
use bahikhata::{db, fy, ledger, registry};
use chrono::NaiveDate;
use rusqlite::Connection;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

#[test]
fn group_names_are_unique_and_nonempty() {
    let mut conn = setup();
    let id = registry::add_group(&conn, " Assets ").unwrap();
    assert!(matches!(
        registry::add_group(&conn, "Assets"),
        Err(LedgerError::Duplicate { .. })
    ));
    assert!(matches!(
        registry::add_group(&conn, "   "),
        Err(LedgerError::EmptyName)
    ));

    let other = registry::add_group(&conn, "Income").unwrap();
    assert!(matches!(
        registry::rename_group(&mut conn, other, "Assets"),
        Err(LedgerError::Duplicate { .. })
    ));
    registry::rename_group(&mut conn, id, "Fixed Assets").unwrap();
    let names: Vec<String> = registry::list_groups(&conn)
        .unwrap()
        .into_iter()
        .map(|g| g.name)
        .collect();
    assert_eq!(names, vec!["Fixed Assets", "Income"]);
}

#[test]
fn group_delete_blocked_while_accounts_reference_it() {
    let conn = setup();
    let gid = registry::add_group(&conn, "Parties").unwrap();
    let acc = registry::add_account(&conn, "Rahul Kumar", Some(gid), None, None).unwrap();
    assert!(matches!(
        registry::remove_group(&conn, gid),
        Err(LedgerError::HasDependents { .. })
    ));
    let mut conn = conn;
    registry::remove_account(&mut conn, acc).unwrap();
    registry::remove_group(&conn, gid).unwrap();
}

#[test]
fn account_duplicate_is_case_sensitive_on_trimmed_name() {
    let conn = setup();
    registry::add_account(&conn, " Rahul ", None, None, None).unwrap();
    assert!(matches!(
        registry::add_account(&conn, "Rahul", None, None, None),
        Err(LedgerError::Duplicate { .. })
    ));
    // different case is a different account
    registry::add_account(&conn, "rahul", None, None, None).unwrap();
}

#[test]
fn update_excludes_self_from_duplicate_check() {
    let mut conn = setup();
    let a = registry::add_account(&conn, "Rahul", None, None, None).unwrap();
    registry::add_account(&conn, "Mohan", None, None, None).unwrap();

    // same name, new phone: allowed
    registry::update_account(&mut conn, a, "Rahul", None, Some("9876543210"), None).unwrap();
    assert!(matches!(
        registry::update_account(&mut conn, a, "Mohan", None, None, None),
        Err(LedgerError::Duplicate { .. })
    ));
    assert!(matches!(
        registry::update_account(&mut conn, a, "  ", None, None, None),
        Err(LedgerError::EmptyName)
    ));
}

#[test]
fn listing_joins_group_name_live() {
    let mut conn = setup();
    let gid = registry::add_group(&conn, "Parties").unwrap();
    registry::add_account(&conn, "Rahul", Some(gid), None, None).unwrap();
    registry::rename_group(&mut conn, gid, "Customers").unwrap();
    let accounts = registry::list_accounts(&conn).unwrap();
    assert_eq!(accounts[0].group_name.as_deref(), Some("Customers"));
}

#[test]
fn toggle_hides_from_active_listing_only() {
    let conn = setup();
    let a = registry::add_account(&conn, "Rahul", None, None, None).unwrap();
    registry::set_account_active(&conn, a, false).unwrap();
    assert!(registry::active_accounts(&conn).unwrap().is_empty());
    assert_eq!(registry::list_accounts(&conn).unwrap().len(), 1);
    registry::set_account_active(&conn, a, true).unwrap();
    assert_eq!(registry::active_accounts(&conn).unwrap().len(), 1);
}

#[test]
fn account_delete_guard_follows_transactions() {
    let mut conn = setup();
    db::seed_defaults(&mut conn).unwrap();
    let year = fy::add(&conn, "2026-27").unwrap();
    let rahul = registry::add_account(&conn, "Rahul", None, None, None).unwrap();
    let cash = registry::account_id_by_name(&conn, "Cash").unwrap().unwrap();

    let txn = ledger::add_transaction(
        &conn,
        &NewTransaction {
            date: NaiveDate::from_ymd_opt(2026, 4, 10).unwrap(),
            from_account_id: rahul,
            to_account_id: cash,
            amount: "250".parse().unwrap(),
            note: None,
            financial_year_id: year,
            created_by: "test".into(),
        },
    )
    .unwrap();

    assert!(matches!(
        registry::remove_account(&mut conn, rahul),
        Err(LedgerError::HasDependents { .. })
    ));

    ledger::remove_transaction(&conn, txn).unwrap();
    registry::remove_account(&mut conn, rahul).unwrap();
    assert!(registry::account_id_by_name(&conn, "Rahul").unwrap().is_none());
}

#[test]
fn missing_ids_are_not_found() {
    let mut conn = setup();
    assert!(matches!(
        registry::set_account_active(&conn, 42, true),
        Err(LedgerError::NotFound { .. })
    ));
    assert!(matches!(
        registry::remove_account(&mut conn, 42),
        Err(LedgerError::NotFound { .. })
    ));
    assert!(matches!(
        registry::remove_group(&conn, 42),
        Err(LedgerError::NotFound { .. })
    ));
}
