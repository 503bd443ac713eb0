// Copyright (c) 2026 Bahikhata.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use bahikhata::engine::{self, SettlementState};
use bahikhata::models::TransactionRow;
use bahikhata::utils::{display_date, fmt_inr, percent_encode, whatsapp_url};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;

fn row(id: i64, date: &str, from: (i64, &str), to: (i64, &str), amount: &str) -> TransactionRow {
    TransactionRow {
        id,
        date: NaiveDate::from_str(date).unwrap(),
        from_account_id: from.0,
        from_account: from.1.to_string(),
        to_account_id: to.0,
        to_account: to.1.to_string(),
        amount: Decimal::from_str(amount).unwrap(),
        note: None,
    }
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::from_str(s).unwrap()
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

#[test]
fn net_balance_is_in_minus_out() {
    let rows = vec![
        row(1, "2026-04-10", (1, "Sales Income"), (2, "Cash"), "5000"),
        row(2, "2026-04-12", (2, "Cash"), (3, "Personal Expense"), "1200"),
        row(3, "2026-04-15", (2, "Cash"), (4, "Bank"), "800.50"),
    ];
    let s = engine::statement(2, "Cash", &rows, d("2026-04-01"), d("2026-04-30"), None);
    assert_eq!(s.money_in, dec("5000"));
    assert_eq!(s.money_out, dec("2000.50"));
    assert_eq!(s.net_balance, s.money_in - s.money_out);
}

#[test]
fn classification_boundaries() {
    assert_eq!(engine::classify(Decimal::ZERO), SettlementState::Settled);
    assert_eq!(engine::classify(dec("0.01")), SettlementState::OwesYou);
    assert_eq!(engine::classify(dec("-0.01")), SettlementState::YouOwe);
}

#[test]
fn range_bounds_are_inclusive() {
    let rows = vec![
        row(1, "2026-03-31", (1, "A"), (2, "B"), "1"),
        row(2, "2026-04-01", (1, "A"), (2, "B"), "10"),
        row(3, "2026-04-30", (1, "A"), (2, "B"), "100"),
        row(4, "2026-05-01", (1, "A"), (2, "B"), "1000"),
    ];
    // rows dated exactly on the bounds count; one day outside does not
    let s = engine::statement(2, "B", &rows, d("2026-04-01"), d("2026-04-30"), None);
    assert_eq!(s.money_in, dec("110"));
}

#[test]
fn opening_balance_feeds_net() {
    let rows = vec![row(1, "2026-04-10", (1, "A"), (2, "B"), "100")];
    let s = engine::statement(
        2,
        "B",
        &rows,
        d("2026-04-01"),
        d("2026-04-30"),
        Some(dec("-150")),
    );
    assert_eq!(s.net_balance, dec("-50"));
    assert_eq!(s.state, SettlementState::YouOwe);
}

#[test]
fn subject_on_both_sides_counts_both() {
    let rows = vec![
        row(1, "2026-04-02", (1, "A"), (2, "B"), "300"),
        row(2, "2026-04-03", (2, "B"), (1, "A"), "100"),
    ];
    let s = engine::statement(2, "B", &rows, d("2026-04-01"), d("2026-04-30"), None);
    assert_eq!(s.money_in, dec("300"));
    assert_eq!(s.money_out, dec("100"));
}

#[test]
fn repeated_computation_is_exact() {
    let rows = vec![
        row(1, "2026-04-02", (1, "A"), (2, "B"), "0.10"),
        row(2, "2026-04-03", (1, "A"), (2, "B"), "0.20"),
        row(3, "2026-04-04", (2, "B"), (1, "A"), "0.30"),
    ];
    for _ in 0..100 {
        let s = engine::statement(2, "B", &rows, d("2026-04-01"), d("2026-04-30"), None);
        assert_eq!(s.net_balance, Decimal::ZERO);
        assert_eq!(s.state, SettlementState::Settled);
    }
}

#[test]
fn zero_sales_margin_is_zero() {
    let rows = vec![row(1, "2026-04-02", (2, "Cash"), (3, "Personal Expense"), "50")];
    let summary = engine::dashboard(&rows, &HashMap::new());
    assert_eq!(summary.total_sales, Decimal::ZERO);
    assert_eq!(summary.margin_pct, Decimal::ZERO);
    assert_eq!(summary.profit, dec("-50"));
}

#[test]
fn dashboard_sums_sales_from_source_side() {
    let rows = vec![
        row(1, "2026-04-02", (1, "Sales Income"), (2, "Cash"), "4000"),
        row(2, "2026-04-03", (1, "Sales Income"), (4, "Bank"), "1000"),
        row(3, "2026-04-04", (2, "Cash"), (3, "Personal Expense"), "2000"),
    ];
    let mut openings = HashMap::new();
    openings.insert("Cash".to_string(), dec("500"));
    let summary = engine::dashboard(&rows, &openings);
    assert_eq!(summary.total_sales, dec("5000"));
    assert_eq!(summary.total_expenses, dec("2000"));
    assert_eq!(summary.profit, dec("3000"));
    assert_eq!(summary.margin_pct, dec("60"));
    // cash: 500 opening + 4000 in - 2000 out
    assert_eq!(summary.cash, dec("2500"));
    assert_eq!(summary.bank, dec("1000"));
}

#[test]
fn messages_match_state_in_both_languages() {
    let rows = vec![row(1, "2026-04-10", (1, "Sales Income"), (2, "Cash"), "5000")];
    let s = engine::statement(2, "Cash", &rows, d("2026-04-01"), d("2026-04-30"), None);
    assert_eq!(s.state, SettlementState::OwesYou);
    assert!(s.message.contains("you will pay me"));
    assert!(s.message.contains("01-04-2026"));
    assert!(s.message_localized.contains("देंगे"));
    assert!(s.message_localized.contains("₹5,000.00"));

    let settled = engine::statement(9, "X", &[], d("2026-04-01"), d("2026-04-30"), None);
    assert!(settled.message.contains("settled"));
    assert!(settled.message_localized.contains("बराबर"));
}

#[test]
fn share_text_wraps_statement_message() {
    let s = engine::statement(
        2,
        "Rahul Kumar",
        &[row(1, "2026-04-10", (1, "Sales Income"), (2, "Rahul Kumar"), "750")],
        d("2026-04-01"),
        d("2026-04-30"),
        None,
    );
    let text = engine::statement_share_text(&s);
    assert!(text.contains("Statement for: Rahul Kumar"));
    assert!(text.contains(&s.message_localized));
    let url = whatsapp_url(&text);
    assert!(url.starts_with("https://wa.me/?text="));
    assert!(!url.contains(' '));
}

#[test]
fn inr_formatting_and_dates() {
    assert_eq!(fmt_inr(dec("1234567.5")), "₹12,34,567.50");
    assert_eq!(fmt_inr(dec("500")), "₹500.00");
    assert_eq!(fmt_inr(dec("-5000")), "-₹5,000.00");
    assert_eq!(display_date(d("2026-04-01")), "01-04-2026");
    assert_eq!(percent_encode("a b"), "a%20b");
    assert_eq!(percent_encode("₹5"), "%E2%82%B95");
}
