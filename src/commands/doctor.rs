// Copyright (c) 2026 Bahikhata.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Exactly one active financial year expected
    let active: i64 = conn.query_row(
        "SELECT COUNT(*) FROM financial_years WHERE is_active=1",
        [],
        |r| r.get(0),
    )?;
    if active != 1 {
        rows.push(vec![
            "active_year_count".into(),
            format!("{} active financial years", active),
        ]);
    }

    // 2) Transactions pointing at missing accounts
    let mut stmt = conn.prepare(
        "SELECT t.id FROM transactions t
         LEFT JOIN accounts a1 ON t.from_account_id=a1.id
         LEFT JOIN accounts a2 ON t.to_account_id=a2.id
         WHERE a1.id IS NULL OR a2.id IS NULL",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        rows.push(vec!["orphan_account_ref".into(), format!("transaction {}", id)]);
    }

    // 3) Self-transfers that slipped past entry validation
    let mut stmt2 =
        conn.prepare("SELECT id FROM transactions WHERE from_account_id=to_account_id")?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: i64 = r.get(0)?;
        rows.push(vec!["self_transfer".into(), format!("transaction {}", id)]);
    }

    // 4) Non-positive amounts
    let mut stmt3 =
        conn.prepare("SELECT id, amount FROM transactions WHERE CAST(amount AS REAL) <= 0")?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let id: i64 = r.get(0)?;
        let amt: String = r.get(1)?;
        rows.push(vec![
            "non_positive_amount".into(),
            format!("transaction {} ({})", id, amt),
        ]);
    }

    // 5) Opening balances for missing years or accounts
    let mut stmt4 = conn.prepare(
        "SELECT ob.account_id, ob.financial_year_id FROM opening_balances ob
         LEFT JOIN accounts a ON ob.account_id=a.id
         LEFT JOIN financial_years y ON ob.financial_year_id=y.id
         WHERE a.id IS NULL OR y.id IS NULL",
    )?;
    let mut cur4 = stmt4.query([])?;
    while let Some(r) = cur4.next()? {
        let acc: i64 = r.get(0)?;
        let year: i64 = r.get(1)?;
        rows.push(vec![
            "orphan_opening_balance".into(),
            format!("account {} / year {}", acc, year),
        ]);
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
