// Copyright (c) 2026 Bahikhata.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Transaction ledger: an append-mostly list of money movements between two
//! accounts, each tagged to a financial year, plus per-year opening balances.

use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use crate::errors::{LedgerError, Result};
use crate::models::{NewTransaction, OpeningBalance, Transaction, TransactionRow};

fn validate(tx: &NewTransaction, conn: &Connection) -> Result<()> {
    if tx.amount <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveAmount(tx.amount));
    }
    if tx.from_account_id == tx.to_account_id {
        let name: String = conn
            .query_row(
                "SELECT name FROM accounts WHERE id=?1",
                params![tx.from_account_id],
                |r| r.get(0),
            )
            .optional()?
            .unwrap_or_else(|| tx.from_account_id.to_string());
        return Err(LedgerError::SameAccount(name));
    }
    Ok(())
}

/// Record a movement: `amount` flows out of `from_account_id` and into
/// `to_account_id`. `created_at` is stamped at acceptance time.
pub fn add_transaction(conn: &Connection, tx: &NewTransaction) -> Result<i64> {
    validate(tx, conn)?;
    conn.execute(
        "INSERT INTO transactions(date, from_account_id, to_account_id, amount, note, financial_year_id, created_by, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            tx.date.to_string(),
            tx.from_account_id,
            tx.to_account_id,
            tx.amount.to_string(),
            tx.note,
            tx.financial_year_id,
            tx.created_by,
            Utc::now().naive_utc().format("%Y-%m-%d %H:%M:%S").to_string(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Full overwrite of the mutable fields, re-validated exactly as `add`.
/// `created_by` and `created_at` keep their original values.
pub fn edit_transaction(conn: &Connection, id: i64, tx: &NewTransaction) -> Result<()> {
    validate(tx, conn)?;
    let n = conn.execute(
        "UPDATE transactions SET date=?1, from_account_id=?2, to_account_id=?3, amount=?4, note=?5, financial_year_id=?6
         WHERE id=?7",
        params![
            tx.date.to_string(),
            tx.from_account_id,
            tx.to_account_id,
            tx.amount.to_string(),
            tx.note,
            tx.financial_year_id,
            id,
        ],
    )?;
    if n == 0 {
        return Err(LedgerError::NotFound {
            kind: "transaction",
            id,
        });
    }
    Ok(())
}

/// Unconditional hard delete. Confirmation is the caller's concern.
pub fn remove_transaction(conn: &Connection, id: i64) -> Result<()> {
    let n = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    if n == 0 {
        return Err(LedgerError::NotFound {
            kind: "transaction",
            id,
        });
    }
    Ok(())
}

pub fn get_transaction(conn: &Connection, id: i64) -> Result<Transaction> {
    conn.query_row(
        "SELECT id, date, from_account_id, to_account_id, amount, note, financial_year_id, created_by, created_at
         FROM transactions WHERE id=?1",
        params![id],
        |r| {
            Ok(Transaction {
                id: r.get(0)?,
                date: r.get(1)?,
                from_account_id: r.get(2)?,
                to_account_id: r.get(3)?,
                amount: decimal_col(r, 4)?,
                note: r.get(5)?,
                financial_year_id: r.get(6)?,
                created_by: r.get(7)?,
                created_at: r.get(8)?,
            })
        },
    )
    .optional()?
    .ok_or(LedgerError::NotFound {
        kind: "transaction",
        id,
    })
}

const ROW_SELECT: &str = "SELECT t.id, t.date, t.from_account_id, a1.name, t.to_account_id, a2.name, t.amount, t.note
     FROM transactions t
     JOIN accounts a1 ON t.from_account_id=a1.id
     JOIN accounts a2 ON t.to_account_id=a2.id";

/// All rows for a financial year, newest first.
pub fn by_year(conn: &Connection, financial_year_id: i64) -> Result<Vec<TransactionRow>> {
    let sql = format!(
        "{ROW_SELECT} WHERE t.financial_year_id=?1 ORDER BY t.date DESC, t.id DESC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![financial_year_id], row_from)?;
    collect(rows)
}

/// Rows touching `account_id` on either side within `[start, end]`,
/// both bounds inclusive, oldest first for statement rendering.
pub fn by_account(
    conn: &Connection,
    account_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<TransactionRow>> {
    let sql = format!(
        "{ROW_SELECT} WHERE (t.from_account_id=?1 OR t.to_account_id=?1) AND t.date>=?2 AND t.date<=?3
         ORDER BY t.date, t.id"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![account_id, start.to_string(), end.to_string()],
        row_from,
    )?;
    collect(rows)
}

fn row_from(r: &rusqlite::Row<'_>) -> rusqlite::Result<TransactionRow> {
    Ok(TransactionRow {
        id: r.get(0)?,
        date: r.get(1)?,
        from_account_id: r.get(2)?,
        from_account: r.get(3)?,
        to_account_id: r.get(4)?,
        to_account: r.get(5)?,
        amount: decimal_col(r, 6)?,
        note: r.get(7)?,
    })
}

fn collect<I>(rows: I) -> Result<Vec<TransactionRow>>
where
    I: Iterator<Item = rusqlite::Result<TransactionRow>>,
{
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn decimal_col(r: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let s: String = r.get(idx)?;
    s.parse::<Decimal>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            Box::new(e),
        )
    })
}

// ---- Opening balances ----

/// Upsert: re-setting the same (account, year) key replaces the prior value.
pub fn set_opening_balance(
    conn: &Connection,
    account_id: i64,
    financial_year_id: i64,
    amount: Decimal,
) -> Result<()> {
    conn.execute(
        "INSERT INTO opening_balances(account_id, financial_year_id, amount) VALUES (?1, ?2, ?3)
         ON CONFLICT(account_id, financial_year_id) DO UPDATE SET amount=excluded.amount",
        params![account_id, financial_year_id, amount.to_string()],
    )?;
    Ok(())
}

pub fn opening_balance(
    conn: &Connection,
    account_id: i64,
    financial_year_id: i64,
) -> Result<Option<Decimal>> {
    let s: Option<String> = conn
        .query_row(
            "SELECT amount FROM opening_balances WHERE account_id=?1 AND financial_year_id=?2",
            params![account_id, financial_year_id],
            |r| r.get(0),
        )
        .optional()?;
    match s {
        Some(s) => {
            let d = s.parse::<Decimal>().map_err(|e| {
                LedgerError::Sqlite(rusqlite::Error::FromSqlConversionFailure(
                    0,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                ))
            })?;
            Ok(Some(d))
        }
        None => Ok(None),
    }
}

pub fn opening_balances(conn: &Connection, financial_year_id: i64) -> Result<Vec<OpeningBalance>> {
    let mut stmt = conn.prepare(
        "SELECT ob.account_id, a.name, ob.financial_year_id, ob.amount
         FROM opening_balances ob JOIN accounts a ON ob.account_id=a.id
         WHERE ob.financial_year_id=?1
         ORDER BY a.name",
    )?;
    let rows = stmt.query_map(params![financial_year_id], |r| {
        Ok(OpeningBalance {
            account_id: r.get(0)?,
            account_name: r.get(1)?,
            financial_year_id: r.get(2)?,
            amount: decimal_col(r, 3)?,
        })
    })?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
