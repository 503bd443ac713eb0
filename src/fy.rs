// Copyright (c) 2026 Bahikhata.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Financial year registry: April-to-March accounting periods identified by
//! a `YYYY-YY` label, with exactly one active year at any time.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::{params, Connection, OptionalExtension};

use crate::errors::{LedgerError, Result};
use crate::models::FinancialYear;

static LABEL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})$").expect("valid regex"));

/// Parse a `YYYY-YY` label into (April 1 start, March 31 end).
///
/// The start year must fall in 2000..=2099 and the suffix must be
/// `(start + 1) mod 100`, so "2026-27" is valid and "2026-29" is not.
pub fn parse_label(label: &str) -> Result<(NaiveDate, NaiveDate)> {
    let label = label.trim();
    let caps = LABEL_RE
        .captures(label)
        .ok_or_else(|| LedgerError::InvalidYearFormat(label.to_string()))?;
    let start_year: i32 = caps[1]
        .parse()
        .map_err(|_| LedgerError::InvalidYearFormat(label.to_string()))?;
    let suffix: i32 = caps[2]
        .parse()
        .map_err(|_| LedgerError::InvalidYearFormat(label.to_string()))?;

    if !(2000..=2099).contains(&start_year) {
        return Err(LedgerError::InvalidYearFormat(label.to_string()));
    }
    if (start_year + 1) % 100 != suffix {
        return Err(LedgerError::InvalidYearSequence(label.to_string()));
    }

    let start = NaiveDate::from_ymd_opt(start_year, 4, 1)
        .ok_or_else(|| LedgerError::InvalidYearFormat(label.to_string()))?;
    let end = NaiveDate::from_ymd_opt(start_year + 1, 3, 31)
        .ok_or_else(|| LedgerError::InvalidYearFormat(label.to_string()))?;
    Ok((start, end))
}

/// Insert a new (inactive) financial year from its label.
pub fn add(conn: &Connection, label: &str) -> Result<i64> {
    let label = label.trim();
    let (start, end) = parse_label(label)?;
    conn.execute(
        "INSERT INTO financial_years(label, start_date, end_date, is_active) VALUES (?1, ?2, ?3, 0)",
        params![label, start.to_string(), end.to_string()],
    )
    .map_err(|e| map_unique(e, "financial year", label))?;
    Ok(conn.last_insert_rowid())
}

/// Re-label a year, recomputing both boundary dates. The duplicate check
/// excludes the year itself and runs in the same transaction as the write.
pub fn relabel(conn: &mut Connection, id: i64, label: &str) -> Result<()> {
    let label = label.trim().to_string();
    let (start, end) = parse_label(&label)?;
    let tx = conn.transaction()?;
    let clash: Option<i64> = tx
        .query_row(
            "SELECT id FROM financial_years WHERE label=?1 AND id<>?2",
            params![label, id],
            |r| r.get(0),
        )
        .optional()?;
    if clash.is_some() {
        return Err(LedgerError::Duplicate {
            kind: "financial year",
            name: label,
        });
    }
    let n = tx.execute(
        "UPDATE financial_years SET label=?1, start_date=?2, end_date=?3 WHERE id=?4",
        params![label, start.to_string(), end.to_string(), id],
    )?;
    if n == 0 {
        return Err(LedgerError::NotFound {
            kind: "financial year",
            id,
        });
    }
    tx.commit()?;
    Ok(())
}

/// Make `id` the single active year. Deactivate-all then activate runs in
/// one transaction so no reader ever observes zero or two active years.
pub fn set_active(conn: &mut Connection, id: i64) -> Result<()> {
    let tx = conn.transaction()?;
    let exists: Option<i64> = tx
        .query_row(
            "SELECT id FROM financial_years WHERE id=?1",
            params![id],
            |r| r.get(0),
        )
        .optional()?;
    if exists.is_none() {
        return Err(LedgerError::NotFound {
            kind: "financial year",
            id,
        });
    }
    tx.execute("UPDATE financial_years SET is_active=0", [])?;
    tx.execute(
        "UPDATE financial_years SET is_active=1 WHERE id=?1",
        params![id],
    )?;
    tx.commit()?;
    Ok(())
}

/// Delete a year; refused while any opening balance or transaction is
/// tagged to it.
pub fn remove(conn: &Connection, id: i64) -> Result<()> {
    let label: Option<String> = conn
        .query_row(
            "SELECT label FROM financial_years WHERE id=?1",
            params![id],
            |r| r.get(0),
        )
        .optional()?;
    let label = label.ok_or(LedgerError::NotFound {
        kind: "financial year",
        id,
    })?;
    let refs: i64 = conn.query_row(
        "SELECT (SELECT COUNT(*) FROM opening_balances WHERE financial_year_id=?1)
              + (SELECT COUNT(*) FROM transactions WHERE financial_year_id=?1)",
        params![id],
        |r| r.get(0),
    )?;
    if refs > 0 {
        return Err(LedgerError::HasDependents {
            kind: "financial year",
            name: label,
        });
    }
    conn.execute("DELETE FROM financial_years WHERE id=?1", params![id])?;
    Ok(())
}

pub fn active(conn: &Connection) -> Result<Option<FinancialYear>> {
    let row = conn
        .query_row(
            "SELECT id, label, start_date, end_date, is_active FROM financial_years WHERE is_active=1",
            [],
            from_row,
        )
        .optional()?;
    Ok(row)
}

pub fn get(conn: &Connection, id: i64) -> Result<FinancialYear> {
    conn.query_row(
        "SELECT id, label, start_date, end_date, is_active FROM financial_years WHERE id=?1",
        params![id],
        from_row,
    )
    .optional()?
    .ok_or(LedgerError::NotFound {
        kind: "financial year",
        id,
    })
}

pub fn list(conn: &Connection) -> Result<Vec<FinancialYear>> {
    let mut stmt = conn.prepare(
        "SELECT id, label, start_date, end_date, is_active FROM financial_years ORDER BY start_date DESC",
    )?;
    let rows = stmt.query_map([], from_row)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn from_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<FinancialYear> {
    Ok(FinancialYear {
        id: r.get(0)?,
        label: r.get(1)?,
        start_date: r.get(2)?,
        end_date: r.get(3)?,
        is_active: r.get::<_, i64>(4)? == 1,
    })
}

pub(crate) fn map_unique(e: rusqlite::Error, kind: &'static str, name: &str) -> LedgerError {
    match &e {
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            LedgerError::Duplicate {
                kind,
                name: name.to_string(),
            }
        }
        _ => LedgerError::Sqlite(e),
    }
}
