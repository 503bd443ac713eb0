// Copyright (c) 2026 Bahikhata.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("in.bahikhata", "Bahikhata", "bahikhata"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("bahikhata.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS financial_years(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        label TEXT NOT NULL UNIQUE,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        is_active INTEGER NOT NULL DEFAULT 0
    );

    CREATE TABLE IF NOT EXISTS groups(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    );

    CREATE TABLE IF NOT EXISTS accounts(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        group_id INTEGER,
        phone TEXT,
        address TEXT,
        is_active INTEGER NOT NULL DEFAULT 1,
        FOREIGN KEY(group_id) REFERENCES groups(id)
    );

    CREATE TABLE IF NOT EXISTS opening_balances(
        account_id INTEGER NOT NULL,
        financial_year_id INTEGER NOT NULL,
        amount TEXT NOT NULL,
        PRIMARY KEY(account_id, financial_year_id),
        FOREIGN KEY(account_id) REFERENCES accounts(id),
        FOREIGN KEY(financial_year_id) REFERENCES financial_years(id)
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        from_account_id INTEGER NOT NULL,
        to_account_id INTEGER NOT NULL,
        amount TEXT NOT NULL,
        note TEXT,
        financial_year_id INTEGER NOT NULL,
        created_by TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(from_account_id) REFERENCES accounts(id),
        FOREIGN KEY(to_account_id) REFERENCES accounts(id),
        FOREIGN KEY(financial_year_id) REFERENCES financial_years(id)
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
    CREATE INDEX IF NOT EXISTS idx_transactions_year ON transactions(financial_year_id);
    "#,
    )?;
    Ok(())
}

/// Default chart of accounts for a fresh shop ledger. Idempotent; existing
/// rows with the same names are left untouched.
pub fn seed_defaults(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction()?;
    let groups = [
        ("Assets", vec!["Cash", "Bank"]),
        ("Income", vec!["Sales Income"]),
        (
            "Expenses",
            vec![
                "Personal Expense",
                "Office Expenses",
                "Conveyance",
                "Miscellaneous",
                "School Expenses",
                "Bills",
                "Salary Expense",
                "Construction Expense",
            ],
        ),
    ];
    for (group, accounts) in groups {
        tx.execute(
            "INSERT OR IGNORE INTO groups(name) VALUES (?1)",
            rusqlite::params![group],
        )?;
        let group_id: i64 = tx.query_row(
            "SELECT id FROM groups WHERE name=?1",
            rusqlite::params![group],
            |r| r.get(0),
        )?;
        for name in accounts {
            tx.execute(
                "INSERT OR IGNORE INTO accounts(name, group_id, is_active) VALUES (?1, ?2, 1)",
                rusqlite::params![name, group_id],
            )?;
        }
    }
    tx.commit()?;
    Ok(())
}
