// Copyright (c) 2026 Bahikhata.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Group and account registry. Accounts are identified by id everywhere;
//! the name is a mutable display attribute with a uniqueness constraint.

use rusqlite::{params, Connection, OptionalExtension};

use crate::errors::{LedgerError, Result};
use crate::fy::map_unique;
use crate::models::{Account, Group};

// ---- Groups ----

pub fn add_group(conn: &Connection, name: &str) -> Result<i64> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::EmptyName);
    }
    conn.execute("INSERT INTO groups(name) VALUES (?1)", params![name])
        .map_err(|e| map_unique(e, "group", name))?;
    Ok(conn.last_insert_rowid())
}

pub fn rename_group(conn: &mut Connection, id: i64, new_name: &str) -> Result<()> {
    let new_name = new_name.trim().to_string();
    if new_name.is_empty() {
        return Err(LedgerError::EmptyName);
    }
    let tx = conn.transaction()?;
    let clash: Option<i64> = tx
        .query_row(
            "SELECT id FROM groups WHERE name=?1 AND id<>?2",
            params![new_name, id],
            |r| r.get(0),
        )
        .optional()?;
    if clash.is_some() {
        return Err(LedgerError::Duplicate {
            kind: "group",
            name: new_name,
        });
    }
    let n = tx.execute(
        "UPDATE groups SET name=?1 WHERE id=?2",
        params![new_name, id],
    )?;
    if n == 0 {
        return Err(LedgerError::NotFound { kind: "group", id });
    }
    tx.commit()?;
    Ok(())
}

/// Delete a group; refused while any account belongs to it.
pub fn remove_group(conn: &Connection, id: i64) -> Result<()> {
    let name: Option<String> = conn
        .query_row("SELECT name FROM groups WHERE id=?1", params![id], |r| {
            r.get(0)
        })
        .optional()?;
    let name = name.ok_or(LedgerError::NotFound { kind: "group", id })?;
    let refs: i64 = conn.query_row(
        "SELECT COUNT(*) FROM accounts WHERE group_id=?1",
        params![id],
        |r| r.get(0),
    )?;
    if refs > 0 {
        return Err(LedgerError::HasDependents { kind: "group", name });
    }
    conn.execute("DELETE FROM groups WHERE id=?1", params![id])?;
    Ok(())
}

pub fn list_groups(conn: &Connection) -> Result<Vec<Group>> {
    let mut stmt = conn.prepare("SELECT id, name FROM groups ORDER BY name")?;
    let rows = stmt.query_map([], |r| {
        Ok(Group {
            id: r.get(0)?,
            name: r.get(1)?,
        })
    })?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn group_id_by_name(conn: &Connection, name: &str) -> Result<Option<i64>> {
    let id = conn
        .query_row("SELECT id FROM groups WHERE name=?1", params![name], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(id)
}

// ---- Accounts ----

pub fn add_account(
    conn: &Connection,
    name: &str,
    group_id: Option<i64>,
    phone: Option<&str>,
    address: Option<&str>,
) -> Result<i64> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::EmptyName);
    }
    conn.execute(
        "INSERT INTO accounts(name, group_id, phone, address, is_active) VALUES (?1, ?2, ?3, ?4, 1)",
        params![name, group_id, phone.map(str::trim), address.map(str::trim)],
    )
    .map_err(|e| map_unique(e, "account", name))?;
    Ok(conn.last_insert_rowid())
}

/// Full overwrite of the mutable fields. The uniqueness check excludes the
/// account itself and shares a transaction with the write.
pub fn update_account(
    conn: &mut Connection,
    id: i64,
    name: &str,
    group_id: Option<i64>,
    phone: Option<&str>,
    address: Option<&str>,
) -> Result<()> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(LedgerError::EmptyName);
    }
    let tx = conn.transaction()?;
    let clash: Option<i64> = tx
        .query_row(
            "SELECT id FROM accounts WHERE name=?1 AND id<>?2",
            params![name, id],
            |r| r.get(0),
        )
        .optional()?;
    if clash.is_some() {
        return Err(LedgerError::Duplicate {
            kind: "account",
            name,
        });
    }
    let n = tx.execute(
        "UPDATE accounts SET name=?1, group_id=?2, phone=?3, address=?4 WHERE id=?5",
        params![name, group_id, phone.map(str::trim), address.map(str::trim), id],
    )?;
    if n == 0 {
        return Err(LedgerError::NotFound { kind: "account", id });
    }
    tx.commit()?;
    Ok(())
}

/// Flip the activation flag. Inactive accounts disappear from entry
/// dropdowns but keep their full transaction history.
pub fn set_account_active(conn: &Connection, id: i64, active: bool) -> Result<()> {
    let n = conn.execute(
        "UPDATE accounts SET is_active=?1 WHERE id=?2",
        params![active as i64, id],
    )?;
    if n == 0 {
        return Err(LedgerError::NotFound { kind: "account", id });
    }
    Ok(())
}

/// Hard delete, allowed only when no transaction references the account on
/// either side. Accounts with history get deactivated instead.
pub fn remove_account(conn: &mut Connection, id: i64) -> Result<()> {
    let tx = conn.transaction()?;
    let name: Option<String> = tx
        .query_row("SELECT name FROM accounts WHERE id=?1", params![id], |r| {
            r.get(0)
        })
        .optional()?;
    let name = name.ok_or(LedgerError::NotFound { kind: "account", id })?;
    let refs: i64 = tx.query_row(
        "SELECT COUNT(*) FROM transactions WHERE from_account_id=?1 OR to_account_id=?1",
        params![id],
        |r| r.get(0),
    )?;
    if refs > 0 {
        return Err(LedgerError::HasDependents {
            kind: "account",
            name,
        });
    }
    tx.execute(
        "DELETE FROM opening_balances WHERE account_id=?1",
        params![id],
    )?;
    tx.execute("DELETE FROM accounts WHERE id=?1", params![id])?;
    tx.commit()?;
    Ok(())
}

/// All accounts ordered by name, group name joined live so a group rename
/// is reflected immediately.
pub fn list_accounts(conn: &Connection) -> Result<Vec<Account>> {
    let mut stmt = conn.prepare(
        "SELECT a.id, a.name, a.group_id, g.name, a.phone, a.address, a.is_active
         FROM accounts a LEFT JOIN groups g ON a.group_id=g.id
         ORDER BY a.name",
    )?;
    let rows = stmt.query_map([], from_row)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Active accounts only, for transaction-entry pickers.
pub fn active_accounts(conn: &Connection) -> Result<Vec<Account>> {
    let mut stmt = conn.prepare(
        "SELECT a.id, a.name, a.group_id, g.name, a.phone, a.address, a.is_active
         FROM accounts a LEFT JOIN groups g ON a.group_id=g.id
         WHERE a.is_active=1
         ORDER BY a.name",
    )?;
    let rows = stmt.query_map([], from_row)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn account_id_by_name(conn: &Connection, name: &str) -> Result<Option<i64>> {
    let id = conn
        .query_row(
            "SELECT id FROM accounts WHERE name=?1",
            params![name],
            |r| r.get(0),
        )
        .optional()?;
    Ok(id)
}

pub fn get_account(conn: &Connection, id: i64) -> Result<Account> {
    conn.query_row(
        "SELECT a.id, a.name, a.group_id, g.name, a.phone, a.address, a.is_active
         FROM accounts a LEFT JOIN groups g ON a.group_id=g.id
         WHERE a.id=?1",
        params![id],
        from_row,
    )
    .optional()?
    .ok_or(LedgerError::NotFound { kind: "account", id })
}

fn from_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<Account> {
    Ok(Account {
        id: r.get(0)?,
        name: r.get(1)?,
        group_id: r.get(2)?,
        group_name: r.get(3)?,
        phone: r.get(4)?,
        address: r.get(5)?,
        is_active: r.get::<_, i64>(6)? == 1,
    })
}
