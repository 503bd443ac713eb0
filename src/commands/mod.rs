// Copyright (c) 2026 Bahikhata.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod dashboard;
pub mod doctor;
pub mod exporter;
pub mod groups;
pub mod opening;
pub mod statement;
pub mod transactions;
pub mod years;

use anyhow::{bail, Context, Result};
use rusqlite::Connection;

use crate::models::FinancialYear;
use crate::{fy, registry};

/// Resolve a `--year` label, falling back to the active year.
pub(crate) fn resolve_year(conn: &Connection, label: Option<&String>) -> Result<FinancialYear> {
    match label {
        Some(l) => {
            let years = fy::list(conn)?;
            years
                .into_iter()
                .find(|y| y.label == l.trim())
                .with_context(|| format!("Financial year '{}' not found", l))
        }
        None => fy::active(conn)?.context("No active financial year; run 'year set-active' first"),
    }
}

/// Resolve an account name to its id; names are display attributes, ids are
/// the only join keys.
pub(crate) fn resolve_account(conn: &Connection, name: &str) -> Result<i64> {
    match registry::account_id_by_name(conn, name.trim())? {
        Some(id) => Ok(id),
        None => bail!("Account '{}' not found", name),
    }
}
