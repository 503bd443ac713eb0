// Copyright (c) 2026 Bahikhata.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{resolve_account, resolve_year};
use crate::ledger;
use crate::models::TransactionRow;
use crate::utils::parse_date;
use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        Some(("statement", sub)) => export_statement(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let year = resolve_year(conn, sub.get_one::<String>("year"))?;
    let rows = ledger::by_year(conn, year.id)?;

    match fmt.as_str() {
        "csv" => write_csv(out, &rows)?,
        "json" => {
            let items: Vec<_> = rows
                .iter()
                .map(|r| {
                    json!({
                        "id": r.id,
                        "date": r.date,
                        "from_account": r.from_account,
                        "to_account": r.to_account,
                        "amount": r.amount,
                        "note": r.note,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported {} transactions of '{}' to {}", rows.len(), year.label, out);
    Ok(())
}

fn export_statement(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let out = sub.get_one::<String>("out").unwrap();
    let name = sub.get_one::<String>("account").unwrap();
    let account_id = resolve_account(conn, name)?;
    let start = parse_date(sub.get_one::<String>("from").unwrap())?;
    let end = parse_date(sub.get_one::<String>("to").unwrap())?;
    let rows = ledger::by_account(conn, account_id, start, end)?;
    write_csv(out, &rows)?;
    println!("Exported {} statement rows to {}", rows.len(), out);
    Ok(())
}

fn write_csv(path: &str, rows: &[TransactionRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["id", "date", "from_account", "to_account", "amount", "note"])?;
    for r in rows {
        wtr.write_record([
            r.id.to_string(),
            r.date.to_string(),
            r.from_account.clone(),
            r.to_account.clone(),
            r.amount.to_string(),
            r.note.clone().unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
