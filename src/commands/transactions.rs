// Copyright (c) 2026 Bahikhata.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{resolve_account, resolve_year};
use crate::models::NewTransaction;
use crate::utils::{display_date, fmt_inr, maybe_print_json, parse_date, parse_decimal, pretty_table};
use crate::{fy, ledger};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            ledger::remove_transaction(conn, id)?;
            println!("Deleted transaction {}", id);
        }
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let from = resolve_account(conn, sub.get_one::<String>("from").unwrap())?;
    let to = resolve_account(conn, sub.get_one::<String>("to").unwrap())?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let note = sub.get_one::<String>("note").cloned();
    let year = resolve_year(conn, sub.get_one::<String>("year"))?;
    let created_by = sub.get_one::<String>("by").unwrap().clone();

    let id = ledger::add_transaction(
        conn,
        &NewTransaction {
            date,
            from_account_id: from,
            to_account_id: to,
            amount,
            note,
            financial_year_id: year.id,
            created_by,
        },
    )?;
    println!(
        "Recorded {} on {} ({} -> {}) as #{}",
        fmt_inr(amount),
        display_date(date),
        sub.get_one::<String>("from").unwrap(),
        sub.get_one::<String>("to").unwrap(),
        id
    );
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let current = ledger::get_transaction(conn, id)?;
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let from = resolve_account(conn, sub.get_one::<String>("from").unwrap())?;
    let to = resolve_account(conn, sub.get_one::<String>("to").unwrap())?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let note = sub.get_one::<String>("note").cloned();
    let year_id = match sub.get_one::<String>("year") {
        Some(l) => resolve_year(conn, Some(l))?.id,
        None => current.financial_year_id,
    };

    ledger::edit_transaction(
        conn,
        id,
        &NewTransaction {
            date,
            from_account_id: from,
            to_account_id: to,
            amount,
            note,
            financial_year_id: year_id,
            // preserved; the ledger does not rewrite provenance on edit
            created_by: current.created_by,
        },
    )?;
    println!("Updated transaction {}", id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let year = resolve_year(conn, sub.get_one::<String>("year"))?;
    let mut rows = ledger::by_year(conn, year.id)?;
    if let Some(limit) = sub.get_one::<usize>("limit") {
        rows.truncate(*limit);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let data = rows
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    display_date(r.date),
                    r.from_account.clone(),
                    r.to_account.clone(),
                    fmt_inr(r.amount),
                    r.note.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "From", "To", "Amount", "Note"], data)
        );
        if let Some(active) = fy::active(conn)? {
            if active.id != year.id {
                println!("(showing '{}', active year is '{}')", year.label, active.label);
            }
        }
    }
    Ok(())
}
