// Copyright (c) 2026 Bahikhata.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{resolve_account, resolve_year};
use crate::engine;
use crate::utils::{display_date, fmt_inr, maybe_print_json, parse_date, pretty_table, whatsapp_url};
use crate::{ledger, registry};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let name = sub.get_one::<String>("account").unwrap();
    let account_id = resolve_account(conn, name)?;
    let account = registry::get_account(conn, account_id)?;
    let start = parse_date(sub.get_one::<String>("from").unwrap())?;
    let end = parse_date(sub.get_one::<String>("to").unwrap())?;

    let opening = if sub.get_flag("with-opening") {
        let year = resolve_year(conn, sub.get_one::<String>("year"))?;
        ledger::opening_balance(conn, account_id, year.id)?
    } else {
        None
    };

    let rows = ledger::by_account(conn, account_id, start, end)?;
    let stmt = engine::statement(account_id, &account.name, &rows, start, end, opening);

    if maybe_print_json(json_flag, jsonl_flag, &stmt)? {
        return Ok(());
    }

    println!(
        "Statement for {} ({} to {})",
        stmt.subject_account,
        display_date(start),
        display_date(end)
    );
    let data = rows
        .iter()
        .map(|r| {
            vec![
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
        pretty_table(&["Date", "From", "To", "Amount", "Note"], data)
    );
    if let Some(open) = opening {
        println!("Opening  : {}", fmt_inr(open));
    }
    println!("Total In : {}", fmt_inr(stmt.money_in));
    println!("Total Out: {}", fmt_inr(stmt.money_out));
    println!(
        "{:9}: {}",
        stmt.state.label(),
        fmt_inr(stmt.net_balance.abs())
    );
    println!("{}", stmt.message);
    println!("{}", stmt.message_localized);

    if sub.get_flag("share") {
        println!("{}", whatsapp_url(&engine::statement_share_text(&stmt)));
    }
    Ok(())
}
