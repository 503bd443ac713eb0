// Copyright (c) 2026 Bahikhata.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{resolve_account, resolve_year};
use crate::ledger;
use crate::utils::{fmt_inr, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let account = sub.get_one::<String>("account").unwrap();
            let account_id = resolve_account(conn, account)?;
            let year = resolve_year(conn, sub.get_one::<String>("year"))?;
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            ledger::set_opening_balance(conn, account_id, year.id, amount)?;
            println!(
                "Opening balance for '{}' in {} set to {}",
                account.trim(),
                year.label,
                fmt_inr(amount)
            );
        }
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let year = resolve_year(conn, sub.get_one::<String>("year"))?;
            let balances = ledger::opening_balances(conn, year.id)?;
            if !maybe_print_json(json_flag, jsonl_flag, &balances)? {
                let rows = balances
                    .iter()
                    .map(|b| vec![b.account_name.clone(), fmt_inr(b.amount)])
                    .collect();
                println!("{}", pretty_table(&["Account", "Opening"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}
