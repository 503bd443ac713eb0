// Copyright (c) 2026 Bahikhata.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::resolve_year;
use crate::engine;
use crate::ledger;
use crate::utils::{fmt_inr, maybe_print_json, whatsapp_url};
use anyhow::Result;
use rusqlite::Connection;
use std::collections::HashMap;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let year = resolve_year(conn, sub.get_one::<String>("year"))?;

    let rows = ledger::by_year(conn, year.id)?;
    let openings: HashMap<String, _> = ledger::opening_balances(conn, year.id)?
        .into_iter()
        .map(|b| (b.account_name, b.amount))
        .collect();
    let summary = engine::dashboard(&rows, &openings);

    if maybe_print_json(json_flag, jsonl_flag, &summary)? {
        return Ok(());
    }

    println!("Business summary for {}", year.label);
    println!("💵 Cash in Hand : {}", fmt_inr(summary.cash));
    println!("🏦 Bank Balance : {}", fmt_inr(summary.bank));
    println!("📈 Total Sales  : {}", fmt_inr(summary.total_sales));
    println!("📉 Expenses     : {}", fmt_inr(summary.total_expenses));
    println!("💰 Net Profit   : {}", fmt_inr(summary.profit));
    println!("🎯 Margin       : {:.1}%", summary.margin_pct);

    if sub.get_flag("share") {
        let today = chrono::Utc::now().date_naive();
        println!(
            "{}",
            whatsapp_url(&engine::summary_share_text(&summary, today))
        );
    }
    Ok(())
}
