// Copyright (c) 2026 Bahikhata.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::fy;
use crate::utils::{display_date, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let label = sub.get_one::<String>("label").unwrap();
            let id = fy::add(conn, label)?;
            let year = fy::get(conn, id)?;
            println!(
                "Added financial year '{}' ({} to {})",
                year.label,
                display_date(year.start_date),
                display_date(year.end_date)
            );
        }
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let years = fy::list(conn)?;
            if !maybe_print_json(json_flag, jsonl_flag, &years)? {
                let rows = years
                    .iter()
                    .map(|y| {
                        vec![
                            y.id.to_string(),
                            y.label.clone(),
                            display_date(y.start_date),
                            display_date(y.end_date),
                            if y.is_active { "ACTIVE".into() } else { String::new() },
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["ID", "Label", "Start", "End", "Status"], rows)
                );
            }
        }
        Some(("set-active", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            fy::set_active(conn, id)?;
            let year = fy::get(conn, id)?;
            println!("Active financial year is now '{}'", year.label);
        }
        Some(("relabel", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let label = sub.get_one::<String>("label").unwrap();
            fy::relabel(conn, id, label)?;
            println!("Financial year {} relabelled to '{}'", id, label.trim());
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            fy::remove(conn, id)?;
            println!("Removed financial year {}", id);
        }
        _ => {}
    }
    Ok(())
}
