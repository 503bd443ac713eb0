// Copyright (c) 2026 Bahikhata.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::registry;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;

fn group_id(conn: &Connection, name: Option<&String>) -> Result<Option<i64>> {
    match name {
        Some(g) => {
            let id = registry::group_id_by_name(conn, g.trim())?
                .with_context(|| format!("Group '{}' not found", g))?;
            Ok(Some(id))
        }
        None => Ok(None),
    }
}

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let group = group_id(conn, sub.get_one::<String>("group"))?;
            let phone = sub.get_one::<String>("phone").map(String::as_str);
            let address = sub.get_one::<String>("address").map(String::as_str);
            registry::add_account(conn, name, group, phone, address)?;
            println!("Added account '{}'", name.trim());
        }
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let accounts = if sub.get_flag("all") {
                registry::list_accounts(conn)?
            } else {
                registry::active_accounts(conn)?
            };
            if !maybe_print_json(json_flag, jsonl_flag, &accounts)? {
                let rows = accounts
                    .iter()
                    .map(|a| {
                        vec![
                            a.id.to_string(),
                            a.name.clone(),
                            a.group_name.clone().unwrap_or_default(),
                            a.phone.clone().unwrap_or_default(),
                            a.address.clone().unwrap_or_default(),
                            if a.is_active {
                                "active".into()
                            } else {
                                "hidden".into()
                            },
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(
                        &["ID", "Name", "Group", "Phone", "Address", "Status"],
                        rows
                    )
                );
            }
        }
        Some(("update", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let name = sub.get_one::<String>("name").unwrap();
            let group = match sub.get_one::<String>("group") {
                Some(g) => group_id(conn, Some(g))?,
                // group unchanged when not supplied
                None => registry::get_account(conn, id)?.group_id,
            };
            let phone = sub.get_one::<String>("phone").map(String::as_str);
            let address = sub.get_one::<String>("address").map(String::as_str);
            registry::update_account(conn, id, name, group, phone, address)?;
            println!("Updated account {}", id);
        }
        Some(("toggle", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let active = *sub.get_one::<bool>("active").unwrap();
            registry::set_account_active(conn, id, active)?;
            println!(
                "Account {} is now {}",
                id,
                if active { "active" } else { "hidden" }
            );
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            registry::remove_account(conn, id)?;
            println!("Removed account {}", id);
        }
        _ => {}
    }
    Ok(())
}
