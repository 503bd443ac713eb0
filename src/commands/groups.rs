// Copyright (c) 2026 Bahikhata.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::registry;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            registry::add_group(conn, name)?;
            println!("Added group '{}'", name.trim());
        }
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let groups = registry::list_groups(conn)?;
            if !maybe_print_json(json_flag, jsonl_flag, &groups)? {
                let rows = groups
                    .iter()
                    .map(|g| vec![g.id.to_string(), g.name.clone()])
                    .collect();
                println!("{}", pretty_table(&["ID", "Group"], rows));
            }
        }
        Some(("rename", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let name = sub.get_one::<String>("name").unwrap();
            registry::rename_group(conn, id, name)?;
            println!("Group {} renamed to '{}'", id, name.trim());
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            registry::remove_group(conn, id)?;
            println!("Removed group {}", id);
        }
        _ => {}
    }
    Ok(())
}
