// Copyright (c) 2026 Bahikhata.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use bahikhata::{cli, commands, db};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut conn = db::open_or_init()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("seed", _)) => {
            db::seed_defaults(&mut conn)?;
            println!("Seeded default groups and accounts");
        }
        Some(("year", sub)) => commands::years::handle(&mut conn, sub)?,
        Some(("group", sub)) => commands::groups::handle(&mut conn, sub)?,
        Some(("account", sub)) => commands::accounts::handle(&mut conn, sub)?,
        Some(("opening", sub)) => commands::opening::handle(&conn, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&conn, sub)?,
        Some(("statement", sub)) => commands::statement::handle(&conn, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&conn, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
