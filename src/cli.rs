// Copyright (c) 2026 Bahikhata.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .help("Print as pretty JSON")
            .action(ArgAction::SetTrue),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .help("Print as JSON lines")
            .action(ArgAction::SetTrue),
    )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .required(true)
        .value_parser(clap::value_parser!(i64))
}

pub fn build_cli() -> Command {
    Command::new("bahikhata")
        .about("Single-shop INR ledger: accounts, financial years, statements and reports")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Create the database file and schema"))
        .subcommand(Command::new("seed").about("Seed the default groups and chart of accounts"))
        .subcommand(
            Command::new("year")
                .about("Manage financial years (April-March, YYYY-YY labels)")
                .subcommand(
                    Command::new("add").about("Add a financial year").arg(
                        Arg::new("label")
                            .required(true)
                            .help("Label like 2026-27"),
                    ),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List all financial years"),
                ))
                .subcommand(
                    Command::new("set-active")
                        .about("Make a year the single active one")
                        .arg(id_arg()),
                )
                .subcommand(
                    Command::new("relabel")
                        .about("Re-label a year, recomputing its dates")
                        .arg(id_arg())
                        .arg(Arg::new("label").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a year with no dependent records")
                        .arg(id_arg()),
                ),
        )
        .subcommand(
            Command::new("group")
                .about("Manage account groups")
                .subcommand(
                    Command::new("add")
                        .about("Add a group")
                        .arg(Arg::new("name").required(true)),
                )
                .subcommand(json_flags(Command::new("list").about("List groups")))
                .subcommand(
                    Command::new("rename")
                        .about("Rename a group")
                        .arg(id_arg())
                        .arg(Arg::new("name").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a group with no accounts")
                        .arg(id_arg()),
                ),
        )
        .subcommand(
            Command::new("account")
                .about("Manage ledger accounts (parties, cash/bank, categories)")
                .subcommand(
                    Command::new("add")
                        .about("Add an account")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("group").long("group").help("Group name"))
                        .arg(Arg::new("phone").long("phone"))
                        .arg(Arg::new("address").long("address")),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List accounts").arg(
                        Arg::new("all")
                            .long("all")
                            .help("Include deactivated accounts")
                            .action(ArgAction::SetTrue),
                    ),
                ))
                .subcommand(
                    Command::new("update")
                        .about("Overwrite an account's details")
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("group").long("group"))
                        .arg(Arg::new("phone").long("phone"))
                        .arg(Arg::new("address").long("address")),
                )
                .subcommand(
                    Command::new("toggle")
                        .about("Activate or deactivate an account")
                        .arg(id_arg())
                        .arg(
                            Arg::new("active")
                                .long("active")
                                .required(true)
                                .value_parser(clap::value_parser!(bool)),
                        ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Hard-delete an account with no transactions")
                        .arg(id_arg()),
                ),
        )
        .subcommand(
            Command::new("opening")
                .about("Per-account opening balances for a financial year")
                .subcommand(
                    Command::new("set")
                        .about("Set (or replace) an opening balance")
                        .arg(Arg::new("account").long("account").required(true))
                        .arg(Arg::new("year").long("year").help("Year label; defaults to the active year"))
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List opening balances for a year")
                        .arg(Arg::new("year").long("year")),
                )),
        )
        .subcommand(
            Command::new("tx")
                .about("Record, edit, and list transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a money movement")
                        .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
                        .arg(Arg::new("from").long("from").required(true).help("Source account name"))
                        .arg(Arg::new("to").long("to").required(true).help("Destination account name"))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("note").long("note"))
                        .arg(Arg::new("year").long("year").help("Year label; defaults to the active year"))
                        .arg(Arg::new("by").long("by").default_value("cli").help("Recorded-by tag")),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Overwrite a transaction's fields (created-by/at preserved)")
                        .arg(id_arg())
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("from").long("from").required(true))
                        .arg(Arg::new("to").long("to").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("note").long("note"))
                        .arg(Arg::new("year").long("year")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Permanently delete a transaction")
                        .arg(id_arg()),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions for a year, newest first")
                        .arg(Arg::new("year").long("year"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(clap::value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(json_flags(
            Command::new("statement")
                .about("Account statement over a date range, with settlement message")
                .arg(Arg::new("account").long("account").required(true))
                .arg(Arg::new("from").long("from").required(true).help("Start date YYYY-MM-DD"))
                .arg(Arg::new("to").long("to").required(true).help("End date YYYY-MM-DD"))
                .arg(Arg::new("year").long("year").help("Year label for the opening balance"))
                .arg(
                    Arg::new("with-opening")
                        .long("with-opening")
                        .help("Carry the year's opening balance into the net")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("share")
                        .long("share")
                        .help("Also print the WhatsApp share link")
                        .action(ArgAction::SetTrue),
                ),
        ))
        .subcommand(json_flags(
            Command::new("dashboard")
                .about("Business summary: cash, bank, sales, expenses, profit, margin")
                .arg(Arg::new("year").long("year"))
                .arg(
                    Arg::new("share")
                        .long("share")
                        .help("Also print the WhatsApp share link")
                        .action(ArgAction::SetTrue),
                ),
        ))
        .subcommand(
            Command::new("export")
                .about("Export data for spreadsheets and backups")
                .subcommand(
                    Command::new("transactions")
                        .about("Export a year's transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .value_parser(["csv", "json"]),
                        )
                        .arg(Arg::new("out").long("out").required(true))
                        .arg(Arg::new("year").long("year")),
                )
                .subcommand(
                    Command::new("statement")
                        .about("Export one account's statement rows as CSV")
                        .arg(Arg::new("account").long("account").required(true))
                        .arg(Arg::new("from").long("from").required(true))
                        .arg(Arg::new("to").long("to").required(true))
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Scan the ledger for integrity problems"))
}
