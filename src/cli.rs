// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print JSON instead of a table")
}

fn record_command(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .subcommand_required(true)
        .subcommand(
            Command::new("list")
                .about("List records, newest first")
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                )
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("add")
                .about("Record a new entry")
                .arg(Arg::new("title").long("title").required(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
                .arg(Arg::new("category").long("category").required(true))
                .arg(Arg::new("description").long("description")),
        )
        .subcommand(
            Command::new("edit")
                .about("Change fields of an existing entry")
                .arg(
                    Arg::new("id")
                        .long("id")
                        .required(true)
                        .value_parser(value_parser!(i64)),
                )
                .arg(Arg::new("title").long("title"))
                .arg(Arg::new("amount").long("amount"))
                .arg(Arg::new("date").long("date").help("YYYY-MM-DD"))
                .arg(Arg::new("category").long("category"))
                .arg(
                    Arg::new("description")
                        .long("description")
                        .help("Pass an empty string to clear"),
                ),
        )
        .subcommand(
            Command::new("rm").about("Delete an entry").arg(
                Arg::new("id")
                    .long("id")
                    .required(true)
                    .value_parser(value_parser!(i64)),
            ),
        )
        .subcommand(Command::new("total").about("Sum of all amounts"))
}

pub fn build_cli() -> Command {
    Command::new("pocketledger")
        .about("Income and expense tracker backed by a remote ledger")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(record_command("income", "Manage income records"))
        .subcommand(record_command("expense", "Manage expense records"))
        .subcommand(
            Command::new("chart")
                .about("Daily totals for one record kind")
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .default_value("expense")
                        .value_parser(["income", "expense"]),
                )
                .arg(
                    Arg::new("months")
                        .long("months")
                        .value_parser(value_parser!(u32)),
                )
                .arg(
                    Arg::new("end")
                        .long("end")
                        .help("Last day of the window, YYYY-MM-DD (default today)"),
                )
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("stats")
                .about("Totals, balance and extremes")
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("config")
                .about("Client configuration")
                .subcommand_required(true)
                .subcommand(Command::new("show").about("Print the resolved configuration")),
        )
}
