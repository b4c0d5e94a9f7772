// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::DEFAULT_CATEGORIES;
use clap::{command, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn period_arg() -> Arg {
    Arg::new("period")
        .long("period")
        .default_value("all")
        .value_parser(["this-month", "last-3-months", "this-year", "all"])
        .help("Restrict to transactions in this period")
}

fn tx_field_args(cmd: Command, required: bool) -> Command {
    cmd.arg(Arg::new("amount").long("amount").required(required))
        .arg(
            Arg::new("category")
                .long("category")
                .required(required)
                .help(format!("Free text, e.g. {}", DEFAULT_CATEGORIES.join(", "))),
        )
        .arg(Arg::new("date").long("date").help("YYYY-MM-DD (default: today)"))
        .arg(Arg::new("description").long("description"))
        .arg(
            Arg::new("type")
                .long("type")
                .required(required)
                .value_parser(["income", "expense"]),
        )
}

pub fn build_cli() -> Command {
    command!()
        .name("fintrack")
        .about("Track income and expenses, set category budgets, and review spending")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("Path to the database file (default: $FINTRACK_DB or the platform data dir)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Log more (repeat for debug)"),
        )
        .subcommand(
            Command::new("init").about("Create the database").arg(
                Arg::new("sample")
                    .long("sample")
                    .action(ArgAction::SetTrue)
                    .help("Load demo transactions and budgets into empty collections"),
            ),
        )
        .subcommand(
            Command::new("signup")
                .about("Create an account and log in")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("email").long("email").required(true))
                .arg(Arg::new("password").long("password").required(true)),
        )
        .subcommand(
            Command::new("login")
                .about("Log in with email and password")
                .arg(Arg::new("email").long("email").required(true))
                .arg(Arg::new("password").long("password").required(true)),
        )
        .subcommand(Command::new("logout").about("End the current session"))
        .subcommand(Command::new("whoami").about("Show the logged in user"))
        .subcommand(
            Command::new("profile")
                .about("Manage the logged in account")
                .subcommand_required(true)
                .subcommand(
                    Command::new("update")
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("email").long("email")),
                )
                .subcommand(
                    Command::new("password")
                        .arg(Arg::new("current").long("current").required(true))
                        .arg(Arg::new("new").long("new").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and browse transactions")
                .subcommand_required(true)
                .subcommand(tx_field_args(Command::new("add"), true))
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(
                            Arg::new("search")
                                .long("search")
                                .help("Match description or category, ignoring case"),
                        )
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["income", "expense"]),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(clap::value_parser!(usize)),
                        ),
                ))
                .subcommand(tx_field_args(
                    Command::new("edit").arg(Arg::new("id").required(true)),
                    false,
                ))
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true)))
                .subcommand(Command::new("categories").about("Categories in use")),
        )
        .subcommand(
            Command::new("budget")
                .about("Category spending limits")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("edit")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("spent").long("spent")),
                )
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true))),
        )
        .subcommand(
            Command::new("report")
                .about("Totals, breakdowns and insights")
                .subcommand_required(true)
                .subcommand(json_flags(Command::new("summary").arg(period_arg())))
                .subcommand(json_flags(Command::new("categories").arg(period_arg())))
                .subcommand(json_flags(Command::new("trend").arg(period_arg())))
                .subcommand(json_flags(Command::new("insights").arg(period_arg())))
                .subcommand(json_flags(Command::new("budgets"))),
        )
        .subcommand(
            Command::new("export")
                .about("Write transactions to a file")
                .subcommand_required(true)
                .subcommand(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .value_parser(["csv", "json"]),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored data for inconsistencies"))
}
