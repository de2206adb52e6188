// Copyright (c) 2025 Cofre Project.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("cofre")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Personal finance ledger with balance-safe transactions and scheduled recurrences")
        .arg(
            Arg::new("profile")
                .long("profile")
                .global(true)
                .default_value("default")
                .help("Data profile (one database per profile)"),
        )
        .subcommand(Command::new("init").about("Initialize the profile database"))
        .subcommand(account_cmd())
        .subcommand(tx_cmd())
        .subcommand(schedule_cmd())
        .subcommand(simulate_cmd())
        .subcommand(export_cmd())
        .subcommand(Command::new("doctor").about("Check the store for inconsistencies"))
}

fn account_cmd() -> Command {
    Command::new("account")
        .about("Manage bank and investment accounts")
        .subcommand(
            Command::new("add")
                .about("Register an account")
                .arg(Arg::new("kind").long("kind").required(true).help("bank|investment"))
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("balance").long("balance").default_value("0"))
                .arg(Arg::new("details").long("details").default_value("")),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List accounts")
                .arg(Arg::new("kind").long("kind").help("bank|investment")),
        ))
        .subcommand(
            Command::new("rename")
                .about("Rename an account and cascade to its history")
                .arg(
                    Arg::new("id")
                        .long("id")
                        .required(true)
                        .value_parser(value_parser!(i64)),
                )
                .arg(
                    Arg::new("name")
                        .long("name")
                        .required(true)
                        .help("Current name, as a staleness check"),
                )
                .arg(Arg::new("new-name").long("new-name").required(true))
                .arg(Arg::new("details").long("details").default_value("")),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete an account and everything linked to it")
                .arg(
                    Arg::new("id")
                        .long("id")
                        .required(true)
                        .value_parser(value_parser!(i64)),
                )
                .arg(
                    Arg::new("name")
                        .long("name")
                        .required(true)
                        .help("Current name, as a staleness check"),
                )
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .action(ArgAction::SetTrue)
                        .help("Confirm; without this only the impact is shown"),
                ),
        )
        .subcommand(json_flags(
            Command::new("summary").about("Balance totals per kind"),
        ))
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and manage realized transactions")
        .subcommand(
            Command::new("add")
                .about("Record a deposit or withdrawal")
                .arg(
                    Arg::new("account")
                        .long("account")
                        .required(true)
                        .value_parser(value_parser!(i64))
                        .help("Account id"),
                )
                .arg(Arg::new("op").long("op").required(true).help("deposit|withdrawal"))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("desc").long("desc")),
        )
        .subcommand(
            Command::new("edit")
                .about("Overwrite a recorded transaction")
                .arg(
                    Arg::new("id")
                        .long("id")
                        .required(true)
                        .value_parser(value_parser!(i64)),
                )
                .arg(Arg::new("op").long("op").required(true).help("deposit|withdrawal"))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("date").long("date").required(true))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("desc").long("desc")),
        )
        .subcommand(
            Command::new("rm").about("Delete a transaction and reverse its effect").arg(
                Arg::new("id")
                    .long("id")
                    .required(true)
                    .value_parser(value_parser!(i64)),
            ),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List transactions, newest first")
                .arg(Arg::new("kind").long("kind").help("bank|investment"))
                .arg(Arg::new("op").long("op").help("deposit|withdrawal"))
                .arg(Arg::new("on").long("on").help("Exact date YYYY-MM-DD"))
                .arg(Arg::new("from").long("from"))
                .arg(Arg::new("to").long("to"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
}

fn schedule_cmd() -> Command {
    Command::new("schedule")
        .about("Plan future transactions and realize their occurrences")
        .subcommand(
            Command::new("add")
                .about("Create a future transaction template")
                .arg(
                    Arg::new("account")
                        .long("account")
                        .required(true)
                        .value_parser(value_parser!(i64))
                        .help("Account id"),
                )
                .arg(Arg::new("op").long("op").required(true).help("deposit|withdrawal"))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("start").long("start").required(true).help("YYYY-MM-DD"))
                .arg(
                    Arg::new("recurrence")
                        .long("recurrence")
                        .default_value("none")
                        .help("none|weekly|biweekly|monthly"),
                )
                .arg(
                    Arg::new("duration-months")
                        .long("duration-months")
                        .default_value("0")
                        .value_parser(value_parser!(u32))
                        .help("0 means the full 12-month horizon"),
                )
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("desc").long("desc")),
        )
        .subcommand(json_flags(Command::new("list").about("List templates")))
        .subcommand(json_flags(
            Command::new("pending")
                .about("Dates still awaiting action for one template")
                .arg(
                    Arg::new("id")
                        .long("id")
                        .required(true)
                        .value_parser(value_parser!(i64)),
                ),
        ))
        .subcommand(
            Command::new("realize")
                .about("Turn one pending occurrence into a ledger entry")
                .arg(
                    Arg::new("id")
                        .long("id")
                        .required(true)
                        .value_parser(value_parser!(i64)),
                )
                .arg(Arg::new("date").long("date").required(true)),
        )
        .subcommand(
            Command::new("realize-all")
                .about("Realize every pending occurrence, skipping unaffordable ones")
                .arg(
                    Arg::new("id")
                        .long("id")
                        .required(true)
                        .value_parser(value_parser!(i64)),
                ),
        )
        .subcommand(
            Command::new("dismiss")
                .about("Drop one pending occurrence without recording it")
                .arg(
                    Arg::new("id")
                        .long("id")
                        .required(true)
                        .value_parser(value_parser!(i64)),
                )
                .arg(Arg::new("date").long("date").required(true)),
        )
        .subcommand(
            Command::new("rm").about("Delete a template").arg(
                Arg::new("id")
                    .long("id")
                    .required(true)
                    .value_parser(value_parser!(i64)),
            ),
        )
        .subcommand(
            Command::new("cleanup").about("Prune templates with nothing left to offer"),
        )
}

fn simulate_cmd() -> Command {
    json_flags(
        Command::new("simulate")
            .about("Project compound growth of an investment")
            .arg(Arg::new("initial").long("initial").default_value("0"))
            .arg(Arg::new("monthly").long("monthly").default_value("0"))
            .arg(
                Arg::new("months")
                    .long("months")
                    .default_value("12")
                    .value_parser(value_parser!(u32)),
            )
            .arg(
                Arg::new("annual-rate")
                    .long("annual-rate")
                    .required(true)
                    .help("Annual reference rate, percent"),
            )
            .arg(
                Arg::new("rate-fraction")
                    .long("rate-fraction")
                    .default_value("100")
                    .help("Percent of the reference rate the product pays"),
            ),
    )
}

fn export_cmd() -> Command {
    let table = |name: &'static str, about: &'static str| {
        Command::new(name)
            .about(about)
            .arg(Arg::new("format").long("format").required(true).help("csv|json"))
            .arg(Arg::new("out").long("out").required(true))
    };
    Command::new("export")
        .about("Export tables to CSV or JSON")
        .subcommand(table("accounts", "Export accounts"))
        .subcommand(table("ledger", "Export the transaction ledger"))
        .subcommand(table("schedules", "Export schedule templates"))
}
