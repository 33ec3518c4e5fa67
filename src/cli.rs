// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

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

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(u64))
        .help("Entity id")
}

pub fn build_cli() -> Command {
    Command::new("spendwise")
        .about("Local-first personal finance tracking with rule-based insights and forecasts")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Initialize the data file and print its location"))
        .subcommand(
            Command::new("login")
                .about("Create or replace the local profile")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("email").long("email").required(true))
                .arg(Arg::new("currency").long("currency").default_value("USD"))
                .arg(Arg::new("income").long("income").default_value("0"))
                .arg(
                    Arg::new("savings-goal")
                        .long("savings-goal")
                        .default_value("0"),
                )
                .arg(Arg::new("risk").long("risk").default_value("moderate")),
        )
        .subcommand(Command::new("logout").about("Clear the current profile (history is kept)"))
        .subcommand(
            Command::new("profile")
                .about("Show or update the current profile")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("email").long("email"))
                        .arg(Arg::new("currency").long("currency"))
                        .arg(Arg::new("income").long("income"))
                        .arg(Arg::new("savings-goal").long("savings-goal"))
                        .arg(Arg::new("risk").long("risk")),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and inspect transactions")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("kind").long("kind").default_value("expense"))
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .default_value(""),
                        )
                        .arg(
                            Arg::new("tags")
                                .long("tags")
                                .help("Comma-separated tag list"),
                        )
                        .arg(
                            Arg::new("recurring")
                                .long("recurring")
                                .help("Recurring period: daily|weekly|monthly|yearly"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("month").long("month").help("Filter by YYYY-MM"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("kind").long("kind"))
                        .arg(
                            Arg::new("search")
                                .long("search")
                                .help("Regex matched against descriptions"),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("update")
                        .arg(id_arg())
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("kind").long("kind"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("tags").long("tags")),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("budget")
                .about("Manage category budgets")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("limit").long("limit").required(true))
                        .arg(Arg::new("period").long("period").default_value("monthly"))
                        .arg(
                            Arg::new("no-alerts")
                                .long("no-alerts")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(json_flags(Command::new("status")))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("goal")
                .about("Manage savings goals")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("title").long("title").required(true))
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(Arg::new("deadline").long("deadline").required(true))
                        .arg(Arg::new("category").long("category").default_value(""))
                        .arg(Arg::new("priority").long("priority").default_value("medium"))
                        .arg(Arg::new("start").long("start").default_value("0")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("contribute")
                        .arg(id_arg())
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(Command::new("pause").arg(id_arg()))
                .subcommand(Command::new("resume").arg(id_arg()))
                .subcommand(Command::new("complete").arg(id_arg()))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("insights")
                .about("Generate and list rule-based insights")
                .subcommand(json_flags(Command::new("generate")))
                .subcommand(json_flags(Command::new("list"))),
        )
        .subcommand(
            Command::new("report")
                .about("Aggregate reports over transaction history")
                .subcommand(Command::new("summary"))
                .subcommand(json_flags(Command::new("by-category")))
                .subcommand(json_flags(
                    Command::new("cashflow").arg(
                        Arg::new("months")
                            .long("months")
                            .value_parser(value_parser!(usize))
                            .default_value("12"),
                    ),
                )),
        )
        .subcommand(
            Command::new("planner")
                .about("Forecasts and savings projections")
                .subcommand(json_flags(Command::new("forecast")))
                .subcommand(json_flags(
                    Command::new("goals").arg(
                        Arg::new("monthly-savings")
                            .long("monthly-savings")
                            .help("Assumed monthly savings capacity (defaults to the profile's savings goal)"),
                    ),
                ))
                .subcommand(Command::new("emergency-fund")),
        )
        .subcommand(
            Command::new("export")
                .about("Export data to a file")
                .subcommand(
                    Command::new("snapshot")
                        .arg(Arg::new("out").long("out").required(true)),
                )
                .subcommand(
                    Command::new("transactions")
                        .arg(Arg::new("format").long("format").default_value("csv"))
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Restore data from an exported snapshot")
                .subcommand(
                    Command::new("snapshot").arg(Arg::new("in").long("in").required(true)),
                ),
        )
}
