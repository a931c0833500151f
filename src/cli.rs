// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn owner_arg() -> Arg {
    Arg::new("owner").long("owner").required(true)
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .help("Target month as YYYY-MM (defaults to the current month)")
}

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
    Command::new("debtmeter")
        .about("Loan and card EMI tracking, budget overspend checks, and debt risk analytics")
        .version(clap::crate_version!())
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Create the database if missing"))
        .subcommand(
            Command::new("owner")
                .about("Manage owners")
                .subcommand(
                    Command::new("add")
                        .about("Add an owner")
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(Command::new("list").about("List owners"))
                .subcommand(
                    Command::new("rm")
                        .about("Remove an owner and all their records")
                        .arg(Arg::new("name").long("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("income")
                .about("Declare monthly income")
                .subcommand(
                    Command::new("set")
                        .about("Set an owner's declared income")
                        .arg(owner_arg())
                        .arg(Arg::new("salary").long("salary").required(true))
                        .arg(Arg::new("other").long("other").default_value("0"))
                        .arg(
                            Arg::new("effective")
                                .long("effective")
                                .help("Effective date YYYY-MM-DD (defaults to today)"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("show")
                        .about("Show an owner's declared income")
                        .arg(owner_arg()),
                )),
        )
        .subcommand(
            Command::new("loan")
                .about("Manage loans")
                .subcommand(
                    Command::new("add")
                        .about("Add a loan")
                        .arg(owner_arg())
                        .arg(Arg::new("type").long("type").required(true))
                        .arg(Arg::new("lender").long("lender").default_value(""))
                        .arg(Arg::new("emi").long("emi").required(true))
                        .arg(Arg::new("start").long("start").required(true))
                        .arg(
                            Arg::new("end")
                                .long("end")
                                .help("End date YYYY-MM-DD; omit for an open-ended loan"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List loans with runtime status")
                        .arg(owner_arg())
                        .arg(month_arg()),
                ))
                .subcommand(
                    Command::new("rm").about("Remove a loan").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("card")
                .about("Manage credit cards and EMI entries")
                .subcommand(
                    Command::new("add")
                        .about("Add a card")
                        .arg(owner_arg())
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("issuer").long("issuer").default_value(""))
                        .arg(Arg::new("limit").long("limit").required(true))
                        .arg(Arg::new("rate").long("rate").default_value("0"))
                        .arg(Arg::new("reward").long("reward").default_value("0")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List cards with outstanding and utilization")
                        .arg(owner_arg())
                        .arg(month_arg()),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a card and its entries")
                        .arg(owner_arg())
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(
                    Command::new("entry")
                        .about("Manage card EMI entries")
                        .subcommand(
                            Command::new("add")
                                .about("Add a financed EMI entry")
                                .arg(owner_arg())
                                .arg(Arg::new("card").long("card").required(true))
                                .arg(Arg::new("amount").long("amount").required(true))
                                .arg(
                                    Arg::new("tenure")
                                        .long("tenure")
                                        .required(true)
                                        .value_parser(value_parser!(u32)),
                                )
                                .arg(
                                    Arg::new("start")
                                        .long("start")
                                        .required(true)
                                        .help("First installment month YYYY-MM"),
                                )
                                .arg(Arg::new("note").long("note").default_value("")),
                        )
                        .subcommand(json_flags(
                            Command::new("list")
                                .about("List EMI entries with schedule state")
                                .arg(owner_arg())
                                .arg(month_arg()),
                        )),
                )
                .subcommand(json_flags(
                    Command::new("schedule")
                        .about("Show one entry's amortization at a month")
                        .arg(owner_arg())
                        .arg(
                            Arg::new("entry")
                                .long("entry")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(month_arg()),
                )),
        )
        .subcommand(
            Command::new("budget")
                .about("Manage and compare budgets")
                .subcommand(
                    Command::new("set")
                        .about("Set a category budget for a month")
                        .arg(owner_arg())
                        .arg(Arg::new("month").long("month").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(
                    Command::new("list")
                        .about("List budgets")
                        .arg(owner_arg())
                        .arg(month_arg()),
                )
                .subcommand(json_flags(
                    Command::new("report")
                        .about("Planned versus actual per category")
                        .arg(owner_arg())
                        .arg(month_arg()),
                )),
        )
        .subcommand(json_flags(
            Command::new("obligations")
                .about("This month's payment obligations")
                .arg(owner_arg())
                .arg(month_arg()),
        ))
        .subcommand(json_flags(
            Command::new("risk")
                .about("Debt burden tier and advisory")
                .arg(owner_arg())
                .arg(month_arg()),
        ))
        .subcommand(json_flags(
            Command::new("analytics")
                .about("Debt-mix, cashflow and balance-timeline series")
                .arg(owner_arg())
                .arg(
                    Arg::new("start")
                        .long("start")
                        .help("First month of the window YYYY-MM (defaults to the current month)"),
                )
                .arg(
                    Arg::new("months")
                        .long("months")
                        .default_value("12")
                        .value_parser(value_parser!(u32)),
                ),
        ))
        .subcommand(
            Command::new("export")
                .about("Export computed structures")
                .subcommand(
                    Command::new("obligations")
                        .about("Export a month's obligations")
                        .arg(owner_arg())
                        .arg(month_arg())
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv or json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                )
                .subcommand(
                    Command::new("analytics")
                        .about("Export the analytics bundle as JSON")
                        .arg(owner_arg())
                        .arg(Arg::new("start").long("start"))
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .default_value("12")
                                .value_parser(value_parser!(u32)),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored records for inconsistencies"))
}
