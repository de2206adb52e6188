// Copyright (c) 2025 Cofre Project.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::simulate::project_growth;
use crate::utils::{fmt_amount, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let initial = parse_decimal(m.get_one::<String>("initial").unwrap())?;
    let monthly = parse_decimal(m.get_one::<String>("monthly").unwrap())?;
    let months = *m.get_one::<u32>("months").unwrap();
    let annual_rate = parse_decimal(m.get_one::<String>("annual-rate").unwrap())?;
    let fraction = parse_decimal(m.get_one::<String>("rate-fraction").unwrap())?;

    let projection = project_growth(initial, monthly, months, annual_rate, fraction);
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &projection)? {
        return Ok(());
    }

    println!(
        "After {} months: {} ({} contributed, {} earned)",
        months,
        fmt_amount(&projection.final_value),
        fmt_amount(&projection.contributed),
        fmt_amount(&projection.earned)
    );
    let rows = projection
        .points
        .iter()
        .map(|p| vec![p.month.to_string(), fmt_amount(&p.value)])
        .collect();
    println!("{}", pretty_table(&["Month", "Value"], rows));
    Ok(())
}
