// Copyright (c) 2025 Cofre Project.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{self, LedgerFilter};
use crate::utils::{
    fmt_amount, maybe_print_json, parse_date, parse_decimal, parse_kind, parse_operation,
    pretty_table, today,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            ledger::delete_transaction(conn, id)?;
            println!("Deleted transaction {} and reversed its effect", id);
        }
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let account = *sub.get_one::<i64>("account").unwrap();
    let operation = parse_operation(sub.get_one::<String>("op").unwrap())?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let now = today();
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => now,
    };
    let category = sub.get_one::<String>("category").map(String::as_str);
    let desc = sub.get_one::<String>("desc").map(String::as_str);

    let entry =
        ledger::record_transaction(conn, account, operation, amount, date, category, desc, now)?;
    println!(
        "Recorded {} of {} on {} for '{}' (entry {})",
        operation.as_str(),
        fmt_amount(&amount),
        date,
        entry.account_name,
        entry.id
    );
    Ok(())
}

fn edit(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let operation = parse_operation(sub.get_one::<String>("op").unwrap())?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let category = sub.get_one::<String>("category").map(String::as_str);
    let desc = sub.get_one::<String>("desc").map(String::as_str);

    ledger::edit_transaction(conn, id, operation, amount, date, category, desc)?;
    println!("Updated transaction {}", id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let filter = LedgerFilter {
        kind: sub
            .get_one::<String>("kind")
            .map(|s| parse_kind(s))
            .transpose()?,
        operation: sub
            .get_one::<String>("op")
            .map(|s| parse_operation(s))
            .transpose()?,
        on: sub
            .get_one::<String>("on")
            .map(|s| parse_date(s))
            .transpose()?,
        from: sub
            .get_one::<String>("from")
            .map(|s| parse_date(s))
            .transpose()?,
        to: sub
            .get_one::<String>("to")
            .map(|s| parse_date(s))
            .transpose()?,
    };
    let mut entries = ledger::query(conn, &filter)?;
    if let Some(limit) = sub.get_one::<usize>("limit") {
        entries.truncate(*limit);
    }

    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &entries)? {
        let rows = entries
            .iter()
            .map(|e| {
                vec![
                    e.id.to_string(),
                    e.date.to_string(),
                    e.account_name.clone(),
                    e.kind.as_str().to_string(),
                    e.operation.as_str().to_string(),
                    fmt_amount(&e.amount),
                    e.category.clone().unwrap_or_default(),
                    e.description.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Account", "Kind", "Operation", "Amount", "Category", "Description"],
                rows,
            )
        );
    }
    Ok(())
}
