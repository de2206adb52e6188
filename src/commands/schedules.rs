// Copyright (c) 2025 Cofre Project.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::schedule;
use crate::utils::{
    fmt_amount, maybe_print_json, parse_date, parse_decimal, parse_operation, parse_recurrence,
    pretty_table, today,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("pending", sub)) => pending(conn, sub)?,
        Some(("realize", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let date = parse_date(sub.get_one::<String>("date").unwrap())?;
            let entry = schedule::realize_occurrence(conn, id, date, today())?;
            println!(
                "Realized {} of {} on {} (entry {})",
                entry.operation.as_str(),
                fmt_amount(&entry.amount),
                date,
                entry.id
            );
        }
        Some(("realize-all", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let outcome = schedule::realize_all(conn, id, today())?;
            println!(
                "Realized {} occurrences, skipped {} for insufficient balance",
                outcome.realized, outcome.skipped
            );
        }
        Some(("dismiss", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let date = parse_date(sub.get_one::<String>("date").unwrap())?;
            schedule::dismiss_occurrence(conn, id, date, today())?;
            println!("Dismissed occurrence {} of schedule {}", date, id);
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            schedule::delete_schedule(conn, id)?;
            println!("Removed schedule {}", id);
        }
        Some(("cleanup", _)) => {
            let pruned = schedule::cleanup_completed(conn, today())?;
            println!("Pruned {} completed schedules", pruned);
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let account = *sub.get_one::<i64>("account").unwrap();
    let operation = parse_operation(sub.get_one::<String>("op").unwrap())?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let start = parse_date(sub.get_one::<String>("start").unwrap())?;
    let recurrence = parse_recurrence(sub.get_one::<String>("recurrence").unwrap())?;
    let duration = *sub.get_one::<u32>("duration-months").unwrap();
    let category = sub.get_one::<String>("category").map(String::as_str);
    let desc = sub.get_one::<String>("desc").map(String::as_str);

    let t = schedule::create_schedule(
        conn, account, operation, amount, start, category, desc, recurrence, duration,
        today(),
    )?;
    println!(
        "Scheduled {} {} of {} starting {} (schedule {})",
        recurrence.as_str(),
        operation.as_str(),
        fmt_amount(&amount),
        start,
        t.id
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let templates = schedule::list_schedules(conn)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &templates)? {
        let rows = templates
            .iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    t.account_name.clone(),
                    t.start_date.to_string(),
                    t.operation.as_str().to_string(),
                    fmt_amount(&t.amount),
                    t.recurrence.as_str().to_string(),
                    t.duration_months.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Account", "Start", "Operation", "Amount", "Recurrence", "Months"],
                rows,
            )
        );
    }
    Ok(())
}

fn pending(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let dates = schedule::pending_occurrences(conn, id, today())?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &dates)? {
        let rows = dates.iter().map(|d| vec![d.to_string()]).collect();
        println!("{}", pretty_table(&["Pending date"], rows));
    }
    Ok(())
}
