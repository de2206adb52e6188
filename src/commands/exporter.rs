// Copyright (c) 2025 Cofre Project.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{self, LedgerFilter};
use crate::{accounts, schedule};
use anyhow::{bail, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("accounts", sub)) => export_accounts(conn, sub),
        Some(("ledger", sub)) => export_ledger(conn, sub),
        Some(("schedules", sub)) => export_schedules(conn, sub),
        _ => Ok(()),
    }
}

fn output(sub: &clap::ArgMatches) -> Result<(String, String)> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().clone();
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }
    Ok((fmt, out))
}

fn export_accounts(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (fmt, out) = output(sub)?;
    let list = accounts::list_accounts(conn, None)?;
    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(&out)?;
            wtr.write_record(["id", "kind", "name", "balance", "details"])?;
            for a in &list {
                wtr.write_record([
                    a.id.to_string(),
                    a.kind.as_str().to_string(),
                    a.name.clone(),
                    a.balance.to_string(),
                    a.details.clone(),
                ])?;
            }
            wtr.flush()?;
        }
        _ => std::fs::write(&out, serde_json::to_string_pretty(&list)?)?,
    }
    println!("Exported accounts to {}", out);
    Ok(())
}

fn export_ledger(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (fmt, out) = output(sub)?;
    let entries = ledger::query(conn, &LedgerFilter::default())?;
    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(&out)?;
            wtr.write_record([
                "id",
                "account_id",
                "kind",
                "account_name",
                "date",
                "operation",
                "amount",
                "category",
                "description",
            ])?;
            for e in &entries {
                wtr.write_record([
                    e.id.to_string(),
                    e.account_id.map(|i| i.to_string()).unwrap_or_default(),
                    e.kind.as_str().to_string(),
                    e.account_name.clone(),
                    e.date.to_string(),
                    e.operation.as_str().to_string(),
                    e.amount.to_string(),
                    e.category.clone().unwrap_or_default(),
                    e.description.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        _ => std::fs::write(&out, serde_json::to_string_pretty(&entries)?)?,
    }
    println!("Exported ledger to {}", out);
    Ok(())
}

fn export_schedules(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (fmt, out) = output(sub)?;
    let templates = schedule::list_schedules(conn)?;
    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(&out)?;
            wtr.write_record([
                "id",
                "account_id",
                "kind",
                "account_name",
                "start_date",
                "operation",
                "amount",
                "category",
                "description",
                "recurrence",
                "duration_months",
            ])?;
            for t in &templates {
                wtr.write_record([
                    t.id.to_string(),
                    t.account_id.map(|i| i.to_string()).unwrap_or_default(),
                    t.kind.as_str().to_string(),
                    t.account_name.clone(),
                    t.start_date.to_string(),
                    t.operation.as_str().to_string(),
                    t.amount.to_string(),
                    t.category.clone().unwrap_or_default(),
                    t.description.clone().unwrap_or_default(),
                    t.recurrence.as_str().to_string(),
                    t.duration_months.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        _ => std::fs::write(&out, serde_json::to_string_pretty(&templates)?)?,
    }
    println!("Exported schedules to {}", out);
    Ok(())
}
