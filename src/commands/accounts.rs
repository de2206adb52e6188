// Copyright (c) 2025 Cofre Project.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::accounts;
use crate::utils::{fmt_amount, maybe_print_json, parse_decimal, parse_kind, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let kind = parse_kind(sub.get_one::<String>("kind").unwrap())?;
            let name = sub.get_one::<String>("name").unwrap();
            let balance = parse_decimal(sub.get_one::<String>("balance").unwrap())?;
            let details = sub.get_one::<String>("details").unwrap();
            let account = accounts::create_account(conn, kind, name, balance, details)?;
            println!(
                "Added {} '{}' (id {}, balance {})",
                kind.as_str(),
                account.name,
                account.id,
                fmt_amount(&account.balance)
            );
        }
        Some(("list", sub)) => {
            let kind = sub
                .get_one::<String>("kind")
                .map(|s| parse_kind(s))
                .transpose()?;
            let list = accounts::list_accounts(conn, kind)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &list)? {
                let rows = list
                    .iter()
                    .map(|a| {
                        vec![
                            a.id.to_string(),
                            a.kind.as_str().to_string(),
                            a.name.clone(),
                            fmt_amount(&a.balance),
                            a.details.clone(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["ID", "Kind", "Name", "Balance", "Details"], rows)
                );
            }
        }
        Some(("rename", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let name = sub.get_one::<String>("name").unwrap();
            let new_name = sub.get_one::<String>("new-name").unwrap();
            let details = sub.get_one::<String>("details").unwrap();
            accounts::rename_account(conn, id, name, new_name, details)?;
            println!("Renamed '{}' to '{}'", name, new_name);
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let name = sub.get_one::<String>("name").unwrap();
            let impact = accounts::deletion_impact(conn, id, name)?;
            if !sub.get_flag("yes") {
                println!(
                    "Deleting '{}' would remove {} ledger entries and {} schedules. \
                     Re-run with --yes to confirm.",
                    name, impact.ledger_entries, impact.schedules
                );
            } else {
                let cascaded = accounts::delete_account(conn, id, name)?;
                println!("Removed '{}' and {} linked rows", name, cascaded);
            }
        }
        Some(("summary", sub)) => {
            let s = accounts::summary(conn)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
                let rows = vec![
                    vec!["Banks".to_string(), fmt_amount(&s.banks)],
                    vec!["Investments".to_string(), fmt_amount(&s.investments)],
                    vec!["Total".to_string(), fmt_amount(&s.total)],
                ];
                println!("{}", pretty_table(&["", "Balance"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}
