// Copyright (c) 2025 Cofre Project.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Balances that no longer parse or went negative out-of-band
    let mut stmt = conn.prepare("SELECT id, name, balance FROM accounts")?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let name: String = r.get(1)?;
        let balance: String = r.get(2)?;
        match balance.parse::<Decimal>() {
            Ok(d) if d < Decimal::ZERO => {
                rows.push(vec!["negative_balance".into(), format!("{} '{}'", id, name)]);
            }
            Ok(_) => {}
            Err(_) => {
                rows.push(vec!["corrupt_balance".into(), format!("{} '{}'", id, name)]);
            }
        }
    }

    // 2) Ledger rows pointing at accounts that no longer exist
    let mut stmt2 = conn.prepare(
        "SELECT id, account_id FROM ledger
         WHERE account_id IS NOT NULL AND account_id NOT IN (SELECT id FROM accounts)",
    )?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: i64 = r.get(0)?;
        let acct: i64 = r.get(1)?;
        rows.push(vec!["orphan_ledger_row".into(), format!("{} -> account {}", id, acct)]);
    }

    // 3) Legacy rows the open-time backfill could not resolve
    let unresolved: i64 =
        conn.query_row("SELECT COUNT(*) FROM ledger WHERE account_id IS NULL", [], |r| {
            r.get(0)
        })?;
    if unresolved > 0 {
        rows.push(vec!["unresolved_ledger_rows".into(), unresolved.to_string()]);
    }

    // 4) Schedules pointing nowhere
    let mut stmt3 = conn.prepare(
        "SELECT id, account_id FROM schedules
         WHERE account_id IS NOT NULL AND account_id NOT IN (SELECT id FROM accounts)",
    )?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let id: i64 = r.get(0)?;
        let acct: i64 = r.get(1)?;
        rows.push(vec!["orphan_schedule".into(), format!("{} -> account {}", id, acct)]);
    }

    // 5) Exclusion keys for templates that are gone. Expected after cleanup
    // (the exclusion set only grows), listed for visibility.
    let orphan_keys: i64 = conn.query_row(
        "SELECT COUNT(*) FROM exclusions
         WHERE CAST(substr(key, 1, instr(key, '_') - 1) AS INTEGER) NOT IN
               (SELECT id FROM schedules)",
        [],
        |r| r.get(0),
    )?;
    if orphan_keys > 0 {
        rows.push(vec!["exclusions_without_template".into(), orphan_keys.to_string()]);
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
