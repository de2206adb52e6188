// Copyright (c) 2025 Cofre Project.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::errors::{LedgerError, Result};
use crate::models::{AccountKind, LedgerEntry, OperationKind, Recurrence, ScheduleTemplate};
use crate::reconcile::{apply_effect, effect_of};
use crate::recurrence::expand;
use crate::utils::stored_decimal;

/// Outcome of a batch realization. A skipped occurrence stays pending; only
/// realized ones are excluded from future listings.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RealizeOutcome {
    pub realized: usize,
    pub skipped: usize,
}

/// The persisted mark that an occurrence was handled, whether realized or
/// dismissed. Keys only grow; nothing ever removes one.
pub fn exclusion_key(template_id: i64, date: NaiveDate) -> String {
    format!("{}_{}", template_id, date)
}

pub fn create_schedule(
    conn: &Connection,
    account_id: i64,
    operation: OperationKind,
    amount: Decimal,
    start_date: NaiveDate,
    category: Option<&str>,
    description: Option<&str>,
    recurrence: Recurrence,
    duration_months: u32,
    today: NaiveDate,
) -> Result<ScheduleTemplate> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(amount));
    }
    if start_date < today {
        return Err(LedgerError::PastStartDate(start_date));
    }
    let account = crate::accounts::get_account(conn, account_id)?;
    conn.execute(
        "INSERT INTO schedules(account_id, kind, account_name, start_date, operation, amount,
                               category, description, recurrence, duration_months)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            account_id,
            account.kind.as_str(),
            account.name,
            start_date,
            operation.as_str(),
            amount.to_string(),
            category,
            description,
            recurrence.as_str(),
            duration_months
        ],
    )?;
    Ok(ScheduleTemplate {
        id: conn.last_insert_rowid(),
        account_id: Some(account_id),
        kind: account.kind,
        account_name: account.name,
        start_date,
        operation,
        amount,
        category: category.map(str::to_string),
        description: description.map(str::to_string),
        recurrence,
        duration_months,
    })
}

pub fn get_schedule(conn: &Connection, template_id: i64) -> Result<ScheduleTemplate> {
    let mut stmt = conn.prepare(
        "SELECT id, account_id, kind, account_name, start_date, operation, amount,
                category, description, recurrence, duration_months
         FROM schedules WHERE id=?1",
    )?;
    let mut rows = stmt.query(params![template_id])?;
    match rows.next()? {
        Some(r) => template_from_row(r),
        None => Err(LedgerError::NotFound(format!("schedule {}", template_id))),
    }
}

pub fn list_schedules(conn: &Connection) -> Result<Vec<ScheduleTemplate>> {
    let mut stmt = conn.prepare(
        "SELECT id, account_id, kind, account_name, start_date, operation, amount,
                category, description, recurrence, duration_months
         FROM schedules ORDER BY start_date, id",
    )?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        out.push(template_from_row(r)?);
    }
    Ok(out)
}

/// Expanded occurrences of one template that have not been realized or
/// dismissed yet, ascending by date.
pub fn pending_occurrences(
    conn: &Connection,
    template_id: i64,
    today: NaiveDate,
) -> Result<Vec<NaiveDate>> {
    let t = get_schedule(conn, template_id)?;
    let mut out = Vec::new();
    for date in expand(t.start_date, t.recurrence, t.duration_months, today) {
        if !is_excluded(conn, template_id, date)? {
            out.push(date);
        }
    }
    Ok(out)
}

/// Turn one pending occurrence into a ledger entry. The entry insert, the
/// balance update and the exclusion mark commit together; an entry must
/// never exist without its exclusion or it would be offered again as
/// pending on the next listing.
pub fn realize_occurrence(
    conn: &mut Connection,
    template_id: i64,
    date: NaiveDate,
    today: NaiveDate,
) -> Result<LedgerEntry> {
    let tx = conn.transaction()?;
    let t = get_schedule(&tx, template_id)?;
    if !pending_contains(&tx, &t, date, today)? {
        return Err(LedgerError::NotFound(format!(
            "pending occurrence {} of schedule {}",
            date, template_id
        )));
    }
    let account_id = revalidate_account(&tx, &t)?;
    apply_effect(&tx, account_id, effect_of(t.operation, t.amount))?;
    tx.execute(
        "INSERT INTO ledger(account_id, kind, account_name, date, operation, amount, category, description)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            account_id,
            t.kind.as_str(),
            t.account_name,
            date,
            t.operation.as_str(),
            t.amount.to_string(),
            t.category,
            t.description
        ],
    )?;
    let entry_id = tx.last_insert_rowid();
    tx.execute(
        "INSERT INTO exclusions(key) VALUES (?1)",
        params![exclusion_key(template_id, date)],
    )?;
    tx.commit()?;
    Ok(LedgerEntry {
        id: entry_id,
        account_id: Some(account_id),
        kind: t.kind,
        account_name: t.account_name,
        date,
        operation: t.operation,
        amount: t.amount,
        category: t.category,
        description: t.description,
    })
}

/// Realize every pending occurrence in date order. An occurrence the balance
/// cannot cover is skipped, not retried and not fatal; everything else still
/// goes through. Any other error aborts the batch.
pub fn realize_all(
    conn: &mut Connection,
    template_id: i64,
    today: NaiveDate,
) -> Result<RealizeOutcome> {
    let pending = pending_occurrences(conn, template_id, today)?;
    let mut outcome = RealizeOutcome {
        realized: 0,
        skipped: 0,
    };
    for date in pending {
        match realize_occurrence(conn, template_id, date, today) {
            Ok(_) => outcome.realized += 1,
            Err(LedgerError::InsufficientBalance { .. }) => outcome.skipped += 1,
            Err(e) => return Err(e),
        }
    }
    Ok(outcome)
}

/// Mark an occurrence handled without creating a ledger entry.
pub fn dismiss_occurrence(
    conn: &Connection,
    template_id: i64,
    date: NaiveDate,
    today: NaiveDate,
) -> Result<()> {
    let t = get_schedule(conn, template_id)?;
    if !pending_contains(conn, &t, date, today)? {
        return Err(LedgerError::NotFound(format!(
            "pending occurrence {} of schedule {}",
            date, template_id
        )));
    }
    conn.execute(
        "INSERT INTO exclusions(key) VALUES (?1)",
        params![exclusion_key(template_id, date)],
    )?;
    Ok(())
}

/// Removes the template only; ledger entries realized from it stay.
pub fn delete_schedule(conn: &Connection, template_id: i64) -> Result<()> {
    let gone = conn.execute("DELETE FROM schedules WHERE id=?1", params![template_id])?;
    if gone == 0 {
        return Err(LedgerError::NotFound(format!("schedule {}", template_id)));
    }
    Ok(())
}

/// Prune templates with nothing left to offer: every expanded occurrence is
/// already excluded, or the expansion is empty (a one-time schedule whose
/// date has passed). Returns the number pruned.
pub fn cleanup_completed(conn: &mut Connection, today: NaiveDate) -> Result<usize> {
    let templates = list_schedules(conn)?;
    let tx = conn.transaction()?;
    let mut pruned = 0;
    for t in templates {
        let mut done = true;
        for date in expand(t.start_date, t.recurrence, t.duration_months, today) {
            if !is_excluded(&tx, t.id, date)? {
                done = false;
                break;
            }
        }
        if done {
            tx.execute("DELETE FROM schedules WHERE id=?1", params![t.id])?;
            pruned += 1;
        }
    }
    tx.commit()?;
    Ok(pruned)
}

fn is_excluded(conn: &Connection, template_id: i64, date: NaiveDate) -> Result<bool> {
    let hit: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM exclusions WHERE key=?1",
            params![exclusion_key(template_id, date)],
            |r| r.get(0),
        )
        .optional()?;
    Ok(hit.is_some())
}

fn pending_contains(
    conn: &Connection,
    t: &ScheduleTemplate,
    date: NaiveDate,
    today: NaiveDate,
) -> Result<bool> {
    if !expand(t.start_date, t.recurrence, t.duration_months, today).contains(&date) {
        return Ok(false);
    }
    Ok(!is_excluded(conn, t.id, date)?)
}

/// Occurrence realization re-checks that the account the template points at
/// still exists under the name the template snapshotted; anything else means
/// the template went stale under the user.
fn revalidate_account(conn: &Connection, t: &ScheduleTemplate) -> Result<i64> {
    let stale = || LedgerError::StaleRecord {
        id: t.account_id.unwrap_or(t.id),
        name: t.account_name.clone(),
    };
    match t.account_id {
        Some(id) => match crate::accounts::get_account(conn, id) {
            Ok(account) if account.name == t.account_name => Ok(id),
            Ok(_) | Err(LedgerError::NotFound(_)) => Err(stale()),
            Err(e) => Err(e),
        },
        // Legacy template without a stable link: fall back to the
        // denormalized (name, kind) key.
        None => crate::accounts::resolve_account_id(conn, None, &t.account_name, t.kind)
            .map_err(|_| stale()),
    }
}

fn template_from_row(r: &rusqlite::Row<'_>) -> Result<ScheduleTemplate> {
    let kind_s: String = r.get(2)?;
    let operation_s: String = r.get(5)?;
    let amount_s: String = r.get(6)?;
    let recurrence_s: String = r.get(9)?;
    let duration: i64 = r.get(10)?;
    Ok(ScheduleTemplate {
        id: r.get(0)?,
        account_id: r.get(1)?,
        kind: AccountKind::parse(&kind_s).ok_or(LedgerError::Corrupt(kind_s))?,
        account_name: r.get(3)?,
        start_date: r.get(4)?,
        operation: OperationKind::parse(&operation_s).ok_or(LedgerError::Corrupt(operation_s))?,
        amount: stored_decimal(&amount_s)?,
        category: r.get(7)?,
        description: r.get(8)?,
        recurrence: Recurrence::parse(&recurrence_s).ok_or(LedgerError::Corrupt(recurrence_s))?,
        duration_months: duration.max(0) as u32,
    })
}
