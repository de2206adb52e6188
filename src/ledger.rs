// Copyright (c) 2025 Cofre Project.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

use crate::accounts::resolve_account_id;
use crate::errors::{LedgerError, Result};
use crate::models::{AccountKind, LedgerEntry, OperationKind};
use crate::reconcile::{apply_effect, effect_of};
use crate::utils::stored_decimal;

#[derive(Debug, Clone, Default)]
pub struct LedgerFilter {
    pub kind: Option<AccountKind>,
    pub operation: Option<OperationKind>,
    pub on: Option<NaiveDate>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Record a realized transaction against an account. Future dates are
/// rejected here; projecting forward is the schedule engine's job.
/// The balance update and the ledger insert commit as one unit.
pub fn record_transaction(
    conn: &mut Connection,
    account_id: i64,
    operation: OperationKind,
    amount: Decimal,
    date: NaiveDate,
    category: Option<&str>,
    description: Option<&str>,
    today: NaiveDate,
) -> Result<LedgerEntry> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(amount));
    }
    if date > today {
        return Err(LedgerError::FutureDateNotAllowed(date));
    }
    let tx = conn.transaction()?;
    let account = crate::accounts::get_account(&tx, account_id)?;
    apply_effect(&tx, account_id, effect_of(operation, amount))?;
    tx.execute(
        "INSERT INTO ledger(account_id, kind, account_name, date, operation, amount, category, description)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            account_id,
            account.kind.as_str(),
            account.name,
            date,
            operation.as_str(),
            amount.to_string(),
            category,
            description
        ],
    )?;
    let id = tx.last_insert_rowid();
    tx.commit()?;
    Ok(LedgerEntry {
        id,
        account_id: Some(account_id),
        kind: account.kind,
        account_name: account.name,
        date,
        operation,
        amount,
        category: category.map(str::to_string),
        description: description.map(str::to_string),
    })
}

/// Overwrite an entry. The old effect is reversed and the new one applied as
/// a single combined delta through the reconciler, so an edit never trips
/// over an intermediate negative balance the way delete-then-create would.
pub fn edit_transaction(
    conn: &mut Connection,
    entry_id: i64,
    operation: OperationKind,
    amount: Decimal,
    date: NaiveDate,
    category: Option<&str>,
    description: Option<&str>,
) -> Result<LedgerEntry> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(amount));
    }
    let tx = conn.transaction()?;
    let old = load_entry(&tx, entry_id)?;
    let account_id = resolve_account_id(&tx, old.account_id, &old.account_name, old.kind)?;
    let delta = -effect_of(old.operation, old.amount) + effect_of(operation, amount);
    apply_effect(&tx, account_id, delta)?;
    tx.execute(
        "UPDATE ledger SET date=?1, operation=?2, amount=?3, category=?4, description=?5
         WHERE id=?6",
        params![
            date,
            operation.as_str(),
            amount.to_string(),
            category,
            description,
            entry_id
        ],
    )?;
    tx.commit()?;
    Ok(LedgerEntry {
        date,
        operation,
        amount,
        category: category.map(str::to_string),
        description: description.map(str::to_string),
        ..old
    })
}

/// Remove an entry, reversing its effect on the linked account.
pub fn delete_transaction(conn: &mut Connection, entry_id: i64) -> Result<()> {
    let tx = conn.transaction()?;
    let old = load_entry(&tx, entry_id)?;
    let account_id = resolve_account_id(&tx, old.account_id, &old.account_name, old.kind)?;
    apply_effect(&tx, account_id, -effect_of(old.operation, old.amount))?;
    tx.execute("DELETE FROM ledger WHERE id=?1", params![entry_id])?;
    tx.commit()?;
    Ok(())
}

/// Entries matching every supplied filter, newest first.
pub fn query(conn: &Connection, filter: &LedgerFilter) -> Result<Vec<LedgerEntry>> {
    let mut sql = String::from(
        "SELECT id, account_id, kind, account_name, date, operation, amount, category, description
         FROM ledger WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();
    if let Some(kind) = filter.kind {
        sql.push_str(" AND kind=?");
        params_vec.push(kind.as_str().to_string());
    }
    if let Some(operation) = filter.operation {
        sql.push_str(" AND operation=?");
        params_vec.push(operation.as_str().to_string());
    }
    if let Some(on) = filter.on {
        sql.push_str(" AND date=?");
        params_vec.push(on.to_string());
    }
    if let Some(from) = filter.from {
        sql.push_str(" AND date>=?");
        params_vec.push(from.to_string());
    }
    if let Some(to) = filter.to {
        sql.push_str(" AND date<=?");
        params_vec.push(to.to_string());
    }
    sql.push_str(" ORDER BY date DESC, id DESC");

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = if params_vec.is_empty() {
        stmt.query([])?
    } else {
        let params: Vec<&dyn rusqlite::ToSql> = params_vec
            .iter()
            .map(|s| s as &dyn rusqlite::ToSql)
            .collect();
        stmt.query(rusqlite::params_from_iter(params))?
    };

    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        out.push(entry_from_row(r)?);
    }
    Ok(out)
}

pub fn load_entry(conn: &Connection, entry_id: i64) -> Result<LedgerEntry> {
    let mut stmt = conn.prepare(
        "SELECT id, account_id, kind, account_name, date, operation, amount, category, description
         FROM ledger WHERE id=?1",
    )?;
    let mut rows = stmt.query(params![entry_id])?;
    match rows.next()? {
        Some(r) => entry_from_row(r),
        None => Err(LedgerError::NotFound(format!("ledger entry {}", entry_id))),
    }
}

fn entry_from_row(r: &rusqlite::Row<'_>) -> Result<LedgerEntry> {
    let kind_s: String = r.get(2)?;
    let operation_s: String = r.get(5)?;
    let amount_s: String = r.get(6)?;
    Ok(LedgerEntry {
        id: r.get(0)?,
        account_id: r.get(1)?,
        kind: AccountKind::parse(&kind_s).ok_or(LedgerError::Corrupt(kind_s))?,
        account_name: r.get(3)?,
        date: r.get(4)?,
        operation: OperationKind::parse(&operation_s).ok_or(LedgerError::Corrupt(operation_s))?,
        amount: stored_decimal(&amount_s)?,
        category: r.get(7)?,
        description: r.get(8)?,
    })
}

/// Sum of signed effects currently linked to an account. Diagnostic only;
/// balances are maintained by the reconciler, never recomputed from here.
pub fn effect_sum(conn: &Connection, account_id: i64) -> Result<Decimal> {
    let mut stmt =
        conn.prepare("SELECT operation, amount FROM ledger WHERE account_id=?1")?;
    let mut rows = stmt.query(params![account_id])?;
    let mut total = Decimal::ZERO;
    while let Some(r) = rows.next()? {
        let operation_s: String = r.get(0)?;
        let amount_s: String = r.get(1)?;
        let operation =
            OperationKind::parse(&operation_s).ok_or(LedgerError::Corrupt(operation_s))?;
        total += effect_of(operation, stored_decimal(&amount_s)?);
    }
    Ok(total)
}
