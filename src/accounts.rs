// Copyright (c) 2025 Cofre Project.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::errors::{LedgerError, Result};
use crate::models::{Account, AccountKind};
use crate::utils::stored_decimal;

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub banks: Decimal,
    pub investments: Decimal,
    pub total: Decimal,
}

/// What a deletion would take with it. Phase one of the two-phase delete:
/// callers show this to the user, then confirm with [`delete_account`].
#[derive(Debug, Clone, Serialize)]
pub struct DeletionImpact {
    pub ledger_entries: usize,
    pub schedules: usize,
}

pub fn create_account(
    conn: &Connection,
    kind: AccountKind,
    name: &str,
    initial_balance: Decimal,
    details: &str,
) -> Result<Account> {
    if initial_balance < Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(initial_balance));
    }
    // Bank names are unique case-insensitively; investments may repeat
    // (the same product is often held at several brokers).
    if kind == AccountKind::Bank {
        let dup: Option<i64> = conn
            .query_row(
                "SELECT id FROM accounts WHERE kind='bank' AND LOWER(name)=LOWER(?1)",
                params![name],
                |r| r.get(0),
            )
            .optional()?;
        if dup.is_some() {
            return Err(LedgerError::DuplicateAccount(name.to_string()));
        }
    }
    conn.execute(
        "INSERT INTO accounts(kind, name, balance, details) VALUES (?1, ?2, ?3, ?4)",
        params![kind.as_str(), name, initial_balance.to_string(), details],
    )?;
    Ok(Account {
        id: conn.last_insert_rowid(),
        kind,
        name: name.to_string(),
        balance: initial_balance,
        details: details.to_string(),
    })
}

pub fn get_account(conn: &Connection, id: i64) -> Result<Account> {
    let row: Option<(String, String, String, String)> = conn
        .query_row(
            "SELECT kind, name, balance, details FROM accounts WHERE id=?1",
            params![id],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .optional()?;
    let (kind_s, name, balance_s, details) = match row {
        Some(t) => t,
        None => return Err(LedgerError::NotFound(format!("account {}", id))),
    };
    Ok(Account {
        id,
        kind: AccountKind::parse(&kind_s).ok_or(LedgerError::Corrupt(kind_s))?,
        name,
        balance: stored_decimal(&balance_s)?,
        details,
    })
}

pub fn list_accounts(conn: &Connection, kind: Option<AccountKind>) -> Result<Vec<Account>> {
    let mut sql =
        String::from("SELECT id, kind, name, balance, details FROM accounts WHERE 1=1");
    if kind.is_some() {
        sql.push_str(" AND kind=?1");
    }
    sql.push_str(" ORDER BY kind, name");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = match kind {
        Some(k) => stmt.query(params![k.as_str()])?,
        None => stmt.query([])?,
    };
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let kind_s: String = r.get(1)?;
        let balance_s: String = r.get(3)?;
        out.push(Account {
            id: r.get(0)?,
            kind: AccountKind::parse(&kind_s).ok_or(LedgerError::Corrupt(kind_s))?,
            name: r.get(2)?,
            balance: stored_decimal(&balance_s)?,
            details: r.get(4)?,
        });
    }
    Ok(out)
}

/// Two-tier account resolution for ledger/schedule rows: the stored id wins;
/// the denormalized (name, kind) key is consulted only when the id is NULL.
pub fn resolve_account_id(
    conn: &Connection,
    account_id: Option<i64>,
    account_name: &str,
    kind: AccountKind,
) -> Result<i64> {
    if let Some(id) = account_id {
        return Ok(id);
    }
    let id: Option<i64> = conn
        .query_row(
            "SELECT id FROM accounts WHERE name=?1 AND kind=?2",
            params![account_name, kind.as_str()],
            |r| r.get(0),
        )
        .optional()?;
    id.ok_or_else(|| LedgerError::NotFound(format!("account '{}'", account_name)))
}

/// Renames an account and cascades the new name to every linked ledger entry
/// and schedule template. Requires the caller to present the id and the name
/// it believes the account has; a mismatch means the record changed under it.
pub fn rename_account(
    conn: &mut Connection,
    id: i64,
    current_name: &str,
    new_name: &str,
    new_details: &str,
) -> Result<Account> {
    let tx = conn.transaction()?;
    let account = require_match(&tx, id, current_name)?;
    tx.execute(
        "UPDATE accounts SET name=?1, details=?2 WHERE id=?3",
        params![new_name, new_details, id],
    )?;
    // Only rows whose snapshot still carries the old name are touched, so a
    // row pointing at this id but renamed out-of-band is left alone.
    tx.execute(
        "UPDATE ledger SET account_name=?1 WHERE account_id=?2 AND account_name=?3",
        params![new_name, id, current_name],
    )?;
    tx.execute(
        "UPDATE schedules SET account_name=?1 WHERE account_id=?2 AND account_name=?3",
        params![new_name, id, current_name],
    )?;
    tx.commit()?;
    Ok(Account {
        name: new_name.to_string(),
        details: new_details.to_string(),
        ..account
    })
}

pub fn deletion_impact(conn: &Connection, id: i64, name: &str) -> Result<DeletionImpact> {
    let account = require_match(conn, id, name)?;
    let ledger_entries: i64 = conn.query_row(
        "SELECT COUNT(*) FROM ledger
         WHERE account_id=?1 OR (account_id IS NULL AND account_name=?2 AND kind=?3)",
        params![id, account.name, account.kind.as_str()],
        |r| r.get(0),
    )?;
    let schedules: i64 = conn.query_row(
        "SELECT COUNT(*) FROM schedules
         WHERE account_id=?1 OR (account_id IS NULL AND account_name=?2 AND kind=?3)",
        params![id, account.name, account.kind.as_str()],
        |r| r.get(0),
    )?;
    Ok(DeletionImpact {
        ledger_entries: ledger_entries as usize,
        schedules: schedules as usize,
    })
}

/// Phase two of the deletion protocol: removes the account and everything
/// linked to it. Returns the number of cascaded rows for user feedback.
pub fn delete_account(conn: &mut Connection, id: i64, name: &str) -> Result<usize> {
    let tx = conn.transaction()?;
    let account = require_match(&tx, id, name)?;
    let ledger_gone = tx.execute(
        "DELETE FROM ledger
         WHERE account_id=?1 OR (account_id IS NULL AND account_name=?2 AND kind=?3)",
        params![id, account.name, account.kind.as_str()],
    )?;
    let schedules_gone = tx.execute(
        "DELETE FROM schedules
         WHERE account_id=?1 OR (account_id IS NULL AND account_name=?2 AND kind=?3)",
        params![id, account.name, account.kind.as_str()],
    )?;
    tx.execute("DELETE FROM accounts WHERE id=?1", params![id])?;
    tx.commit()?;
    Ok(ledger_gone + schedules_gone)
}

pub fn summary(conn: &Connection) -> Result<Summary> {
    let mut banks = Decimal::ZERO;
    let mut investments = Decimal::ZERO;
    for account in list_accounts(conn, None)? {
        match account.kind {
            AccountKind::Bank => banks += account.balance,
            AccountKind::Investment => investments += account.balance,
        }
    }
    Ok(Summary {
        banks,
        investments,
        total: banks + investments,
    })
}

/// Dual-match precondition shared by rename and delete: both the id and the
/// caller's idea of the current name must match the stored record.
fn require_match(conn: &Connection, id: i64, name: &str) -> Result<Account> {
    match get_account(conn, id) {
        Ok(account) if account.name == name => Ok(account),
        Ok(_) | Err(LedgerError::NotFound(_)) => Err(LedgerError::StaleRecord {
            id,
            name: name.to_string(),
        }),
        Err(e) => Err(e),
    }
}
