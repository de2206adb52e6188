// Copyright (c) 2025 Cofre Project.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The single choke point for balance mutations. Every ledger or schedule
//! operation that moves money routes its signed delta through
//! [`apply_effect`] inside an open transaction, so the balance column never
//! needs to be recomputed from history.

use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use crate::errors::{LedgerError, Result};
use crate::models::OperationKind;
use crate::utils::stored_decimal;

/// Signed balance delta of an operation: deposits add, withdrawals subtract.
pub fn effect_of(operation: OperationKind, amount: Decimal) -> Decimal {
    match operation {
        OperationKind::Deposit => amount,
        OperationKind::Withdrawal => -amount,
    }
}

/// Apply a signed delta to an account balance, rejecting any result below
/// zero. Callers run this inside their own transaction; a rejection rolls
/// the whole compound operation back.
///
/// Edits must pass one combined delta (`-old_effect + new_effect`) rather
/// than reversing and reapplying in two steps, so an intermediate negative
/// balance cannot cause a false rejection.
pub fn apply_effect(conn: &Connection, account_id: i64, effect: Decimal) -> Result<Decimal> {
    let balance_s: Option<String> = conn
        .query_row(
            "SELECT balance FROM accounts WHERE id=?1",
            params![account_id],
            |r| r.get(0),
        )
        .optional()?;
    let balance = match balance_s {
        Some(s) => stored_decimal(&s)?,
        None => return Err(LedgerError::NotFound(format!("account {}", account_id))),
    };
    let would_be = balance + effect;
    if would_be < Decimal::ZERO {
        return Err(LedgerError::InsufficientBalance { balance, would_be });
    }
    conn.execute(
        "UPDATE accounts SET balance=?1 WHERE id=?2",
        params![would_be.to_string(), account_id],
    )?;
    Ok(would_be)
}
