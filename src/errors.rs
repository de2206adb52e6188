// Copyright (c) 2025 Cofre Project.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Everything a mutating operation can reject with. All variants are
/// recoverable by the user; the store is left untouched when one is returned.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("a bank named '{0}' already exists")]
    DuplicateAccount(String),

    #[error("account {id} no longer matches '{name}'; reload and try again")]
    StaleRecord { id: i64, name: String },

    #[error("amount must be greater than zero (got {0})")]
    InvalidAmount(Decimal),

    #[error("insufficient balance: {balance} available, operation would leave {would_be}")]
    InsufficientBalance { balance: Decimal, would_be: Decimal },

    #[error("{0} is in the future; use a schedule for future transactions")]
    FutureDateNotAllowed(NaiveDate),

    #[error("start date {0} is in the past")]
    PastStartDate(NaiveDate),

    #[error("{0} not found")]
    NotFound(String),

    #[error("corrupt value '{0}' in store")]
    Corrupt(String),

    #[error(transparent)]
    Db(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
