// Copyright (c) 2025 Cofre Project.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rust_decimal::Decimal;

use crate::errors::LedgerError;
use crate::models::{AccountKind, OperationKind, Recurrence};

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn parse_kind(s: &str) -> Result<AccountKind> {
    AccountKind::parse(s)
        .with_context(|| format!("Invalid account kind '{}', expected bank|investment", s))
}

pub fn parse_operation(s: &str) -> Result<OperationKind> {
    OperationKind::parse(s)
        .with_context(|| format!("Invalid operation '{}', expected deposit|withdrawal", s))
}

/// Stricter than [`Recurrence::parse`]: `quarterly` and `yearly` still load
/// from rows written by older versions, but new schedules cannot use them.
pub fn parse_recurrence(s: &str) -> Result<Recurrence> {
    match Recurrence::parse(s) {
        Some(Recurrence::Quarterly) | Some(Recurrence::Yearly) | None => bail!(
            "Invalid recurrence '{}', expected none|weekly|biweekly|monthly",
            s
        ),
        Some(r) => Ok(r),
    }
}

/// Decode a decimal column written by us; failure means the store was edited
/// by hand, so surface it as corruption rather than a parse error.
pub fn stored_decimal(s: &str) -> std::result::Result<Decimal, LedgerError> {
    s.parse::<Decimal>()
        .map_err(|_| LedgerError::Corrupt(s.to_string()))
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn fmt_amount(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
