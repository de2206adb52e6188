// Copyright (c) 2025 Cofre Project.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Bank,
    Investment,
}

impl AccountKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AccountKind::Bank => "bank",
            AccountKind::Investment => "investment",
        }
    }

    pub fn parse(s: &str) -> Option<AccountKind> {
        match s {
            "bank" => Some(AccountKind::Bank),
            "investment" => Some(AccountKind::Investment),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Deposit,
    Withdrawal,
}

impl OperationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OperationKind::Deposit => "deposit",
            OperationKind::Withdrawal => "withdrawal",
        }
    }

    pub fn parse(s: &str) -> Option<OperationKind> {
        match s {
            "deposit" => Some(OperationKind::Deposit),
            "withdrawal" => Some(OperationKind::Withdrawal),
            _ => None,
        }
    }
}

/// How a schedule template repeats. `Quarterly` and `Yearly` exist only so
/// data written by older versions still loads; the expansion engine stops at
/// them without projecting further dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    None,
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Recurrence {
    pub fn as_str(self) -> &'static str {
        match self {
            Recurrence::None => "none",
            Recurrence::Weekly => "weekly",
            Recurrence::Biweekly => "biweekly",
            Recurrence::Monthly => "monthly",
            Recurrence::Quarterly => "quarterly",
            Recurrence::Yearly => "yearly",
        }
    }

    pub fn parse(s: &str) -> Option<Recurrence> {
        match s {
            "none" => Some(Recurrence::None),
            "weekly" => Some(Recurrence::Weekly),
            "biweekly" => Some(Recurrence::Biweekly),
            "monthly" => Some(Recurrence::Monthly),
            "quarterly" => Some(Recurrence::Quarterly),
            "yearly" => Some(Recurrence::Yearly),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub kind: AccountKind,
    pub name: String,
    pub balance: Decimal,
    pub details: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: i64,
    /// Authoritative link to the account. NULL only for rows written before
    /// the column existed; `account_name` + `kind` is the fallback key then.
    pub account_id: Option<i64>,
    pub kind: AccountKind,
    pub account_name: String,
    pub date: NaiveDate,
    pub operation: OperationKind,
    pub amount: Decimal,
    pub category: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleTemplate {
    pub id: i64,
    pub account_id: Option<i64>,
    pub kind: AccountKind,
    pub account_name: String,
    pub start_date: NaiveDate,
    pub operation: OperationKind,
    pub amount: Decimal,
    pub category: Option<String>,
    pub description: Option<String>,
    pub recurrence: Recurrence,
    /// Only meaningful when `recurrence != None`; 0 means "use the default
    /// 12-month horizon".
    pub duration_months: u32,
}
