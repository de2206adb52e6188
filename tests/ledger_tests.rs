// Copyright (c) 2025 Cofre Project.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use cofre::errors::LedgerError;
use cofre::ledger::{self, LedgerFilter};
use cofre::models::{AccountKind, OperationKind};
use cofre::{accounts, reconcile};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    cofre::db::init_schema(&mut conn).unwrap();
    conn
}

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn balance_of(conn: &Connection, id: i64) -> Decimal {
    accounts::get_account(conn, id).unwrap().balance
}

#[test]
fn overdraw_rejected_and_balance_untouched() {
    // Alpha starts at 100; +50 lands; -200 must bounce.
    let mut conn = setup();
    let today = day("2025-06-02");
    accounts::create_account(&conn, AccountKind::Bank, "Alpha", d("100"), "").unwrap();

    ledger::record_transaction(
        &mut conn,
        1,
        OperationKind::Deposit,
        d("50"),
        today,
        None,
        None,
        today,
    )
    .unwrap();
    assert_eq!(balance_of(&conn, 1), d("150"));

    let err = ledger::record_transaction(
        &mut conn,
        1,
        OperationKind::Withdrawal,
        d("200"),
        today,
        None,
        None,
        today,
    )
    .unwrap_err();
    assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
    assert_eq!(balance_of(&conn, 1), d("150"));
    assert_eq!(ledger::query(&conn, &LedgerFilter::default()).unwrap().len(), 1);
}

#[test]
fn non_positive_amount_rejected() {
    let mut conn = setup();
    let today = day("2025-06-02");
    accounts::create_account(&conn, AccountKind::Bank, "Alpha", d("100"), "").unwrap();
    for amount in ["0", "-5"] {
        let err = ledger::record_transaction(
            &mut conn,
            1,
            OperationKind::Deposit,
            d(amount),
            today,
            None,
            None,
            today,
        )
        .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount(_)));
    }
}

#[test]
fn future_date_rejected() {
    let mut conn = setup();
    let today = day("2025-06-02");
    accounts::create_account(&conn, AccountKind::Bank, "Alpha", d("100"), "").unwrap();
    let err = ledger::record_transaction(
        &mut conn,
        1,
        OperationKind::Deposit,
        d("10"),
        day("2025-06-03"),
        None,
        None,
        today,
    )
    .unwrap_err();
    assert!(matches!(err, LedgerError::FutureDateNotAllowed(_)));
    assert!(ledger::query(&conn, &LedgerFilter::default()).unwrap().is_empty());
}

#[test]
fn edit_overdraw_rejected_with_combined_delta() {
    // Balance 50 comes from a single +50 deposit. Editing it into
    // a -30 withdrawal is a combined delta of -80 and must bounce whole.
    let mut conn = setup();
    let today = day("2025-06-02");
    accounts::create_account(&conn, AccountKind::Bank, "Alpha", d("0"), "").unwrap();
    ledger::record_transaction(
        &mut conn,
        1,
        OperationKind::Deposit,
        d("50"),
        today,
        None,
        None,
        today,
    )
    .unwrap();

    let err = ledger::edit_transaction(
        &mut conn,
        1,
        OperationKind::Withdrawal,
        d("30"),
        today,
        None,
        None,
    )
    .unwrap_err();
    assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
    assert_eq!(balance_of(&conn, 1), d("50"));
    let entry = ledger::load_entry(&conn, 1).unwrap();
    assert_eq!(entry.operation, OperationKind::Deposit);
    assert_eq!(entry.amount, d("50"));
}

#[test]
fn edit_applies_combined_delta() {
    let mut conn = setup();
    let today = day("2025-06-02");
    accounts::create_account(&conn, AccountKind::Bank, "Alpha", d("100"), "").unwrap();
    ledger::record_transaction(
        &mut conn,
        1,
        OperationKind::Deposit,
        d("50"),
        today,
        None,
        None,
        today,
    )
    .unwrap();

    ledger::edit_transaction(
        &mut conn,
        1,
        OperationKind::Withdrawal,
        d("20"),
        day("2025-06-01"),
        Some("fees"),
        Some("monthly fee"),
    )
    .unwrap();
    // 150 - 50 (reversed deposit) - 20 (new withdrawal)
    assert_eq!(balance_of(&conn, 1), d("80"));
    let entry = ledger::load_entry(&conn, 1).unwrap();
    assert_eq!(entry.operation, OperationKind::Withdrawal);
    assert_eq!(entry.amount, d("20"));
    assert_eq!(entry.date, day("2025-06-01"));
    assert_eq!(entry.category.as_deref(), Some("fees"));
}

#[test]
fn delete_reverses_effect() {
    let mut conn = setup();
    let today = day("2025-06-02");
    accounts::create_account(&conn, AccountKind::Bank, "Alpha", d("100"), "").unwrap();
    ledger::record_transaction(
        &mut conn,
        1,
        OperationKind::Withdrawal,
        d("40"),
        today,
        None,
        None,
        today,
    )
    .unwrap();
    assert_eq!(balance_of(&conn, 1), d("60"));

    ledger::delete_transaction(&mut conn, 1).unwrap();
    assert_eq!(balance_of(&conn, 1), d("100"));
    assert!(ledger::query(&conn, &LedgerFilter::default()).unwrap().is_empty());
}

#[test]
fn delete_missing_entry_not_found() {
    let mut conn = setup();
    let err = ledger::delete_transaction(&mut conn, 42).unwrap_err();
    assert!(matches!(err, LedgerError::NotFound(_)));
}

#[test]
fn balance_equals_initial_plus_effect_sum() {
    let mut conn = setup();
    let today = day("2025-06-02");
    let initial = d("100");
    accounts::create_account(&conn, AccountKind::Bank, "Alpha", initial, "").unwrap();

    ledger::record_transaction(
        &mut conn,
        1,
        OperationKind::Deposit,
        d("75.25"),
        today,
        None,
        None,
        today,
    )
    .unwrap();
    ledger::record_transaction(
        &mut conn,
        1,
        OperationKind::Withdrawal,
        d("30"),
        today,
        None,
        None,
        today,
    )
    .unwrap();
    ledger::edit_transaction(
        &mut conn,
        2,
        OperationKind::Withdrawal,
        d("45.25"),
        today,
        None,
        None,
    )
    .unwrap();
    ledger::record_transaction(
        &mut conn,
        1,
        OperationKind::Deposit,
        d("5"),
        today,
        None,
        None,
        today,
    )
    .unwrap();
    ledger::delete_transaction(&mut conn, 3).unwrap();

    let effects = ledger::effect_sum(&conn, 1).unwrap();
    assert_eq!(balance_of(&conn, 1), initial + effects);
}

#[test]
fn effect_of_signs() {
    assert_eq!(reconcile::effect_of(OperationKind::Deposit, d("10")), d("10"));
    assert_eq!(
        reconcile::effect_of(OperationKind::Withdrawal, d("10")),
        d("-10")
    );
}

#[test]
fn query_filters_and_orders_newest_first() {
    let mut conn = setup();
    let today = day("2025-06-10");
    accounts::create_account(&conn, AccountKind::Bank, "Alpha", d("100"), "").unwrap();
    accounts::create_account(&conn, AccountKind::Investment, "Fund", d("100"), "").unwrap();
    for (account, op, amount, date) in [
        (1, OperationKind::Deposit, "10", "2025-06-01"),
        (1, OperationKind::Withdrawal, "5", "2025-06-05"),
        (2, OperationKind::Deposit, "20", "2025-06-08"),
    ] {
        ledger::record_transaction(
            &mut conn,
            account,
            op,
            d(amount),
            day(date),
            None,
            None,
            today,
        )
        .unwrap();
    }

    let all = ledger::query(&conn, &LedgerFilter::default()).unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].date, day("2025-06-08"));
    assert_eq!(all[2].date, day("2025-06-01"));

    let deposits = ledger::query(
        &conn,
        &LedgerFilter {
            operation: Some(OperationKind::Deposit),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(deposits.len(), 2);

    let banks_in_range = ledger::query(
        &conn,
        &LedgerFilter {
            kind: Some(AccountKind::Bank),
            from: Some(day("2025-06-02")),
            to: Some(day("2025-06-09")),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(banks_in_range.len(), 1);
    assert_eq!(banks_in_range[0].amount, d("5"));
}

#[test]
fn edit_resolves_account_by_name_for_legacy_rows() {
    let mut conn = setup();
    accounts::create_account(&conn, AccountKind::Bank, "Alpha", d("100"), "").unwrap();
    conn.execute(
        "INSERT INTO ledger(account_id, kind, account_name, date, operation, amount)
         VALUES (NULL, 'bank', 'Alpha', '2024-01-01', 'deposit', '10')",
        [],
    )
    .unwrap();

    ledger::edit_transaction(
        &mut conn,
        1,
        OperationKind::Deposit,
        d("30"),
        day("2024-01-01"),
        None,
        None,
    )
    .unwrap();
    // Combined delta -10 +30 applied to the account matched by (name, kind)
    assert_eq!(balance_of(&conn, 1), d("120"));
}
