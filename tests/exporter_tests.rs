// Copyright (c) 2025 Cofre Project.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use cofre::commands::exporter;
use cofre::models::{AccountKind, OperationKind, Recurrence};
use cofre::{accounts, cli, ledger, schedule};
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

fn seed(conn: &mut Connection) {
    let today = day("2025-06-02");
    accounts::create_account(conn, AccountKind::Bank, "Alpha", d("100"), "checking").unwrap();
    accounts::create_account(conn, AccountKind::Investment, "Fund", d("500"), "").unwrap();
    ledger::record_transaction(
        conn,
        1,
        OperationKind::Deposit,
        d("25.50"),
        today,
        Some("salary"),
        None,
        today,
    )
    .unwrap();
    schedule::create_schedule(
        conn,
        1,
        OperationKind::Withdrawal,
        d("12"),
        today,
        Some("rent"),
        None,
        Recurrence::Monthly,
        6,
        today,
    )
    .unwrap();
}

fn run_export(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["cofre", "export"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().try_get_matches_from(argv).unwrap();
    let (_, sub) = matches.subcommand().unwrap();
    exporter::handle(conn, sub)
}

#[test]
fn exports_accounts_as_json() {
    let mut conn = setup();
    seed(&mut conn);
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("accounts.json");

    run_export(
        &conn,
        &["accounts", "--format", "json", "--out", out.to_str().unwrap()],
    )
    .unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let list = parsed.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["name"], "Alpha");
    assert_eq!(list[0]["kind"], "bank");
}

#[test]
fn exports_ledger_as_csv() {
    let mut conn = setup();
    seed(&mut conn);
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("ledger.csv");

    run_export(
        &conn,
        &["ledger", "--format", "csv", "--out", out.to_str().unwrap()],
    )
    .unwrap();

    let mut rdr = csv::Reader::from_path(&out).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(&headers[4], "date");
    assert_eq!(&headers[6], "amount");
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][6], "25.50");
    assert_eq!(&rows[0][7], "salary");
}

#[test]
fn exports_schedules_as_json() {
    let mut conn = setup();
    seed(&mut conn);
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("schedules.json");

    run_export(
        &conn,
        &["schedules", "--format", "json", "--out", out.to_str().unwrap()],
    )
    .unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let list = parsed.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["recurrence"], "monthly");
    assert_eq!(list[0]["duration_months"], 6);
}

#[test]
fn unknown_format_errors_without_writing() {
    let mut conn = setup();
    seed(&mut conn);
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("accounts.xml");

    let err = run_export(
        &conn,
        &["accounts", "--format", "xml", "--out", out.to_str().unwrap()],
    );
    assert!(err.is_err());
    assert!(!out.exists());
}
