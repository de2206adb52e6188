// Copyright (c) 2025 Cofre Project.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("dev.cofre", "Cofre", "cofre"));

/// Each profile owns one database file. The opened connection is the explicit
/// per-user context every core operation works against; there is no ambient
/// "current user" anywhere in the crate.
pub fn db_path(profile: &str) -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir().join("profiles");
    fs::create_dir_all(&data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join(format!("{}.sqlite", profile)))
}

pub fn open_or_init(profile: &str) -> Result<Connection> {
    let path = db_path(profile)?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS accounts(
        id INTEGER PRIMARY KEY,
        kind TEXT NOT NULL CHECK(kind IN ('bank','investment')),
        name TEXT NOT NULL,
        balance TEXT NOT NULL,
        details TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS ledger(
        id INTEGER PRIMARY KEY,
        account_id INTEGER,
        kind TEXT NOT NULL,
        account_name TEXT NOT NULL,
        date TEXT NOT NULL,
        operation TEXT NOT NULL CHECK(operation IN ('deposit','withdrawal')),
        amount TEXT NOT NULL,
        category TEXT,
        description TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_ledger_date ON ledger(date);
    CREATE INDEX IF NOT EXISTS idx_ledger_account ON ledger(account_id);

    CREATE TABLE IF NOT EXISTS schedules(
        id INTEGER PRIMARY KEY,
        account_id INTEGER,
        kind TEXT NOT NULL,
        account_name TEXT NOT NULL,
        start_date TEXT NOT NULL,
        operation TEXT NOT NULL CHECK(operation IN ('deposit','withdrawal')),
        amount TEXT NOT NULL,
        category TEXT,
        description TEXT,
        recurrence TEXT NOT NULL DEFAULT 'none',
        duration_months INTEGER NOT NULL DEFAULT 0
    );

    CREATE TABLE IF NOT EXISTS exclusions(
        key TEXT PRIMARY KEY
    );
    "#,
    )?;
    backfill_account_ids(conn)?;
    Ok(())
}

/// One-shot migration for rows written before `account_id` existed: resolve
/// the denormalized (name, kind) key against the current accounts table.
/// Runs at open time only; the operations themselves never do this.
fn backfill_account_ids(conn: &Connection) -> Result<()> {
    conn.execute(
        "UPDATE ledger SET account_id = (
            SELECT a.id FROM accounts a
            WHERE a.name = ledger.account_name AND a.kind = ledger.kind
         )
         WHERE account_id IS NULL",
        [],
    )?;
    conn.execute(
        "UPDATE schedules SET account_id = (
            SELECT a.id FROM accounts a
            WHERE a.name = schedules.account_name AND a.kind = schedules.kind
         )
         WHERE account_id IS NULL",
        [],
    )?;
    Ok(())
}
