// Copyright (c) 2025 Cofre Project.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod cli;
pub mod commands;
pub mod db;
pub mod errors;
pub mod ledger;
pub mod models;
pub mod reconcile;
pub mod recurrence;
pub mod schedule;
pub mod simulate;
pub mod utils;
