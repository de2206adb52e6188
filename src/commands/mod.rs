// Copyright (c) 2025 Cofre Project.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod doctor;
pub mod exporter;
pub mod schedules;
pub mod simulate;
pub mod transactions;
