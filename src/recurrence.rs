// Copyright (c) 2025 Cofre Project.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure expansion of a schedule template into concrete calendar dates.
//! No I/O, no clock reads; `today` is an argument so two calls with the
//! same inputs always produce the same sequence.

use chrono::{Days, Months, NaiveDate};

use crate::models::Recurrence;

/// The engine never projects further than a year past the start date, no
/// matter what duration the template asks for.
pub const MAX_HORIZON_MONTHS: u32 = 12;

/// Expand a template into its occurrence dates within the horizon.
///
/// A one-time template (`Recurrence::None`) has a single occurrence on its
/// start date, dropped once that date has passed. A recurring template's
/// start date is the anchor only; occurrences begin one period after it and
/// run while they stay inside the horizon. Dates before `today` are dropped
/// silently, they are assumed already realized or irrelevant.
///
/// Legacy periods (`Quarterly`, `Yearly`) stop the walk where they stand
/// instead of erroring, so old data loads without projecting anything.
pub fn expand(
    start: NaiveDate,
    recurrence: Recurrence,
    duration_months: u32,
    today: NaiveDate,
) -> Vec<NaiveDate> {
    if recurrence == Recurrence::None {
        return if start >= today { vec![start] } else { Vec::new() };
    }

    let months = if duration_months == 0 {
        MAX_HORIZON_MONTHS
    } else {
        duration_months.min(MAX_HORIZON_MONTHS)
    };
    let end_by_months = start.checked_add_months(Months::new(months));
    let end_by_days = start.checked_add_days(Days::new(365));
    let end_limit = match (end_by_months, end_by_days) {
        (Some(m), Some(d)) => m.min(d),
        _ => return Vec::new(),
    };

    let mut out = Vec::new();
    let mut cur = start;
    loop {
        cur = match step(recurrence, cur) {
            Some(d) => d,
            None => break,
        };
        if cur > end_limit {
            break;
        }
        if cur >= today {
            out.push(cur);
        }
    }
    out
}

fn step(recurrence: Recurrence, from: NaiveDate) -> Option<NaiveDate> {
    match recurrence {
        Recurrence::Weekly => from.checked_add_days(Days::new(7)),
        Recurrence::Biweekly => from.checked_add_days(Days::new(14)),
        Recurrence::Monthly => from.checked_add_months(Months::new(1)),
        Recurrence::None | Recurrence::Quarterly | Recurrence::Yearly => None,
    }
}
