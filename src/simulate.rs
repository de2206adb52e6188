// Copyright (c) 2025 Cofre Project.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct MonthPoint {
    pub month: u32,
    pub value: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct GrowthProjection {
    pub points: Vec<MonthPoint>,
    pub contributed: Decimal,
    pub earned: Decimal,
    pub final_value: Decimal,
}

/// Month-by-month compound projection of an investment: each month the
/// contribution lands first, then the whole pot earns the monthly rate.
/// The rate is quoted as an annual percentage plus the fraction of it the
/// product pays (e.g. an index at 10.65% paying 106% of it).
pub fn project_growth(
    initial: Decimal,
    monthly_contribution: Decimal,
    months: u32,
    annual_rate_pct: Decimal,
    rate_fraction_pct: Decimal,
) -> GrowthProjection {
    let hundred = Decimal::from(100);
    let monthly_rate =
        (annual_rate_pct / hundred) * (rate_fraction_pct / hundred) / Decimal::from(12);

    let mut value = initial;
    let mut points = Vec::with_capacity(months as usize);
    for month in 1..=months {
        value = (value + monthly_contribution) * (Decimal::ONE + monthly_rate);
        points.push(MonthPoint { month, value });
    }

    let contributed = initial + monthly_contribution * Decimal::from(months);
    GrowthProjection {
        earned: value - contributed,
        final_value: value,
        contributed,
        points,
    }
}
