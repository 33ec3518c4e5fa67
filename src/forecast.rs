// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{Goal, Transaction, TransactionKind};
use crate::utils::{add_months, month_key};

/// Seasonal spending multipliers by month-of-year (Jan..Dec): holiday peaks
/// in November/December, summer travel in June-August.
static SEASONAL_FACTORS: Lazy<[Decimal; 12]> = Lazy::new(|| {
    [
        Decimal::new(110, 2), // January - New Year expenses
        Decimal::new(95, 2),  // February
        Decimal::new(100, 2), // March
        Decimal::new(105, 2), // April - Spring activities
        Decimal::new(110, 2), // May
        Decimal::new(115, 2), // June - Summer activities
        Decimal::new(120, 2), // July - Peak summer
        Decimal::new(115, 2), // August
        Decimal::new(105, 2), // September - Back to school
        Decimal::new(110, 2), // October
        Decimal::new(120, 2), // November - Holiday shopping
        Decimal::new(130, 2), // December - Holiday season
    ]
});

/// Assumed monthly savings capacity never drops below this planning floor,
/// so goal timelines stay bounded when capacity is ~0.
pub const SAVINGS_FLOOR: Decimal = Decimal::ONE_HUNDRED;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthForecast {
    /// YYYY-MM of the forecast month.
    pub month: String,
    pub predicted: Decimal,
    pub conservative: Decimal,
    pub aggressive: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalTimeline {
    pub goal_id: u64,
    pub title: String,
    pub remaining: Decimal,
    pub months_to_complete: u32,
    pub completion_date: NaiveDate,
}

/// Arithmetic mean of per-calendar-month expense totals across all months
/// present in history; zero with no expense history.
pub fn monthly_average(transactions: &[Transaction]) -> Decimal {
    let mut monthly: BTreeMap<String, Decimal> = BTreeMap::new();
    for t in transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense)
    {
        *monthly.entry(month_key(t.date)).or_insert(Decimal::ZERO) += t.amount;
    }
    if monthly.is_empty() {
        return Decimal::ZERO;
    }
    let total: Decimal = monthly.values().sum();
    total / Decimal::from(monthly.len() as u64)
}

/// Rounds to whole currency units, half away from zero. Documented strategy:
/// `round(1.5) = 2`, `round(2.5) = 3` (not banker's rounding).
fn round_whole(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Six months of seasonally-adjusted expense projections starting next
/// calendar month. Each month applies the seasonal multiplier for its
/// month-of-year and a linear 2%-per-month trend, then splits into
/// predicted / conservative (x0.9) / aggressive (x1.1) bands.
pub fn forecast(transactions: &[Transaction], today: NaiveDate) -> Vec<MonthForecast> {
    let avg = monthly_average(transactions);
    (0..6u32)
        .map(|i| {
            let target = add_months(today, i + 1);
            let seasonal = SEASONAL_FACTORS[target.month0() as usize];
            let trend = Decimal::ONE + Decimal::new(2, 2) * Decimal::from(i);
            let predicted = round_whole(avg * seasonal * trend);
            MonthForecast {
                month: month_key(target),
                predicted,
                conservative: round_whole(predicted * Decimal::new(9, 1)),
                aggressive: round_whole(predicted * Decimal::new(11, 1)),
            }
        })
        .collect()
}

/// Months until the goal is funded at the assumed monthly savings rate
/// (floored at [`SAVINGS_FLOOR`]), and the projected completion date. A goal
/// already at or past its target completes today.
pub fn goal_timeline(goal: &Goal, monthly_savings: Decimal, today: NaiveDate) -> GoalTimeline {
    let remaining = goal.target_amount - goal.current_amount;
    let months = if remaining <= Decimal::ZERO {
        0
    } else {
        let rate = monthly_savings.max(SAVINGS_FLOOR);
        let months = (remaining / rate).ceil();
        use rust_decimal::prelude::ToPrimitive;
        months.to_u32().unwrap_or(u32::MAX)
    };
    GoalTimeline {
        goal_id: goal.id,
        title: goal.title.clone(),
        remaining: remaining.max(Decimal::ZERO),
        months_to_complete: months,
        completion_date: add_months(today, months),
    }
}

/// Six months of average expenses, the usual emergency-fund guidance.
pub fn emergency_fund_target(transactions: &[Transaction]) -> Decimal {
    monthly_average(transactions) * Decimal::from(6)
}
