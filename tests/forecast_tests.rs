// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use spendwise::forecast;
use spendwise::models::{Goal, GoalPriority, GoalStatus, Transaction, TransactionKind};

fn tx(id: u64, date: &str, amount: &str, kind: TransactionKind) -> Transaction {
    Transaction {
        id,
        amount: amount.parse().unwrap(),
        category: "Misc".to_string(),
        description: String::new(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        kind,
        tags: Vec::new(),
        recurring: false,
        recurring_period: None,
        ai_category: None,
        confidence: None,
    }
}

fn goal(target: &str, current: &str) -> Goal {
    Goal {
        id: 7,
        title: "Emergency fund".to_string(),
        target_amount: target.parse().unwrap(),
        current_amount: current.parse().unwrap(),
        deadline: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
        category: String::new(),
        priority: GoalPriority::High,
        status: GoalStatus::Active,
    }
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn monthly_average_is_mean_over_months_present() {
    let txns = vec![
        tx(1, "2025-01-05", "100", TransactionKind::Expense),
        tx(2, "2025-02-05", "300", TransactionKind::Expense),
        tx(3, "2025-02-20", "2500", TransactionKind::Income),
    ];
    assert_eq!(format!("{:.2}", forecast::monthly_average(&txns)), "200.00");
}

#[test]
fn monthly_average_is_zero_without_expense_history() {
    assert_eq!(forecast::monthly_average(&[]), Decimal::ZERO);
    let income_only = vec![tx(1, "2025-01-05", "2500", TransactionKind::Income)];
    assert_eq!(forecast::monthly_average(&income_only), Decimal::ZERO);
}

#[test]
fn forecast_spans_six_months_starting_next_month() {
    let months = forecast::forecast(&[], date("2025-11-15"));
    assert_eq!(months.len(), 6);
    let labels: Vec<&str> = months.iter().map(|m| m.month.as_str()).collect();
    assert_eq!(
        labels,
        ["2025-12", "2026-01", "2026-02", "2026-03", "2026-04", "2026-05"]
    );
    // No history means an all-zero projection.
    assert!(months.iter().all(|m| m.predicted == Decimal::ZERO));
}

#[test]
fn forecast_applies_seasonal_trend_and_bands() {
    // Average is exactly 1000; the first projected month is December.
    let txns = vec![tx(1, "2025-11-05", "1000", TransactionKind::Expense)];
    let months = forecast::forecast(&txns, date("2025-11-15"));

    // December: 1000 * 1.30 seasonal * 1.00 trend = 1300.
    assert_eq!(months[0].month, "2025-12");
    assert_eq!(months[0].predicted, Decimal::from(1300));
    assert_eq!(months[0].conservative, Decimal::from(1170));
    assert_eq!(months[0].aggressive, Decimal::from(1430));

    // January: 1000 * 1.10 seasonal * 1.02 trend = 1122, bands 1009.8 / 1234.2
    // rounded half away from zero to whole units.
    assert_eq!(months[1].month, "2026-01");
    assert_eq!(months[1].predicted, Decimal::from(1122));
    assert_eq!(months[1].conservative, Decimal::from(1010));
    assert_eq!(months[1].aggressive, Decimal::from(1234));
}

#[test]
fn forecast_rounds_midpoints_away_from_zero() {
    // Average 50, July seasonal 1.20, trend at i=0 is 1.00: predicted 60.
    // Conservative band 60 * 0.9 = 54; aggressive 60 * 1.1 = 66. Use an
    // average that lands a band on .5: predicted 25 -> conservative 22.5.
    let txns = vec![
        tx(1, "2025-06-03", "25", TransactionKind::Expense),
    ];
    // July forecast: 25 * 1.20 = 30; conservative 27, aggressive 33.
    let months = forecast::forecast(&txns, date("2025-06-15"));
    assert_eq!(months[0].month, "2025-07");
    assert_eq!(months[0].predicted, Decimal::from(30));

    // 12.5 average in March (seasonal 1.00) predicts 13, not 12.
    let txns = vec![tx(1, "2025-02-03", "12.5", TransactionKind::Expense)];
    let months = forecast::forecast(&txns, date("2025-02-15"));
    assert_eq!(months[0].month, "2025-03");
    assert_eq!(months[0].predicted, Decimal::from(13));
}

#[test]
fn goal_timeline_divides_remaining_by_capacity() {
    let g = goal("1000", "100");
    let t = forecast::goal_timeline(&g, Decimal::from(300), date("2025-06-15"));
    assert_eq!(format!("{:.2}", t.remaining), "900.00");
    assert_eq!(t.months_to_complete, 3);
    assert_eq!(t.completion_date, date("2025-09-15"));
}

#[test]
fn goal_timeline_floors_capacity_at_one_hundred() {
    let g = goal("1000", "100");
    let t = forecast::goal_timeline(&g, Decimal::ZERO, date("2025-06-15"));
    assert_eq!(t.months_to_complete, 9);
    assert_eq!(t.completion_date, date("2026-03-15"));
}

#[test]
fn funded_goal_completes_today() {
    let g = goal("1000", "1200");
    let today = date("2025-06-15");
    let t = forecast::goal_timeline(&g, Decimal::from(500), today);
    assert_eq!(t.months_to_complete, 0);
    assert_eq!(t.remaining, Decimal::ZERO);
    assert_eq!(t.completion_date, today);
}

#[test]
fn goal_timeline_rounds_partial_months_up() {
    // 950 remaining at 300/month is 3.17 months: four calendar months.
    let g = goal("1000", "50");
    let t = forecast::goal_timeline(&g, Decimal::from(300), date("2025-06-15"));
    assert_eq!(t.months_to_complete, 4);
}

#[test]
fn completion_date_clamps_to_month_end() {
    let g = goal("300", "0");
    // Three months from Jan 31 at 100/month lands on Apr 30, not Apr 31.
    let t = forecast::goal_timeline(&g, Decimal::from(100), date("2025-01-31"));
    assert_eq!(t.months_to_complete, 3);
    assert_eq!(t.completion_date, date("2025-04-30"));
}

#[test]
fn emergency_fund_is_six_months_of_average_expenses() {
    let txns = vec![
        tx(1, "2025-01-05", "100", TransactionKind::Expense),
        tx(2, "2025-02-05", "300", TransactionKind::Expense),
    ];
    assert_eq!(
        format!("{:.2}", forecast::emergency_fund_target(&txns)),
        "1200.00"
    );
}
