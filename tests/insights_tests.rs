// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, TimeZone, Utc};

use spendwise::insights;
use spendwise::models::{
    Budget, BudgetPeriod, Impact, InsightKind, Transaction, TransactionKind,
};
use spendwise::store::NewInsight;

fn tx(id: u64, date: &str, amount: &str, category: &str, desc: &str) -> Transaction {
    Transaction {
        id,
        amount: amount.parse().unwrap(),
        category: category.to_string(),
        description: desc.to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        kind: TransactionKind::Expense,
        tags: Vec::new(),
        recurring: false,
        recurring_period: None,
        ai_category: None,
        confidence: None,
    }
}

fn budget(category: &str, limit: &str) -> Budget {
    Budget {
        id: 1,
        category: category.to_string(),
        limit: limit.parse().unwrap(),
        period: BudgetPeriod::Monthly,
        alerts_enabled: true,
    }
}

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
}

fn of_kind(all: &[NewInsight], kind: InsightKind) -> Vec<&NewInsight> {
    all.iter().filter(|i| i.kind == kind).collect()
}

#[test]
fn dominant_category_fires_above_forty_percent() {
    let txns = vec![
        tx(1, "2025-06-01", "550", "Dining", ""),
        tx(2, "2025-06-02", "450", "Transport", ""),
    ];
    let all = insights::generate(&txns, &[], now());
    let patterns = of_kind(&all, InsightKind::SpendingPattern);
    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].title, "High Dining Spending");
    assert!(patterns[0].description.contains("55.0%"));
    assert_eq!(patterns[0].impact, Impact::High);
    assert!(patterns[0].actionable);
}

#[test]
fn dominant_category_abstains_at_exactly_forty_percent() {
    let txns = vec![
        tx(1, "2025-06-01", "40", "Dining", ""),
        tx(2, "2025-06-02", "30", "Transport", ""),
        tx(3, "2025-06-03", "30", "Utilities", ""),
    ];
    let all = insights::generate(&txns, &[], now());
    assert!(of_kind(&all, InsightKind::SpendingPattern).is_empty());
}

#[test]
fn weekend_spending_compares_against_forty_percent_of_weekdays() {
    // 2025-01-04 is a Saturday, 2025-01-06 a Monday.
    let quiet = vec![
        tx(1, "2025-01-06", "100", "Misc", ""),
        tx(2, "2025-01-04", "40", "Misc", ""),
    ];
    let all = insights::generate(&quiet, &[], now());
    assert!(!all.iter().any(|i| i.title == "High Weekend Spending"));

    let heavy = vec![
        tx(1, "2025-01-06", "100", "Misc", ""),
        tx(2, "2025-01-04", "41", "Misc", ""),
    ];
    let all = insights::generate(&heavy, &[], now());
    let hit = all
        .iter()
        .find(|i| i.title == "High Weekend Spending")
        .unwrap();
    assert_eq!(hit.impact, Impact::Medium);
}

#[test]
fn budget_alerts_split_warning_and_danger() {
    let txns = vec![
        tx(1, "2025-06-01", "95", "Dining", ""),
        tx(2, "2025-06-02", "80", "Transport", ""),
        tx(3, "2025-06-03", "10", "Utilities", ""),
    ];
    let budgets = vec![
        budget("Dining", "100"),
        budget("Transport", "100"),
        budget("Utilities", "100"),
    ];
    let all = insights::generate(&txns, &budgets, now());
    let alerts = of_kind(&all, InsightKind::BudgetAlert);
    assert_eq!(alerts.len(), 2);

    let danger = alerts.iter().find(|i| i.title == "Dining Budget Alert").unwrap();
    assert_eq!(danger.impact, Impact::High);
    assert!(danger.description.contains("95.0%"));
    assert!(danger.description.contains("Consider reducing spending"));

    let warning = alerts
        .iter()
        .find(|i| i.title == "Transport Budget Warning")
        .unwrap();
    assert_eq!(warning.impact, Impact::Medium);
    assert!(warning.description.contains("80.0%"));
    assert!(warning.description.contains("Monitor your spending closely"));
}

#[test]
fn micro_expenses_need_both_count_and_total() {
    // 21 expenses under 50 totaling 525: fires.
    let mut txns: Vec<Transaction> = (0..21)
        .map(|i| tx(i as u64 + 1, "2025-06-01", "25", "Coffee", ""))
        .collect();
    let all = insights::generate(&txns, &[], now());
    let hit = all
        .iter()
        .find(|i| i.title == "Small Expense Accumulation")
        .unwrap();
    assert!(hit.description.contains("21 small expenses"));
    assert!(hit.description.contains("$525.00"));

    // Same count, total under 500: abstains.
    for t in &mut txns {
        t.amount = "20".parse().unwrap();
    }
    let all = insights::generate(&txns, &[], now());
    assert!(!all.iter().any(|i| i.title == "Small Expense Accumulation"));
}

#[test]
fn micro_expenses_need_more_than_twenty() {
    // 20 expenses totaling 600: count boundary not crossed.
    let txns: Vec<Transaction> = (0..20)
        .map(|i| tx(i as u64 + 1, "2025-06-01", "30", "Coffee", ""))
        .collect();
    let all = insights::generate(&txns, &[], now());
    assert!(!all.iter().any(|i| i.title == "Small Expense Accumulation"));
}

#[test]
fn subscription_review_needs_more_than_five_matches() {
    let mut txns: Vec<Transaction> = (0..5)
        .map(|i| tx(i as u64 + 1, "2025-06-01", "15", "Entertainment", "Netflix subscription"))
        .collect();
    let all = insights::generate(&txns, &[], now());
    assert!(!all.iter().any(|i| i.title == "Subscription Review Opportunity"));

    txns.push(tx(6, "2025-06-02", "10", "Fitness", "Gym membership"));
    let all = insights::generate(&txns, &[], now());
    let hit = all
        .iter()
        .find(|i| i.title == "Subscription Review Opportunity")
        .unwrap();
    assert_eq!(hit.impact, Impact::High);
    assert!(hit.description.contains("6 potential subscriptions"));
    assert!(hit.description.contains("$85.00"));
}

#[test]
fn subscription_keywords_match_case_insensitively() {
    let txns: Vec<Transaction> = (0..6)
        .map(|i| tx(i as u64 + 1, "2025-06-01", "12", "Media", "SPOTIFY Premium"))
        .collect();
    let all = insights::generate(&txns, &[], now());
    assert!(all.iter().any(|i| i.title == "Subscription Review Opportunity"));
}

fn trend_history(jan: &str, feb: &str, mar: &str) -> Vec<Transaction> {
    // Eight small January entries keep the history above the ten-record
    // minimum without disturbing the per-month totals.
    let jan_total: rust_decimal::Decimal = jan.parse().unwrap();
    let slice = jan_total / rust_decimal::Decimal::from(8);
    let mut txns: Vec<Transaction> = (0..8)
        .map(|i| tx(i as u64 + 1, "2025-01-10", &slice.to_string(), "Misc", ""))
        .collect();
    txns.push(tx(9, "2025-02-10", feb, "Misc", ""));
    txns.push(tx(10, "2025-03-10", mar, "Misc", ""));
    txns
}

#[test]
fn spending_trend_fires_strictly_beyond_hundred() {
    // (301 - 100) / 2 = 100.50
    let all = insights::generate(&trend_history("100", "200", "301"), &[], now());
    let hit = of_kind(&all, InsightKind::Prediction);
    assert_eq!(hit.len(), 1);
    assert_eq!(hit[0].title, "Increasing Spending Trend");
    assert!(hit[0].description.contains("$100.50"));
    assert!(hit[0].actionable);

    // (300 - 100) / 2 = 100 exactly: abstains.
    let all = insights::generate(&trend_history("100", "200", "300"), &[], now());
    assert!(of_kind(&all, InsightKind::Prediction).is_empty());
}

#[test]
fn decreasing_trend_is_informational() {
    // (100 - 400) / 2 = -150
    let all = insights::generate(&trend_history("400", "250", "100"), &[], now());
    let hit = of_kind(&all, InsightKind::Prediction);
    assert_eq!(hit.len(), 1);
    assert_eq!(hit[0].title, "Decreasing Spending Trend");
    assert_eq!(hit[0].impact, Impact::Low);
    assert!(!hit[0].actionable);
    assert!(hit[0].description.contains("$150.00"));
}

#[test]
fn spending_trend_abstains_under_ten_records() {
    let txns = vec![
        tx(1, "2025-01-10", "100", "Misc", ""),
        tx(2, "2025-02-10", "300", "Misc", ""),
        tx(3, "2025-03-10", "900", "Misc", ""),
    ];
    let all = insights::generate(&txns, &[], now());
    assert!(of_kind(&all, InsightKind::Prediction).is_empty());
}

#[test]
fn empty_history_yields_no_insights() {
    assert!(insights::generate(&[], &[], now()).is_empty());
}
