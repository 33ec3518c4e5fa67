// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Datelike, Utc, Weekday};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::analytics::{self, BudgetHealth};
use crate::models::{Budget, Impact, InsightKind, Transaction, TransactionKind};
use crate::store::NewInsight;
use crate::utils::month_key;

const SUBSCRIPTION_KEYWORDS: [&str; 6] = [
    "subscription",
    "monthly",
    "netflix",
    "spotify",
    "gym",
    "membership",
];

/// Runs the full detector battery over a snapshot of transactions and
/// budgets. Every detector runs on every call; outputs are concatenated.
/// Detectors with insufficient data simply abstain.
pub fn generate(
    transactions: &[Transaction],
    budgets: &[Budget],
    now: DateTime<Utc>,
) -> Vec<NewInsight> {
    let mut insights = Vec::new();
    insights.extend(dominant_category(transactions, now));
    insights.extend(weekend_spending(transactions, now));
    insights.extend(budget_alerts(transactions, budgets, now));
    insights.extend(micro_expenses(transactions, now));
    insights.extend(subscription_patterns(transactions, now));
    insights.extend(spending_trend(transactions, now));
    insights
}

/// Flags the top expense category when it exceeds 40% of total expenses.
fn dominant_category(transactions: &[Transaction], now: DateTime<Utc>) -> Vec<NewInsight> {
    let totals = analytics::totals_by_category(transactions);
    let total: Decimal = totals.iter().map(|(_, v)| *v).sum();
    if total <= Decimal::ZERO {
        return Vec::new();
    }
    let Some((category, amount)) = totals.iter().max_by_key(|(_, v)| *v) else {
        return Vec::new();
    };
    let share = amount / total * Decimal::ONE_HUNDRED;
    if share <= Decimal::from(40) {
        return Vec::new();
    }
    vec![NewInsight {
        kind: InsightKind::SpendingPattern,
        title: format!("High {} Spending", category),
        description: format!(
            "{} accounts for {:.1}% of your total expenses. Consider reviewing this category for potential savings.",
            category, share
        ),
        impact: Impact::High,
        actionable: true,
        generated_at: now,
    }]
}

/// Compares full weekend spend against 40% of weekday spend. The asymmetry
/// (2 days vs 5) is intentional and part of the heuristic's contract.
fn weekend_spending(transactions: &[Transaction], now: DateTime<Utc>) -> Vec<NewInsight> {
    let mut weekend = Decimal::ZERO;
    let mut weekday = Decimal::ZERO;
    for t in transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense)
    {
        match t.date.weekday() {
            Weekday::Sat | Weekday::Sun => weekend += t.amount,
            _ => weekday += t.amount,
        }
    }
    if weekend <= weekday * Decimal::new(4, 1) {
        return Vec::new();
    }
    vec![NewInsight {
        kind: InsightKind::SpendingPattern,
        title: "High Weekend Spending".to_string(),
        description:
            "You spend significantly more on weekends. Consider planning weekend activities with a budget in mind."
                .to_string(),
        impact: Impact::Medium,
        actionable: true,
        generated_at: now,
    }]
}

/// One alert per budget at warning or danger utilization; nothing when good.
fn budget_alerts(
    transactions: &[Transaction],
    budgets: &[Budget],
    now: DateTime<Utc>,
) -> Vec<NewInsight> {
    let mut insights = Vec::new();
    for budget in budgets {
        let util = analytics::budget_utilization(budget, transactions);
        match util.health {
            BudgetHealth::Danger => insights.push(NewInsight {
                kind: InsightKind::BudgetAlert,
                title: format!("{} Budget Alert", budget.category),
                description: format!(
                    "You've used {:.1}% of your {} budget. Consider reducing spending in this category.",
                    util.percentage, budget.category
                ),
                impact: Impact::High,
                actionable: true,
                generated_at: now,
            }),
            BudgetHealth::Warning => insights.push(NewInsight {
                kind: InsightKind::BudgetAlert,
                title: format!("{} Budget Warning", budget.category),
                description: format!(
                    "You've used {:.1}% of your {} budget. Monitor your spending closely.",
                    util.percentage, budget.category
                ),
                impact: Impact::Medium,
                actionable: true,
                generated_at: now,
            }),
            BudgetHealth::Good => {}
        }
    }
    insights
}

/// Accumulated small expenses: more than 20 expenses under 50 adding up to
/// more than 500.
fn micro_expenses(transactions: &[Transaction], now: DateTime<Utc>) -> Vec<NewInsight> {
    let small: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense && t.amount < Decimal::from(50))
        .collect();
    let total: Decimal = small.iter().map(|t| t.amount).sum();
    if small.len() <= 20 || total <= Decimal::from(500) {
        return Vec::new();
    }
    vec![NewInsight {
        kind: InsightKind::SavingOpportunity,
        title: "Small Expense Accumulation".to_string(),
        description: format!(
            "You have {} small expenses totaling ${:.2}. Consider tracking and reducing these micro-expenses.",
            small.len(),
            total
        ),
        impact: Impact::Medium,
        actionable: true,
        generated_at: now,
    }]
}

/// More than 5 expenses whose description mentions a subscription keyword.
fn subscription_patterns(transactions: &[Transaction], now: DateTime<Utc>) -> Vec<NewInsight> {
    let subs: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| {
            t.kind == TransactionKind::Expense && {
                let desc = t.description.to_lowercase();
                SUBSCRIPTION_KEYWORDS.iter().any(|k| desc.contains(k))
            }
        })
        .collect();
    if subs.len() <= 5 {
        return Vec::new();
    }
    let total: Decimal = subs.iter().map(|t| t.amount).sum();
    vec![NewInsight {
        kind: InsightKind::SavingOpportunity,
        title: "Subscription Review Opportunity".to_string(),
        description: format!(
            "You have {} potential subscriptions costing ${:.2}. Review and cancel unused subscriptions.",
            subs.len(),
            total
        ),
        impact: Impact::High,
        actionable: true,
        generated_at: now,
    }]
}

/// Trend over the three most recent months of expense totals:
/// `(latest - oldest) / 2`, strictly beyond ±100 to fire.
fn spending_trend(transactions: &[Transaction], now: DateTime<Utc>) -> Vec<NewInsight> {
    if transactions.len() < 10 {
        return Vec::new();
    }

    let mut monthly: BTreeMap<String, Decimal> = BTreeMap::new();
    for t in transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense)
    {
        *monthly.entry(month_key(t.date)).or_insert(Decimal::ZERO) += t.amount;
    }
    if monthly.len() < 3 {
        return Vec::new();
    }

    // BTreeMap iterates YYYY-MM keys in chronological order.
    let recent: Vec<Decimal> = monthly.values().rev().take(3).rev().copied().collect();
    let trend = (recent[2] - recent[0]) / Decimal::TWO;

    if trend > Decimal::ONE_HUNDRED {
        vec![NewInsight {
            kind: InsightKind::Prediction,
            title: "Increasing Spending Trend".to_string(),
            description: format!(
                "Your monthly spending has increased by ${:.2} on average. Consider reviewing your budget to maintain financial health.",
                trend
            ),
            impact: Impact::Medium,
            actionable: true,
            generated_at: now,
        }]
    } else if trend < -Decimal::ONE_HUNDRED {
        vec![NewInsight {
            kind: InsightKind::Prediction,
            title: "Decreasing Spending Trend".to_string(),
            description: format!(
                "Great job! Your monthly spending has decreased by ${:.2} on average. Keep up the good work!",
                -trend
            ),
            impact: Impact::Low,
            actionable: false,
            generated_at: now,
        }]
    } else {
        Vec::new()
    }
}
