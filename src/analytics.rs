// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Budget, Transaction, TransactionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetHealth {
    Good,
    Warning,
    Danger,
}

impl BudgetHealth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Utilization {
    pub category: String,
    pub spent: Decimal,
    pub percentage: Decimal,
    pub health: BudgetHealth,
}

/// Sum of amounts for transactions of the given kind. Empty input is zero.
pub fn total_by_kind(transactions: &[Transaction], kind: TransactionKind) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

/// Expense totals grouped by category, in first-occurrence order. Categories
/// with no expense transactions are absent (no zero entries).
pub fn totals_by_category(transactions: &[Transaction]) -> Vec<(String, Decimal)> {
    let mut totals: Vec<(String, Decimal)> = Vec::new();
    for t in transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense)
    {
        match totals.iter_mut().find(|(c, _)| *c == t.category) {
            Some((_, sum)) => *sum += t.amount,
            None => totals.push((t.category.clone(), t.amount)),
        }
    }
    totals
}

/// Spend against a budget's limit, classified at the 75%/90% inclusive
/// thresholds. Aggregates over all matching transactions regardless of the
/// budget's declared period. A non-positive limit yields 0% / Good instead
/// of dividing.
pub fn budget_utilization(budget: &Budget, transactions: &[Transaction]) -> Utilization {
    let spent: Decimal = transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense && t.category == budget.category)
        .map(|t| t.amount)
        .sum();

    let percentage = if budget.limit <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        spent / budget.limit * Decimal::ONE_HUNDRED
    };

    let health = if budget.limit <= Decimal::ZERO {
        BudgetHealth::Good
    } else if percentage >= Decimal::from(90) {
        BudgetHealth::Danger
    } else if percentage >= Decimal::from(75) {
        BudgetHealth::Warning
    } else {
        BudgetHealth::Good
    };

    Utilization {
        category: budget.category.clone(),
        spent,
        percentage,
        health,
    }
}
