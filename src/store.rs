// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::models::{
    Budget, BudgetPeriod, Goal, GoalPriority, GoalStatus, Impact, Insight, InsightKind,
    RecurringPeriod, Transaction, TransactionKind, User,
};
use crate::persist::{Persistence, Snapshot};

/// Transaction fields without an id; the store assigns one on add.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub tags: Vec<String>,
    pub recurring: bool,
    pub recurring_period: Option<RecurringPeriod>,
}

#[derive(Debug, Clone)]
pub struct NewBudget {
    pub category: String,
    pub limit: Decimal,
    pub period: BudgetPeriod,
    pub alerts_enabled: bool,
}

#[derive(Debug, Clone)]
pub struct NewGoal {
    pub title: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub deadline: NaiveDate,
    pub category: String,
    pub priority: GoalPriority,
}

#[derive(Debug, Clone)]
pub struct NewInsight {
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub impact: Impact,
    pub actionable: bool,
    pub generated_at: DateTime<Utc>,
}

/// Partial update for a transaction; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub kind: Option<TransactionKind>,
    pub tags: Option<Vec<String>>,
    pub recurring: Option<bool>,
    pub recurring_period: Option<RecurringPeriod>,
}

#[derive(Debug, Clone, Default)]
pub struct BudgetPatch {
    pub category: Option<String>,
    pub limit: Option<Decimal>,
    pub period: Option<BudgetPeriod>,
    pub alerts_enabled: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct GoalPatch {
    pub title: Option<String>,
    pub target_amount: Option<Decimal>,
    pub current_amount: Option<Decimal>,
    pub deadline: Option<NaiveDate>,
    pub category: Option<String>,
    pub priority: Option<GoalPriority>,
    pub status: Option<GoalStatus>,
}

/// The authoritative in-memory state: entity collections plus the current
/// user, persisted as a whole snapshot after every logical mutation.
///
/// Persistence failures are non-fatal: the in-memory state stays
/// authoritative, a warning goes to stderr, and the next successful save
/// writes the full snapshot again.
pub struct Store {
    backend: Box<dyn Persistence>,
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub goals: Vec<Goal>,
    pub insights: Vec<Insight>,
    pub user: Option<User>,
    next_id: u64,
}

impl Store {
    /// Loads the snapshot from the backend. Absent or corrupt data starts an
    /// empty, logged-out store rather than failing.
    pub fn open(backend: Box<dyn Persistence>) -> Self {
        let snapshot = match backend.load() {
            Ok(Some(s)) => s,
            Ok(None) => Snapshot::default(),
            Err(err) => {
                eprintln!("warning: could not load saved data ({}), starting empty", err);
                Snapshot::default()
            }
        };
        let next_id = next_id_from(&snapshot);
        Self {
            backend,
            transactions: snapshot.transactions,
            budgets: snapshot.budgets,
            goals: snapshot.goals,
            insights: snapshot.insights,
            user: snapshot.user,
            next_id,
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            transactions: self.transactions.clone(),
            budgets: self.budgets.clone(),
            goals: self.goals.clone(),
            insights: self.insights.clone(),
            user: self.user.clone(),
        }
    }

    /// Explicit save boundary, invoked after each logical mutation.
    pub fn save(&mut self) {
        if let Err(err) = self.backend.save(&self.snapshot()) {
            eprintln!("warning: could not save data ({}), changes kept in memory", err);
        }
    }

    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // ── Transactions ────────────────────────────────────────────────

    /// Most-recent-first: new transactions go to the front of the list.
    pub fn add_transaction(&mut self, new: NewTransaction) -> u64 {
        let id = self.alloc_id();
        self.transactions.insert(
            0,
            Transaction {
                id,
                amount: new.amount,
                category: new.category,
                description: new.description,
                date: new.date,
                kind: new.kind,
                tags: new.tags,
                recurring: new.recurring,
                recurring_period: new.recurring_period,
                ai_category: None,
                confidence: None,
            },
        );
        self.save();
        id
    }

    /// Merges the patch into the matching transaction. Unknown ids are a
    /// silent no-op, not an error.
    pub fn update_transaction(&mut self, id: u64, patch: TransactionPatch) {
        if let Some(t) = self.transactions.iter_mut().find(|t| t.id == id) {
            if let Some(v) = patch.amount {
                t.amount = v;
            }
            if let Some(v) = patch.category {
                t.category = v;
            }
            if let Some(v) = patch.description {
                t.description = v;
            }
            if let Some(v) = patch.date {
                t.date = v;
            }
            if let Some(v) = patch.kind {
                t.kind = v;
            }
            if let Some(v) = patch.tags {
                t.tags = v;
            }
            if let Some(v) = patch.recurring {
                t.recurring = v;
            }
            if let Some(v) = patch.recurring_period {
                t.recurring_period = Some(v);
            }
            self.save();
        }
    }

    pub fn remove_transaction(&mut self, id: u64) {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        if self.transactions.len() != before {
            self.save();
        }
    }

    // ── Budgets ─────────────────────────────────────────────────────

    pub fn add_budget(&mut self, new: NewBudget) -> Result<u64> {
        if new.limit <= Decimal::ZERO {
            bail!("Budget limit must be positive, got {}", new.limit);
        }
        let id = self.alloc_id();
        self.budgets.push(Budget {
            id,
            category: new.category,
            limit: new.limit,
            period: new.period,
            alerts_enabled: new.alerts_enabled,
        });
        self.save();
        Ok(id)
    }

    pub fn update_budget(&mut self, id: u64, patch: BudgetPatch) {
        if let Some(b) = self.budgets.iter_mut().find(|b| b.id == id) {
            if let Some(v) = patch.category {
                b.category = v;
            }
            if let Some(v) = patch.limit {
                b.limit = v;
            }
            if let Some(v) = patch.period {
                b.period = v;
            }
            if let Some(v) = patch.alerts_enabled {
                b.alerts_enabled = v;
            }
            self.save();
        }
    }

    pub fn remove_budget(&mut self, id: u64) {
        let before = self.budgets.len();
        self.budgets.retain(|b| b.id != id);
        if self.budgets.len() != before {
            self.save();
        }
    }

    // ── Goals ───────────────────────────────────────────────────────

    pub fn add_goal(&mut self, new: NewGoal) -> u64 {
        let id = self.alloc_id();
        self.goals.push(Goal {
            id,
            title: new.title,
            target_amount: new.target_amount,
            current_amount: new.current_amount,
            deadline: new.deadline,
            category: new.category,
            priority: new.priority,
            status: GoalStatus::Active,
        });
        self.save();
        id
    }

    pub fn update_goal(&mut self, id: u64, patch: GoalPatch) {
        if let Some(g) = self.goals.iter_mut().find(|g| g.id == id) {
            if let Some(v) = patch.title {
                g.title = v;
            }
            if let Some(v) = patch.target_amount {
                g.target_amount = v;
            }
            if let Some(v) = patch.current_amount {
                g.current_amount = v;
            }
            if let Some(v) = patch.deadline {
                g.deadline = v;
            }
            if let Some(v) = patch.category {
                g.category = v;
            }
            if let Some(v) = patch.priority {
                g.priority = v;
            }
            if let Some(v) = patch.status {
                g.status = v;
            }
            self.save();
        }
    }

    /// Adds to the goal's saved amount; reaching the target completes the
    /// goal. Deadlines never transition status on their own.
    pub fn contribute_goal(&mut self, id: u64, amount: Decimal) {
        if let Some(g) = self.goals.iter_mut().find(|g| g.id == id) {
            g.current_amount += amount;
            if g.current_amount >= g.target_amount {
                g.status = GoalStatus::Completed;
            }
            self.save();
        }
    }

    pub fn remove_goal(&mut self, id: u64) {
        let before = self.goals.len();
        self.goals.retain(|g| g.id != id);
        if self.goals.len() != before {
            self.save();
        }
    }

    // ── Insights ────────────────────────────────────────────────────

    /// Clears and regenerates the insight list as one logical step.
    pub fn replace_insights(&mut self, new: Vec<NewInsight>) {
        self.insights.clear();
        for n in new {
            let id = self.alloc_id();
            self.insights.insert(
                0,
                Insight {
                    id,
                    kind: n.kind,
                    title: n.title,
                    description: n.description,
                    impact: n.impact,
                    actionable: n.actionable,
                    generated_at: n.generated_at,
                },
            );
        }
        self.save();
    }

    pub fn clear_insights(&mut self) {
        self.insights.clear();
        self.save();
    }

    /// Replaces the financial collections from an imported export document.
    /// Insights are derived state and start empty after a restore.
    pub fn restore(
        &mut self,
        transactions: Vec<Transaction>,
        budgets: Vec<Budget>,
        goals: Vec<Goal>,
        user: Option<User>,
    ) {
        self.transactions = transactions;
        self.budgets = budgets;
        self.goals = goals;
        self.insights.clear();
        self.user = user;
        self.next_id = next_id_from(&self.snapshot());
        self.save();
    }

    // ── User ────────────────────────────────────────────────────────

    /// `None` means logout. The financial collections are left untouched so
    /// history survives logout/login of the same local profile.
    pub fn set_user(&mut self, user: Option<User>) {
        self.user = user;
        self.save();
    }
}

fn next_id_from(snapshot: &Snapshot) -> u64 {
    let max = snapshot
        .transactions
        .iter()
        .map(|t| t.id)
        .chain(snapshot.budgets.iter().map(|b| b.id))
        .chain(snapshot.goals.iter().map(|g| g.id))
        .chain(snapshot.insights.iter().map(|i| i.id))
        .max()
        .unwrap_or(0);
    max + 1
}
