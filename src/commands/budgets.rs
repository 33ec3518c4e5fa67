// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::analytics::budget_utilization;
use crate::models::BudgetPeriod;
use crate::store::{BudgetPatch, NewBudget, Store};
use crate::utils::{maybe_print_json, parse_decimal, pretty_table};

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(store, sub),
        Some(("list", sub)) => list(store, sub),
        Some(("status", sub)) => status(store, sub),
        Some(("rm", sub)) => rm(store, sub),
        _ => Ok(()),
    }
}

/// Upserts the budget for a category: updates the existing one if present,
/// otherwise creates it. Limits must be positive at creation; the engines
/// still guard against non-positive limits defensively.
fn set(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let category = sub.get_one::<String>("category").cloned().unwrap_or_default();
    let limit = parse_decimal(sub.get_one::<String>("limit").map(String::as_str).unwrap_or(""))?;
    let period = BudgetPeriod::parse(
        sub.get_one::<String>("period").map(String::as_str).unwrap_or("monthly"),
    )?;
    let alerts_enabled = !sub.get_flag("no-alerts");

    if let Some(existing) = store.budgets.iter().find(|b| b.category == category) {
        let id = existing.id;
        store.update_budget(
            id,
            BudgetPatch {
                limit: Some(limit),
                period: Some(period),
                alerts_enabled: Some(alerts_enabled),
                ..Default::default()
            },
        );
        println!("Budget updated for '{}': {} per {}", category, limit, period.as_str());
    } else {
        store.add_budget(NewBudget {
            category: category.clone(),
            limit,
            period,
            alerts_enabled,
        })?;
        println!("Budget set for '{}': {} per {}", category, limit, period.as_str());
    }
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if !maybe_print_json(json_flag, jsonl_flag, &store.budgets)? {
        let rows: Vec<Vec<String>> = store
            .budgets
            .iter()
            .map(|b| {
                vec![
                    b.id.to_string(),
                    b.category.clone(),
                    format!("{:.2}", b.limit),
                    b.period.as_str().to_string(),
                    if b.alerts_enabled { "on" } else { "off" }.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Category", "Limit", "Period", "Alerts"], rows)
        );
    }
    Ok(())
}

fn status(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let utils: Vec<_> = store
        .budgets
        .iter()
        .map(|b| budget_utilization(b, &store.transactions))
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &utils)? {
        let rows: Vec<Vec<String>> = store
            .budgets
            .iter()
            .zip(&utils)
            .map(|(b, u)| {
                vec![
                    u.category.clone(),
                    format!("{:.2}", u.spent),
                    format!("{:.2}", b.limit),
                    format!("{:.1}%", u.percentage),
                    u.health.as_str().to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Spent", "Limit", "Used", "Status"], rows)
        );
    }
    Ok(())
}

fn rm(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<u64>("id").unwrap_or(&0);
    store.remove_budget(id);
    println!("Removed budget {} (if present)", id);
    Ok(())
}
