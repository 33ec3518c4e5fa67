// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use rust_decimal::Decimal;

use crate::models::{GoalPriority, GoalStatus};
use crate::store::{GoalPatch, NewGoal, Store};
use crate::utils::{maybe_print_json, parse_amount, parse_date, pretty_table};

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub),
        Some(("list", sub)) => list(store, sub),
        Some(("contribute", sub)) => contribute(store, sub),
        Some(("pause", sub)) => transition(store, sub, GoalStatus::Paused),
        Some(("resume", sub)) => transition(store, sub, GoalStatus::Active),
        Some(("complete", sub)) => transition(store, sub, GoalStatus::Completed),
        Some(("rm", sub)) => rm(store, sub),
        _ => Ok(()),
    }
}

fn add(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let title = sub.get_one::<String>("title").cloned().unwrap_or_default();
    let target_amount =
        parse_amount(sub.get_one::<String>("target").map(String::as_str).unwrap_or(""))?;
    if target_amount <= Decimal::ZERO {
        bail!("Goal target must be positive, got {}", target_amount);
    }
    let deadline = parse_date(sub.get_one::<String>("deadline").map(String::as_str).unwrap_or(""))?;
    let category = sub.get_one::<String>("category").cloned().unwrap_or_default();
    let priority = GoalPriority::parse(
        sub.get_one::<String>("priority").map(String::as_str).unwrap_or("medium"),
    )?;
    let current_amount =
        parse_amount(sub.get_one::<String>("start").map(String::as_str).unwrap_or("0"))?;

    let id = store.add_goal(NewGoal {
        title: title.clone(),
        target_amount,
        current_amount,
        deadline,
        category,
        priority,
    });
    println!("Added goal '{}' targeting {} by {} (id {})", title, target_amount, deadline, id);
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if !maybe_print_json(json_flag, jsonl_flag, &store.goals)? {
        let rows: Vec<Vec<String>> = store
            .goals
            .iter()
            .map(|g| {
                let progress = if g.target_amount > Decimal::ZERO {
                    g.current_amount / g.target_amount * Decimal::ONE_HUNDRED
                } else {
                    Decimal::ZERO
                };
                vec![
                    g.id.to_string(),
                    g.title.clone(),
                    format!("{:.2} / {:.2}", g.current_amount, g.target_amount),
                    format!("{:.1}%", progress),
                    g.deadline.to_string(),
                    g.priority.as_str().to_string(),
                    g.status.as_str().to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Title", "Saved", "Progress", "Deadline", "Priority", "Status"],
                rows,
            )
        );
    }
    Ok(())
}

fn contribute(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<u64>("id").unwrap_or(&0);
    let amount = parse_amount(sub.get_one::<String>("amount").map(String::as_str).unwrap_or(""))?;
    store.contribute_goal(id, amount);
    match store.goals.iter().find(|g| g.id == id) {
        Some(g) if g.status == GoalStatus::Completed => {
            println!("Contributed {} to '{}'. Goal completed!", amount, g.title);
        }
        Some(g) => println!(
            "Contributed {} to '{}' ({:.2} / {:.2})",
            amount, g.title, g.current_amount, g.target_amount
        ),
        None => println!("Goal {} not found; nothing contributed", id),
    }
    Ok(())
}

/// Pause/resume only move between active and paused; complete can be forced
/// from any status. Deadlines never transition goals by themselves.
fn transition(store: &mut Store, sub: &clap::ArgMatches, to: GoalStatus) -> Result<()> {
    let id = *sub.get_one::<u64>("id").unwrap_or(&0);
    let Some(goal) = store.goals.iter().find(|g| g.id == id) else {
        println!("Goal {} not found", id);
        return Ok(());
    };
    let allowed = match to {
        GoalStatus::Paused => goal.status == GoalStatus::Active,
        GoalStatus::Active => goal.status == GoalStatus::Paused,
        GoalStatus::Completed => true,
    };
    if !allowed {
        bail!(
            "Cannot move goal '{}' from {} to {}",
            goal.title,
            goal.status.as_str(),
            to.as_str()
        );
    }
    store.update_goal(
        id,
        GoalPatch {
            status: Some(to),
            ..Default::default()
        },
    );
    println!("Goal {} is now {}", id, to.as_str());
    Ok(())
}

fn rm(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<u64>("id").unwrap_or(&0);
    store.remove_goal(id);
    println!("Removed goal {} (if present)", id);
    Ok(())
}
