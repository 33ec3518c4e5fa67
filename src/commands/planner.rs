// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;
use rust_decimal::Decimal;

use crate::forecast;
use crate::models::GoalStatus;
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, parse_amount, pretty_table};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("forecast", sub)) => forecast_table(store, sub),
        Some(("goals", sub)) => goal_timelines(store, sub),
        Some(("emergency-fund", _)) => emergency_fund(store),
        _ => Ok(()),
    }
}

fn forecast_table(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let today = Utc::now().date_naive();
    let months = forecast::forecast(&store.transactions, today);
    if !maybe_print_json(json_flag, jsonl_flag, &months)? {
        let rows: Vec<Vec<String>> = months
            .iter()
            .map(|f| {
                vec![
                    f.month.clone(),
                    f.conservative.to_string(),
                    f.predicted.to_string(),
                    f.aggressive.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Conservative", "Predicted", "Aggressive"], rows)
        );
    }
    Ok(())
}

/// Timeline per active goal. Monthly savings capacity comes from the flag,
/// falling back to the profile's savings goal; the engine floors it at 100.
fn goal_timelines(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let capacity = match sub.get_one::<String>("monthly-savings") {
        Some(s) => parse_amount(s)?,
        None => store
            .user
            .as_ref()
            .map(|u| u.savings_goal)
            .unwrap_or(Decimal::ZERO),
    };
    let today = Utc::now().date_naive();
    let timelines: Vec<_> = store
        .goals
        .iter()
        .filter(|g| g.status == GoalStatus::Active)
        .map(|g| forecast::goal_timeline(g, capacity, today))
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &timelines)? {
        let rows: Vec<Vec<String>> = timelines
            .iter()
            .map(|t| {
                vec![
                    t.title.clone(),
                    format!("{:.2}", t.remaining),
                    t.months_to_complete.to_string(),
                    t.completion_date.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Goal", "Remaining", "Months", "Est. completion"], rows)
        );
    }
    Ok(())
}

fn emergency_fund(store: &Store) -> Result<()> {
    let ccy = store
        .user
        .as_ref()
        .map(|u| u.currency.clone())
        .unwrap_or_else(|| "USD".to_string());
    let avg = forecast::monthly_average(&store.transactions);
    let target = forecast::emergency_fund_target(&store.transactions);
    println!(
        "Monthly average expenses: {}",
        fmt_money(&avg, &ccy)
    );
    println!(
        "Emergency fund target (6 months): {}",
        fmt_money(&target, &ccy)
    );
    Ok(())
}
