// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use regex::Regex;

use crate::models::{RecurringPeriod, Transaction, TransactionKind};
use crate::store::{NewTransaction, Store, TransactionPatch};
use crate::utils::{maybe_print_json, month_key, parse_amount, parse_date, parse_month, pretty_table};

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub),
        Some(("list", sub)) => list(store, sub),
        Some(("update", sub)) => update(store, sub),
        Some(("rm", sub)) => rm(store, sub),
        _ => Ok(()),
    }
}

fn parse_tags(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn add(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").map(String::as_str).unwrap_or(""))?;
    let amount = parse_amount(sub.get_one::<String>("amount").map(String::as_str).unwrap_or(""))?;
    let category = sub.get_one::<String>("category").cloned().unwrap_or_default();
    let kind = TransactionKind::parse(
        sub.get_one::<String>("kind").map(String::as_str).unwrap_or("expense"),
    )?;
    let description = sub
        .get_one::<String>("description")
        .cloned()
        .unwrap_or_default();
    let tags = sub
        .get_one::<String>("tags")
        .map(|s| parse_tags(s))
        .unwrap_or_default();
    let recurring_period = sub
        .get_one::<String>("recurring")
        .map(|s| RecurringPeriod::parse(s))
        .transpose()?;

    let id = store.add_transaction(NewTransaction {
        amount,
        category: category.clone(),
        description,
        date,
        kind,
        tags,
        recurring: recurring_period.is_some(),
        recurring_period,
    });
    println!(
        "Recorded {} {} of {} in '{}' on {} (id {})",
        kind.as_str(),
        if kind == TransactionKind::Expense { "-" } else { "+" },
        amount,
        category,
        date,
        id
    );
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = filter_rows(&store.transactions, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    t.date.to_string(),
                    t.kind.as_str().to_string(),
                    format!("{:.2}", t.amount),
                    t.category.clone(),
                    t.description.clone(),
                    t.tags.join(", "),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Kind", "Amount", "Category", "Description", "Tags"],
                rows,
            )
        );
    }
    Ok(())
}

/// Applies the list filters (month, category, kind, regex search, limit) to
/// the most-recent-first transaction list.
pub fn filter_rows(transactions: &[Transaction], sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let month = sub
        .get_one::<String>("month")
        .map(|s| parse_month(s))
        .transpose()?;
    let category = sub.get_one::<String>("category");
    let kind = sub
        .get_one::<String>("kind")
        .map(|s| TransactionKind::parse(s))
        .transpose()?;
    let search = sub
        .get_one::<String>("search")
        .map(|p| Regex::new(&format!("(?i){}", p)).with_context(|| format!("Invalid pattern '{}'", p)))
        .transpose()?;

    let mut data: Vec<Transaction> = transactions
        .iter()
        .filter(|t| month.as_deref().is_none_or(|m| month_key(t.date) == m))
        .filter(|t| category.is_none_or(|c| &t.category == c))
        .filter(|t| kind.is_none_or(|k| t.kind == k))
        .filter(|t| {
            search
                .as_ref()
                .is_none_or(|re| re.is_match(&t.description) || re.is_match(&t.category))
        })
        .cloned()
        .collect();
    if let Some(limit) = sub.get_one::<usize>("limit") {
        data.truncate(*limit);
    }
    Ok(data)
}

fn update(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<u64>("id").unwrap_or(&0);
    let patch = TransactionPatch {
        amount: sub
            .get_one::<String>("amount")
            .map(|s| parse_amount(s))
            .transpose()?,
        category: sub.get_one::<String>("category").cloned(),
        description: sub.get_one::<String>("description").cloned(),
        date: sub
            .get_one::<String>("date")
            .map(|s| parse_date(s))
            .transpose()?,
        kind: sub
            .get_one::<String>("kind")
            .map(|s| TransactionKind::parse(s))
            .transpose()?,
        tags: sub.get_one::<String>("tags").map(|s| parse_tags(s)),
        ..Default::default()
    };
    store.update_transaction(id, patch);
    println!("Updated transaction {} (if present)", id);
    Ok(())
}

fn rm(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<u64>("id").unwrap_or(&0);
    store.remove_transaction(id);
    println!("Removed transaction {} (if present)", id);
    Ok(())
}
