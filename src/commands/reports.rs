// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::analytics::{total_by_kind, totals_by_category};
use crate::forecast::monthly_average;
use crate::models::TransactionKind;
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, month_key, pretty_table};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", _)) => summary(store),
        Some(("by-category", sub)) => by_category(store, sub),
        Some(("cashflow", sub)) => cashflow(store, sub),
        _ => Ok(()),
    }
}

fn currency(store: &Store) -> String {
    store
        .user
        .as_ref()
        .map(|u| u.currency.clone())
        .unwrap_or_else(|| "USD".to_string())
}

fn summary(store: &Store) -> Result<()> {
    let ccy = currency(store);
    let income = total_by_kind(&store.transactions, TransactionKind::Income);
    let expenses = total_by_kind(&store.transactions, TransactionKind::Expense);
    let rows = vec![
        vec!["Total income".to_string(), fmt_money(&income, &ccy)],
        vec!["Total expenses".to_string(), fmt_money(&expenses, &ccy)],
        vec!["Net".to_string(), fmt_money(&(income - expenses), &ccy)],
        vec![
            "Monthly average (expenses)".to_string(),
            fmt_money(&monthly_average(&store.transactions), &ccy),
        ],
    ];
    println!("{}", pretty_table(&["Metric", "Amount"], rows));
    Ok(())
}

fn by_category(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let totals = totals_by_category(&store.transactions);
    let total: Decimal = totals.iter().map(|(_, v)| *v).sum();

    let data: Vec<Vec<String>> = totals
        .iter()
        .map(|(cat, amt)| {
            let share = if total > Decimal::ZERO {
                amt / total * Decimal::ONE_HUNDRED
            } else {
                Decimal::ZERO
            };
            vec![cat.clone(), format!("{:.2}", amt), format!("{:.1}%", share)]
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("{}", pretty_table(&["Category", "Spent", "Share"], data));
    }
    Ok(())
}

fn cashflow(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let months: usize = *sub.get_one::<usize>("months").unwrap_or(&12);

    let mut map: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for t in &store.transactions {
        let entry = map
            .entry(month_key(t.date))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        match t.kind {
            TransactionKind::Income => entry.0 += t.amount,
            TransactionKind::Expense => entry.1 += t.amount,
        }
    }

    let mut data = Vec::new();
    for (m, (inc, exp)) in map.iter().rev().take(months) {
        data.push(vec![
            m.clone(),
            format!("{:.2}", inc),
            format!("{:.2}", exp),
        ]);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("{}", pretty_table(&["Month", "Income", "Expense"], data));
    }
    Ok(())
}
