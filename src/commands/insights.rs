// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;

use crate::insights;
use crate::store::Store;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("generate", sub)) => generate(store, sub),
        Some(("list", sub)) => list(store, sub),
        _ => Ok(()),
    }
}

/// Reads the full snapshot, runs the detector battery, and replaces the
/// stored insight list in one step.
fn generate(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let generated = insights::generate(&store.transactions, &store.budgets, Utc::now());
    let count = generated.len();
    store.replace_insights(generated);
    println!(
        "Generated {} insight{}",
        count,
        if count == 1 { "" } else { "s" }
    );
    print_insights(store, sub)
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    print_insights(store, sub)
}

fn print_insights(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if !maybe_print_json(json_flag, jsonl_flag, &store.insights)? {
        let rows: Vec<Vec<String>> = store
            .insights
            .iter()
            .map(|i| {
                vec![
                    i.kind.as_str().to_string(),
                    i.impact.as_str().to_string(),
                    if i.actionable { "yes" } else { "no" }.to_string(),
                    i.title.clone(),
                    i.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Kind", "Impact", "Actionable", "Title", "Description"], rows)
        );
    }
    Ok(())
}
