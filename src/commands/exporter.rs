// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Budget, Goal, Transaction, User};
use crate::store::Store;

/// The on-disk export shape. Field names are part of the format: an export
/// must reconstruct an equal transaction list on import.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub user: Option<User>,
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub goals: Vec<Goal>,
    pub exported_at: DateTime<Utc>,
}

pub fn document(store: &Store, exported_at: DateTime<Utc>) -> ExportDocument {
    ExportDocument {
        user: store.user.clone(),
        transactions: store.transactions.clone(),
        budgets: store.budgets.clone(),
        goals: store.goals.clone(),
        exported_at,
    }
}

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("snapshot", sub)) => export_snapshot(store, sub),
        Some(("transactions", sub)) => export_transactions(store, sub),
        _ => Ok(()),
    }
}

fn export_snapshot(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let out = sub.get_one::<String>("out").map(String::as_str).unwrap_or("");
    let doc = document(store, Utc::now());
    std::fs::write(out, serde_json::to_string_pretty(&doc)?)?;
    println!("Exported snapshot to {}", out);
    Ok(())
}

fn export_transactions(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "csv".to_string());
    let out = sub.get_one::<String>("out").map(String::as_str).unwrap_or("");

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["id", "date", "kind", "amount", "category", "description", "tags"])?;
            for t in &store.transactions {
                wtr.write_record([
                    t.id.to_string(),
                    t.date.to_string(),
                    t.kind.as_str().to_string(),
                    t.amount.to_string(),
                    t.category.clone(),
                    t.description.clone(),
                    t.tags.join("|"),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&store.transactions)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported transactions to {}", out);
    Ok(())
}
