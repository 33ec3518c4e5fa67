// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::commands::exporter::ExportDocument;
use crate::store::Store;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("snapshot", sub)) => import_snapshot(store, sub),
        _ => Ok(()),
    }
}

/// Replaces the store's collections with the contents of an exported
/// snapshot. Insights are not part of the export; they regenerate on the
/// next analysis run.
fn import_snapshot(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("in").map(String::as_str).unwrap_or("");
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("Read export from {}", path))?;
    let doc: ExportDocument =
        serde_json::from_str(&contents).with_context(|| format!("Parse export {}", path))?;
    let count = doc.transactions.len();
    store.restore(doc.transactions, doc.budgets, doc.goals, doc.user);
    println!("Imported {} transactions from {}", count, path);
    Ok(())
}
