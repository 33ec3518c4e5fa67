// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};

use spendwise::persist::JsonFile;
use spendwise::store::Store;
use spendwise::{cli, commands};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let backend = JsonFile::default_location()?;
    let path = backend.path().to_path_buf();
    let mut store = Store::open(Box::new(backend));

    // Everything except bootstrap commands needs a profile.
    if store.user.is_none() {
        match matches.subcommand() {
            Some(("init", _)) | Some(("login", _)) | None => {}
            _ => bail!("Not logged in. Run 'spendwise login' first."),
        }
    }

    match matches.subcommand() {
        Some(("init", _)) => {
            store.save();
            println!("Data file initialized at {}", path.display());
        }
        Some(("login", sub)) => commands::profile::login(&mut store, sub)?,
        Some(("logout", _)) => commands::profile::logout(&mut store)?,
        Some(("profile", sub)) => commands::profile::handle(&mut store, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut store, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut store, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&mut store, sub)?,
        Some(("insights", sub)) => commands::insights::handle(&mut store, sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, sub)?,
        Some(("planner", sub)) => commands::planner::handle(&store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("import", sub)) => commands::importer::handle(&mut store, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
