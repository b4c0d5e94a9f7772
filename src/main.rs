// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use fintrack::{app::App, cli, commands, config::Config, logging, store::SqliteStore};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    logging::init(matches.get_count("verbose"));

    let config = Config::resolve(matches.get_one::<String>("db").map(String::as_str))?;
    tracing::debug!(path = %config.db_path.display(), "opening store");
    let store = SqliteStore::open(&config.db_path)?;
    let mut app = App::open(&store, &config)?;

    match matches.subcommand() {
        Some(("init", sub)) => {
            if sub.get_flag("sample") {
                let tx = app.transactions.seed_samples()?;
                let bg = app.budgets.seed_samples()?;
                println!(
                    "Sample data: transactions {}, budgets {}",
                    if tx { "loaded" } else { "kept (not empty)" },
                    if bg { "loaded" } else { "kept (not empty)" }
                );
            }
            println!("Database initialized at {}", config.db_path.display());
        }
        Some(("signup", sub)) => commands::auth::signup(&mut app, sub)?,
        Some(("login", sub)) => commands::auth::login(&mut app, sub)?,
        Some(("logout", _)) => commands::auth::logout(&mut app)?,
        Some(("whoami", _)) => commands::auth::whoami(&app)?,
        Some(("profile", sub)) => commands::auth::profile(&mut app, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut app, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut app, sub)?,
        Some(("report", sub)) => commands::reports::handle(&app, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&app, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&app)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
