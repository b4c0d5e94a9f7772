// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::App;
use crate::auth::Route;
use crate::models::Transaction;
use anyhow::{Context, Result};
use std::path::Path;

pub fn handle(app: &App, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            app.require(Route::Analytics)?;
            let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
            let out = sub.get_one::<String>("out").unwrap();
            let n = export_transactions(app.transactions.list(), &fmt, Path::new(out))?;
            println!("Exported {} transactions to {}", n, out);
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Writes `txs` oldest first. Returns the number of rows written.
pub fn export_transactions(txs: &[Transaction], fmt: &str, out: &Path) -> Result<usize> {
    let mut rows: Vec<&Transaction> = txs.iter().collect();
    // stable: same-day entries stay in list order
    rows.sort_by_key(|t| t.date);

    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Open {} for writing", out.display()))?;
            wtr.write_record(["id", "date", "type", "category", "description", "amount"])?;
            for t in &rows {
                let date = t.date.to_string();
                let amount = format!("{:.2}", t.amount);
                wtr.write_record([
                    t.id.as_str(),
                    date.as_str(),
                    t.kind.as_str(),
                    t.category.as_str(),
                    t.description.as_str(),
                    amount.as_str(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&rows)?)
                .with_context(|| format!("Write {}", out.display()))?;
        }
        other => {
            return Err(anyhow::anyhow!("Unknown format: {} (use csv|json)", other));
        }
    }
    tracing::info!(rows = rows.len(), path = %out.display(), "exported transactions");
    Ok(rows.len())
}
