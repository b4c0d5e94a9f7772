// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{self, TransactionFilter};
use crate::app::App;
use crate::auth::Route;
use crate::models::{NewTransaction, Transaction, TransactionPatch, TxKind};
use crate::utils::{fmt_money, maybe_print_json, parse_amount, parse_date, pretty_table};
use anyhow::Result;

pub fn handle(app: &mut App, m: &clap::ArgMatches) -> Result<()> {
    app.require(Route::Transactions)?;
    match m.subcommand() {
        Some(("add", sub)) => add(app, sub)?,
        Some(("list", sub)) => list(app, sub)?,
        Some(("edit", sub)) => edit(app, sub)?,
        Some(("rm", sub)) => rm(app, sub)?,
        Some(("categories", _)) => {
            let data = analytics::categories(app.transactions.list())
                .into_iter()
                .map(|c| vec![c])
                .collect();
            println!("{}", pretty_table(&["Category"], data));
        }
        _ => {}
    }
    Ok(())
}

fn add(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let new = new_transaction(sub)?;
    let t = app.transactions.add(new)?;
    println!(
        "Recorded {} {} in '{}' on {} (id {})",
        t.kind,
        fmt_money(t.amount),
        t.category,
        t.date,
        t.id
    );
    Ok(())
}

pub fn new_transaction(sub: &clap::ArgMatches) -> Result<NewTransaction> {
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap().to_string();
    let kind: TxKind = sub.get_one::<String>("type").unwrap().parse()?;
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => chrono::Local::now().date_naive(),
    };
    let description = sub
        .get_one::<String>("description")
        .cloned()
        .unwrap_or_default();
    Ok(NewTransaction {
        amount,
        category,
        date,
        description,
        kind,
    })
}

pub fn patch_from(sub: &clap::ArgMatches) -> Result<TransactionPatch> {
    Ok(TransactionPatch {
        amount: sub
            .get_one::<String>("amount")
            .map(|s| parse_amount(s))
            .transpose()?,
        category: sub.get_one::<String>("category").cloned(),
        date: sub
            .get_one::<String>("date")
            .map(|s| parse_date(s))
            .transpose()?,
        description: sub.get_one::<String>("description").cloned(),
        kind: sub
            .get_one::<String>("type")
            .map(|s| s.parse::<TxKind>())
            .transpose()?,
    })
}

fn edit(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let patch = patch_from(sub)?;
    if patch.is_empty() {
        return Err(anyhow::anyhow!("Nothing to change for transaction {}", id));
    }
    if app.transactions.update(id, &patch)? {
        println!("Transaction {} updated", id);
    } else {
        println!("No transaction with id {}", id);
    }
    Ok(())
}

fn rm(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    if app.transactions.remove(id)? {
        println!("Transaction {} deleted", id);
    } else {
        println!("No transaction with id {}", id);
    }
    Ok(())
}

fn list(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(app.transactions.list(), sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                let sign = match t.kind {
                    TxKind::Income => "+",
                    TxKind::Expense => "-",
                };
                vec![
                    t.id.clone(),
                    t.date.to_string(),
                    t.description.clone(),
                    t.category.clone(),
                    t.kind.to_string(),
                    format!("{}{}", sign, fmt_money(t.amount)),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Description", "Category", "Type", "Amount"],
                rows,
            )
        );
    }
    Ok(())
}

/// Applies the list filters and `--limit` to `txs`, keeping list order.
pub fn query_rows(txs: &[Transaction], sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let filter = TransactionFilter {
        search: sub.get_one::<String>("search").cloned(),
        category: sub.get_one::<String>("category").cloned(),
        kind: sub
            .get_one::<String>("type")
            .map(|s| s.parse::<TxKind>())
            .transpose()?,
    };
    let mut data = filter.apply(txs);
    if let Some(limit) = sub.get_one::<usize>("limit") {
        data.truncate(*limit);
    }
    Ok(data)
}
