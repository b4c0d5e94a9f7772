// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::App;
use crate::auth::Route;
use crate::models::{BudgetPatch, NewBudget};
use crate::utils::{fmt_money, maybe_print_json, parse_amount, parse_spent, pretty_table};
use anyhow::Result;

pub fn handle(app: &mut App, m: &clap::ArgMatches) -> Result<()> {
    app.require(Route::Budget)?;
    match m.subcommand() {
        Some(("add", sub)) => add(app, sub)?,
        Some(("list", sub)) => list(app, sub)?,
        Some(("edit", sub)) => edit(app, sub)?,
        Some(("rm", sub)) => rm(app, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let category = sub.get_one::<String>("category").unwrap().to_string();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let b = app.budgets.add(NewBudget { category, amount })?;
    println!("Budget set for {} = {} (id {})", b.category, fmt_money(b.amount), b.id);
    Ok(())
}

fn list(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = app.budgets.list();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|b| {
                vec![
                    b.id.clone(),
                    b.category.clone(),
                    fmt_money(b.amount),
                    fmt_money(b.spent),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Id", "Category", "Limit", "Spent"], rows));
    }
    Ok(())
}

pub fn patch_from(sub: &clap::ArgMatches) -> Result<BudgetPatch> {
    Ok(BudgetPatch {
        category: sub.get_one::<String>("category").cloned(),
        amount: sub
            .get_one::<String>("amount")
            .map(|s| parse_amount(s))
            .transpose()?,
        spent: sub
            .get_one::<String>("spent")
            .map(|s| parse_spent(s))
            .transpose()?,
    })
}

fn edit(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let patch = patch_from(sub)?;
    if patch.is_empty() {
        return Err(anyhow::anyhow!("Nothing to change for budget {}", id));
    }
    if app.budgets.update(id, &patch)? {
        println!("Budget {} updated", id);
    } else {
        println!("No budget with id {}", id);
    }
    Ok(())
}

fn rm(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    if app.budgets.remove(id)? {
        println!("Budget {} deleted", id);
    } else {
        println!("No budget with id {}", id);
    }
    Ok(())
}
