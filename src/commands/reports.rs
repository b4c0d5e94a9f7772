// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{self, Period, SPENDING_ADVICE_THRESHOLD};
use crate::app::App;
use crate::auth::Route;
use crate::models::{Budget, BudgetStatus, Transaction};
use crate::utils::{fmt_money, fmt_percent, maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;

pub fn handle(app: &App, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(app, sub)?,
        Some(("categories", sub)) => categories(app, sub)?,
        Some(("trend", sub)) => trend(app, sub)?,
        Some(("insights", sub)) => insights(app, sub)?,
        Some(("budgets", sub)) => budgets(app, sub)?,
        _ => {}
    }
    Ok(())
}

fn selected(app: &App, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let period = Period::parse(sub.get_one::<String>("period").unwrap())?;
    let today = chrono::Local::now().date_naive();
    Ok(analytics::in_period(app.transactions.list(), period, today))
}

/// Rows shown under the dashboard figures.
pub const RECENT_ROWS: usize = 5;

#[derive(Debug, Serialize)]
pub struct Summary {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
    pub savings_rate: f64,
    pub recent: Vec<Transaction>,
}

/// Dashboard figures over `txs`. The recent rows come from the same slice.
pub fn summarize(txs: &[Transaction]) -> Summary {
    Summary {
        income: analytics::total_income(txs),
        expenses: analytics::total_expenses(txs),
        balance: analytics::balance(txs),
        savings_rate: analytics::savings_rate(txs),
        recent: analytics::recent(txs, RECENT_ROWS).to_vec(),
    }
}

fn summary(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    app.require(Route::Dashboard)?;
    let txs = selected(app, sub)?;
    let s = summarize(&txs);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        let rows = vec![
            vec!["Total balance".into(), fmt_money(s.balance)],
            vec!["Income".into(), fmt_money(s.income)],
            vec!["Expenses".into(), fmt_money(s.expenses)],
            vec!["Savings rate".into(), fmt_percent(s.savings_rate)],
        ];
        println!("{}", pretty_table(&["", "Value"], rows));
        let recent: Vec<Vec<String>> = s
            .recent
            .iter()
            .map(|t| {
                vec![
                    t.date.to_string(),
                    t.description.clone(),
                    t.category.clone(),
                    format!("{} {}", t.kind, fmt_money(t.amount)),
                ]
            })
            .collect();
        if !recent.is_empty() {
            println!("Recent transactions");
            println!(
                "{}",
                pretty_table(&["Date", "Description", "Category", "Amount"], recent)
            );
        }
    }
    Ok(())
}

fn categories(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    app.require(Route::Analytics)?;
    let txs = selected(app, sub)?;
    let data = analytics::category_breakdown(&txs);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let total: f64 = data.iter().map(|c| c.value).sum();
        let rows = data
            .iter()
            .map(|c| {
                let share = if total > 0.0 { c.value / total * 100.0 } else { 0.0 };
                vec![c.name.clone(), fmt_money(c.value), format!("{:.0}%", share)]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Spent", "Share"], rows));
    }
    Ok(())
}

fn trend(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    app.require(Route::Analytics)?;
    let txs = selected(app, sub)?;
    let data = analytics::monthly_trend(&txs);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|m| vec![m.month.clone(), fmt_money(m.income), fmt_money(m.expense)])
            .collect();
        println!("{}", pretty_table(&["Month", "Income", "Expense"], rows));
    }
    Ok(())
}

fn insights(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    app.require(Route::Analytics)?;
    let txs = selected(app, sub)?;
    let ins = app.insights(&txs);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &ins)? {
        return Ok(());
    }
    let (top_name, top_value) = match &ins.top_category {
        Some(c) => (c.name.clone(), fmt_money(c.value)),
        None => ("N/A".to_string(), fmt_money(0.0)),
    };
    let rows = vec![
        vec!["Top spending category".into(), top_name, top_value],
        vec![
            "Avg. daily spend".into(),
            fmt_money(ins.average_daily_spend),
            format!("last {} days", app.period_days),
        ],
        vec![
            "Savings rate".into(),
            fmt_percent(ins.savings_rate),
            (if ins.trend_up { "up" } else { "down" }).to_string(),
        ],
    ];
    println!("{}", pretty_table(&["Insight", "Value", ""], rows));
    if ins.expense_ratio > SPENDING_ADVICE_THRESHOLD {
        println!(
            "You're spending {:.0}% of your income. \
             Try to keep it under {:.0}% to increase your savings.",
            ins.expense_ratio, SPENDING_ADVICE_THRESHOLD
        );
    }
    if let Some(c) = &ins.top_category {
        println!(
            "Your highest expense category is {} at {}. Consider reviewing these expenses.",
            c.name,
            fmt_money(c.value)
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct BudgetRow {
    pub id: String,
    pub category: String,
    pub amount: f64,
    pub spent: f64,
    pub remaining: f64,
    pub utilization: f64,
    pub status: BudgetStatus,
}

pub fn budget_rows(budgets: &[Budget]) -> Vec<BudgetRow> {
    budgets
        .iter()
        .map(|b| {
            let utilization = analytics::budget_utilization(b);
            BudgetRow {
                id: b.id.clone(),
                category: b.category.clone(),
                amount: b.amount,
                spent: b.spent,
                remaining: analytics::budget_remaining(b),
                utilization,
                status: analytics::budget_status(utilization),
            }
        })
        .collect()
}

fn budgets(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    app.require(Route::Budget)?;
    let data = budget_rows(app.budgets.list());
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|r| {
                let left = if r.remaining < 0.0 {
                    format!("{} over", fmt_money(r.remaining.abs()))
                } else {
                    format!("{} left", fmt_money(r.remaining))
                };
                vec![
                    r.category.clone(),
                    format!("{} of {}", fmt_money(r.spent), fmt_money(r.amount)),
                    format!("{} used", fmt_percent(r.utilization)),
                    left,
                    r.status.label().to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Spent", "Used", "Remaining", "Status"], rows)
        );
    }
    Ok(())
}
