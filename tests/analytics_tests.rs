// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fintrack::analytics::{self, Period, TransactionFilter};
use fintrack::commands::reports::summarize;
use fintrack::models::{Budget, BudgetStatus, CategoryTotal, Transaction, TxKind};

fn tx(id: &str, amount: f64, category: &str, date: &str, kind: TxKind) -> Transaction {
    Transaction {
        id: id.into(),
        amount,
        category: category.into(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        description: format!("{} {}", category, id),
        kind,
    }
}

fn sample() -> Vec<Transaction> {
    vec![
        tx("1", 3500.0, "Salary", "2025-01-01", TxKind::Income),
        tx("2", 850.0, "Rent", "2025-01-05", TxKind::Expense),
        tx("3", 120.0, "Groceries", "2025-01-08", TxKind::Expense),
        tx("4", 50.0, "Entertainment", "2025-01-10", TxKind::Expense),
        tx("5", 200.0, "Freelance", "2025-02-15", TxKind::Income),
    ]
}

fn budget(amount: f64, spent: f64) -> Budget {
    Budget {
        id: "b".into(),
        category: "Groceries".into(),
        amount,
        spent,
    }
}

#[test]
fn totals_and_balance_agree() {
    let txs = sample();
    assert_eq!(analytics::total_income(&txs), 3700.0);
    assert_eq!(analytics::total_expenses(&txs), 1020.0);
    assert_eq!(
        analytics::total_by_type(&txs, TxKind::Income) - analytics::total_by_type(&txs, TxKind::Expense),
        analytics::balance(&txs)
    );
    assert_eq!(analytics::balance(&txs), 2680.0);
}

#[test]
fn empty_input_is_all_zero() {
    let txs: Vec<Transaction> = Vec::new();
    assert_eq!(analytics::total_by_type(&txs, TxKind::Expense), 0.0);
    assert_eq!(analytics::balance(&txs), 0.0);
    assert!(analytics::category_breakdown(&txs).is_empty());
    assert_eq!(analytics::savings_rate(&txs), 0.0);
    assert_eq!(analytics::expense_ratio(&txs), 0.0);
    assert_eq!(analytics::average_daily_spend(&txs, 30), 0.0);
    assert!(analytics::monthly_trend(&txs).is_empty());
    let ins = analytics::insights(&txs, 30);
    assert!(ins.top_category.is_none());
    assert!(!ins.trend_up);
}

#[test]
fn breakdown_groups_and_sorts_descending() {
    let txs = vec![
        tx("1", 10.0, "A", "2025-01-01", TxKind::Expense),
        tx("2", 30.0, "B", "2025-01-02", TxKind::Expense),
        tx("3", 5.0, "A", "2025-01-03", TxKind::Expense),
    ];
    assert_eq!(
        analytics::category_breakdown(&txs),
        vec![
            CategoryTotal { name: "B".into(), value: 30.0 },
            CategoryTotal { name: "A".into(), value: 15.0 },
        ]
    );
}

#[test]
fn breakdown_ties_keep_first_seen_order_and_case() {
    let txs = vec![
        tx("1", 20.0, "food", "2025-01-01", TxKind::Expense),
        tx("2", 20.0, "Food", "2025-01-02", TxKind::Expense),
        tx("3", 999.0, "Salary", "2025-01-02", TxKind::Income),
        tx("4", 20.0, "Bus", "2025-01-03", TxKind::Expense),
    ];
    let names: Vec<String> = analytics::category_breakdown(&txs)
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["food", "Food", "Bus"]);
}

#[test]
fn savings_rate_without_income_is_zero_not_nan() {
    let txs = vec![tx("1", 40.0, "Rent", "2025-01-01", TxKind::Expense)];
    let rate = analytics::savings_rate(&txs);
    assert!(rate.is_finite());
    assert_eq!(rate, 0.0);
}

#[test]
fn savings_rate_and_expense_ratio() {
    let txs = vec![
        tx("1", 1000.0, "Salary", "2025-01-01", TxKind::Income),
        tx("2", 250.0, "Rent", "2025-01-02", TxKind::Expense),
    ];
    assert_eq!(analytics::savings_rate(&txs), 75.0);
    assert_eq!(analytics::expense_ratio(&txs), 25.0);
}

#[test]
fn average_daily_spend_over_period() {
    let txs = vec![tx("1", 300.0, "Rent", "2025-01-01", TxKind::Expense)];
    assert_eq!(analytics::average_daily_spend(&txs, 30), 10.0);
    assert_eq!(analytics::average_daily_spend(&txs, 0), 0.0);
}

#[test]
fn budget_utilization_thresholds() {
    let full = budget(500.0, 500.0);
    assert_eq!(analytics::budget_utilization(&full), 100.0);
    assert_eq!(analytics::budget_status(100.0), BudgetStatus::Exceeded);

    let close = budget(500.0, 420.0);
    assert_eq!(analytics::budget_utilization(&close), 84.0);
    assert_eq!(analytics::budget_status(84.0), BudgetStatus::Approaching);

    let fine = budget(500.0, 100.0);
    assert_eq!(analytics::budget_utilization(&fine), 20.0);
    assert_eq!(analytics::budget_status(20.0), BudgetStatus::Nominal);

    assert_eq!(analytics::budget_status(80.0), BudgetStatus::Approaching);
    assert_eq!(analytics::budget_status(79.99), BudgetStatus::Nominal);
    assert_eq!(analytics::budget_status(99.99), BudgetStatus::Approaching);
}

#[test]
fn budget_with_zero_limit_reports_zero() {
    assert_eq!(analytics::budget_utilization(&budget(0.0, 10.0)), 0.0);
    assert_eq!(analytics::budget_remaining(&budget(100.0, 130.0)), -30.0);
}

#[test]
fn insights_pick_top_category() {
    let ins = analytics::insights(&sample(), 30);
    assert_eq!(ins.top_category.unwrap().name, "Rent");
    assert_eq!(ins.average_daily_spend, 34.0);
    assert!(ins.trend_up);
}

#[test]
fn monthly_trend_is_chronological() {
    let mut txs = sample();
    txs.reverse();
    let trend = analytics::monthly_trend(&txs);
    assert_eq!(trend.len(), 2);
    assert_eq!(trend[0].month, "2025-01");
    assert_eq!(trend[0].income, 3500.0);
    assert_eq!(trend[0].expense, 1020.0);
    assert_eq!(trend[1].month, "2025-02");
    assert_eq!(trend[1].income, 200.0);
    assert_eq!(trend[1].expense, 0.0);
}

#[test]
fn filter_matches_search_category_and_type() {
    let txs = sample();
    let by_search = TransactionFilter {
        search: Some("GROC".into()),
        ..Default::default()
    };
    assert_eq!(by_search.apply(&txs).len(), 1);

    let by_category = TransactionFilter {
        category: Some("rent".into()),
        ..Default::default()
    };
    assert!(by_category.apply(&txs).is_empty());

    let incomes = TransactionFilter {
        kind: Some(TxKind::Income),
        ..Default::default()
    };
    let ids: Vec<String> = incomes.apply(&txs).into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec!["1", "5"]);
}

#[test]
fn categories_and_recent_keep_list_order() {
    let txs = sample();
    assert_eq!(analytics::recent(&txs, 2).len(), 2);
    assert_eq!(analytics::recent(&txs, 50).len(), 5);
    assert_eq!(
        analytics::categories(&txs),
        vec!["Salary", "Rent", "Groceries", "Entertainment", "Freelance"]
    );
}

#[test]
fn period_bounds() {
    let today = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
    assert_eq!(
        Period::ThisMonth.start(today),
        NaiveDate::from_ymd_opt(2025, 3, 1)
    );
    assert_eq!(
        Period::LastThreeMonths.start(today),
        NaiveDate::from_ymd_opt(2025, 1, 1)
    );
    assert_eq!(Period::All.start(today), None);

    let txs = sample();
    let feb_end = NaiveDate::from_ymd_opt(2025, 2, 28).unwrap();
    let this_month = analytics::in_period(&txs, Period::ThisMonth, feb_end);
    assert_eq!(this_month.len(), 1);
    assert_eq!(this_month[0].id, "5");
    assert_eq!(analytics::in_period(&txs, Period::ThisYear, feb_end).len(), 5);
    assert!(Period::parse("fortnight").is_err());
}

#[test]
fn all_period_keeps_future_dated_entries() {
    let mut txs = sample();
    txs.push(tx("6", 100.0, "Rent", "2030-01-01", TxKind::Expense));
    let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

    let all = analytics::in_period(&txs, Period::All, today);
    assert_eq!(all.len(), 6);
    assert_eq!(analytics::balance(&all), analytics::balance(&txs));

    let year = analytics::in_period(&txs, Period::ThisYear, today);
    assert!(year.iter().all(|t| t.id != "6"));
}

#[test]
fn summary_recent_rows_follow_the_period() {
    let txs = sample();
    let feb_end = NaiveDate::from_ymd_opt(2025, 2, 28).unwrap();
    let s = summarize(&analytics::in_period(&txs, Period::ThisMonth, feb_end));

    assert_eq!(s.income, 200.0);
    assert_eq!(s.expenses, 0.0);
    let ids: Vec<&str> = s.recent.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["5"]);

    assert_eq!(summarize(&txs).recent.len(), 5);
}
