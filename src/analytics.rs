// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived figures over a snapshot of transactions and budgets.
//!
//! Everything here is a pure reduction. Sums use plain `f64` addition, so
//! results are not decimal-exact for currency (e.g. `0.1 + 0.2` is not `0.3`).
//! Empty input always yields zero-valued results, never NaN or infinity.

use crate::models::{
    Budget, BudgetStatus, CategoryTotal, Insights, MonthlyFlow, Transaction, TxKind,
};
use chrono::{Datelike, Months, NaiveDate};
use std::collections::BTreeMap;

pub const DEFAULT_PERIOD_DAYS: u32 = 30;
/// Utilization at or above this percentage is "approaching limit".
pub const APPROACHING_THRESHOLD: f64 = 80.0;
/// Utilization at or above this percentage is "exceeded".
pub const EXCEEDED_THRESHOLD: f64 = 100.0;
/// Spending above this share of income triggers the saving advice.
pub const SPENDING_ADVICE_THRESHOLD: f64 = 70.0;

pub fn total_by_type(txs: &[Transaction], kind: TxKind) -> f64 {
    txs.iter()
        .filter(|t| t.kind == kind)
        .fold(0.0, |sum, t| sum + t.amount)
}

pub fn total_income(txs: &[Transaction]) -> f64 {
    total_by_type(txs, TxKind::Income)
}

pub fn total_expenses(txs: &[Transaction]) -> f64 {
    total_by_type(txs, TxKind::Expense)
}

pub fn balance(txs: &[Transaction]) -> f64 {
    total_income(txs) - total_expenses(txs)
}

/// Expense totals per category, largest first.
///
/// Categories are compared as exact, case-sensitive strings. Groups are built
/// in first-seen order and the sort is stable, so equal totals keep the order
/// in which their categories first appeared.
pub fn category_breakdown(txs: &[Transaction]) -> Vec<CategoryTotal> {
    let mut groups: Vec<CategoryTotal> = Vec::new();
    for t in txs.iter().filter(|t| t.kind == TxKind::Expense) {
        match groups.iter_mut().find(|g| g.name == t.category) {
            Some(g) => g.value += t.amount,
            None => groups.push(CategoryTotal {
                name: t.category.clone(),
                value: t.amount,
            }),
        }
    }
    groups.sort_by(|a, b| b.value.total_cmp(&a.value));
    groups
}

/// Percentage of income not spent. Zero when there is no income.
pub fn savings_rate(txs: &[Transaction]) -> f64 {
    let income = total_income(txs);
    if income == 0.0 {
        return 0.0;
    }
    finite_or_zero((income - total_expenses(txs)) / income * 100.0)
}

/// Percentage of income consumed by expenses. Zero when there is no income.
pub fn expense_ratio(txs: &[Transaction]) -> f64 {
    let income = total_income(txs);
    if income == 0.0 {
        return 0.0;
    }
    finite_or_zero(total_expenses(txs) / income * 100.0)
}

pub fn average_daily_spend(txs: &[Transaction], period_days: u32) -> f64 {
    if period_days == 0 {
        return 0.0;
    }
    total_expenses(txs) / f64::from(period_days)
}

/// `spent / amount * 100`. A budget without a positive limit reports 0.
pub fn budget_utilization(budget: &Budget) -> f64 {
    if budget.amount <= 0.0 {
        return 0.0;
    }
    finite_or_zero(budget.spent / budget.amount * 100.0)
}

pub fn budget_status(utilization: f64) -> BudgetStatus {
    if utilization >= EXCEEDED_THRESHOLD {
        BudgetStatus::Exceeded
    } else if utilization >= APPROACHING_THRESHOLD {
        BudgetStatus::Approaching
    } else {
        BudgetStatus::Nominal
    }
}

/// Amount left before the limit; negative when over.
pub fn budget_remaining(budget: &Budget) -> f64 {
    budget.amount - budget.spent
}

pub fn insights(txs: &[Transaction], period_days: u32) -> Insights {
    Insights {
        top_category: category_breakdown(txs).into_iter().next(),
        average_daily_spend: average_daily_spend(txs, period_days),
        savings_rate: savings_rate(txs),
        expense_ratio: expense_ratio(txs),
        trend_up: total_income(txs) > total_expenses(txs),
    }
}

/// Income and expense per calendar month, oldest month first.
pub fn monthly_trend(txs: &[Transaction]) -> Vec<MonthlyFlow> {
    let mut map: BTreeMap<(i32, u32), (f64, f64)> = BTreeMap::new();
    for t in txs {
        let entry = map.entry((t.date.year(), t.date.month())).or_insert((0.0, 0.0));
        match t.kind {
            TxKind::Income => entry.0 += t.amount,
            TxKind::Expense => entry.1 += t.amount,
        }
    }
    map.into_iter()
        .map(|((y, m), (income, expense))| MonthlyFlow {
            month: format!("{:04}-{:02}", y, m),
            income,
            expense,
        })
        .collect()
}

/// The first `n` transactions in list order (newest additions first).
pub fn recent(txs: &[Transaction], n: usize) -> &[Transaction] {
    &txs[..n.min(txs.len())]
}

/// Distinct categories in first-seen order.
pub fn categories(txs: &[Transaction]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for t in txs {
        if !out.iter().any(|c| *c == t.category) {
            out.push(t.category.clone());
        }
    }
    out
}

#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Case-insensitive substring of description or category.
    pub search: Option<String>,
    /// Exact category.
    pub category: Option<String>,
    pub kind: Option<TxKind>,
}

impl TransactionFilter {
    pub fn matches(&self, t: &Transaction) -> bool {
        let search_ok = match &self.search {
            Some(s) => {
                let needle = s.to_lowercase();
                t.description.to_lowercase().contains(&needle)
                    || t.category.to_lowercase().contains(&needle)
            }
            None => true,
        };
        let category_ok = self.category.as_ref().is_none_or(|c| *c == t.category);
        let kind_ok = self.kind.is_none_or(|k| k == t.kind);
        search_ok && category_ok && kind_ok
    }

    pub fn apply(&self, txs: &[Transaction]) -> Vec<Transaction> {
        txs.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    ThisMonth,
    LastThreeMonths,
    ThisYear,
    All,
}

impl Period {
    pub fn parse(s: &str) -> anyhow::Result<Self> {
        match s {
            "this-month" => Ok(Period::ThisMonth),
            "last-3-months" => Ok(Period::LastThreeMonths),
            "this-year" => Ok(Period::ThisYear),
            "all" => Ok(Period::All),
            other => Err(anyhow::anyhow!(
                "Invalid period '{}', expected this-month, last-3-months, this-year or all",
                other
            )),
        }
    }

    /// First day included in the period, or `None` for no lower bound.
    pub fn start(&self, today: NaiveDate) -> Option<NaiveDate> {
        let month_start = today.with_day(1)?;
        match self {
            Period::ThisMonth => Some(month_start),
            // current month plus the two before it
            Period::LastThreeMonths => month_start.checked_sub_months(Months::new(2)),
            Period::ThisYear => NaiveDate::from_ymd_opt(today.year(), 1, 1),
            Period::All => None,
        }
    }
}

/// Transactions dated from the period start up to and including `today`.
/// [`Period::All`] keeps the whole list, future-dated entries included.
pub fn in_period(txs: &[Transaction], period: Period, today: NaiveDate) -> Vec<Transaction> {
    let Some(start) = period.start(today) else {
        return txs.to_vec();
    };
    txs.iter()
        .filter(|t| t.date >= start && t.date <= today)
        .cloned()
        .collect()
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}
