// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Categories offered when recording a transaction. Categories are free text,
/// this list is only a suggestion.
pub const DEFAULT_CATEGORIES: [&str; 11] = [
    "Salary",
    "Freelance",
    "Investment",
    "Rent",
    "Groceries",
    "Entertainment",
    "Utilities",
    "Transportation",
    "Healthcare",
    "Shopping",
    "Other",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    Expense,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TxKind::Income),
            "expense" => Ok(TxKind::Expense),
            other => Err(anyhow::anyhow!(
                "Invalid type '{}', expected 'income' or 'expense'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate, // YYYY-MM-DD
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TxKind,
}

/// A transaction as submitted, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TxKind,
}

impl NewTransaction {
    pub fn with_id(self, id: String) -> Transaction {
        Transaction {
            id,
            amount: self.amount,
            category: self.category,
            date: self.date,
            description: self.description,
            kind: self.kind,
        }
    }
}

/// Fields to overwrite on an existing transaction; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub kind: Option<TxKind>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        *self == TransactionPatch::default()
    }

    pub fn apply(&self, t: &mut Transaction) {
        if let Some(a) = self.amount {
            t.amount = a;
        }
        if let Some(c) = &self.category {
            t.category = c.clone();
        }
        if let Some(d) = self.date {
            t.date = d;
        }
        if let Some(d) = &self.description {
            t.description = d.clone();
        }
        if let Some(k) = self.kind {
            t.kind = k;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,
    pub category: String,
    pub amount: f64, // limit
    pub spent: f64,  // tracked separately from transactions
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBudget {
    pub category: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetPatch {
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub spent: Option<f64>,
}

impl BudgetPatch {
    pub fn is_empty(&self) -> bool {
        *self == BudgetPatch::default()
    }

    pub fn apply(&self, b: &mut Budget) {
        if let Some(c) = &self.category {
            b.category = c.clone();
        }
        if let Some(a) = self.amount {
            b.amount = a;
        }
        if let Some(s) = self.spent {
            b.spent = s;
        }
    }
}

/// The identity kept in the session. Never carries a password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// A registered user as kept in the user list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Credential {
    pub fn user(&self) -> User {
        User {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    Nominal,
    Approaching,
    Exceeded,
}

impl BudgetStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BudgetStatus::Nominal => "ok",
            BudgetStatus::Approaching => "Approaching limit",
            BudgetStatus::Exceeded => "Budget exceeded!",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyFlow {
    pub month: String, // YYYY-MM
    pub income: f64,
    pub expense: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    pub top_category: Option<CategoryTotal>,
    pub average_daily_spend: f64,
    pub savings_rate: f64,
    pub expense_ratio: f64,
    /// Income exceeds expenses.
    pub trend_up: bool,
}
