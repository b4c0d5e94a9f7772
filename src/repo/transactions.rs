// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::StoreError;
use crate::models::{NewTransaction, Transaction, TransactionPatch, TxKind};
use crate::store::{load_json, save_json, Store, TRANSACTIONS_KEY};
use crate::utils::fresh_id;
use chrono::NaiveDate;

pub struct TransactionRepo<'a> {
    store: &'a dyn Store,
    items: Vec<Transaction>,
}

impl<'a> TransactionRepo<'a> {
    /// Loads the stored list; a missing key is an empty list.
    pub fn open(store: &'a dyn Store) -> Result<Self, StoreError> {
        let items: Vec<Transaction> = load_json(store, TRANSACTIONS_KEY)?.unwrap_or_default();
        tracing::debug!(count = items.len(), "loaded transactions");
        Ok(Self { store, items })
    }

    /// Most recently added first.
    pub fn list(&self) -> &[Transaction] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.items.iter().find(|t| t.id == id)
    }

    pub fn add(&mut self, tx: NewTransaction) -> Result<Transaction, StoreError> {
        let id = fresh_id(self.items.iter().map(|t| t.id.as_str()));
        let created = tx.with_id(id);
        let mut next = Vec::with_capacity(self.items.len() + 1);
        next.push(created.clone());
        next.extend(self.items.iter().cloned());
        self.commit(next)?;
        tracing::info!(id = %created.id, kind = %created.kind, "transaction added");
        Ok(created)
    }

    /// Returns `false` without writing when no transaction has `id`.
    pub fn update(&mut self, id: &str, patch: &TransactionPatch) -> Result<bool, StoreError> {
        let Some(pos) = self.items.iter().position(|t| t.id == id) else {
            tracing::debug!(id, "update skipped, no such transaction");
            return Ok(false);
        };
        let mut next = self.items.clone();
        patch.apply(&mut next[pos]);
        self.commit(next)?;
        tracing::info!(id, "transaction updated");
        Ok(true)
    }

    /// Returns `false` without writing when no transaction has `id`.
    pub fn remove(&mut self, id: &str) -> Result<bool, StoreError> {
        if !self.items.iter().any(|t| t.id == id) {
            tracing::debug!(id, "remove skipped, no such transaction");
            return Ok(false);
        }
        let next: Vec<Transaction> = self.items.iter().filter(|t| t.id != id).cloned().collect();
        self.commit(next)?;
        tracing::info!(id, "transaction removed");
        Ok(true)
    }

    /// Writes the demo data set when the list is empty. Returns whether it did.
    pub fn seed_samples(&mut self) -> Result<bool, StoreError> {
        if !self.items.is_empty() {
            return Ok(false);
        }
        self.commit(sample_transactions())?;
        Ok(true)
    }

    fn commit(&mut self, next: Vec<Transaction>) -> Result<(), StoreError> {
        save_json(self.store, TRANSACTIONS_KEY, &next)?;
        self.items = next;
        Ok(())
    }
}

fn sample_transactions() -> Vec<Transaction> {
    let rows: [(&str, f64, &str, (i32, u32, u32), &str, TxKind); 5] = [
        ("1", 3500.0, "Salary", (2025, 1, 1), "Monthly salary", TxKind::Income),
        ("2", 850.0, "Rent", (2025, 1, 5), "Monthly rent payment", TxKind::Expense),
        ("3", 120.0, "Groceries", (2025, 1, 8), "Weekly groceries", TxKind::Expense),
        ("4", 50.0, "Entertainment", (2025, 1, 10), "Movie tickets", TxKind::Expense),
        ("5", 200.0, "Freelance", (2025, 1, 15), "Design project", TxKind::Income),
    ];
    rows.into_iter()
        .filter_map(|(id, amount, category, (y, m, d), description, kind)| {
            Some(Transaction {
                id: id.to_string(),
                amount,
                category: category.to_string(),
                date: NaiveDate::from_ymd_opt(y, m, d)?,
                description: description.to_string(),
                kind,
            })
        })
        .collect()
}
