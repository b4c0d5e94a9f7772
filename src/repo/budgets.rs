// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::StoreError;
use crate::models::{Budget, BudgetPatch, NewBudget};
use crate::store::{load_json, save_json, Store, BUDGETS_KEY};
use crate::utils::fresh_id;

/// Budgets keep their own `spent` figure. It is never recomputed from
/// transactions; only an explicit update changes it.
pub struct BudgetRepo<'a> {
    store: &'a dyn Store,
    items: Vec<Budget>,
}

impl<'a> BudgetRepo<'a> {
    pub fn open(store: &'a dyn Store) -> Result<Self, StoreError> {
        let items: Vec<Budget> = load_json(store, BUDGETS_KEY)?.unwrap_or_default();
        tracing::debug!(count = items.len(), "loaded budgets");
        Ok(Self { store, items })
    }

    /// In creation order.
    pub fn list(&self) -> &[Budget] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&Budget> {
        self.items.iter().find(|b| b.id == id)
    }

    pub fn add(&mut self, budget: NewBudget) -> Result<Budget, StoreError> {
        let created = Budget {
            id: fresh_id(self.items.iter().map(|b| b.id.as_str())),
            category: budget.category,
            amount: budget.amount,
            spent: 0.0,
        };
        let mut next = self.items.clone();
        next.push(created.clone());
        self.commit(next)?;
        tracing::info!(id = %created.id, category = %created.category, "budget added");
        Ok(created)
    }

    pub fn update(&mut self, id: &str, patch: &BudgetPatch) -> Result<bool, StoreError> {
        let Some(pos) = self.items.iter().position(|b| b.id == id) else {
            tracing::debug!(id, "update skipped, no such budget");
            return Ok(false);
        };
        let mut next = self.items.clone();
        patch.apply(&mut next[pos]);
        self.commit(next)?;
        tracing::info!(id, "budget updated");
        Ok(true)
    }

    pub fn remove(&mut self, id: &str) -> Result<bool, StoreError> {
        if !self.items.iter().any(|b| b.id == id) {
            tracing::debug!(id, "remove skipped, no such budget");
            return Ok(false);
        }
        let next: Vec<Budget> = self.items.iter().filter(|b| b.id != id).cloned().collect();
        self.commit(next)?;
        tracing::info!(id, "budget removed");
        Ok(true)
    }

    pub fn seed_samples(&mut self) -> Result<bool, StoreError> {
        if !self.items.is_empty() {
            return Ok(false);
        }
        let samples = [
            ("1", "Groceries", 500.0, 120.0),
            ("2", "Entertainment", 200.0, 50.0),
            ("3", "Rent", 1000.0, 850.0),
            ("4", "Utilities", 150.0, 0.0),
        ]
        .into_iter()
        .map(|(id, category, amount, spent)| Budget {
            id: id.to_string(),
            category: category.to_string(),
            amount,
            spent,
        })
        .collect();
        self.commit(samples)?;
        Ok(true)
    }

    fn commit(&mut self, next: Vec<Budget>) -> Result<(), StoreError> {
        save_json(self.store, BUDGETS_KEY, &next)?;
        self.items = next;
        Ok(())
    }
}
