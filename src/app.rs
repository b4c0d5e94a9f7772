// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics;
use crate::auth::{guard, Access, Route, Session};
use crate::config::Config;
use crate::error::StoreError;
use crate::models::{Insights, Transaction};
use crate::repo::{BudgetRepo, TransactionRepo};
use crate::store::Store;

/// Everything a view needs, built over one injected store.
pub struct App<'a> {
    pub transactions: TransactionRepo<'a>,
    pub budgets: BudgetRepo<'a>,
    pub session: Session<'a>,
    pub period_days: u32,
}

impl<'a> App<'a> {
    pub fn open(store: &'a dyn Store, config: &Config) -> Result<Self, StoreError> {
        Ok(Self {
            transactions: TransactionRepo::open(store)?,
            budgets: BudgetRepo::open(store)?,
            session: Session::restore(store)?.with_latency(config.auth_latency),
            period_days: config.period_days,
        })
    }

    pub fn access(&self, route: Route) -> Access {
        guard(route, self.session.state())
    }

    /// Errors unless the session may enter `route`.
    pub fn require(&self, route: Route) -> anyhow::Result<()> {
        match self.access(route) {
            Access::Allow => Ok(()),
            Access::Pending => Err(anyhow::anyhow!("Sign-in still in progress")),
            Access::Redirect(Route::Login) => Err(anyhow::anyhow!(
                "Not logged in. Run `fintrack login` or `fintrack signup` first"
            )),
            Access::Redirect(_) => Err(anyhow::anyhow!("Already logged in")),
        }
    }

    pub fn insights(&self, txs: &[Transaction]) -> Insights {
        analytics::insights(txs, self.period_days)
    }
}
