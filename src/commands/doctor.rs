// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::category_breakdown;
use crate::app::App;
use crate::auth::Route;
use crate::models::{Budget, Transaction};
use crate::utils::pretty_table;
use anyhow::Result;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub issue: &'static str,
    pub detail: String,
}

/// Spend difference below this is treated as equal.
const DRIFT_EPSILON: f64 = 0.005;

/// Read-only checks; nothing is repaired.
pub fn findings(txs: &[Transaction], budgets: &[Budget]) -> Vec<Finding> {
    let mut out = Vec::new();

    // 1) Ids must be unique within each collection
    let mut seen = HashSet::new();
    for t in txs {
        if !seen.insert(t.id.as_str()) {
            out.push(Finding {
                issue: "duplicate_transaction_id",
                detail: t.id.clone(),
            });
        }
    }
    let mut seen = HashSet::new();
    for b in budgets {
        if !seen.insert(b.id.as_str()) {
            out.push(Finding {
                issue: "duplicate_budget_id",
                detail: b.id.clone(),
            });
        }
    }

    // 2) Amounts must be positive
    for t in txs.iter().filter(|t| t.amount.is_nan() || t.amount <= 0.0) {
        out.push(Finding {
            issue: "non_positive_amount",
            detail: format!("transaction {} ({})", t.id, t.amount),
        });
    }
    for b in budgets.iter().filter(|b| b.amount.is_nan() || b.amount <= 0.0) {
        out.push(Finding {
            issue: "non_positive_limit",
            detail: format!("budget {} ({})", b.id, b.amount),
        });
    }

    // 3) Budget spend is tracked by hand; flag where it no longer matches
    //    the recorded expenses for the same category.
    let totals = category_breakdown(txs);
    for b in budgets {
        let recorded = totals
            .iter()
            .find(|c| c.name == b.category)
            .map_or(0.0, |c| c.value);
        if (recorded - b.spent).abs() > DRIFT_EPSILON {
            out.push(Finding {
                issue: "budget_spent_drift",
                detail: format!(
                    "{}: spent {:.2}, expenses recorded {:.2}",
                    b.category, b.spent, recorded
                ),
            });
        }
    }
    out
}

pub fn handle(app: &App) -> Result<()> {
    app.require(Route::Dashboard)?;
    let found = findings(app.transactions.list(), app.budgets.list());
    if found.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        let rows = found
            .into_iter()
            .map(|f| vec![f.issue.to_string(), f.detail])
            .collect();
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
