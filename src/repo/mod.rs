// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Collections owned in memory and mirrored to the store as whole documents.
//!
//! Every mutation builds the next version of the list, saves it, and only then
//! replaces the in-memory copy. A failed save leaves memory untouched.

pub mod budgets;
pub mod transactions;

pub use budgets::BudgetRepo;
pub use transactions::TransactionRepo;
