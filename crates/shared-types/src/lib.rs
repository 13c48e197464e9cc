// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Shared types for the BraidPool transaction feed
//!
//! This crate provides the strict data shapes that every other crate in the
//! workspace exchanges: transaction categories, normalized transaction records
//! and mempool aggregates.

pub mod category;
pub mod mempool;
pub mod transaction;

pub use category::{ParseCategoryError, TransactionCategory};
pub use mempool::{FeeHistogramEntry, MempoolInfo};
pub use transaction::{
    Prevout, Transaction, TransactionInput, TransactionOutput, TransactionStatus,
};
