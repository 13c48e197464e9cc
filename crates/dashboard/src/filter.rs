// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Category filter for the transaction table

use std::collections::BTreeSet;

use shared_types::{Transaction, TransactionCategory};

/// Set of categories to show; an empty set shows everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    selected: BTreeSet<TransactionCategory>,
}

impl CategoryFilter {
    /// Create a filter with an initial selection
    pub fn new(categories: impl IntoIterator<Item = TransactionCategory>) -> Self {
        Self {
            selected: categories.into_iter().collect(),
        }
    }

    /// Add the category if absent, remove it if present
    ///
    /// Returns whether the category is selected afterwards.
    pub fn toggle(&mut self, category: TransactionCategory) -> bool {
        if self.selected.remove(&category) {
            false
        } else {
            self.selected.insert(category);
            true
        }
    }

    /// Drop every selection
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Whether the category is selected
    pub fn is_selected(&self, category: TransactionCategory) -> bool {
        self.selected.contains(&category)
    }

    /// Whether nothing is selected, meaning everything is shown
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Number of selected categories
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether the transaction passes the filter
    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.selected.is_empty() || self.selected.contains(&transaction.category)
    }

    /// Transactions that pass the filter, in their original order
    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        transactions.iter().filter(|tx| self.matches(tx)).collect()
    }

    /// Short summary such as `All categories` or `2 selected`
    pub fn summary(&self) -> String {
        if self.selected.is_empty() {
            "All categories".to_string()
        } else {
            format!("{} selected", self.selected.len())
        }
    }
}
