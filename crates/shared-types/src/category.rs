// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Transaction category types
//!
//! Every transaction shown in the feed belongs to exactly one of six categories.
//! Each category has a fixed display label and description; both lookups are
//! exhaustive matches, so the two tables always cover the same keys.

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle category of a transaction as reported by the node
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TransactionCategory {
    /// Seen only in the bitcoind mempool
    #[default]
    Mempool,
    /// Committed to the cmempool node
    Committed,
    /// Proposed for the next block
    Proposed,
    /// Scheduled for mining
    Scheduled,
    /// Confirmed in a block
    Confirmed,
    /// Replaced through RBF
    Replaced,
}

/// Error returned when a string does not name a known category
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown transaction category: {0:?}")]
pub struct ParseCategoryError(pub String);

impl TransactionCategory {
    /// Returns every category in display order
    pub const fn all() -> &'static [Self] {
        &[
            Self::Mempool,
            Self::Committed,
            Self::Proposed,
            Self::Scheduled,
            Self::Confirmed,
            Self::Replaced,
        ]
    }

    /// Returns the lowercase wire name of the category
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mempool => "mempool",
            Self::Committed => "committed",
            Self::Proposed => "proposed",
            Self::Scheduled => "scheduled",
            Self::Confirmed => "confirmed",
            Self::Replaced => "replaced",
        }
    }

    /// Returns the human-readable label
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mempool => "Mempool",
            Self::Committed => "Committed",
            Self::Proposed => "Proposed",
            Self::Scheduled => "Scheduled",
            Self::Confirmed => "Confirmed",
            Self::Replaced => "Replaced",
        }
    }

    /// Returns a one-line description of what the category means
    pub const fn description(self) -> &'static str {
        match self {
            Self::Mempool => "Transactions in bitcoind mempool only",
            Self::Committed => "Transactions committed to cmempool node",
            Self::Proposed => "Transactions proposed for next block",
            Self::Scheduled => "Transactions scheduled for mining",
            Self::Confirmed => "Transactions confirmed in a block",
            Self::Replaced => "Transactions replaced by RBF",
        }
    }

    /// Label table keyed by category
    pub fn labels() -> BTreeMap<Self, &'static str> {
        Self::all().iter().map(|c| (*c, c.label())).collect()
    }

    /// Description table keyed by category
    pub fn descriptions() -> BTreeMap<Self, &'static str> {
        Self::all().iter().map(|c| (*c, c.description())).collect()
    }
}

impl fmt::Display for TransactionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionCategory {
    type Err = ParseCategoryError;

    /// Case-insensitive, whitespace-trimmed exact match. `unconfirmed` is
    /// accepted as an alias of [`TransactionCategory::Mempool`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "confirmed" => Ok(Self::Confirmed),
            "scheduled" => Ok(Self::Scheduled),
            "proposed" => Ok(Self::Proposed),
            "committed" => Ok(Self::Committed),
            "mempool" | "unconfirmed" => Ok(Self::Mempool),
            "replaced" => Ok(Self::Replaced),
            _ => Err(ParseCategoryError(s.to_string())),
        }
    }
}
