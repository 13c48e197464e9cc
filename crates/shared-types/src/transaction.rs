// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Strict transaction records
//!
//! These are the fully populated shapes handed to consumers after normalization.
//! Input and output entries are decoded leniently: a malformed member falls back
//! to its default instead of rejecting the entry, so list lengths are preserved.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{DefaultOnError, serde_as};

use crate::TransactionCategory;

/// Confirmation status of a transaction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionStatus {
    /// Whether the transaction is included in a block
    pub confirmed: bool,
    /// Height of the containing block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_height: Option<u64>,
    /// Hash of the containing block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_hash: Option<String>,
    /// Timestamp of the containing block (epoch seconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_time: Option<u64>,
}

impl TransactionStatus {
    /// Status derived from a confirmation count alone
    pub fn from_confirmations(confirmations: u64) -> Self {
        Self {
            confirmed: confirmations > 0,
            ..Self::default()
        }
    }
}

/// Previous output spent by an input
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prevout {
    /// Value of the spent output
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub value: f64,
}

/// A transaction input
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionInput {
    /// Txid of the transaction holding the spent output
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub txid: String,
    /// Index of the spent output
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub vout: u32,
    /// Input sequence number
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub sequence: u32,
    /// The spent output, when the node resolved it
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prevout: Option<Prevout>,
}

/// A transaction output
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionOutput {
    /// Output value
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub value: f64,
    /// Script type, e.g. `p2wpkh`
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub scriptpubkey_type: String,
    /// Destination address, if the script has one
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scriptpubkey_address: Option<String>,
}

impl TransactionInput {
    /// Decode an input from an arbitrary JSON value, defaulting anything malformed
    pub fn from_value(value: &Value) -> Self {
        Self::deserialize(value).unwrap_or_default()
    }
}

impl TransactionOutput {
    /// Decode an output from an arbitrary JSON value, defaulting anything malformed
    pub fn from_value(value: &Value) -> Self {
        Self::deserialize(value).unwrap_or_default()
    }
}

/// Normalized transaction record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Transaction id
    pub txid: String,
    /// Witness hash (the txid when the node did not report one)
    pub hash: String,
    /// Lifecycle category
    pub category: TransactionCategory,
    /// Virtual size in vbytes
    pub size: u64,
    /// Weight units
    pub weight: u64,
    /// Absolute fee
    pub fee: f64,
    /// Fee rate in sat/vB
    pub fee_rate: f64,
    /// Number of inputs
    pub inputs: u64,
    /// Number of outputs
    pub outputs: u64,
    /// Number of confirmations
    pub confirmations: u64,
    /// Work magnitude, expressed in `work_unit`
    pub work: f64,
    /// Hash-rate unit for `work` (`TH`, `PH`, `EH`)
    pub work_unit: String,
    /// Inputs
    pub vin: Vec<TransactionInput>,
    /// Outputs
    pub vout: Vec<TransactionOutput>,
    /// Confirmation status
    pub status: TransactionStatus,
    /// First-seen time (epoch seconds)
    pub timestamp: u64,
    /// Whether the transaction signals opt-in RBF
    pub rbf_signaled: bool,
}

impl Transaction {
    /// Whether the transaction is included in a block
    pub fn is_confirmed(&self) -> bool {
        self.status.confirmed
    }
}
