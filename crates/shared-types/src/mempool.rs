// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Mempool aggregate types

use serde::{Deserialize, Serialize};

/// One fee histogram bucket, encoded on the wire as `[fee_rate, count]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeHistogramEntry(pub f64, pub f64);

impl FeeHistogramEntry {
    /// Fee rate of the bucket in sat/vB
    pub fn fee_rate(&self) -> f64 {
        self.0
    }

    /// Amount accumulated in the bucket
    pub fn count(&self) -> f64 {
        self.1
    }
}

/// Aggregate mempool statistics, passed through exactly as the node reports them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MempoolInfo {
    /// Number of transactions in the mempool
    pub count: u64,
    /// Total virtual size in vbytes
    pub vsize: u64,
    /// Total fees
    pub total_fee: f64,
    /// Ordered fee histogram
    pub fee_histogram: Vec<FeeHistogramEntry>,
}
