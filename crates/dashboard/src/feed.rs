// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Live transaction feed
//!
//! The feed owns a [`TransactionSource`], refreshes it on an interval and
//! renders the latest snapshot as a text table. Refreshes stop as soon as the
//! shutdown token is cancelled, dropping any request still in flight.

use std::{fmt::Write as _, time::Duration};

use api_client::TransactionSource;
use shared_types::{MempoolInfo, Transaction, TransactionCategory};
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::{
    config::DashboardConfig,
    filter::CategoryFilter,
    format::{
        format_confirmations, format_count, format_fee, format_fee_rate, format_io,
        format_relative_time, truncate_hash,
    },
};

/// Message shown when transactions cannot be loaded
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load transactions. Please try again.";

/// Latest data held by the feed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedSnapshot {
    /// Transactions from the last successful load
    pub transactions: Vec<Transaction>,
    /// Mempool statistics, absent when the last fetch failed
    pub mempool: Option<MempoolInfo>,
    /// User-facing error from the last refresh
    pub error: Option<&'static str>,
    /// Number of completed refreshes
    pub refreshes: u64,
}

/// Periodically refreshed view over a transaction source
#[derive(Debug)]
pub struct TransactionFeed<S> {
    source: S,
    limit: usize,
    refresh_interval: Duration,
    auto_refresh: bool,
    filter: CategoryFilter,
    snapshot: FeedSnapshot,
}

impl<S: TransactionSource> TransactionFeed<S> {
    /// Create a feed over a source using the dashboard settings
    pub fn new(source: S, config: &DashboardConfig) -> Self {
        Self {
            source,
            limit: config.limit,
            refresh_interval: config.refresh_interval(),
            auto_refresh: config.auto_refresh,
            filter: CategoryFilter::new(config.categories.iter().copied()),
            snapshot: FeedSnapshot::default(),
        }
    }

    /// Latest snapshot
    pub fn snapshot(&self) -> &FeedSnapshot {
        &self.snapshot
    }

    /// Category filter
    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    /// Toggle one category in the filter
    pub fn toggle_category(&mut self, category: TransactionCategory) -> bool {
        self.filter.toggle(category)
    }

    /// Enable or disable refreshing after the current one
    pub fn set_auto_refresh(&mut self, enabled: bool) {
        self.auto_refresh = enabled;
    }

    /// Transactions passing the current filter
    pub fn visible_transactions(&self) -> Vec<&Transaction> {
        self.filter.apply(&self.snapshot.transactions)
    }

    /// Fetch transactions and mempool statistics concurrently
    ///
    /// A failed transaction fetch keeps the previous rows and sets the
    /// user-facing error; a failed mempool fetch only drops the stats.
    pub async fn refresh(&mut self) {
        let (transactions, mempool) = tokio::join!(
            self.source.fetch_recent_transactions(self.limit),
            self.source.fetch_mempool_info()
        );

        match transactions {
            Ok(transactions) => {
                debug!(
                    source = self.source.name(),
                    count = transactions.len(),
                    "Loaded transactions"
                );
                self.snapshot.transactions = transactions;
                self.snapshot.error = None;
            }
            Err(e) => {
                error!(source = self.source.name(), error = %e, "Failed to fetch transactions");
                self.snapshot.error = Some(LOAD_ERROR_MESSAGE);
            }
        }

        self.snapshot.mempool = match mempool {
            Ok(info) => Some(info),
            Err(e) => {
                warn!(source = self.source.name(), error = %e, "Failed to fetch mempool info");
                None
            }
        };

        self.snapshot.refreshes += 1;
    }

    /// Refresh until cancelled, calling `on_update` after every refresh
    ///
    /// With auto-refresh disabled the feed refreshes once and returns.
    pub async fn run<F>(&mut self, shutdown: &CancellationToken, mut on_update: F)
    where
        F: FnMut(&Self),
    {
        let mut ticker = interval(self.refresh_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            source = self.source.name(),
            limit = self.limit,
            interval_secs = self.refresh_interval.as_secs(),
            auto_refresh = self.auto_refresh,
            "Starting transaction feed"
        );

        loop {
            tokio::select! {
                biased;
                () = shutdown.cancelled() => break,
                _ = ticker.tick() => {}
            }

            tokio::select! {
                biased;
                () = shutdown.cancelled() => break,
                () = self.refresh() => {}
            }

            on_update(self);

            if !self.auto_refresh {
                break;
            }
        }

        info!(refreshes = self.snapshot.refreshes, "Transaction feed stopped");
    }

    /// Render the snapshot as a text table, with ages relative to `now`
    pub fn render(&self, now: u64) -> String {
        let mut out = String::new();
        let visible = self.visible_transactions();

        let _ = writeln!(out, "Live Transaction Feed ({})", self.filter.summary());

        if let Some(info) = &self.snapshot.mempool {
            let _ = writeln!(
                out,
                "Mempool: {} txs | {} vB | total fee {}",
                format_count(info.count),
                format_count(info.vsize),
                format_fee(info.total_fee)
            );
        }

        if let Some(message) = self.snapshot.error {
            let _ = writeln!(out, "Error: {message}");
        }

        let _ = writeln!(
            out,
            "{:<19}  {:<10}  {:>10}  {:>12}  {:>8}  {:>7}  {:>7}  {:>8}",
            "HASH", "CATEGORY", "SIZE (vB)", "FEE", "FEE RATE", "I/O", "STATUS", "TIME"
        );

        if visible.is_empty() {
            let _ = writeln!(out, "No transactions found");
            return out;
        }

        for tx in &visible {
            let fee = if tx.fee > 0.0 {
                format_fee(tx.fee)
            } else {
                "-".to_string()
            };
            let fee_rate = if tx.fee_rate > 0.0 {
                format_fee_rate(tx.fee_rate)
            } else {
                "-".to_string()
            };

            let _ = writeln!(
                out,
                "{:<19}  {:<10}  {:>10}  {:>12}  {:>8}  {:>7}  {:>7}  {:>8}",
                truncate_hash(&tx.txid),
                tx.category.label(),
                format_count(tx.size),
                fee,
                fee_rate,
                format_io(tx.inputs, tx.outputs),
                format_confirmations(tx.confirmations),
                format_relative_time(tx.timestamp, now),
            );
        }

        let _ = write!(
            out,
            "Showing {} of {} transactions",
            visible.len(),
            self.snapshot.transactions.len()
        );
        if self.auto_refresh {
            let _ = write!(out, " | Auto-refresh every {}s", self.refresh_interval.as_secs());
        }
        out.push('\n');

        out
    }
}
