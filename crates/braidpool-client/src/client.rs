// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Typed client for the BraidPool node API

use std::sync::Arc;

use api_client::{ApiError, HttpTransport, TransactionSource};
use chrono::Utc;
use serde_json::Value;
use shared_types::{MempoolInfo, Transaction};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::{
    config::BraidPoolConfig,
    executor::{RequestExecutor, RequestOptions},
    retry::RetryCoordinator,
    transform::transform_records,
    transport::ReqwestTransport,
};

/// Number of transactions requested when the caller has no preference
pub const DEFAULT_TRANSACTION_LIMIT: usize = 10;

const TRANSACTIONS_ENDPOINT: &str = "/transactions";
const MEMPOOL_INFO_ENDPOINT: &str = "/mempool/info";

/// BraidPool node API client
///
/// Every fetch runs through the retry coordinator, so a call returns either
/// the decoded payload or the error from the final attempt.
#[derive(Debug, Clone)]
pub struct BraidPoolClient<T = ReqwestTransport> {
    config: Arc<BraidPoolConfig>,
    coordinator: RetryCoordinator<T>,
}

impl BraidPoolClient<ReqwestTransport> {
    /// Create a client backed by `reqwest`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] if the HTTP client cannot be built
    pub fn new(config: BraidPoolConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new().map_err(|e| ApiError::Configuration {
            message: e.to_string(),
        })?;

        Ok(Self::with_transport(config, transport))
    }
}

impl<T: HttpTransport> BraidPoolClient<T> {
    /// Create a client over any transport
    pub fn with_transport(config: BraidPoolConfig, transport: T) -> Self {
        let config = Arc::new(config);
        let executor = RequestExecutor::new(Arc::clone(&config), transport);

        Self {
            config,
            coordinator: RetryCoordinator::new(executor),
        }
    }

    /// Client configuration
    pub fn config(&self) -> &BraidPoolConfig {
        &self.config
    }

    /// Fetch the most recent transactions, at most `limit` of them
    ///
    /// # Errors
    ///
    /// Returns the final attempt's error if every attempt failed
    pub async fn fetch_recent_transactions(
        &self,
        limit: usize,
    ) -> Result<Vec<Transaction>, ApiError> {
        self.recent_transactions(limit, None).await
    }

    /// Like [`Self::fetch_recent_transactions`], aborting when `cancel` fires
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Cancelled`] on cancellation, otherwise as
    /// [`Self::fetch_recent_transactions`]
    pub async fn fetch_recent_transactions_cancellable(
        &self,
        limit: usize,
        cancel: &CancellationToken,
    ) -> Result<Vec<Transaction>, ApiError> {
        self.recent_transactions(limit, Some(cancel)).await
    }

    /// Fetch aggregate mempool statistics
    ///
    /// # Errors
    ///
    /// Returns the final attempt's error if every attempt failed
    pub async fn fetch_mempool_info(&self) -> Result<MempoolInfo, ApiError> {
        self.mempool_info(None).await
    }

    /// Like [`Self::fetch_mempool_info`], aborting when `cancel` fires
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Cancelled`] on cancellation, otherwise as
    /// [`Self::fetch_mempool_info`]
    pub async fn fetch_mempool_info_cancellable(
        &self,
        cancel: &CancellationToken,
    ) -> Result<MempoolInfo, ApiError> {
        self.mempool_info(Some(cancel)).await
    }

    async fn recent_transactions(
        &self,
        limit: usize,
        cancel: Option<&CancellationToken>,
    ) -> Result<Vec<Transaction>, ApiError> {
        let records: Vec<Value> = self
            .coordinator
            .run(TRANSACTIONS_ENDPOINT, &RequestOptions::get(), cancel)
            .await?;

        let received = records.len();
        let now = u64::try_from(Utc::now().timestamp()).unwrap_or_default();

        let mut transactions = transform_records(records, now, self.config.category_matching());
        transactions.truncate(limit);

        debug!(received, returned = transactions.len(), limit, "Transformed transactions");

        Ok(transactions)
    }

    async fn mempool_info(
        &self,
        cancel: Option<&CancellationToken>,
    ) -> Result<MempoolInfo, ApiError> {
        self.coordinator
            .run(MEMPOOL_INFO_ENDPOINT, &RequestOptions::get(), cancel)
            .await
    }
}

impl<T: HttpTransport> TransactionSource for BraidPoolClient<T> {
    async fn fetch_recent_transactions(&self, limit: usize) -> Result<Vec<Transaction>, ApiError> {
        self.recent_transactions(limit, None).await
    }

    async fn fetch_mempool_info(&self) -> Result<MempoolInfo, ApiError> {
        self.mempool_info(None).await
    }

    fn name(&self) -> &'static str {
        "braidpool"
    }
}
