// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Bounded retries with exponential backoff
//!
//! A logical request is attempted up to `retries + 1` times. After failed
//! attempt `i` (0-based) the coordinator waits `2^i` seconds before the next
//! one; the error from the final attempt is returned unchanged.

use std::time::Duration;

use api_client::{ApiError, HttpTransport};
use serde::de::DeserializeOwned;
use tokio_retry::{Retry, strategy::ExponentialBackoff};
use tokio_util::sync::CancellationToken;
use tracing::{Span, debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::executor::{RequestExecutor, RequestOptions};

/// Delays between attempts: 1s, 2s, 4s, ...
///
/// One delay per retry, so `retries` delays in total.
pub fn backoff_delays(retries: u32) -> impl Iterator<Item = Duration> {
    // Base 2 with factor 500 yields 2^(i+1) * 500ms = 2^i seconds.
    ExponentialBackoff::from_millis(2)
        .factor(500)
        .take(retries as usize)
}

/// Drives a [`RequestExecutor`] through the retry schedule
#[derive(Debug, Clone)]
pub struct RetryCoordinator<T> {
    executor: RequestExecutor<T>,
}

impl<T: HttpTransport> RetryCoordinator<T> {
    /// Wrap an executor
    pub fn new(executor: RequestExecutor<T>) -> Self {
        Self { executor }
    }

    /// Run one logical request
    ///
    /// When `cancel` is given and fires, the in-flight attempt or pending
    /// backoff is dropped and [`ApiError::Cancelled`] is returned.
    ///
    /// # Errors
    ///
    /// Returns the last attempt's error once all attempts have failed
    #[instrument(skip_all, fields(endpoint = %endpoint, request_id))]
    pub async fn run<R>(
        &self,
        endpoint: &str,
        options: &RequestOptions,
        cancel: Option<&CancellationToken>,
    ) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
    {
        let request_id = Uuid::new_v4();
        Span::current().record("request_id", request_id.to_string());

        let config = self.executor.config();
        let max_attempts = config.max_attempts();
        let mut attempt = 0_u32;

        let retry = Retry::spawn(backoff_delays(config.retries()), || {
            attempt += 1;
            let current = attempt;

            async move {
                debug!(attempt = current, max_attempts, "Starting attempt");

                match self.executor.execute::<R>(endpoint, options).await {
                    Ok(value) => {
                        info!(attempt = current, max_attempts, "Request succeeded");
                        Ok(value)
                    }
                    Err(e) => {
                        warn!(
                            attempt = current,
                            max_attempts,
                            error = %e,
                            "Request attempt failed"
                        );
                        Err(e)
                    }
                }
            }
        });

        let result = match cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    () = token.cancelled() => {
                        warn!("Request cancelled");
                        return Err(ApiError::Cancelled);
                    }
                    result = retry => result,
                }
            }
            None => retry.await,
        };

        if let Err(e) = &result {
            error!(max_attempts, error = %e, "All attempts failed");
        }

        result
    }
}
