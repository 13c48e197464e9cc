// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Resilient client for the BraidPool node transaction API
//!
//! # Architecture
//!
//! Requests flow through four layers, each owning one concern:
//!
//! - **[`client::BraidPoolClient`]**: typed fetches for recent transactions and
//!   mempool statistics
//! - **[`retry::RetryCoordinator`]**: bounded attempts with exponential backoff and
//!   optional cancellation
//! - **[`executor::RequestExecutor`]**: one HTTP exchange with a timeout, classified
//!   into a value or an [`api_client::ApiError`]
//! - **[`transport::ReqwestTransport`]**: the `reqwest`-backed [`api_client::HttpTransport`]
//!
//! Raw transaction records are normalized by [`transform`] (with the helpers in
//! [`normalize`]) before they leave the client, so consumers only ever see the
//! strict [`shared_types::Transaction`] shape.
//!
//! # Features
//!
//! - **Per-attempt timeout**: slow responses fail with "Request timeout"
//! - **Exponential backoff**: 1s, 2s, 4s, ... between attempts
//! - **Lenient decoding**: malformed fields fall back to defaults instead of
//!   failing the whole payload
//! - **Testing Support**: any [`api_client::HttpTransport`] can be injected with
//!   [`client::BraidPoolClient::with_transport`]

pub mod client;
pub mod config;
pub mod executor;
pub mod normalize;
pub mod retry;
pub mod transform;
pub mod transport;

pub use client::{BraidPoolClient, DEFAULT_TRANSACTION_LIMIT};
pub use config::{BraidPoolConfig, CategoryMatching, ConfigError, PartialConfig};
pub use executor::{RequestExecutor, RequestOptions};
pub use normalize::{DEFAULT_WORK_UNIT, Work, normalize_category, parse_work, parse_work_str};
pub use retry::{RetryCoordinator, backoff_delays};
pub use transform::transform_records;
pub use transport::ReqwestTransport;
