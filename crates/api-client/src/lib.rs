// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Transport and error abstractions for the BraidPool API client
//!
//! This crate holds the seams that the concrete client is built on, so that
//! consumers (and tests) can depend on them without pulling in an HTTP stack.
//!
//! # Core Abstractions
//!
//! - **`TransactionSource` Trait**: anything that can produce recent transactions and
//!   mempool statistics
//! - **`HttpTransport` Trait**: the raw "send a request, get status/headers/body" primitive
//! - **`ApiError`**: the single error record surfaced to callers, carrying a message, an
//!   optional HTTP status code and an optional transport cause

use std::{error::Error as StdError, time::Duration};

use shared_types::{MempoolInfo, Transaction};
use thiserror::Error;

pub mod transport;

pub use transport::*;

/// Boxed, thread-safe error used as the opaque cause of transport failures
pub type BoxError = Box<dyn StdError + Send + Sync>;

const UNKNOWN_ERROR_MESSAGE: &str = "Unknown API error";

/// Source of transaction feed data
///
/// Implemented by the HTTP client; the dashboard feed is generic over it.
pub trait TransactionSource: Send + Sync {
    /// Fetch at most `limit` recent transactions, normalized
    ///
    /// # Errors
    ///
    /// Returns the last observed error once every attempt has failed
    fn fetch_recent_transactions(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Transaction>, ApiError>> + Send;

    /// Fetch aggregate mempool statistics
    ///
    /// # Errors
    ///
    /// Returns the last observed error once every attempt has failed
    fn fetch_mempool_info(&self) -> impl Future<Output = Result<MempoolInfo, ApiError>> + Send;

    /// Get the name/identifier of this source
    fn name(&self) -> &'static str;
}

/// Errors surfaced by the API client
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    /// No response arrived within the per-attempt timeout
    #[error("Request timeout")]
    Timeout { timeout: Duration },

    /// The server answered with a non-success status
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request failed below HTTP, or the body could not be decoded
    #[error("{message}")]
    Transport {
        message: String,
        #[source]
        source: BoxError,
    },

    /// The caller cancelled the request
    #[error("Request cancelled")]
    Cancelled,

    /// The client could not be constructed
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl ApiError {
    /// Create an HTTP error, appending the response body when there is one
    pub fn http(status: u16, status_text: &str, body: &str) -> Self {
        let mut message = format!("HTTP {status}: {status_text}");
        let body = body.trim();
        if !body.is_empty() {
            message.push_str(" - ");
            message.push_str(body);
        }
        Self::Http { status, message }
    }

    /// Wrap a transport-level cause, keeping it available through [`ApiError::cause`]
    pub fn transport(source: impl Into<BoxError>) -> Self {
        let source = source.into();
        let message = source.to_string();
        let message = if message.trim().is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_string()
        } else {
            message
        };
        Self::Transport { message, source }
    }

    /// Human-readable message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// HTTP status code, present only for HTTP-level failures
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Original cause, present only for transport-level failures
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        match self {
            Self::Transport { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }

    /// Check if the attempt timed out
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Check if the caller cancelled the request
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
