// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Client configuration
//!
//! [`BraidPoolConfig`] is always valid by construction: the base URL is an
//! absolute `http`/`https` URL and the timeout is non-zero. Callers that only
//! want to change a few values start from a [`PartialConfig`], whose unset
//! fields fall back to the defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

// Client defaults
const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_TIMEOUT_MILLIS: u64 = 10_000;
const DEFAULT_RETRIES: u32 = 3;

/// How free-form category strings are matched against the known categories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryMatching {
    /// Trimmed, case-insensitive exact match (with the `unconfirmed` alias)
    #[default]
    Exact,
    /// First category whose stem is contained in the input wins
    Substring,
}

/// Errors raised while validating client configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum ConfigError {
    /// The base URL does not parse
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The base URL is not http or https
    #[error("unsupported base URL scheme {scheme:?}, expected http or https")]
    UnsupportedScheme { scheme: String },

    /// The request timeout is zero
    #[error("timeout must be greater than 0")]
    ZeroTimeout,
}

/// Validated, immutable client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BraidPoolConfig {
    base_url: Url,
    timeout: Duration,
    retries: u32,
    category_matching: CategoryMatching,
}

/// Override-able configuration record; unset fields take the defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialConfig {
    /// Base URL of the node API
    pub base_url: Option<String>,
    /// Per-attempt timeout in milliseconds
    pub timeout_ms: Option<u64>,
    /// Retries after the first attempt
    pub retries: Option<u32>,
    /// Category matching policy
    pub category_matching: Option<CategoryMatching>,
}

impl BraidPoolConfig {
    /// Create a configuration with exact category matching
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the node API, e.g. `http://localhost:3000`
    /// * `timeout_ms` - Per-attempt timeout in milliseconds, must be positive
    /// * `retries` - Number of retries after the first attempt
    pub fn new(base_url: &str, timeout_ms: u64, retries: u32) -> Result<Self, ConfigError> {
        if timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout: Duration::from_millis(timeout_ms),
            retries,
            category_matching: CategoryMatching::default(),
        })
    }

    /// Resolve a partial configuration against the defaults
    pub fn from_partial(partial: PartialConfig) -> Result<Self, ConfigError> {
        let config = Self::new(
            partial.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL),
            partial.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MILLIS),
            partial.retries.unwrap_or(DEFAULT_RETRIES),
        )?;

        Ok(config.with_category_matching(partial.category_matching.unwrap_or_default()))
    }

    /// Replace the category matching policy
    #[must_use]
    pub fn with_category_matching(mut self, category_matching: CategoryMatching) -> Self {
        self.category_matching = category_matching;
        self
    }

    /// Base URL of the node API
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Per-attempt timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Retries after the first attempt
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Total attempts per logical request
    pub fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }

    /// Category matching policy
    pub fn category_matching(&self) -> CategoryMatching {
        self.category_matching
    }

    /// Full URL for an endpoint path such as `/transactions`
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}{}",
            self.base_url.as_str().trim_end_matches('/'),
            endpoint
        )
    }
}

impl Default for BraidPoolConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MILLIS),
            retries: DEFAULT_RETRIES,
            category_matching: CategoryMatching::default(),
        }
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ConfigError::UnsupportedScheme {
            scheme: scheme.to_string(),
        }),
    }
}
