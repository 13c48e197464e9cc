// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Dashboard configuration module
//!
//! Settings are resolved once at startup from layered sources and then handed
//! to the client and the feed as plain values.

use std::{collections::HashMap, time::Duration};

use anyhow::{Result, ensure};
use braidpool_client::{BraidPoolConfig, PartialConfig};
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use serde_with::{DisplayFromStr, serde_as};
use shared_types::TransactionCategory;

use crate::error::{DashboardError, DashboardResult};

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_VAR: &str = "BRAIDPOOL_CONFIG";

/// Shorthand environment variable for the node API base URL
pub const API_URL_VAR: &str = "BRAIDPOOL_API_URL";

const ENV_PREFIX: &str = "BRAIDPOOL";
const DEFAULT_CONFIG_FILE: &str = "dashboard.json";
const DEFAULT_LIMIT: usize = 50;
const DEFAULT_REFRESH_SECONDS: u64 = 30;

/// A validated, non-zero refresh interval in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshInterval(Duration);

impl RefreshInterval {
    /// Create a new `RefreshInterval`
    ///
    /// # Errors
    ///
    /// Returns an error if `seconds` is 0
    pub fn new(seconds: u64) -> Result<Self> {
        ensure!(seconds != 0, "refresh interval must be greater than 0");
        Ok(Self(Duration::from_secs(seconds)))
    }

    /// Get the interval
    pub fn value(&self) -> Duration {
        self.0
    }
}

impl Default for RefreshInterval {
    fn default() -> Self {
        Self(Duration::from_secs(DEFAULT_REFRESH_SECONDS))
    }
}

impl<'de> Deserialize<'de> for RefreshInterval {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let seconds = u64::deserialize(deserializer)?;
        Self::new(seconds).map_err(|e| de::Error::custom(e.to_string()))
    }
}

impl Serialize for RefreshInterval {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.0.as_secs())
    }
}

/// Dashboard settings
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Client overrides; unset fields take the client defaults
    pub api: PartialConfig,
    /// Number of transactions requested per refresh
    pub limit: usize,
    /// Delay between refreshes
    pub refresh_interval_seconds: RefreshInterval,
    /// Whether the feed keeps refreshing after the first load
    pub auto_refresh: bool,
    /// Initial category filter; empty shows every category
    #[serde_as(as = "Vec<DisplayFromStr>")]
    pub categories: Vec<TransactionCategory>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api: PartialConfig::default(),
            limit: DEFAULT_LIMIT,
            refresh_interval_seconds: RefreshInterval::default(),
            auto_refresh: true,
            categories: Vec::new(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Config` if configuration is invalid or cannot be loaded.
    pub fn from_env() -> DashboardResult<Self> {
        Self::load(std::env::vars().collect()).map_err(|e| DashboardError::Config {
            message: format!("failed to load configuration: {e}"),
        })
    }

    /// Load configuration using the config crate with hierarchical sources
    ///
    /// Configuration is loaded in the following order (later sources override earlier ones):
    /// 1. Default values
    /// 2. Configuration file (`dashboard.json`, or the path in `BRAIDPOOL_CONFIG`)
    /// 3. Environment variables with `BRAIDPOOL_` prefix and `__` nesting,
    ///    e.g. `BRAIDPOOL_API__TIMEOUT_MS`
    /// 4. `BRAIDPOOL_API_URL` for the API base URL
    ///
    /// `env` stands in for the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or is invalid.
    pub fn load(env: HashMap<String, String>) -> Result<Self, ConfigError> {
        // An explicitly named file must exist
        let file = match env.get(CONFIG_PATH_VAR) {
            Some(path) => File::with_name(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };
        let api_url = env.get(API_URL_VAR).cloned();

        let config = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("categories")
                    .try_parsing(true)
                    .source(Some(env.into_iter().collect())),
            )
            .set_override_option("api.base_url", api_url)?
            .build()?;

        config.try_deserialize()
    }

    /// Resolve the client configuration
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::ClientConfig` if the API settings are invalid
    pub fn client_config(&self) -> DashboardResult<BraidPoolConfig> {
        Ok(BraidPoolConfig::from_partial(self.api.clone())?)
    }

    /// Delay between refreshes
    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval_seconds.value()
    }
}
