// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error handling module

use api_client::ApiError;
use thiserror::Error;

/// Errors raised while starting or running the dashboard
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// The API settings do not form a valid client configuration
    #[error("Invalid client configuration: {source}")]
    ClientConfig {
        /// Underlying validation error
        #[from]
        source: braidpool_client::ConfigError,
    },

    /// The API client failed
    #[error("API error: {source}")]
    Api {
        /// Underlying client error
        #[from]
        source: ApiError,
    },
}

/// Result type for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;
