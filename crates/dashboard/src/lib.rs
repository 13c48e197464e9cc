// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! BraidPool terminal dashboard
//!
//! This crate drives a live, filterable transaction table from any
//! [`api_client::TransactionSource`], normally a
//! [`braidpool_client::BraidPoolClient`].
//!
//! # Module Structure
//!
//! - [`config`]: Dashboard settings with hierarchical loading (file, environment, shorthand)
//! - [`error`]: Error types for startup and runtime failures
//! - [`feed`]: Refresh loop, snapshot state and table rendering
//! - [`filter`]: Category selection applied to the table
//! - [`format`]: Display helpers for hashes, fees and ages
//! - [`shutdown`]: Signal handling with coordinated cancellation

pub mod config;
pub mod error;
pub mod feed;
pub mod filter;
pub mod format;
pub mod shutdown;

pub use config::{DashboardConfig, RefreshInterval};
pub use error::{DashboardError, DashboardResult};
pub use feed::{FeedSnapshot, LOAD_ERROR_MESSAGE, TransactionFeed};
pub use filter::CategoryFilter;
