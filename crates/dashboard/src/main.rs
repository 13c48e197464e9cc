// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! BraidPool Dashboard
//!
//! Prints the live transaction feed of a BraidPool node to stdout.

use anyhow::Result;
use braidpool_client::BraidPoolClient;
use chrono::Utc;
use dashboard::{DashboardConfig, TransactionFeed, shutdown::shutdown_signal_handler};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = DashboardConfig::from_env()?;
    let client_config = config.client_config()?;

    info!(
        base_url = %client_config.base_url(),
        timeout_ms = client_config.timeout().as_millis(),
        retries = client_config.retries(),
        "Starting BraidPool dashboard"
    );

    let client = BraidPoolClient::new(client_config)?;
    let shutdown = CancellationToken::new();
    tokio::spawn(shutdown_signal_handler(shutdown.clone()));

    let mut feed = TransactionFeed::new(client, &config);
    feed.run(&shutdown, |feed| {
        let now = u64::try_from(Utc::now().timestamp()).unwrap_or_default();
        println!("{}", feed.render(now));
    })
    .await;

    Ok(())
}
