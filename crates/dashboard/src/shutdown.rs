// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Shutdown signal handling

use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Handle shutdown signals and trigger coordinated cancellation
///
/// Listens for SIGINT (Ctrl+C) and SIGTERM and cancels `shutdown` when one
/// arrives. Returns early if the token is cancelled some other way.
///
/// # Panics
///
/// Panics if the signal handlers cannot be registered.
pub async fn shutdown_signal_handler(shutdown: CancellationToken) {
    let signal_received = async {
        #[cfg(unix)]
        #[allow(clippy::expect_used)]
        {
            use tokio::signal::unix::{SignalKind, signal};

            let mut sigterm =
                signal(SignalKind::terminate()).expect("Failed to register SIGTERM handler");
            let mut sigint =
                signal(SignalKind::interrupt()).expect("Failed to register SIGINT handler");

            tokio::select! {
                _ = sigterm.recv() => "SIGTERM",
                _ = sigint.recv() => "SIGINT",
            }
        }

        #[cfg(not(unix))]
        #[allow(clippy::expect_used)]
        {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install CTRL+C signal handler");
            "CTRL+C"
        }
    };

    tokio::select! {
        signal_name = signal_received => {
            warn!(signal = signal_name, "Shutdown signal received, stopping the feed");
            shutdown.cancel();
        },
        () = shutdown.cancelled() => {}
    }
}
