//! Shutdown signal handling.
//!
//! SIGTERM and SIGINT both stop the server gracefully; in-flight callbacks
//! are allowed to finish.

use tracing::{debug, info, warn};

/// Completes when the process is asked to stop.
#[cfg(unix)]
pub async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(e) => {
            warn!("cannot listen for SIGTERM, falling back to ctrl-c: {}", e);
            ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
        _ = ctrl_c() => {}
    }
}

/// Completes when the process is asked to stop.
#[cfg(not(unix))]
pub async fn shutdown_signal() {
    ctrl_c().await;
}

async fn ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received interrupt, shutting down"),
        Err(e) => {
            debug!("ctrl-c handler unavailable: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
