use anyhow::{Context, Result};
use atelier_event_bus::EventBus;
use axum_server::Handle;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Time the notification listeners get to finish deliveries already in progress.
const LISTENER_DRAIN: Duration = Duration::from_secs(5);

/// Starts a graceful shutdown of `handle` on the first SIGINT or SIGTERM.
pub(crate) async fn on_signal(handle: Handle<SocketAddr>, grace: Duration) {
    if let Err(e) = wait_for_signal().await {
        error!("Error while waiting for shutdown signal: {e}");
        return;
    }
    info!(grace_seconds = grace.as_secs(), "Shutdown signal received, draining connections");
    handle.graceful_shutdown(Some(grace));
}

/// Closes every event channel and waits for the listeners to return.
pub(crate) async fn drain_listeners(events: &EventBus, listeners: Vec<JoinHandle<()>>) {
    let channels = events.shutdown();
    let pending = listeners.len();

    let joined = tokio::time::timeout(LISTENER_DRAIN, async {
        for listener in listeners {
            if let Err(e) = listener.await {
                warn!(error = %e, "Event listener ended abnormally");
            }
        }
    })
    .await;

    match joined {
        Ok(()) => info!(channels, listeners = pending, "Event listeners stopped"),
        Err(_) => warn!(listeners = pending, "Event listeners did not stop in time"),
    }
}

async fn wait_for_signal() -> Result<()> {
    let ctrl_c = async { signal::ctrl_c().await.context("Failed to install Ctrl+C handler") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<_, anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        res = ctrl_c => res,
        res = terminate => res,
    }
}
