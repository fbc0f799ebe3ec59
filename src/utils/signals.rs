//! Signal handling for graceful shutdown

use futures::stream::StreamExt;
use signal_hook::consts::{SIGINT, SIGQUIT, SIGTERM};
use signal_hook_tokio::Signals;
use tracing::info;

/// Resolve once the process receives a termination signal.
pub async fn shutdown_signal() {
    let mut signals =
        Signals::new([SIGTERM, SIGINT, SIGQUIT]).expect("failed to install signal handler");

    if let Some(signal) = signals.next().await {
        info!("Received signal {}, shutting down", signal);
    }
}
