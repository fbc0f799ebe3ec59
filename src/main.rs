//! Uptime Watcher - a background agent that nags for a reboot
//!
//! This is the main entry point for the uptime-watcher daemon.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use uptime_watcher::{
    api::create_router,
    config::Config,
    services::check_reboot_support,
    state::{AppState, StateStore},
    tasks::{reminder_notifier_task, uptime_monitor_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("uptime_watcher={},tower_http=info", config.log_level()))
        .init();

    info!("Starting uptime-watcher v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: threshold={}h, poll every {}s, state file {}",
        config.threshold_hours,
        config.poll_interval_secs,
        config.state_file_path().display()
    );

    // A missing reboot command is not fatal: reminders still fire, only
    // the confirm action would fail and be surfaced to the user.
    if let Err(e) = check_reboot_support().await {
        warn!("Reboot command unavailable: {}", e);
    }

    // Create application state from the persisted record
    let store = StateStore::new(config.state_file_path());
    let state = Arc::new(AppState::new(config.threshold_seconds(), store));

    // Start the uptime polling background task
    let monitor_state = Arc::clone(&state);
    let poll_interval = config.poll_interval();
    tokio::spawn(async move {
        uptime_monitor_task(monitor_state, poll_interval).await;
    });

    // Start the reminder announcement background task
    let notifier_state = Arc::clone(&state);
    tokio::spawn(async move {
        reminder_notifier_task(notifier_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Decision endpoint listening on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /status     - Current uptime, phase and delay choices");
    info!("  POST /reboot-now - Confirm the reminder and reboot immediately");
    info!("  POST /delay      - Defer the reminder (body: {{\"seconds\": 3600}})");
    info!("  GET  /health     - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("uptime-watcher stopped");
    Ok(())
}
