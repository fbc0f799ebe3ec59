//! Uptime polling background task

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::{
    services::{format_uptime, sample_uptime},
    state::{AppState, TickOutcome},
};

/// Background task that samples host uptime on a fixed interval and feeds
/// it through the reminder state machine.
///
/// The loop never waits on user input: reminders go out over the broadcast
/// channel and decisions arrive independently through the API. A failed
/// uptime read skips the tick and is retried on the next interval.
pub async fn uptime_monitor_task(state: Arc<AppState>, poll_interval: Duration) {
    info!(
        "Starting uptime monitor: sampling every {}s, reminder threshold {}",
        poll_interval.as_secs(),
        format_uptime(state.threshold_seconds)
    );

    let mut ticker = interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let uptime_seconds = match sample_uptime() {
            Ok(value) => value,
            Err(e) => {
                warn!("Skipping tick, uptime unavailable: {}", e);
                continue;
            }
        };

        match state.handle_tick(uptime_seconds, Utc::now()) {
            Ok(TickOutcome::RebootDetected) => {
                info!("Host rebooted, deferral accounting reset");
            }
            Ok(TickOutcome::BelowThreshold) => {
                debug!("Uptime {} is below the threshold", format_uptime(uptime_seconds));
            }
            Ok(TickOutcome::Deferred { until }) => {
                debug!("Reminder deferred until {}", until);
            }
            Ok(TickOutcome::ReminderDue) => {
                info!("Reboot reminder raised at uptime {}", format_uptime(uptime_seconds));
            }
            Ok(TickOutcome::ReminderRepeated) => {
                debug!("Reminder still unanswered, re-emitted");
            }
            Ok(TickOutcome::RebootInProgress) => {
                debug!("Reboot in flight, observing only");
            }
            Err(e) => error!("Tick failed: {}", e),
        }
    }
}
