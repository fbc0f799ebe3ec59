//! Reminder announcement background task

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tracing::{error, warn};

use crate::state::AppState;

/// Background task that subscribes to reminder events and surfaces each
/// one in the log. Frontends get the same information from the status
/// endpoint; this keeps a headless install noisy enough to notice.
pub async fn reminder_notifier_task(state: Arc<AppState>) {
    let mut reminders = state.subscribe_reminders();

    loop {
        match reminders.recv().await {
            Ok(reminder) => {
                let labels: Vec<&str> = reminder.choices.iter().map(|c| c.label).collect();
                warn!(
                    "Reboot recommended: machine has been up for {} ({}s already deferred). Delay choices: {}",
                    reminder.uptime,
                    reminder.total_deferred_seconds,
                    labels.join(", ")
                );
            }
            Err(RecvError::Lagged(missed)) => {
                warn!("Reminder notifier lagged, missed {} events", missed);
            }
            Err(RecvError::Closed) => {
                error!("Reminder channel closed, notifier exiting");
                break;
            }
        }
    }
}
