//! Events exchanged between the state machine and the presentation layer
//!
//! The polling loop and the user-facing surface communicate only through
//! these types: [`ReminderDue`] flows out over a broadcast channel,
//! [`Decision`] comes back through `AppState::submit_decision`.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::policy::DelayOption;

/// Emitted when a reboot reminder should be put in front of the user.
#[derive(Debug, Clone, Serialize)]
pub struct ReminderDue {
    pub uptime_seconds: u64,
    /// Human-readable uptime, e.g. `"1d 2h 5m"`.
    pub uptime: String,
    pub total_deferred_seconds: u64,
    /// Legal delay choices at emission time, longest first.
    pub choices: Vec<DelayOption>,
    pub raised_at: DateTime<Utc>,
}

/// A user decision submitted by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    RebootNow,
    Delay { seconds: u64 },
}

/// What an accepted decision did to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionOutcome {
    /// The machine entered `Rebooting`; the caller must now invoke the
    /// platform reboot exactly once.
    RebootInitiated,
    /// The deferral was granted and the next reminder scheduled.
    Delayed {
        option: DelayOption,
        next_reminder_at: DateTime<Utc>,
    },
}
