//! Reminder lifecycle phases

use serde::Serialize;

/// Where the reminder state machine currently sits.
///
/// The phase lives only in memory; after a restart the machine starts in
/// [`Phase::Idle`] and a still-due reminder re-arms from the persisted
/// record on the first poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Below the uptime threshold, or an active deferral is running.
    Idle,
    /// A reminder is due but not currently offered, e.g. after a failed
    /// reboot attempt. The next poll re-offers it.
    PendingReminder,
    /// A reminder has been emitted; waiting on the user's decision.
    AwaitingUserChoice,
    /// The user confirmed; the reboot command was handed to the platform.
    Rebooting,
}

impl Phase {
    /// Only an emitted, unanswered reminder accepts decisions.
    pub fn accepts_decisions(self) -> bool {
        matches!(self, Phase::AwaitingUserChoice)
    }
}
