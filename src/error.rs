//! Error types for the reminder core

use thiserror::Error;

/// Failure to read the host's continuous uptime.
///
/// Never fatal: the monitor skips the tick and retries on the next interval.
#[derive(Debug, Error)]
pub enum UptimeError {
    /// The host does not expose an uptime reading.
    #[error("host does not expose an uptime reading")]
    Unavailable,
}

/// Failure to write the persisted reminder record.
///
/// Logged and tolerated; the daemon keeps running on in-memory state.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to write state file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode state record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Failure of the platform reboot command.
///
/// Surfaced to the user and never retried automatically; the reminder
/// remains pending.
#[derive(Debug, Error)]
pub enum RebootError {
    /// The command could not be spawned at all.
    #[error("failed to launch reboot command: {0}")]
    Spawn(std::io::Error),

    /// The command ran but reported failure.
    #[error("reboot command exited with {status}: {stderr}")]
    CommandFailed { status: String, stderr: String },

    /// No reboot command is known for this platform.
    #[error("automatic reboot is not supported on this platform")]
    Unsupported,
}

/// Rejection of a user decision.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecisionError {
    /// A decision arrived while no reminder was awaiting one.
    #[error("no reminder is awaiting a decision")]
    NoPendingReminder,

    /// The requested delay is not among the currently legal choices.
    #[error("a delay of {requested_seconds}s is not among the legal choices")]
    InvalidChoice { requested_seconds: u64 },

    #[error("state lock poisoned: {0}")]
    Lock(String),
}
