//! Main application state and the reminder state machine

use std::{sync::Mutex, time::Instant};

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::{
    error::DecisionError,
    policy::{self, DelayOption},
    services::uptime::format_uptime,
    state::{
        events::{Decision, DecisionOutcome, ReminderDue},
        phase::Phase,
        reminder_state::ReminderState,
        store::StateStore,
    },
};

/// Result of feeding one uptime sample through the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Sampled uptime went backwards: the host restarted and the epoch
    /// was reset.
    RebootDetected,
    /// Uptime is still below the reminder threshold.
    BelowThreshold,
    /// Threshold crossed, but an active deferral pushes the reminder out.
    Deferred { until: DateTime<Utc> },
    /// A reminder was emitted this tick.
    ReminderDue,
    /// A reminder is already outstanding; it was re-emitted unanswered.
    ReminderRepeated,
    /// A confirmed reboot is in flight; keep observing, do nothing else.
    RebootInProgress,
}

/// Owns the reminder record and phase, and is their only writer.
///
/// The polling loop drives [`AppState::handle_tick`]; the presentation
/// layer answers through [`AppState::submit_decision`] and observes through
/// the read-only accessors and the reminder broadcast channel. Every
/// mutation is persisted (or the failure logged) before it is considered
/// committed.
#[derive(Debug)]
pub struct AppState {
    /// Continuous uptime that first makes a reminder due.
    pub threshold_seconds: u64,
    reminder: Mutex<ReminderState>,
    phase: Mutex<Phase>,
    store: StateStore,
    /// Daemon start, for the status endpoint.
    pub start_time: Instant,
    last_error: Mutex<Option<String>>,
    /// Channel carrying reminder events to presentation consumers.
    reminder_tx: broadcast::Sender<ReminderDue>,
    /// Keep one receiver alive to prevent channel closure.
    _reminder_rx: broadcast::Receiver<ReminderDue>,
}

impl AppState {
    /// Create a new AppState, loading any previously persisted record.
    pub fn new(threshold_seconds: u64, store: StateStore) -> Self {
        let (reminder_tx, reminder_rx) = broadcast::channel(16);
        let initial = store.load();
        info!(
            "Loaded reminder state: {}s deferred this epoch, last observed uptime {}s",
            initial.total_deferred_seconds, initial.last_observed_uptime_seconds
        );

        Self {
            threshold_seconds,
            reminder: Mutex::new(initial),
            phase: Mutex::new(Phase::Idle),
            store,
            start_time: Instant::now(),
            last_error: Mutex::new(None),
            reminder_tx,
            _reminder_rx: reminder_rx,
        }
    }

    /// Feed one uptime sample through the machine.
    ///
    /// Reboot detection runs first: a sample below the stored watermark
    /// resets the epoch. Otherwise the watermark is advanced, and only an
    /// `Idle` or `PendingReminder` machine may raise a reminder. While a
    /// reminder is unanswered it is re-emitted every tick rather than
    /// assuming any default choice.
    pub fn handle_tick(
        &self,
        uptime_seconds: u64,
        now: DateTime<Utc>,
    ) -> Result<TickOutcome, String> {
        let mut reminder = self
            .reminder
            .lock()
            .map_err(|e| format!("Failed to lock reminder state: {}", e))?;
        let mut phase = self
            .phase
            .lock()
            .map_err(|e| format!("Failed to lock phase: {}", e))?;

        if uptime_seconds < reminder.last_observed_uptime_seconds {
            info!(
                "Uptime fell from {}s to {}s, host rebooted; resetting deferral accounting",
                reminder.last_observed_uptime_seconds, uptime_seconds
            );
            reminder.reset_epoch();
            reminder.last_observed_uptime_seconds = uptime_seconds;
            *phase = Phase::Idle;
            self.persist(&reminder);
            return Ok(TickOutcome::RebootDetected);
        }

        reminder.last_observed_uptime_seconds = uptime_seconds;
        self.persist(&reminder);

        match *phase {
            Phase::Rebooting => return Ok(TickOutcome::RebootInProgress),
            Phase::AwaitingUserChoice => {
                // Unanswered reminder: re-offer the same event.
                self.emit_reminder(&reminder, now);
                return Ok(TickOutcome::ReminderRepeated);
            }
            Phase::Idle | Phase::PendingReminder => {}
        }

        if uptime_seconds < self.threshold_seconds {
            return Ok(TickOutcome::BelowThreshold);
        }

        if reminder.first_threshold_crossed_at.is_none() {
            reminder.first_threshold_crossed_at = Some(now);
            self.persist(&reminder);
        }

        if let Some(until) = reminder.next_reminder_at {
            if now < until {
                return Ok(TickOutcome::Deferred { until });
            }
        }

        *phase = Phase::AwaitingUserChoice;
        self.emit_reminder(&reminder, now);
        Ok(TickOutcome::ReminderDue)
    }

    /// Apply a user decision to an awaiting reminder.
    ///
    /// Delays are validated against the current legal choices; an illegal
    /// delay is rejected without touching the record. A reboot confirmation
    /// moves the machine to `Rebooting` and leaves invoking the platform
    /// command to the caller, exactly once.
    pub fn submit_decision(
        &self,
        decision: Decision,
        now: DateTime<Utc>,
    ) -> Result<DecisionOutcome, DecisionError> {
        let mut reminder = self
            .reminder
            .lock()
            .map_err(|e| DecisionError::Lock(e.to_string()))?;
        let mut phase = self
            .phase
            .lock()
            .map_err(|e| DecisionError::Lock(e.to_string()))?;

        if !phase.accepts_decisions() {
            return Err(DecisionError::NoPendingReminder);
        }

        match decision {
            Decision::RebootNow => {
                *phase = Phase::Rebooting;
                info!("User confirmed reboot");
                Ok(DecisionOutcome::RebootInitiated)
            }
            Decision::Delay { seconds } => {
                let option = policy::find_choice(reminder.total_deferred_seconds, seconds)
                    .ok_or(DecisionError::InvalidChoice {
                        requested_seconds: seconds,
                    })?;

                let next_reminder_at = reminder.record_deferral(option.seconds, now);
                self.persist(&reminder);
                *phase = Phase::Idle;
                self.clear_last_error();
                info!(
                    "Reminder delayed by {} ({}s deferred this epoch), next at {}",
                    option.label, reminder.total_deferred_seconds, next_reminder_at
                );
                Ok(DecisionOutcome::Delayed {
                    option,
                    next_reminder_at,
                })
            }
        }
    }

    /// Record a failed reboot attempt and return the machine to
    /// `PendingReminder` so the next tick re-offers the reminder.
    pub fn record_reboot_failure(&self, message: String) {
        warn!("Reboot attempt failed: {}", message);
        if let Ok(mut phase) = self.phase.lock() {
            *phase = Phase::PendingReminder;
        }
        if let Ok(mut last_error) = self.last_error.lock() {
            *last_error = Some(message);
        }
    }

    /// Subscribe to reminder events.
    pub fn subscribe_reminders(&self) -> broadcast::Receiver<ReminderDue> {
        self.reminder_tx.subscribe()
    }

    /// Current phase of the machine.
    pub fn phase(&self) -> Result<Phase, String> {
        self.phase
            .lock()
            .map(|phase| *phase)
            .map_err(|e| format!("Failed to lock phase: {}", e))
    }

    /// Snapshot of the persisted record.
    pub fn reminder_record(&self) -> Result<ReminderState, String> {
        self.reminder
            .lock()
            .map(|reminder| reminder.clone())
            .map_err(|e| format!("Failed to lock reminder state: {}", e))
    }

    /// Machine uptime as of the last poll.
    pub fn current_uptime_seconds(&self) -> Result<u64, String> {
        self.reminder_record()
            .map(|reminder| reminder.last_observed_uptime_seconds)
    }

    /// Legal delay choices for the current deferral total, longest first.
    pub fn legal_choices(&self) -> Result<Vec<DelayOption>, String> {
        self.reminder_record()
            .map(|reminder| policy::legal_choices(reminder.total_deferred_seconds))
    }

    /// The most recent reboot failure, if any.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().ok().and_then(|e| e.clone())
    }

    /// How long the daemon itself has been running, as a formatted string.
    pub fn service_uptime(&self) -> String {
        format_uptime(self.start_time.elapsed().as_secs())
    }

    fn emit_reminder(&self, reminder: &ReminderState, now: DateTime<Utc>) {
        let event = ReminderDue {
            uptime_seconds: reminder.last_observed_uptime_seconds,
            uptime: format_uptime(reminder.last_observed_uptime_seconds),
            total_deferred_seconds: reminder.total_deferred_seconds,
            choices: policy::legal_choices(reminder.total_deferred_seconds),
            raised_at: now,
        };
        if let Err(e) = self.reminder_tx.send(event) {
            warn!("Failed to broadcast reminder event: {}", e);
        }
    }

    fn persist(&self, reminder: &ReminderState) {
        if let Err(e) = self.store.save(reminder) {
            warn!(
                "Failed to persist reminder state to {}: {}",
                self.store.path().display(),
                e
            );
        }
    }

    fn clear_last_error(&self) {
        if let Ok(mut last_error) = self.last_error.lock() {
            *last_error = None;
        }
    }
}
