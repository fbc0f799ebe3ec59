//! The persisted reminder record

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Current on-disk schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// The single durable record of the reminder state machine.
///
/// Serialized as camelCase JSON with ISO-8601 timestamps. Missing fields
/// take their defaults on load, so older files keep working as the schema
/// grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReminderState {
    pub schema_version: u32,
    /// When continuous uptime first crossed the reminder threshold in the
    /// current uptime epoch; `None` until it does.
    pub first_threshold_crossed_at: Option<DateTime<Utc>>,
    /// Cumulative seconds the user has deferred since the threshold was
    /// first crossed. Resets to 0 when a reboot is detected.
    pub total_deferred_seconds: u64,
    /// Earliest time the next reminder may fire; `None` means due as soon
    /// as the threshold is met.
    pub next_reminder_at: Option<DateTime<Utc>>,
    /// Uptime recorded at the previous poll. A smaller sample than this
    /// means the host restarted.
    pub last_observed_uptime_seconds: u64,
}

impl ReminderState {
    /// Clear the epoch-scoped fields after a reboot was detected.
    pub fn reset_epoch(&mut self) {
        self.first_threshold_crossed_at = None;
        self.total_deferred_seconds = 0;
        self.next_reminder_at = None;
    }

    /// Account for a granted deferral and schedule the next reminder.
    /// Returns the scheduled time.
    pub fn record_deferral(&mut self, seconds: u64, now: DateTime<Utc>) -> DateTime<Utc> {
        self.total_deferred_seconds += seconds;
        let next = now + Duration::seconds(seconds as i64);
        self.next_reminder_at = Some(next);
        next
    }
}

impl Default for ReminderState {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            first_threshold_crossed_at: None,
            total_deferred_seconds: 0,
            next_reminder_at: None,
            last_observed_uptime_seconds: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_a_fresh_epoch() {
        let state = ReminderState::default();
        assert_eq!(state.schema_version, SCHEMA_VERSION);
        assert!(state.first_threshold_crossed_at.is_none());
        assert_eq!(state.total_deferred_seconds, 0);
        assert!(state.next_reminder_at.is_none());
        assert_eq!(state.last_observed_uptime_seconds, 0);
    }

    #[test]
    fn reset_epoch_clears_deferral_accounting_only() {
        let mut state = ReminderState {
            first_threshold_crossed_at: Some(Utc::now()),
            total_deferred_seconds: 7200,
            next_reminder_at: Some(Utc::now()),
            last_observed_uptime_seconds: 90_000,
            ..ReminderState::default()
        };
        state.reset_epoch();
        assert!(state.first_threshold_crossed_at.is_none());
        assert_eq!(state.total_deferred_seconds, 0);
        assert!(state.next_reminder_at.is_none());
        // The uptime watermark is epoch-independent.
        assert_eq!(state.last_observed_uptime_seconds, 90_000);
    }

    #[test]
    fn record_deferral_accumulates() {
        let now = Utc::now();
        let mut state = ReminderState::default();

        let next = state.record_deferral(3600, now);
        assert_eq!(state.total_deferred_seconds, 3600);
        assert_eq!(next, now + Duration::seconds(3600));

        state.record_deferral(600, now);
        assert_eq!(state.total_deferred_seconds, 4200);
        assert_eq!(state.next_reminder_at, Some(now + Duration::seconds(600)));
    }

    #[test]
    fn json_uses_camel_case_field_names() {
        let json = serde_json::to_string(&ReminderState::default()).unwrap();
        assert!(json.contains("\"schemaVersion\""));
        assert!(json.contains("\"firstThresholdCrossedAt\""));
        assert!(json.contains("\"totalDeferredSeconds\""));
        assert!(json.contains("\"nextReminderAt\""));
        assert!(json.contains("\"lastObservedUptimeSeconds\""));
    }

    #[test]
    fn missing_fields_default_on_load() {
        let state: ReminderState =
            serde_json::from_str(r#"{"schemaVersion":1,"totalDeferredSeconds":42}"#).unwrap();
        assert_eq!(state.total_deferred_seconds, 42);
        assert!(state.next_reminder_at.is_none());
        assert_eq!(state.last_observed_uptime_seconds, 0);
    }
}
