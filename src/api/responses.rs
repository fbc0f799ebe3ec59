//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    policy::DelayOption,
    state::{Phase, ReminderState},
};

/// Response structure for the decision endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub phase: Phase,
    pub reminder: ReminderState,
}

impl ApiResponse {
    fn new(status: String, message: String, phase: Phase, reminder: ReminderState) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            phase,
            reminder,
        }
    }

    /// The decision was accepted and applied
    pub fn accepted(message: String, phase: Phase, reminder: ReminderState) -> Self {
        Self::new("accepted".to_string(), message, phase, reminder)
    }

    /// The decision was rejected or its effect failed
    pub fn error(message: String, phase: Phase, reminder: ReminderState) -> Self {
        Self::new("error".to_string(), message, phase, reminder)
    }
}

/// Request body for POST /delay
#[derive(Debug, Clone, Deserialize)]
pub struct DelayRequest {
    pub seconds: u64,
}

/// Response for GET /status
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub phase: Phase,
    pub machine_uptime_seconds: u64,
    pub machine_uptime: String,
    pub threshold_seconds: u64,
    pub first_threshold_crossed_at: Option<DateTime<Utc>>,
    pub total_deferred_seconds: u64,
    pub next_reminder_at: Option<DateTime<Utc>>,
    /// Legal delay choices right now, longest first.
    pub choices: Vec<DelayOption>,
    pub last_error: Option<String>,
    pub service_uptime: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
