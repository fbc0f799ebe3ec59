//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};
use chrono::Utc;
use tracing::{error, info, warn};

use crate::{
    error::DecisionError,
    policy,
    services::{execute_system_reboot, format_uptime},
    state::{AppState, Decision, DecisionOutcome, Phase, ReminderState},
};

use super::responses::{ApiResponse, DelayRequest, HealthResponse, StatusResponse};

/// Current phase and record for embedding in responses.
fn view(state: &AppState) -> Result<(Phase, ReminderState), StatusCode> {
    let phase = state.phase().map_err(|e| {
        error!("Failed to read phase: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let reminder = state.reminder_record().map_err(|e| {
        error!("Failed to read reminder state: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok((phase, reminder))
}

/// Handle POST /reboot-now - confirm the reminder and reboot the host
pub async fn reboot_now_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.submit_decision(Decision::RebootNow, Utc::now()) {
        Ok(_) => {
            info!("Reboot confirmed, invoking platform reboot");
            if let Err(e) = execute_system_reboot().await {
                error!("Reboot command failed: {}", e);
                state.record_reboot_failure(e.to_string());
                let (phase, reminder) = view(&state)?;
                return Ok(Json(ApiResponse::error(
                    format!("Reboot failed: {}", e),
                    phase,
                    reminder,
                )));
            }

            // On success the host is going down; this response races the
            // reboot and may never be delivered.
            let (phase, reminder) = view(&state)?;
            Ok(Json(ApiResponse::accepted(
                "Reboot command issued".to_string(),
                phase,
                reminder,
            )))
        }
        Err(DecisionError::Lock(e)) => {
            error!("State lock failure: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
        Err(e) => {
            warn!("Reboot decision rejected: {}", e);
            let (phase, reminder) = view(&state)?;
            Ok(Json(ApiResponse::error(e.to_string(), phase, reminder)))
        }
    }
}

/// Handle POST /delay - defer the reminder by one of the legal choices
pub async fn delay_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DelayRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.submit_decision(Decision::Delay { seconds: request.seconds }, Utc::now()) {
        Ok(DecisionOutcome::Delayed {
            option,
            next_reminder_at,
        }) => {
            info!("Delay endpoint called - reminder deferred by {}", option.label);
            let (phase, reminder) = view(&state)?;
            Ok(Json(ApiResponse::accepted(
                format!(
                    "Reminder delayed by {}, next reminder at {}",
                    option.label, next_reminder_at
                ),
                phase,
                reminder,
            )))
        }
        Ok(other) => {
            error!("Unexpected outcome for a delay decision: {:?}", other);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
        Err(DecisionError::InvalidChoice { requested_seconds }) => {
            let (phase, reminder) = view(&state)?;
            let labels: Vec<&str> = policy::legal_choices(reminder.total_deferred_seconds)
                .iter()
                .map(|c| c.label)
                .collect();
            warn!(
                "Rejected delay of {}s; legal choices: {}",
                requested_seconds,
                labels.join(", ")
            );
            Ok(Json(ApiResponse::error(
                format!(
                    "A delay of {}s is not currently offered. Legal choices: {}",
                    requested_seconds,
                    labels.join(", ")
                ),
                phase,
                reminder,
            )))
        }
        Err(DecisionError::Lock(e)) => {
            error!("State lock failure: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
        Err(e) => {
            warn!("Delay decision rejected: {}", e);
            let (phase, reminder) = view(&state)?;
            Ok(Json(ApiResponse::error(e.to_string(), phase, reminder)))
        }
    }
}

/// Handle GET /status - current machine uptime, phase and delay choices
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, StatusCode> {
    let (phase, reminder) = view(&state)?;

    Ok(Json(StatusResponse {
        phase,
        machine_uptime_seconds: reminder.last_observed_uptime_seconds,
        machine_uptime: format_uptime(reminder.last_observed_uptime_seconds),
        threshold_seconds: state.threshold_seconds,
        first_threshold_crossed_at: reminder.first_threshold_crossed_at,
        total_deferred_seconds: reminder.total_deferred_seconds,
        next_reminder_at: reminder.next_reminder_at,
        choices: policy::legal_choices(reminder.total_deferred_seconds),
        last_error: state.last_error(),
        service_uptime: state.service_uptime(),
    }))
}

/// Handle GET /health - health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
