//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::state::{AppState, SessionEvent};
use super::responses::{ApiResponse, HealthResponse, StatusResponse};

/// Handle POST /start - Start or resume a focus session
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.handle_event("start", SessionEvent::Start) {
        Ok(outcome) if outcome.accepted => {
            info!("Start endpoint called - session is running");
            Ok(Json(ApiResponse::accepted(
                "Focus session running".to_string(),
                outcome.snapshot,
            )))
        }
        Ok(outcome) => {
            warn!("Start endpoint called while already running");
            Ok(Json(ApiResponse::rejected(
                format!("start is not valid while {}", outcome.snapshot.status.label()),
                outcome.snapshot,
            )))
        }
        Err(e) => {
            error!("Failed to handle start event: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /pause - Pause the running session
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.handle_event("pause", SessionEvent::Pause) {
        Ok(outcome) if outcome.accepted => {
            info!("Pause endpoint called - session paused");
            Ok(Json(ApiResponse::accepted(
                "Focus session paused".to_string(),
                outcome.snapshot,
            )))
        }
        Ok(outcome) => {
            warn!("Pause endpoint called with no running session");
            Ok(Json(ApiResponse::rejected(
                format!("pause is not valid while {}", outcome.snapshot.status.label()),
                outcome.snapshot,
            )))
        }
        Err(e) => {
            error!("Failed to handle pause event: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /stop - End the session and record the deposit
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.handle_event("stop", SessionEvent::Stop) {
        Ok(outcome) if outcome.accepted => {
            info!("Stop endpoint called - session ended");
            Ok(Json(ApiResponse::accepted(
                "Focus session ended".to_string(),
                outcome.snapshot,
            )))
        }
        Ok(outcome) => {
            warn!("Stop endpoint called with no session in progress");
            Ok(Json(ApiResponse::rejected(
                format!("stop is not valid while {}", outcome.snapshot.status.label()),
                outcome.snapshot,
            )))
        }
        Err(e) => {
            error!("Failed to handle stop event: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return current session status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let session = match state.session_snapshot() {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("Failed to get session snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        session,
        session_length_minutes: state.config.session_length,
        uptime: state.get_uptime(),
        port: state.config.port,
        host: state.config.host.clone(),
        last_action,
        last_action_time,
        last_notice: state.notifier.last_notice(),
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
