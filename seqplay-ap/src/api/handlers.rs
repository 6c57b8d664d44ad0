//! HTTP request handlers
//!
//! Implements the REST endpoints for playback control. Handlers translate
//! HTTP requests into controller operations and session snapshots into JSON.

use crate::api::server::AppContext;
use crate::session::SessionSnapshot;
use axum::{extract::State, http::StatusCode, Json};
use seqplay_common::{Error, TrackLocator};
use serde::Serialize;
use tracing::error;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    module: String,
    version: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    status: String,
}

#[derive(Debug, Serialize)]
pub struct PlaylistResponse {
    tracks: Vec<TrackLocator>,
}

type HandlerError = (StatusCode, Json<StatusResponse>);

fn status(s: impl Into<String>) -> Json<StatusResponse> {
    Json(StatusResponse { status: s.into() })
}

/// Map controller errors onto HTTP status codes
///
/// Invalid-state rejections are client errors (the UI raced the session);
/// sink rejections surface as 409 so the UI can prompt a manual retry.
fn map_error(e: Error) -> HandlerError {
    let code = match e {
        Error::InvalidState(_) | Error::Sink(_) => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if code == StatusCode::INTERNAL_SERVER_ERROR {
        error!("Handler error: {}", e);
    }
    (code, status(format!("error: {}", e)))
}

// ============================================================================
// Health Endpoint
// ============================================================================

/// GET /health - Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        module: "seqplay-ap".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Playback Control Endpoints
// ============================================================================

/// POST /playback/initialize - Start the session (resolve track 0)
///
/// Calling again once started is a no-op and reports "already_started".
pub async fn initialize(State(ctx): State<AppContext>) -> Json<StatusResponse> {
    if ctx.controller.initialize().await {
        status("started")
    } else {
        status("already_started")
    }
}

/// POST /playback/play - Manual playback start / resume
pub async fn play(State(ctx): State<AppContext>) -> Result<Json<StatusResponse>, HandlerError> {
    ctx.controller.play().await.map_err(map_error)?;
    Ok(status("playing"))
}

/// POST /playback/pause - Manual pause (suppresses auto-advance)
pub async fn pause(State(ctx): State<AppContext>) -> Result<Json<StatusResponse>, HandlerError> {
    ctx.controller.pause().await.map_err(map_error)?;
    Ok(status("paused"))
}

/// POST /playback/finished - Inject a track-finished notification
///
/// Parity with the sink notification path; spurious calls are ignored by
/// the controller.
pub async fn track_finished(State(ctx): State<AppContext>) -> Json<StatusResponse> {
    ctx.controller.on_track_finished().await;
    status("ok")
}

// ============================================================================
// Read-Only State Endpoints
// ============================================================================

/// GET /playback/state - Session snapshot for UI rendering
pub async fn get_state(State(ctx): State<AppContext>) -> Json<SessionSnapshot> {
    let snapshot = ctx
        .state
        .snapshot(ctx.controller.playlist().len())
        .await;
    Json(snapshot)
}

/// GET /playback/playlist - The configured locator list
pub async fn get_playlist(State(ctx): State<AppContext>) -> Json<PlaylistResponse> {
    Json(PlaylistResponse {
        tracks: ctx.controller.playlist().tracks().to_vec(),
    })
}
