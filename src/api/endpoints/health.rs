//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub active_sessions: usize,
    pub version: &'static str,
}

/// `GET /api/health` — liveness probe, unauthenticated.
pub async fn check(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        active_sessions: ctx.core.session_count(),
        version: crate::config::APP_VERSION,
    })
}
