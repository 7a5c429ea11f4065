//! Login gate.
//!
//! `POST /api/auth/login` — Unprotected: exchange credentials for a bearer token
//! `POST /api/auth/logout` — Protected: end the session, discarding its cart

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, AuthedSession};
use crate::session::SessionSummary;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub session: SessionSummary,
}

pub async fn login(
    State(ctx): State<ApiContext>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    // Store connect + PBKDF2 are blocking; keep them off the async workers.
    let core = ctx.core.clone();
    let grant = tokio::task::spawn_blocking(move || core.login(&request.username, &request.password))
        .await
        .map_err(|e| ApiError::Internal(format!("login task: {e}")))??;

    Ok(Json(LoginResponse {
        token: grant.token,
        session: grant.summary,
    }))
}

pub async fn logout(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthedSession>,
) -> Result<StatusCode, ApiError> {
    ctx.core.logout(&auth.token_hash)?;
    Ok(StatusCode::NO_CONTENT)
}
