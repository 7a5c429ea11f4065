//! Recommendation lookups.
//!
//! - `GET /api/recommendations/:problem` — single lookup, fallback text when unmapped
//! - `GET /api/diagnoses` — the full mapping table

use axum::extract::Path;
use axum::{Extension, Json};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::AuthedSession;
use crate::core_state::lock_session;
use crate::models::DiagnosisMapping;
use crate::recommendation;

#[derive(Serialize)]
pub struct RecommendationResponse {
    pub problem: String,
    pub medicine: String,
}

pub async fn recommend(
    Extension(auth): Extension<AuthedSession>,
    Path(problem): Path<String>,
) -> Result<Json<RecommendationResponse>, ApiError> {
    let session = lock_session(&auth.handle)?;
    let medicine = recommendation::recommend(session.store.conn(), &problem)?;
    Ok(Json(RecommendationResponse { problem, medicine }))
}

pub async fn table(
    Extension(auth): Extension<AuthedSession>,
) -> Result<Json<Vec<DiagnosisMapping>>, ApiError> {
    let session = lock_session(&auth.handle)?;
    Ok(Json(recommendation::mapping_table(session.store.conn())?))
}
