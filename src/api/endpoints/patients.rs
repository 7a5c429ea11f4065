//! Patient registry endpoints.

use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::AuthedSession;
use crate::core_state::lock_session;
use crate::models::{Patient, Problem};
use crate::registry::{self, Registration};

#[derive(Deserialize)]
pub struct AddPatientRequest {
    pub name: String,
    pub age: u32,
    pub problem: Problem,
}

/// `POST /api/patients` — register and return the suggested medicine.
pub async fn add(
    Extension(auth): Extension<AuthedSession>,
    Json(request): Json<AddPatientRequest>,
) -> Result<(StatusCode, Json<Registration>), ApiError> {
    let session = lock_session(&auth.handle)?;
    let registration =
        registry::add_patient(session.store.conn(), &request.name, request.age, request.problem)?;
    Ok((StatusCode::CREATED, Json(registration)))
}

pub async fn list(Extension(auth): Extension<AuthedSession>) -> Result<Json<Vec<Patient>>, ApiError> {
    let session = lock_session(&auth.handle)?;
    Ok(Json(registry::list_patients(session.store.conn())?))
}
