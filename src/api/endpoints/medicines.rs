//! Catalog endpoints.
//!
//! - `GET /api/medicines` — catalog table
//! - `POST /api/medicines` — add
//! - `PUT /api/medicines/:name` — update price and quantity
//! - `DELETE /api/medicines/:name` — delete

use axum::extract::Path;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::AuthedSession;
use crate::catalog;
use crate::core_state::lock_session;
use crate::models::Medicine;

#[derive(Deserialize)]
pub struct AddMedicineRequest {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

#[derive(Deserialize)]
pub struct UpdateMedicineRequest {
    pub price: f64,
    pub quantity: u32,
}

pub async fn list(
    Extension(auth): Extension<AuthedSession>,
) -> Result<Json<Vec<Medicine>>, ApiError> {
    let session = lock_session(&auth.handle)?;
    Ok(Json(catalog::list(session.store.conn())?))
}

pub async fn add(
    Extension(auth): Extension<AuthedSession>,
    Json(request): Json<AddMedicineRequest>,
) -> Result<(StatusCode, Json<Medicine>), ApiError> {
    let session = lock_session(&auth.handle)?;
    let medicine = catalog::add(
        session.store.conn(),
        &request.name,
        request.price,
        request.quantity,
    )?;
    Ok((StatusCode::CREATED, Json(medicine)))
}

pub async fn update(
    Extension(auth): Extension<AuthedSession>,
    Path(name): Path<String>,
    Json(request): Json<UpdateMedicineRequest>,
) -> Result<Json<Medicine>, ApiError> {
    let session = lock_session(&auth.handle)?;
    let medicine = catalog::update(session.store.conn(), &name, request.price, request.quantity)?;
    Ok(Json(medicine))
}

pub async fn delete(
    Extension(auth): Extension<AuthedSession>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    let session = lock_session(&auth.handle)?;
    catalog::delete(session.store.conn(), &name)?;
    Ok(StatusCode::NO_CONTENT)
}
