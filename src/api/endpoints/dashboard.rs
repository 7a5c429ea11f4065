//! Main view: the four read-only tables in one payload.

use axum::{Extension, Json};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::AuthedSession;
use crate::core_state::lock_session;
use crate::models::{Medicine, Patient, Purchase};
use crate::{catalog, checkout, registry};

#[derive(Serialize)]
pub struct DashboardResponse {
    pub operator: String,
    pub medicines: Vec<Medicine>,
    pub purchases: Vec<Purchase>,
    pub cart: Vec<Purchase>,
    pub cart_total: f64,
    pub patients: Vec<Patient>,
}

/// `GET /api/dashboard`
pub async fn view(
    Extension(auth): Extension<AuthedSession>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let session = lock_session(&auth.handle)?;
    let conn = session.store.conn();

    Ok(Json(DashboardResponse {
        operator: session.operator.clone(),
        medicines: catalog::list(conn)?,
        purchases: checkout::purchase_history(conn)?,
        cart: session.cart.items().to_vec(),
        cart_total: session.cart.total(),
        patients: registry::list_patients(conn)?,
    }))
}
