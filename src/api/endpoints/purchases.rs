//! Checkout endpoints.
//!
//! - `POST /api/purchases` — buy
//! - `GET /api/purchases` — purchase history
//! - `GET /api/cart` — this session's cart

use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::AuthedSession;
use crate::checkout;
use crate::core_state::lock_session;
use crate::models::Purchase;
use crate::session::SessionContext;

#[derive(Deserialize)]
pub struct BuyRequest {
    pub medicine_name: String,
    pub quantity: u32,
}

#[derive(Serialize)]
pub struct CartResponse {
    pub items: Vec<Purchase>,
    pub total: f64,
}

pub async fn buy(
    Extension(auth): Extension<AuthedSession>,
    Json(request): Json<BuyRequest>,
) -> Result<(StatusCode, Json<Purchase>), ApiError> {
    let mut guard = lock_session(&auth.handle)?;
    let SessionContext { store, cart, .. } = &mut *guard;
    let purchase = checkout::buy(store, cart, &request.medicine_name, request.quantity)?;
    Ok((StatusCode::CREATED, Json(purchase)))
}

pub async fn history(
    Extension(auth): Extension<AuthedSession>,
) -> Result<Json<Vec<Purchase>>, ApiError> {
    let session = lock_session(&auth.handle)?;
    Ok(Json(checkout::purchase_history(session.store.conn())?))
}

pub async fn cart(Extension(auth): Extension<AuthedSession>) -> Result<Json<CartResponse>, ApiError> {
    let session = lock_session(&auth.handle)?;
    Ok(Json(CartResponse {
        items: session.cart.items().to_vec(),
        total: session.cart.total(),
    }))
}
