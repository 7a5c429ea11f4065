//! Bearer token authentication middleware.
//!
//! Extracts `Authorization: Bearer <token>`, resolves the session in
//! `CoreState` and injects `AuthedSession` into request extensions for
//! downstream handlers.

use axum::http::{HeaderValue, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, AuthedSession};
use crate::core_state::lock_session;
use crate::session::hash_token;

/// Pull the bearer token out of the `Authorization` header.
pub fn bearer_token(req: &Request<axum::body::Body>) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
}

/// Require a valid session token.
///
/// Accesses `ApiContext` from request extensions (injected by Extension layer).
pub async fn require_auth(req: Request<axum::body::Body>, next: Next) -> Response {
    match require_auth_inner(req, next).await {
        Ok(resp) => resp,
        Err(err) => err.into_response(),
    }
}

async fn require_auth_inner(
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let ctx: ApiContext = req
        .extensions()
        .get::<ApiContext>()
        .cloned()
        .ok_or(ApiError::Internal("missing API context".into()))?;

    let token_hash = hash_token(bearer_token(&req).ok_or(ApiError::Unauthorized)?);
    let handle = ctx.core.session(&token_hash)?;
    let session_id = lock_session(&handle)?.id; // guard dropped before any .await

    req.extensions_mut().insert(AuthedSession {
        token_hash,
        session_id,
        handle,
    });

    let mut response = next.run(req).await;
    response
        .headers_mut()
        .insert("Cache-Control", HeaderValue::from_static("no-store"));
    Ok(response)
}
