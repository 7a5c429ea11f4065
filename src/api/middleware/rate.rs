//! Login throttling.
//!
//! Sliding-window limits per client address on the login route:
//! - `LOGIN_ATTEMPTS_PER_MINUTE` attempts per minute
//! - `LOGIN_ATTEMPTS_PER_HOUR` attempts per hour

use std::net::SocketAddr;

use axum::extract::ConnectInfo;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;

/// Client key: peer IP when the server records connect info.
fn rate_key(req: &Request<axum::body::Body>) -> String {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| format!("peer:{}", addr.ip()))
        .unwrap_or_else(|| "anonymous".to_string())
}

/// Returns 429 with `Retry-After` once a client is over its window.
/// Accesses `ApiContext` from request extensions.
pub async fn limit(req: Request<axum::body::Body>, next: Next) -> Response {
    match limit_inner(req, next).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

async fn limit_inner(req: Request<axum::body::Body>, next: Next) -> Result<Response, ApiError> {
    let ctx: ApiContext = req
        .extensions()
        .get::<ApiContext>()
        .cloned()
        .ok_or(ApiError::Internal("missing API context".into()))?;

    let key = rate_key(&req);

    // MutexGuard is !Send, drop it before .await
    {
        let mut limiter = ctx
            .rate_limiter
            .lock()
            .map_err(|_| ApiError::Internal("rate limiter lock".into()))?;

        if let Err(retry_after) = limiter.check(&key) {
            tracing::warn!(client = %key, retry_after, "Login attempts throttled");
            return Err(ApiError::RateLimited { retry_after });
        }
    }

    Ok(next.run(req).await)
}
