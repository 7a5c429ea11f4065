//! Access logging middleware.
//!
//! Logs every API request with session_id, method, path and response
//! status. Runs innermost (after auth has injected AuthedSession).

use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::api::types::AuthedSession;

pub async fn log_access(req: Request<axum::body::Body>, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let session_id = req
        .extensions()
        .get::<AuthedSession>()
        .map(|s| s.session_id.to_string())
        .unwrap_or_else(|| "anonymous".to_string());

    let response = next.run(req).await;

    tracing::info!(
        target: "dispensary::access",
        %method,
        %path,
        status = response.status().as_u16(),
        %session_id,
        "API access"
    );
    response
}
