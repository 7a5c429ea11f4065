//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`.
//!
//! Middleware stack (outermost → innermost):
//! 1. Rate limiter (login only) → 2. Auth validator → 3. Audit logger

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the API router.
///
/// Middleware uses `Extension<ApiContext>` (injected as the outermost layer).
/// Protected handlers take `Extension<AuthedSession>` from the auth
/// middleware; health, login and logout also take `State<ApiContext>`
/// (provided via `with_state`).
pub fn api_router(core: Arc<CoreState>) -> Router {
    api_router_with_ctx(ApiContext::new(core))
}

/// Build the router around an existing context (custom rate limits in tests).
pub(crate) fn api_router_with_ctx(ctx: ApiContext) -> Router {

    // Protected routes — require a session token
    //
    // Layers are applied from bottom (innermost) to top (outermost):
    //   Extension (outermost) → Auth → Audit (innermost) → Handler
    //
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let protected = Router::new()
        .route("/auth/logout", post(endpoints::auth::logout))
        .route("/dashboard", get(endpoints::dashboard::view))
        .route(
            "/medicines",
            get(endpoints::medicines::list).post(endpoints::medicines::add),
        )
        .route(
            "/medicines/:name",
            put(endpoints::medicines::update).delete(endpoints::medicines::delete),
        )
        .route(
            "/purchases",
            get(endpoints::purchases::history).post(endpoints::purchases::buy),
        )
        .route("/cart", get(endpoints::purchases::cart))
        .route(
            "/patients",
            get(endpoints::patients::list).post(endpoints::patients::add),
        )
        .route(
            "/recommendations/:problem",
            get(endpoints::recommendations::recommend),
        )
        .route("/diagnoses", get(endpoints::recommendations::table))
        .with_state(ctx.clone())
        // Middleware stack (innermost first, outermost last):
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        .layer(axum::middleware::from_fn(middleware::auth::require_auth))
        // Extension must be outermost so middleware can extract ApiContext
        .layer(axum::Extension(ctx.clone()));

    // Unprotected routes (no auth required)
    let unprotected = Router::new()
        .route("/health", get(endpoints::health::check))
        .route(
            "/auth/login",
            post(endpoints::auth::login)
                .layer(axum::middleware::from_fn(middleware::rate::limit)),
        )
        .with_state(ctx.clone())
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        .layer(axum::Extension(ctx));

    Router::new()
        .nest("/api", protected)
        .nest("/api", unprotected)
}
