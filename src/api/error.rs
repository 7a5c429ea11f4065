//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::core_state::CoreError;
use crate::db::DatabaseError;
use crate::registry::RegistryError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication required")]
    Unauthorized,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Duplicate: {0}")]
    Duplicate(String),
    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Rate limit exceeded")]
    RateLimited { retry_after: u64 },
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let retry_after = match &self {
            ApiError::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        };

        let (status, code, message) = match self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "AUTH_REQUIRED",
                "Authentication required".to_string(),
            ),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Invalid username or password".to_string(),
            ),
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail),
            ApiError::Duplicate(detail) => (StatusCode::CONFLICT, "DUPLICATE", detail),
            ApiError::InsufficientStock(detail) => {
                (StatusCode::CONFLICT, "INSUFFICIENT_STOCK", detail)
            }
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail),
            ApiError::RateLimited { retry_after } => (
                StatusCode::TOO_MANY_REQUESTS,
                "RATE_LIMITED",
                format!("Too many login attempts. Retry after {retry_after}s"),
            ),
            ApiError::StoreUnavailable(detail) => {
                tracing::error!(detail, "Store unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "STORE_UNAVAILABLE",
                    "Connection to the data store failed".to_string(),
                )
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };
        let mut response = (status, Json(body)).into_response();
        if let Some(secs) = retry_after {
            if let Ok(val) = axum::http::HeaderValue::from_str(&secs.to_string()) {
                response.headers_mut().insert("Retry-After", val);
            }
        }
        response
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidCredentials => ApiError::InvalidCredentials,
            CoreError::NoActiveSession => ApiError::Unauthorized,
            CoreError::LockPoisoned => ApiError::Internal("lock poisoned".into()),
            CoreError::Gateway(e) => ApiError::StoreUnavailable(e.to_string()),
            CoreError::Database(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Duplicate(_) => ApiError::Duplicate(err.to_string()),
            CatalogError::NotFound(_) => ApiError::NotFound(err.to_string()),
            CatalogError::InvalidPrice(_) => ApiError::BadRequest(err.to_string()),
            CatalogError::Database(e) => e.into(),
        }
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::InsufficientStock { .. } => ApiError::InsufficientStock(err.to_string()),
            CheckoutError::InvalidQuantity => ApiError::BadRequest(err.to_string()),
            CheckoutError::Database(e) => e.into(),
        }
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::InvalidAge(_) => ApiError::BadRequest(err.to_string()),
            RegistryError::Database(e) => e.into(),
        }
    }
}
