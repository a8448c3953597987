//! Application error types.

use axum::{
    Json,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database unavailable: {0}")]
    DbUnavailable(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Too many requests")]
    RateLimited {
        limit: u32,
        blocked_until: Option<DateTime<Utc>>,
    },

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            AppError::RateLimited {
                limit,
                blocked_until,
            } => return rate_limited_response(limit, blocked_until),
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, "validation_error", m),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, "not_found", m),
            AppError::DbUnavailable(m) => (StatusCode::SERVICE_UNAVAILABLE, "db_unavailable", m),
            AppError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, "unauthorized", m),
            AppError::Forbidden(m) => (StatusCode::FORBIDDEN, "forbidden", m),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Internal server error".to_string(),
            ),
        };
        let body = Json(ErrorResponse {
            error: error.to_string(),
            message,
        });
        (status, body).into_response()
    }
}

/// Build the 429 response with the standard rate limit headers.
///
/// `blockedUntil` is epoch milliseconds to match what clients already
/// parse; `Retry-After` is seconds per the HTTP spec.
fn rate_limited_response(limit: u32, blocked_until: Option<DateTime<Utc>>) -> Response {
    let retry_after_secs = blocked_until
        .map(|until| {
            let remaining_ms = (until - Utc::now()).num_milliseconds().max(0) as u64;
            remaining_ms.div_ceil(1000)
        })
        .filter(|secs| *secs > 0)
        .unwrap_or(1800);

    let body = Json(serde_json::json!({
        "error": "Too many requests",
        "message": "Você excedeu o limite de tentativas. Por favor, tente novamente mais tarde.",
        "blockedUntil": blocked_until.map(|until| until.timestamp_millis()),
    }));

    let mut response = (StatusCode::TOO_MANY_REQUESTS, body).into_response();
    let headers = response.headers_mut();
    headers.insert("X-RateLimit-Limit", header_value(limit.to_string()));
    headers.insert("X-RateLimit-Remaining", HeaderValue::from_static("0"));
    if let Some(until) = blocked_until {
        headers.insert(
            "X-RateLimit-Reset",
            header_value(until.timestamp_millis().to_string()),
        );
    }
    headers.insert("Retry-After", header_value(retry_after_secs.to_string()));
    response
}

fn header_value(value: String) -> HeaderValue {
    HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static("0"))
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => AppError::NotFound("row not found".into()),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                AppError::DbUnavailable(e.to_string())
            }
            _ => AppError::Internal(e.to_string()),
        }
    }
}

impl From<recolha_core::auth::AuthError> for AppError {
    fn from(e: recolha_core::auth::AuthError) -> Self {
        match e {
            recolha_core::auth::AuthError::CredentialError => {
                AppError::Unauthorized("Invalid credentials".into())
            }
            recolha_core::auth::AuthError::TokenError(msg) => AppError::Unauthorized(msg),
            recolha_core::auth::AuthError::ValidationError(msg) => AppError::Validation(msg),
            recolha_core::auth::AuthError::DbError(e) => AppError::from(e),
            recolha_core::auth::AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<recolha_core::directory::DirectoryError> for AppError {
    fn from(e: recolha_core::directory::DirectoryError) -> Self {
        match e {
            recolha_core::directory::DirectoryError::DbError(e) => AppError::from(e),
        }
    }
}

impl From<recolha_core::cards::CardStoreError> for AppError {
    fn from(e: recolha_core::cards::CardStoreError) -> Self {
        match e {
            recolha_core::cards::CardStoreError::DbError(e) => AppError::from(e),
        }
    }
}
