//! Attempt limiting middleware for the credential endpoints.
//!
//! Clients are identified by source IP plus a short user agent digest,
//! never by the email they are trying, so probing many accounts from one
//! machine burns one budget.

use axum::http::HeaderMap;
use axum::http::header::USER_AGENT;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};

use crate::AppState;
use crate::error::AppError;

/// Key used to store the derived client key in request extensions, so
/// handlers can clear the client's budget after success.
#[derive(Debug, Clone)]
pub struct ClientKey(pub String);

/// Axum middleware: counts the attempt and rejects with 429 once the
/// client exceeds its budget for this route.
pub async fn enforce_rate_limit(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let client_key = derive_client_key(request.headers());
    let route = request.uri().path().to_string();

    let decision = state.limiter.check(&client_key, &route);
    if !decision.allowed {
        return Err(AppError::RateLimited {
            limit: state.limiter.config().max_attempts,
            blocked_until: decision.blocked_until,
        });
    }

    request.extensions_mut().insert(ClientKey(client_key));

    Ok(next.run(request).await)
}

/// Derive the rate limit key from request headers.
///
/// Uses the first `X-Forwarded-For` hop when present, falling back to
/// `X-Real-IP` and then `"unknown"`. The user agent digest keeps distinct
/// clients behind one NAT from sharing a budget.
pub fn derive_client_key(headers: &HeaderMap) -> String {
    let ip = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        })
        .unwrap_or("unknown");

    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");
    let digest = Sha256::digest(user_agent.as_bytes());
    let hex = format!("{digest:x}");

    format!("{ip}-{}", &hex[..8])
}
