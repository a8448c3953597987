//! Authentication request handlers.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::{Extension, Json};

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::middleware::rate_limit::{ClientKey, derive_client_key};
use crate::models::{
    AckResponse, RefreshRequest, SessionUser, SignInRequest, SignOutRequest, SignUpRequest,
    TokenResponse,
};
use crate::services::auth;

/// Routes whose attempts share the credential rate limit policy.
const LIMITED_ROUTES: [&str; 2] = ["/auth/signin", "/auth/signup"];

/// `POST /auth/signin`: authenticate with email + password.
///
/// A successful sign-in clears the client's attempt budget on both
/// credential routes.
pub async fn signin_handler(
    State(state): State<AppState>,
    Extension(client_key): Extension<ClientKey>,
    Json(body): Json<SignInRequest>,
) -> AppResult<Json<TokenResponse>> {
    let resp = auth::sign_in(
        &state.pool,
        &body.email,
        &body.password,
        state.config.jwt_secret.as_bytes(),
    )
    .await?;
    for route in LIMITED_ROUTES {
        state.limiter.reset(&client_key.0, route);
    }
    Ok(Json(resp))
}

/// `POST /auth/signup`: attach credentials to a pre-approved profile.
pub async fn signup_handler(
    State(state): State<AppState>,
    Extension(client_key): Extension<ClientKey>,
    Json(body): Json<SignUpRequest>,
) -> AppResult<Json<TokenResponse>> {
    let resp = auth::sign_up(
        &state.pool,
        &body.email,
        &body.password,
        state.config.jwt_secret.as_bytes(),
    )
    .await?;
    for route in LIMITED_ROUTES {
        state.limiter.reset(&client_key.0, route);
    }
    Ok(Json(resp))
}

/// `POST /auth/refresh`: exchange a refresh token for a new token pair.
pub async fn refresh_handler(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> AppResult<Json<TokenResponse>> {
    let resp = auth::refresh(
        &state.pool,
        &body.refresh_token,
        state.config.jwt_secret.as_bytes(),
    )
    .await?;
    Ok(Json(resp))
}

/// `GET /auth/session`: current identity, re-read from the directory.
pub async fn session_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(claims)): Extension<AuthenticatedUser>,
) -> AppResult<Json<SessionUser>> {
    let resp = auth::session(&state.pool, &claims.sub).await?;
    Ok(Json(resp))
}

/// `POST /auth/signout`: revoke a refresh token. Requires authentication.
pub async fn signout_handler(
    State(state): State<AppState>,
    Json(body): Json<SignOutRequest>,
) -> AppResult<Json<AckResponse>> {
    let resp = auth::sign_out(&state.pool, body.refresh_token.as_deref()).await?;
    Ok(Json(resp))
}

/// `POST /auth/rate-limit/reset`: clear the caller's attempt budget.
///
/// Authenticated escape hatch for support; the usual path is the
/// automatic clear on successful sign-in.
pub async fn reset_rate_limit_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<AckResponse>> {
    let client_key = derive_client_key(&headers);
    for route in LIMITED_ROUTES {
        state.limiter.reset(&client_key, route);
    }
    Ok(Json(AckResponse { success: true }))
}
