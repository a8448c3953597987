//! # recolha_api
//!
//! HTTP API library for Recolha.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use recolha_core::ratelimit::RateLimiter;
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::handlers::{auth, board, cards, chofers, health};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool.
    pub pool: PgPool,
    /// API configuration.
    pub config: ApiConfig,
    /// Attempt limiter for the credential endpoints.
    pub limiter: Arc<RateLimiter>,
}

/// Run embedded database migrations.
///
/// Delegates to `recolha_core::migrate::migrate()` which owns the migration files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    recolha_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new()
        .route("/api/health", get(health::health_handler))
        .route("/auth/refresh", post(auth::refresh_handler));

    // Credential routes (attempt-limited, no auth yet)
    let limited = Router::new()
        .route("/auth/signin", post(auth::signin_handler))
        .route("/auth/signup", post(auth::signup_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit::enforce_rate_limit,
        ));

    // Protected routes (require auth)
    let protected = Router::new()
        .route("/auth/session", get(auth::session_handler))
        .route("/auth/signout", post(auth::signout_handler))
        .route(
            "/auth/rate-limit/reset",
            post(auth::reset_rate_limit_handler),
        )
        .route("/cards", get(cards::list_cards_handler))
        .route("/cards/{id}", get(cards::get_card_handler))
        .route(
            "/cards/{id}/eligible-drivers",
            get(chofers::eligible_drivers_handler),
        )
        .route("/board", get(board::board_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(limited)
        .merge(protected)
        .layer(cors)
        .with_state(state)
}
