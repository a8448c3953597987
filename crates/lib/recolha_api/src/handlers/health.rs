//! Health endpoint.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::error::AppResult;
use crate::models::HealthResponse;

/// `GET /api/health`: liveness plus DB connectivity.
pub async fn health_handler(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    // Check PostgreSQL connectivity.
    let db_connected = sqlx::query("SELECT 1").execute(&state.pool).await.is_ok();

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: recolha_core::version().to_string(),
        db_connected,
    }))
}
