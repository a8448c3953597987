//! Request and response bodies for the HTTP API.
//!
//! Wire format is camelCase JSON throughout.

use recolha_core::models::card::CardWithSla;
use recolha_core::models::profile::Role;
use serde::{Deserialize, Serialize};

/// Standard error body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct SignOutRequest {
    #[serde(rename = "refreshToken")]
    pub refresh_token: Option<String>,
}

/// Token pair issued on sign-in, sign-up, and refresh.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub token_type: String,
    pub user: SessionUser,
}

/// Directory identity attached to a session.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub email: String,
    pub name: Option<String>,
    pub role: Role,
    pub company: String,
}

#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub success: bool,
}

// ---------------------------------------------------------------------------
// Cards and board
// ---------------------------------------------------------------------------

/// Optional filters for the card list.
#[derive(Debug, Default, Deserialize)]
pub struct CardListQuery {
    /// Substring match on plate, driver name, or chofer name.
    pub search: Option<String>,
    /// SLA label filter ("No Prazo", "Em Alerta", "Atrasado").
    pub sla: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardListResponse {
    pub cards: Vec<CardWithSla>,
    pub total: usize,
}

/// Presentation-ready renderings of a card's free-text fields.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDisplay {
    pub driver_name: String,
    pub chofer_name: String,
    pub created_at: String,
    pub collection_value: String,
    pub additional_km_cost: String,
    pub contact_phone: String,
}

/// Single card with its display block.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetailResponse {
    #[serde(flatten)]
    pub card: CardWithSla,
    pub display: CardDisplay,
}

/// One board column, in workflow order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardColumn {
    pub phase: String,
    pub display_name: String,
    /// Present when cards in this phase cannot be acted on.
    pub disabled_message: Option<String>,
    pub cards: Vec<CardWithSla>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardResponse {
    pub columns: Vec<BoardColumn>,
    pub sla_counts: SlaCounts,
    pub total: usize,
}

/// Card counts per SLA tier across the visible board.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlaCounts {
    pub on_time: usize,
    pub alert: usize,
    pub overdue: usize,
}

// ---------------------------------------------------------------------------
// Chofer assignment
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct EligibleDriversResponse {
    pub drivers: Vec<DriverSummary>,
}

#[derive(Debug, Serialize)]
pub struct DriverSummary {
    pub email: String,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub db_connected: bool,
}
