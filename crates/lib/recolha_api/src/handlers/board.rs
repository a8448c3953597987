//! Board view handler: visible cards grouped into workflow columns.

use std::collections::HashMap;

use axum::extract::State;
use axum::{Extension, Json};
use recolha_core::access::filter_visible_cards;
use recolha_core::models::card::CardWithSla;
use recolha_core::phases::{BOARD_PHASE_ORDER, disabled_message, display_name};
use recolha_core::sla::{self, SlaTier};

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{BoardColumn, BoardResponse, SlaCounts};

/// `GET /board`: the caller's visible cards, grouped by phase in column
/// order.
///
/// Counts cover displayed cards only. Actionable phases without a board
/// column are fetched but not shown, matching the board layout.
pub async fn board_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(claims)): Extension<AuthenticatedUser>,
) -> AppResult<Json<BoardResponse>> {
    let profile =
        recolha_core::directory::queries::find_profile(&state.pool, &claims.sub).await?;
    let cards = recolha_core::cards::queries::fetch_actionable_cards(&state.pool).await?;

    let mut by_phase: HashMap<String, Vec<CardWithSla>> = HashMap::new();
    for card in filter_visible_cards(cards, &profile) {
        let annotated = sla::annotate(card);
        by_phase
            .entry(annotated.card.phase.clone())
            .or_default()
            .push(annotated);
    }

    let mut sla_counts = SlaCounts::default();
    let mut columns = Vec::with_capacity(BOARD_PHASE_ORDER.len());
    for phase in BOARD_PHASE_ORDER {
        let cards = by_phase.remove(phase).unwrap_or_default();
        for card in &cards {
            match card.sla_text {
                SlaTier::OnTime => sla_counts.on_time += 1,
                SlaTier::Alert => sla_counts.alert += 1,
                SlaTier::Overdue => sla_counts.overdue += 1,
            }
        }
        columns.push(BoardColumn {
            phase: phase.to_string(),
            display_name: display_name(phase).to_string(),
            disabled_message: disabled_message(phase).map(str::to_string),
            cards,
        });
    }

    let total = columns.iter().map(|column| column.cards.len()).sum();
    Ok(Json(BoardResponse {
        columns,
        sla_counts,
        total,
    }))
}
