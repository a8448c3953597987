//! Card listing and detail handlers.

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use recolha_core::access::{can_access_card, filter_visible_cards};
use recolha_core::models::card::{Card, CardWithSla};
use recolha_core::sla;
use recolha_core::text::{format_display_date, format_person_name, or_na};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{CardDetailResponse, CardDisplay, CardListQuery, CardListResponse};

/// `GET /cards`: actionable cards visible to the caller, SLA-annotated.
///
/// `search` and `sla` filters apply after the permission filter, so the
/// response never widens beyond what the caller may see.
pub async fn list_cards_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(claims)): Extension<AuthenticatedUser>,
    Query(query): Query<CardListQuery>,
) -> AppResult<Json<CardListResponse>> {
    let profile =
        recolha_core::directory::queries::find_profile(&state.pool, &claims.sub).await?;
    let cards = recolha_core::cards::queries::fetch_actionable_cards(&state.pool).await?;

    let mut cards: Vec<CardWithSla> = filter_visible_cards(cards, &profile)
        .into_iter()
        .map(sla::annotate)
        .collect();

    if let Some(search) = normalized(query.search.as_deref()) {
        let needle = search.to_lowercase();
        cards.retain(|card| matches_search(&card.card, &needle));
    }
    if let Some(tier) = normalized(query.sla.as_deref()) {
        cards.retain(|card| card.sla_text.label() == tier);
    }

    let total = cards.len();
    Ok(Json(CardListResponse { cards, total }))
}

/// `GET /cards/{id}`: one card, when the caller may see it.
///
/// Inaccessible and nonexistent cards are indistinguishable.
pub async fn get_card_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(claims)): Extension<AuthenticatedUser>,
    Path(card_id): Path<String>,
) -> AppResult<Json<CardDetailResponse>> {
    let profile =
        recolha_core::directory::queries::find_profile(&state.pool, &claims.sub).await?;
    let card = recolha_core::cards::queries::fetch_card(&state.pool, &card_id)
        .await?
        .filter(|card| can_access_card(card, &profile))
        .ok_or_else(|| AppError::NotFound("card not found".into()))?;

    let card = sla::annotate(card);
    let display = card_display(&card.card);
    Ok(Json(CardDetailResponse { card, display }))
}

fn card_display(card: &Card) -> CardDisplay {
    CardDisplay {
        driver_name: format_person_name(card.driver_name.as_deref()),
        chofer_name: format_person_name(card.chofer_name.as_deref()),
        created_at: format_display_date(card.created_at.as_deref()),
        collection_value: or_na(card.collection_value.as_deref()),
        additional_km_cost: or_na(card.additional_km_cost.as_deref()),
        contact_phone: or_na(card.contact_phone.as_deref()),
    }
}

fn normalized(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn matches_search(card: &Card, needle: &str) -> bool {
    let haystacks = [
        Some(card.plate.as_str()),
        card.driver_name.as_deref(),
        card.chofer_name.as_deref(),
    ];
    haystacks
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
}
