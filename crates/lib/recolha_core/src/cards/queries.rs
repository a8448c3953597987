//! Card database queries.

use sqlx::PgPool;

use super::CardStoreError;
use crate::models::card::Card;
use crate::phases::ACTIONABLE_PHASES;

const CARD_COLUMNS: &str = "id, plate, driver_name, chofer_name, phase, created_at, \
     chofer_email, responsible_company, vehicle_model, contact_phone, secondary_phone, \
     client_email, registered_address, collection_address, map_link, origin_location, \
     collection_value, additional_km_cost, public_url";

/// Fetch every card in an actionable phase.
///
/// Cards without a plate or id are upstream artifacts and are dropped at
/// the query.
pub async fn fetch_actionable_cards(pool: &PgPool) -> Result<Vec<Card>, CardStoreError> {
    let phases: Vec<String> = ACTIONABLE_PHASES.iter().map(|p| p.to_string()).collect();
    let cards = sqlx::query_as::<_, Card>(&format!(
        "SELECT {CARD_COLUMNS} FROM cards \
         WHERE phase = ANY($1) \
           AND plate IS NOT NULL AND plate <> '' \
           AND id <> ''",
    ))
    .bind(phases)
    .fetch_all(pool)
    .await?;
    Ok(cards)
}

/// Fetch a single card by id, regardless of phase.
pub async fn fetch_card(pool: &PgPool, card_id: &str) -> Result<Option<Card>, CardStoreError> {
    let card = sqlx::query_as::<_, Card>(&format!(
        "SELECT {CARD_COLUMNS} FROM cards \
         WHERE id = $1 AND plate IS NOT NULL AND plate <> ''",
    ))
    .bind(card_id)
    .fetch_optional(pool)
    .await?;
    Ok(card)
}
