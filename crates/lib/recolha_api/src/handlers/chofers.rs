//! Eligible chofer lookup for assignment.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use recolha_core::access::can_access_card;
use recolha_core::geo::extract_city;
use recolha_core::text::format_person_name;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{DriverSummary, EligibleDriversResponse};

/// `GET /cards/{id}/eligible-drivers`: active chofers of the card's
/// company whose operation area covers the card's origin city.
///
/// The caller must be able to see the card. Unlike card visibility, a
/// chofer with no operation area is never eligible.
pub async fn eligible_drivers_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(claims)): Extension<AuthenticatedUser>,
    Path(card_id): Path<String>,
) -> AppResult<Json<EligibleDriversResponse>> {
    let profile =
        recolha_core::directory::queries::find_profile(&state.pool, &claims.sub).await?;
    let card = recolha_core::cards::queries::fetch_card(&state.pool, &card_id)
        .await?
        .filter(|card| can_access_card(card, &profile))
        .ok_or_else(|| AppError::NotFound("card not found".into()))?;

    let company = card
        .responsible_company
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::Validation("card has no responsible company".into()))?;
    let origin = card
        .origin_location
        .as_deref()
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .ok_or_else(|| AppError::Validation("card has no origin location".into()))?;
    let city = extract_city(origin);

    let chofers =
        recolha_core::directory::queries::eligible_chofers(&state.pool, company, &city).await?;
    let drivers = chofers
        .into_iter()
        .map(|chofer| DriverSummary {
            name: format_person_name(chofer.name.as_deref()),
            email: chofer.email,
        })
        .collect();

    Ok(Json(EligibleDriversResponse { drivers }))
}
