//! Card access control: per-card permission evaluation and list filtering.

use crate::geo;
use crate::models::card::Card;
use crate::models::profile::{Role, UserProfile};

/// Decide whether a profile may see a card.
///
/// Inactive and missing profiles see nothing. Admin and Kovi see everything.
/// Chofer sees only cards assigned to their own email. Partner roles see
/// their company's cards, narrowed to their operation area when one is set;
/// a card without an origin fails the area check.
pub fn can_access_card(card: &Card, profile: &UserProfile) -> bool {
    if !profile.status.is_active() {
        return false;
    }

    if profile.role.is_privileged() {
        return true;
    }

    if profile.role == Role::Chofer {
        return card
            .chofer_email
            .as_deref()
            .is_some_and(|assigned| assigned.to_lowercase() == profile.email.to_lowercase());
    }

    // Everything past here is a company-scoped partner role; anything
    // else (Unknown included) is denied.
    if !profile.role.is_company_scoped() {
        return false;
    }

    let company_matches = card
        .responsible_company
        .as_deref()
        .is_some_and(|company| company.to_lowercase() == profile.company.to_lowercase());
    if !company_matches {
        return false;
    }

    if profile.area_of_operation.is_empty() {
        return true;
    }

    let Some(origin) = card
        .origin_location
        .as_deref()
        .filter(|origin| !origin.trim().is_empty())
    else {
        return false;
    };

    let card_city = geo::extract_city(origin);
    profile
        .area_of_operation
        .iter()
        .any(|area| geo::cities_match(&card_city, area))
}

/// Keep only the cards the profile may see, preserving input order.
///
/// This is the one place card visibility is decided for lists; every read
/// path goes through it.
pub fn filter_visible_cards(mut cards: Vec<Card>, profile: &UserProfile) -> Vec<Card> {
    cards.retain(|card| can_access_card(card, profile));
    cards
}
