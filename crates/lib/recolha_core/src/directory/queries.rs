//! Directory database queries.

use sqlx::PgPool;

use super::DirectoryError;
use crate::geo;
use crate::models::profile::{ProfileStatus, Role, UserProfile};

type ProfileRow = (
    String,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<Vec<String>>,
);

fn profile_from_row(row: ProfileRow) -> UserProfile {
    let (email, name, role, status, company, operation_area) = row;
    UserProfile {
        email,
        name,
        role: Role::parse(role.as_deref().unwrap_or_default()),
        company: company.unwrap_or_default(),
        area_of_operation: operation_area.unwrap_or_default(),
        status: ProfileStatus::parse(status.as_deref().unwrap_or_default()),
    }
}

/// Look up a profile by email, case-insensitively.
///
/// An unknown email yields a not-found profile rather than an error, so
/// callers apply one denial path for both missing and inactive users.
pub async fn find_profile(pool: &PgPool, email: &str) -> Result<UserProfile, DirectoryError> {
    let row = sqlx::query_as::<_, ProfileRow>(
        "SELECT email, name, role, status, company, operation_area \
         FROM pre_approved_users WHERE lower(email) = lower($1)",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(match row {
        Some(row) => profile_from_row(row),
        None => UserProfile::not_found(email),
    })
}

/// Active chofers of `company` whose operation area covers `city`.
///
/// A chofer with an empty operation area covers nothing and is never
/// eligible.
pub async fn eligible_chofers(
    pool: &PgPool,
    company: &str,
    city: &str,
) -> Result<Vec<UserProfile>, DirectoryError> {
    let rows = sqlx::query_as::<_, ProfileRow>(
        "SELECT email, name, role, status, company, operation_area \
         FROM pre_approved_users \
         WHERE lower(company) = lower($1) \
           AND lower(role) = $2 \
           AND lower(status) = 'active' \
         ORDER BY name",
    )
    .bind(company)
    .bind(Role::Chofer.as_str())
    .fetch_all(pool)
    .await?;
    Ok(rows
        .into_iter()
        .map(profile_from_row)
        .filter(|profile| {
            profile
                .area_of_operation
                .iter()
                .any(|area| geo::cities_match(city, area))
        })
        .collect())
}
