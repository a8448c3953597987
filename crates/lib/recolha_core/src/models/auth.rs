//! Authentication domain models.

use serde::{Deserialize, Serialize};

use crate::models::profile::Role;

/// JWT claims embedded in access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the account email (standard JWT `sub` claim).
    pub sub: String,
    /// Display name from the directory, when present.
    pub name: Option<String>,
    /// Directory role at issue time. Card visibility is always re-checked
    /// against the live directory row, not these claims.
    pub role: Role,
    /// Directory company at issue time.
    pub company: String,
    /// Expiry (unix timestamp).
    pub exp: i64,
    /// Issued at (unix timestamp).
    pub iat: i64,
}
