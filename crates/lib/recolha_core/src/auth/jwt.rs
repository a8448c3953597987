//! JWT token generation and verification.

use std::path::PathBuf;

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use tracing::info;

use super::AuthError;
use crate::models::auth::TokenClaims;
use crate::models::profile::UserProfile;

/// Access token lifetime: 15 minutes.
pub const ACCESS_TOKEN_EXPIRY_SECS: i64 = 15 * 60;

/// Generate a signed JWT access token (HS256, 15 min expiry).
///
/// The claims carry the profile's role and company as hints only; every
/// card read re-checks the live directory.
pub fn generate_access_token(profile: &UserProfile, secret: &[u8]) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = TokenClaims {
        sub: profile.email.clone(),
        name: profile.name.clone(),
        role: profile.role,
        company: profile.company.clone(),
        exp: (now + Duration::seconds(ACCESS_TOKEN_EXPIRY_SECS)).timestamp(),
        iat: now.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::TokenError(format!("jwt encode: {e}")))
}

/// Verify a JWT access token, returning the claims on success.
pub fn verify_access_token(token: &str, secret: &[u8]) -> Option<TokenClaims> {
    let key = DecodingKey::from_secret(secret);
    let mut validation = Validation::default();
    validation.validate_exp = true;
    decode::<TokenClaims>(token, &key, &validation)
        .ok()
        .map(|data| data.claims)
}

/// Resolve the JWT secret: env var `JWT_SECRET` → `AUTH_SECRET` → persisted file.
pub fn resolve_jwt_secret() -> String {
    if let Ok(secret) = std::env::var("JWT_SECRET")
        && !secret.is_empty()
    {
        return secret;
    }
    if let Ok(secret) = std::env::var("AUTH_SECRET")
        && !secret.is_empty()
    {
        return secret;
    }
    // Generate and persist
    let secret_path = jwt_secret_path();
    if let Ok(existing) = std::fs::read_to_string(&secret_path) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    let secret: String = rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect();
    if let Some(parent) = secret_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let _ = std::fs::write(&secret_path, &secret);
    info!(path = %secret_path.display(), "generated new JWT secret");
    secret
}

/// Path to the persisted JWT secret file.
fn jwt_secret_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("recolha")
        .join("jwt-secret")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::{ProfileStatus, Role};

    fn profile() -> UserProfile {
        UserProfile {
            email: "ana@ativa.com".to_string(),
            name: Some("Ana Souza".to_string()),
            role: Role::Ativa,
            company: "Ativa".to_string(),
            area_of_operation: vec!["São Paulo".to_string()],
            status: ProfileStatus::Active,
        }
    }

    #[test]
    fn token_round_trips_its_claims() {
        let token = generate_access_token(&profile(), b"secret").expect("token");
        let claims = verify_access_token(&token, b"secret").expect("claims");
        assert_eq!(claims.sub, "ana@ativa.com");
        assert_eq!(claims.name.as_deref(), Some("Ana Souza"));
        assert_eq!(claims.role, Role::Ativa);
        assert_eq!(claims.company, "Ativa");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = generate_access_token(&profile(), b"secret").expect("token");
        assert!(verify_access_token(&token, b"other-secret").is_none());
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: "ana@ativa.com".to_string(),
            name: None,
            role: Role::Ativa,
            company: "Ativa".to_string(),
            exp: (now - Duration::hours(2)).timestamp(),
            iat: (now - Duration::hours(3)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .expect("token");
        assert!(verify_access_token(&token, b"secret").is_none());
    }
}
