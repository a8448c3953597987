//! Authentication service: sign-in / sign-up flows delegating to
//! `recolha_core::auth`.
//!
//! Credentials alone are never enough. Every flow that issues tokens
//! re-reads the directory and refuses unregistered or deactivated
//! profiles with the exact message the web client shows.

use chrono::{Duration, Utc};
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use recolha_core::auth::jwt::ACCESS_TOKEN_EXPIRY_SECS;
use recolha_core::directory::queries::find_profile;
use recolha_core::models::profile::{ProfileStatus, UserProfile};
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{AckResponse, SessionUser, TokenResponse};

/// Refresh token lifetime: 30 days.
const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 30;

/// Denial shown when the email has no directory row.
pub const MSG_NOT_REGISTERED: &str =
    "Usuário não cadastrado, consulte o administrador do sistema";

/// Denial shown when the directory row is deactivated.
pub const MSG_DEACTIVATED: &str =
    "Usuário desativado, consulte o administrador do sistema";

// ---------------------------------------------------------------------------
// Password hashing (delegate to recolha_core)
// ---------------------------------------------------------------------------

/// Hash a password with bcrypt (cost 10).
pub fn hash_password(password: &str) -> AppResult<String> {
    recolha_core::auth::password::hash_password(password).map_err(AppError::from)
}

/// Verify a password against a bcrypt hash.
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    recolha_core::auth::password::verify_password(password, hash).map_err(AppError::from)
}

// ---------------------------------------------------------------------------
// Refresh token generation & hashing
// ---------------------------------------------------------------------------

/// Generate a cryptographically random refresh token (64 alphanumeric chars).
fn generate_refresh_token() -> String {
    rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

/// SHA-256 hash a refresh token for storage.
fn hash_refresh_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Directory gate
// ---------------------------------------------------------------------------

/// Fetch the directory profile for `email` and require it to be active.
pub async fn require_active_profile(pool: &PgPool, email: &str) -> AppResult<UserProfile> {
    let profile = find_profile(pool, email).await?;
    match profile.status {
        ProfileStatus::Active => Ok(profile),
        ProfileStatus::NotFound => Err(AppError::Unauthorized(MSG_NOT_REGISTERED.into())),
        ProfileStatus::Inactive => Err(AppError::Unauthorized(MSG_DEACTIVATED.into())),
    }
}

// ---------------------------------------------------------------------------
// Token issuance
// ---------------------------------------------------------------------------

fn session_user(profile: &UserProfile) -> SessionUser {
    SessionUser {
        email: profile.email.clone(),
        name: profile.name.clone(),
        role: profile.role,
        company: profile.company.clone(),
    }
}

/// Issue a fresh access + refresh token pair for an active profile.
async fn issue_tokens(
    pool: &PgPool,
    profile: &UserProfile,
    jwt_secret: &[u8],
) -> AppResult<TokenResponse> {
    let access_token = recolha_core::auth::jwt::generate_access_token(profile, jwt_secret)?;
    let refresh_token = generate_refresh_token();
    let token_hash = hash_refresh_token(&refresh_token);

    let expires_at = Utc::now() + Duration::days(REFRESH_TOKEN_EXPIRY_DAYS);
    recolha_core::auth::queries::store_refresh_token(pool, &token_hash, &profile.email, expires_at)
        .await?;

    Ok(TokenResponse {
        access_token,
        refresh_token,
        expires_in: ACCESS_TOKEN_EXPIRY_SECS,
        token_type: "Bearer".to_string(),
        user: session_user(profile),
    })
}

// ---------------------------------------------------------------------------
// Public auth operations
// ---------------------------------------------------------------------------

/// Authenticate with email + password.
pub async fn sign_in(
    pool: &PgPool,
    email: &str,
    password: &str,
    jwt_secret: &[u8],
) -> AppResult<TokenResponse> {
    let pw_hash = match recolha_core::auth::queries::find_password_hash(pool, email).await? {
        // Generic error for unknown email
        None => return Err(AppError::Unauthorized("Invalid credentials".into())),
        Some(h) => h,
    };

    // Generic error for wrong password
    if !verify_password(password, &pw_hash)? {
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    // Valid credentials still require an active directory profile.
    let profile = require_active_profile(pool, email).await?;

    issue_tokens(pool, &profile, jwt_secret).await
}

/// Attach credentials to a pre-approved directory profile.
pub async fn sign_up(
    pool: &PgPool,
    email: &str,
    password: &str,
    jwt_secret: &[u8],
) -> AppResult<TokenResponse> {
    if password.len() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters".into(),
        ));
    }

    // Only provisioned emails may register at all.
    let profile = require_active_profile(pool, email).await?;

    if recolha_core::auth::queries::credentials_exist(pool, email).await? {
        return Err(AppError::Validation("Email already registered".into()));
    }

    let pw_hash = hash_password(password)?;
    recolha_core::auth::queries::create_credentials(pool, email, &pw_hash).await?;
    info!(email, "credentials registered for pre-approved profile");

    issue_tokens(pool, &profile, jwt_secret).await
}

/// Refresh an access token using a refresh token (single-use rotation).
pub async fn refresh(
    pool: &PgPool,
    refresh_token: &str,
    jwt_secret: &[u8],
) -> AppResult<TokenResponse> {
    let token_hash = hash_refresh_token(refresh_token);

    let row = recolha_core::auth::queries::find_valid_refresh_token(pool, &token_hash).await?;
    let (token_id, email) = match row {
        None => return Err(AppError::Unauthorized("Invalid refresh token".into())),
        Some(r) => r,
    };

    // Rotate: the presented token is spent whether or not issuance succeeds.
    recolha_core::auth::queries::revoke_refresh_token(pool, &token_id).await?;

    // Deactivation cuts refresh off too.
    let profile = require_active_profile(pool, &email).await?;

    issue_tokens(pool, &profile, jwt_secret).await
}

/// Sign out: revoke a specific refresh token.
pub async fn sign_out(pool: &PgPool, refresh_token: Option<&str>) -> AppResult<AckResponse> {
    if let Some(token) = refresh_token {
        let token_hash = hash_refresh_token(token);
        recolha_core::auth::queries::revoke_refresh_token_by_hash(pool, &token_hash).await?;
    }
    Ok(AckResponse { success: true })
}

/// Current session identity, re-read from the directory.
pub async fn session(pool: &PgPool, email: &str) -> AppResult<SessionUser> {
    let profile = require_active_profile(pool, email).await?;
    Ok(session_user(&profile))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_tokens_are_long_and_alphanumeric() {
        let token = generate_refresh_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(token, generate_refresh_token());
    }

    #[test]
    fn token_hash_is_deterministic_hex() {
        let hash = hash_refresh_token("token-a");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(hash, hash_refresh_token("token-a"));
        assert_ne!(hash, hash_refresh_token("token-b"));
    }
}
