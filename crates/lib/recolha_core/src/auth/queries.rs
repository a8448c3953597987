//! Auth-related database queries.
//!
//! Credentials are keyed by lowercased email and only prove identity;
//! whether the account may do anything is the directory's call.

use sqlx::PgPool;

use super::AuthError;
use crate::uuid::uuidv7;

/// Fetch the stored password hash for an email.
pub async fn find_password_hash(
    pool: &PgPool,
    email: &str,
) -> Result<Option<String>, AuthError> {
    let hash = sqlx::query_scalar::<_, String>(
        "SELECT password_hash FROM user_credentials WHERE lower(email) = lower($1)",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(hash)
}

/// Check whether credentials already exist for an email.
pub async fn credentials_exist(pool: &PgPool, email: &str) -> Result<bool, AuthError> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM user_credentials WHERE lower(email) = lower($1))",
    )
    .bind(email)
    .fetch_one(pool)
    .await?;
    Ok(exists)
}

/// Store credentials for an email.
pub async fn create_credentials(
    pool: &PgPool,
    email: &str,
    password_hash: &str,
) -> Result<(), AuthError> {
    sqlx::query("INSERT INTO user_credentials (email, password_hash) VALUES (lower($1), $2)")
        .bind(email)
        .bind(password_hash)
        .execute(pool)
        .await?;
    Ok(())
}

/// Store a refresh token hash.
pub async fn store_refresh_token(
    pool: &PgPool,
    token_hash: &str,
    email: &str,
    expires_at: chrono::DateTime<chrono::Utc>,
) -> Result<(), AuthError> {
    sqlx::query(
        "INSERT INTO refresh_tokens (id, token_hash, email, expires_at) VALUES ($1, $2, lower($3), $4)",
    )
    .bind(uuidv7())
    .bind(token_hash)
    .bind(email)
    .bind(expires_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Find a valid, non-revoked, non-expired refresh token. Returns (token_id, email).
pub async fn find_valid_refresh_token(
    pool: &PgPool,
    token_hash: &str,
) -> Result<Option<(String, String)>, AuthError> {
    let row = sqlx::query_as::<_, (String, String)>(
        "SELECT rt.id::text, rt.email \
         FROM refresh_tokens rt \
         WHERE rt.token_hash = $1 \
           AND rt.revoked_at IS NULL \
           AND rt.expires_at > now()",
    )
    .bind(token_hash)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Revoke a refresh token by ID.
pub async fn revoke_refresh_token(pool: &PgPool, token_id: &str) -> Result<(), AuthError> {
    sqlx::query("UPDATE refresh_tokens SET revoked_at = now() WHERE id = $1::uuid")
        .bind(token_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Revoke a refresh token by hash.
pub async fn revoke_refresh_token_by_hash(
    pool: &PgPool,
    token_hash: &str,
) -> Result<(), AuthError> {
    sqlx::query(
        "UPDATE refresh_tokens SET revoked_at = now() \
         WHERE token_hash = $1 AND revoked_at IS NULL",
    )
    .bind(token_hash)
    .execute(pool)
    .await?;
    Ok(())
}

/// Revoke all refresh tokens for an email.
pub async fn revoke_all_refresh_tokens(pool: &PgPool, email: &str) -> Result<(), AuthError> {
    sqlx::query(
        "UPDATE refresh_tokens SET revoked_at = now() \
         WHERE lower(email) = lower($1) AND revoked_at IS NULL",
    )
    .bind(email)
    .execute(pool)
    .await?;
    Ok(())
}
