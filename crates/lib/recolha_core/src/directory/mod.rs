//! User directory lookups.
//!
//! The directory is the allowlist of people who may use the system. A
//! profile must exist here and be active before any credential is
//! honored, and its role, company, and operation area drive card
//! visibility.

pub mod queries;

use thiserror::Error;

/// Directory errors.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),
}
