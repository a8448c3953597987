//! Card storage access.
//!
//! Cards mirror the upstream collection pipeline. This module only reads
//! them; writes happen out of band through the sync that populates the
//! table.

pub mod queries;

use thiserror::Error;

/// Card store errors.
#[derive(Debug, Error)]
pub enum CardStoreError {
    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),
}
