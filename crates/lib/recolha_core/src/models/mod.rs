//! Domain models.

pub mod auth;
pub mod card;
pub mod profile;
