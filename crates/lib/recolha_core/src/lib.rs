//! # recolha_core
//!
//! Core domain logic for Recolha: card access control, SLA classification,
//! city normalization, and auth rate limiting.

pub mod access;
pub mod auth;
pub mod cards;
pub mod directory;
pub mod geo;
pub mod migrate;
pub mod models;
pub mod phases;
pub mod ratelimit;
pub mod sla;
pub mod text;
pub mod uuid;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
