//! Request handlers.

pub mod auth;
pub mod board;
pub mod cards;
pub mod chofers;
pub mod health;
