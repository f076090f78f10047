//! # brewbot
//!
//! The Brewathon registration bot: env config, response formatting, the
//! command dispatcher, and the axum webhook receiver. `main.rs` wires these
//! together with the teloxide transport and the MongoDB store.

pub mod config;
pub mod dispatch;
pub mod format;
pub mod webhook;
