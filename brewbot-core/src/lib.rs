//! # brewbot-core
//!
//! Core pieces shared by the Brewathon bot crates: [`BotError`], tracing
//! initialization, and the transport-agnostic [`Outbound`] trait with its
//! teloxide-backed implementation.

pub mod error;
pub mod logger;
pub mod outbound;

pub use error::{BotError, Result};
pub use logger::init_tracing;
pub use outbound::{main_menu, Outbound, TelegramOutbound};
