//! Database access layer for the Brewathon registration collection.
//!
//! ## Modules
//!
//! - [`error`] – classified store errors
//! - [`model`] – TeamStats, TransactionEntry, document value helpers
//! - [`store`] – TeamStore trait and name-matching helpers
//! - [`mongo`] – MongoTeamStore (MongoDB driver)
//! - [`memory`] – MemoryTeamStore (in-memory substitute for tests)
//! - [`export`] – deterministic CSV rendering

mod error;
mod export;
mod memory;
mod model;
mod mongo;
mod store;

pub use error::StoreError;
pub use export::{csv_columns, render_csv};
pub use memory::MemoryTeamStore;
pub use model::{display_value, member_count, TeamStats, TransactionEntry, MEMBER_FIELDS};
pub use mongo::MongoTeamStore;
pub use store::{anchored_ci_pattern, TeamStore};

pub use mongodb::bson;
pub use mongodb::Client;
