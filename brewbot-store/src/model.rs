//! Derived values the bot reports: stats summary and transaction listing
//! entries, plus helpers for displaying free-form document values.
//!
//! Registration records stay as [`bson::Document`]: the collection schema is
//! not fully known upstream, so extra fields pass through opaquely.

use mongodb::bson::{Bson, Document};

/// The optional member-name fields of a registration record.
pub const MEMBER_FIELDS: [&str; 4] = ["member1Name", "member2Name", "member3Name", "member4Name"];

/// Aggregate stats over the whole collection. Recomputed per request, never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamStats {
    pub total_teams: u64,
    pub total_members: u64,
}

/// One row of the transactions listing: team name plus transaction id, with
/// the internal identifier field already excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionEntry {
    pub team_name: String,
    pub transaction_id: String,
}

impl TransactionEntry {
    /// Builds an entry from a projected document. Missing or null fields get
    /// the same placeholders the bot has always shown.
    pub fn from_doc(doc: &Document) -> Self {
        Self {
            team_name: field_or(doc, "teamName", "Unknown"),
            transaction_id: field_or(doc, "transactionId", "N/A"),
        }
    }
}

fn field_or(doc: &Document, key: &str, default: &str) -> String {
    match doc.get(key) {
        None | Some(Bson::Null) => default.to_string(),
        Some(value) => display_value(value),
    }
}

/// Number of non-null member-name fields present in a record. Client-side
/// mirror of the stats aggregation pipeline; used by the in-memory store and
/// by tests.
pub fn member_count(doc: &Document) -> u64 {
    MEMBER_FIELDS
        .iter()
        .filter(|field| matches!(doc.get(**field), Some(value) if !matches!(value, Bson::Null)))
        .count() as u64
}

/// Renders a BSON value the way a user expects to read it: strings without
/// quotes, numbers and booleans as-is, null as empty. Nested values fall back
/// to their BSON display form.
pub fn display_value(value: &Bson) -> String {
    match value {
        Bson::String(s) => s.clone(),
        Bson::Int32(n) => n.to_string(),
        Bson::Int64(n) => n.to_string(),
        Bson::Double(n) => n.to_string(),
        Bson::Boolean(b) => b.to_string(),
        Bson::Null => String::new(),
        other => other.to_string(),
    }
}
