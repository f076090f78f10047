//! The [`TeamStore`] seam: every read the bot performs against the
//! registration collection, plus the name-matching helper that defines lookup
//! semantics for all implementations.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use mongodb::bson::Document;

use crate::error::StoreError;
use crate::model::{TeamStats, TransactionEntry};

/// Read operations against the registration collection. `MongoTeamStore` is
/// the production implementation; tests substitute `MemoryTeamStore`.
#[async_trait]
pub trait TeamStore: Send + Sync {
    /// Total teams and total non-empty member names across all records.
    async fn stats(&self) -> Result<TeamStats, StoreError>;

    /// First record whose team name equals `name` up to case. Blank input
    /// short-circuits to `Ok(None)` without querying.
    async fn find_team(&self, name: &str) -> Result<Option<Document>, StoreError>;

    /// All `{team name, transaction id}` pairs, sorted by team name ascending,
    /// identifier field excluded.
    async fn transactions(&self) -> Result<Vec<TransactionEntry>, StoreError>;

    /// Writes the full collection (identifier field stripped) as CSV to
    /// `path`. `Ok(None)` when the collection is empty.
    async fn export_csv(&self, path: &Path) -> Result<Option<PathBuf>, StoreError>;
}

/// Builds the anchored, case-insensitive lookup pattern for a team name:
/// trimmed, regex-escaped so metacharacters match literally, and wrapped in
/// `^...$` so the whole field must match. Blank input yields `None`.
pub fn anchored_ci_pattern(name: &str) -> Option<String> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some(format!("^{}$", regex::escape(name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_plain_name() {
        assert_eq!(anchored_ci_pattern("Alpha").as_deref(), Some("^Alpha$"));
    }

    #[test]
    fn test_pattern_trims_whitespace() {
        assert_eq!(anchored_ci_pattern("  Alpha ").as_deref(), Some("^Alpha$"));
    }

    #[test]
    fn test_pattern_escapes_metacharacters() {
        assert_eq!(anchored_ci_pattern("Al.ha").as_deref(), Some(r"^Al\.ha$"));
        assert_eq!(
            anchored_ci_pattern("a+b (c)*").as_deref(),
            Some(r"^a\+b \(c\)\*$")
        );
    }

    #[test]
    fn test_pattern_blank_input() {
        assert_eq!(anchored_ci_pattern(""), None);
        assert_eq!(anchored_ci_pattern("   "), None);
    }
}
