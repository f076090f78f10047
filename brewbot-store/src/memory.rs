//! In-memory [`TeamStore`] over a fixed set of documents.
//!
//! Mirrors the MongoDB implementation's semantics client-side (anchored
//! case-insensitive match, member presence counting, sorted projection) so
//! dispatcher and webhook tests can run without a database.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use mongodb::bson::Document;
use regex::Regex;

use crate::error::StoreError;
use crate::export::render_csv;
use crate::model::{member_count, TeamStats, TransactionEntry};
use crate::store::{anchored_ci_pattern, TeamStore};

pub struct MemoryTeamStore {
    docs: Vec<Document>,
}

impl MemoryTeamStore {
    pub fn new(docs: Vec<Document>) -> Self {
        Self { docs }
    }

    pub fn empty() -> Self {
        Self { docs: Vec::new() }
    }
}

#[async_trait]
impl TeamStore for MemoryTeamStore {
    async fn stats(&self) -> Result<TeamStats, StoreError> {
        Ok(TeamStats {
            total_teams: self.docs.len() as u64,
            total_members: self.docs.iter().map(member_count).sum(),
        })
    }

    async fn find_team(&self, name: &str) -> Result<Option<Document>, StoreError> {
        let Some(pattern) = anchored_ci_pattern(name) else {
            return Ok(None);
        };
        let matcher =
            Regex::new(&format!("(?i){pattern}")).map_err(|e| StoreError::Query(e.to_string()))?;
        Ok(self
            .docs
            .iter()
            .find(|doc| {
                doc.get_str("teamName")
                    .map(|n| matcher.is_match(n))
                    .unwrap_or(false)
            })
            .cloned())
    }

    async fn transactions(&self) -> Result<Vec<TransactionEntry>, StoreError> {
        let mut entries: Vec<TransactionEntry> =
            self.docs.iter().map(TransactionEntry::from_doc).collect();
        entries.sort_by(|a, b| a.team_name.cmp(&b.team_name));
        Ok(entries)
    }

    async fn export_csv(&self, path: &Path) -> Result<Option<PathBuf>, StoreError> {
        if self.docs.is_empty() {
            return Ok(None);
        }
        let rendered = render_csv(&self.docs)?;
        tokio::fs::write(path, rendered).await?;
        Ok(Some(path.to_path_buf()))
    }
}
