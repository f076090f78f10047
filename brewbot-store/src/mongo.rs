//! MongoDB-backed [`TeamStore`].
//!
//! Owns one `Collection<Document>` handle taken from an injected client; the
//! driver pools connections internally, so the handle is cheap to clone and
//! never torn down.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{bson, doc, Bson, Document};
use mongodb::{Client, Collection};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::export::render_csv;
use crate::model::{TeamStats, TransactionEntry, MEMBER_FIELDS};
use crate::store::{anchored_ci_pattern, TeamStore};

#[derive(Clone)]
pub struct MongoTeamStore {
    collection: Collection<Document>,
}

impl MongoTeamStore {
    /// Binds the store to one database/collection on an existing client.
    pub fn new(client: &Client, database: &str, collection: &str) -> Self {
        Self {
            collection: client.database(database).collection(collection),
        }
    }
}

#[async_trait]
impl TeamStore for MongoTeamStore {
    async fn stats(&self) -> Result<TeamStats, StoreError> {
        // Per-record member count as four presence conditionals, then one
        // $group over the whole collection.
        let presence: Vec<Bson> = MEMBER_FIELDS
            .iter()
            .map(|field| {
                bson!({ "$cond": [{ "$ifNull": [format!("${field}"), false] }, 1, 0] })
            })
            .collect();
        let pipeline = vec![
            doc! { "$project": { "teamName": 1, "memberCount": { "$sum": presence } } },
            doc! { "$group": {
                "_id": null,
                "total_teams": { "$sum": 1 },
                "total_members": { "$sum": "$memberCount" },
            } },
        ];

        let mut cursor = self.collection.aggregate(pipeline).await?;
        let stats = match cursor.try_next().await? {
            Some(totals) => TeamStats {
                total_teams: non_negative(&totals, "total_teams"),
                total_members: non_negative(&totals, "total_members"),
            },
            // $group emits nothing for an empty collection.
            None => TeamStats {
                total_teams: 0,
                total_members: 0,
            },
        };
        debug!(
            total_teams = stats.total_teams,
            total_members = stats.total_members,
            "computed stats"
        );
        Ok(stats)
    }

    async fn find_team(&self, name: &str) -> Result<Option<Document>, StoreError> {
        let Some(pattern) = anchored_ci_pattern(name) else {
            return Ok(None);
        };
        let filter = doc! { "teamName": { "$regex": pattern, "$options": "i" } };
        Ok(self.collection.find_one(filter).await?)
    }

    async fn transactions(&self) -> Result<Vec<TransactionEntry>, StoreError> {
        let cursor = self
            .collection
            .find(doc! {})
            .projection(doc! { "teamName": 1, "transactionId": 1, "_id": 0 })
            .sort(doc! { "teamName": 1 })
            .await?;
        let docs: Vec<Document> = cursor.try_collect().await?;
        Ok(docs.iter().map(TransactionEntry::from_doc).collect())
    }

    async fn export_csv(&self, path: &Path) -> Result<Option<PathBuf>, StoreError> {
        let docs: Vec<Document> = self.collection.find(doc! {}).await?.try_collect().await?;
        if docs.is_empty() {
            info!("export requested but collection is empty");
            return Ok(None);
        }
        let rendered = render_csv(&docs)?;
        tokio::fs::write(path, rendered).await?;
        info!(rows = docs.len(), path = %path.display(), "exported collection to CSV");
        Ok(Some(path.to_path_buf()))
    }
}

/// Reads an aggregation total as a non-negative count; the server may emit
/// Int32, Int64, or Double depending on the accumulator.
fn non_negative(doc: &Document, key: &str) -> u64 {
    match doc.get(key) {
        Some(Bson::Int32(n)) => (*n).max(0) as u64,
        Some(Bson::Int64(n)) => (*n).max(0) as u64,
        Some(Bson::Double(n)) if *n > 0.0 => *n as u64,
        _ => 0,
    }
}
