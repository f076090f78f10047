//! Store error types.
//!
//! Every store operation returns a classified error instead of swallowing
//! failures, so the dispatcher can choose user-facing text per class.

use thiserror::Error;

/// Errors that can occur when using store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The database could not be reached (connection, DNS, server selection).
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// The query failed on the server or could not be built.
    #[error("query failed: {0}")]
    Query(String),
    /// CSV encoding failed while rendering an export.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Writing an export file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;
        match err.kind.as_ref() {
            ErrorKind::ServerSelection { .. }
            | ErrorKind::DnsResolve { .. }
            | ErrorKind::ConnectionPoolCleared { .. }
            | ErrorKind::Io(_) => StoreError::Unavailable(err.to_string()),
            _ => StoreError::Query(err.to_string()),
        }
    }
}
