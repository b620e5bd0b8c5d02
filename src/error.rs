//! Error types

use std::path::PathBuf;

/// Errors of the local persistence paths
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unable to access {path:?}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("unable to decode {path:?}: {source}")]
    Decode { path: PathBuf, source: serde_json::Error },
    #[error("unable to encode data: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("background worker did not complete: {0}")]
    Worker(#[from] tokio::task::JoinError),
    #[error("no application data directory is available on this platform")]
    NoDataDir,
    /// Saving before loading would overwrite the stored snapshot with a partial one
    #[error("refusing to save before the stored tasks have been loaded")]
    NotLoaded,
}

/// Errors of a [`RecordStore`](crate::traits::RecordStore)
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unexpected HTTP status code {0}")]
    Status(reqwest::StatusCode),
    #[error("invalid record URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("record rejected: {0}")]
    Rejected(String),
}
