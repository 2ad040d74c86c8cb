//! Error types for the labmsg-store crate.
//!
//! All storage operations return [`StoreError`] via [`StoreResult`].
//! Corrupt store contents are never reported here; they are repaired in
//! place by the file store. Only failures the store cannot recover from
//! reach the caller.

use std::path::PathBuf;

use thiserror::Error;

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in the message store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem operation failed on the given path.
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The collection could not be serialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A blocking task was cancelled or panicked.
    #[error("background task failed: {0}")]
    TaskJoin(String),
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::TaskJoin(err.to_string())
    }
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
