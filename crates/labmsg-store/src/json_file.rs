//! Flat-file JSON store.
//!
//! The collection lives in a single pretty-printed JSON array, by
//! default at `data/messages.json` under the working directory. The
//! directory and an empty `[]` document are created on first access.
//!
//! Unparseable contents are treated as an empty collection and the file
//! is reset to `[]`. This discards whatever was there; the event is
//! logged at `warn` but never reported to the caller.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument, warn};

use crate::error::{StoreError, StoreResult};
use crate::message::Message;
use crate::store::MessageStore;

/// Default directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "data";

/// File name of the collection inside the data directory.
pub const DATA_FILE_NAME: &str = "messages.json";

const EMPTY_COLLECTION: &str = "[]";

/// Message store backed by one JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
    file: PathBuf,
}

impl JsonFileStore {
    /// Create a store keeping `messages.json` inside `dir`.
    ///
    /// Nothing touches the filesystem until the first `load`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let file = dir.join(DATA_FILE_NAME);
        Self { dir, file }
    }

    /// Path of the backing JSON document.
    pub fn path(&self) -> &Path {
        &self.file
    }

    /// Create the data directory and an empty collection if missing.
    async fn ensure(&self) -> StoreResult<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StoreError::io(&self.dir, e))?;

        let exists = tokio::fs::try_exists(&self.file)
            .await
            .map_err(|e| StoreError::io(&self.file, e))?;
        if !exists {
            info!(path = %self.file.display(), "creating empty message store");
            self.write_raw(EMPTY_COLLECTION).await?;
        }
        Ok(())
    }

    /// Write `contents` to a fresh temp file in the data directory, then
    /// rename it over the target so readers see either the old or the new
    /// document. Each write gets its own temp file; overlapping writers
    /// never share one, and the last rename wins.
    async fn write_raw(&self, contents: &str) -> StoreResult<()> {
        let dir = self.dir.clone();
        let file = self.file.clone();
        let contents = contents.to_owned();

        tokio::task::spawn_blocking(move || -> StoreResult<()> {
            std::fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;

            let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| StoreError::io(&dir, e))?;
            let tmp_path = tmp.path().to_path_buf();
            tmp.write_all(contents.as_bytes())
                .map_err(|e| StoreError::io(&tmp_path, e))?;
            tmp.persist(&file)
                .map_err(|e| StoreError::io(&file, e.error))?;
            Ok(())
        })
        .await?
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

#[async_trait]
impl MessageStore for JsonFileStore {
    #[instrument(skip(self), fields(path = %self.file.display()))]
    async fn load(&self) -> StoreResult<Vec<Message>> {
        self.ensure().await?;

        let raw = tokio::fs::read_to_string(&self.file)
            .await
            .map_err(|e| StoreError::io(&self.file, e))?;

        match serde_json::from_str::<Vec<Message>>(&raw) {
            Ok(messages) => {
                debug!(count = messages.len(), "loaded messages");
                Ok(messages)
            }
            Err(e) => {
                warn!(error = %e, "message store is corrupt, resetting to an empty collection");
                self.write_raw(EMPTY_COLLECTION).await?;
                Ok(Vec::new())
            }
        }
    }

    #[instrument(skip(self, messages), fields(path = %self.file.display(), count = messages.len()))]
    async fn save(&self, messages: &[Message]) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(messages)?;
        self.write_raw(&json).await?;
        debug!("saved messages");
        Ok(())
    }
}
