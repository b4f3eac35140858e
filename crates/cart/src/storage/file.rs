//! File-backed key-value store.
//!
//! Each key maps to one file inside the data directory. Writes land in a
//! hidden temporary file first and are renamed over the target, so readers
//! see either the previous value or the new one, never a torn write.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use uuid::Uuid;

use crate::error::StorageError;

use super::{KeyValueStore, validate_key};

/// Directory-backed store, one file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: Arc<PathBuf>,
}

impl FileStore {
    /// Create a store rooted at `dir`.
    ///
    /// The directory is created lazily on the first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Arc::new(dir.into()),
        }
    }

    /// The directory holding the stored values.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(key))
    }
}

fn io_error(key: &str, source: std::io::Error) -> StorageError {
    StorageError::Io {
        key: key.to_string(),
        source,
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key, e)),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(self.dir.as_path())
            .await
            .map_err(|e| io_error(key, e))?;

        let tmp = self.dir.join(format!(".{key}.{}.tmp", Uuid::new_v4()));
        if let Err(e) = write_synced(&tmp, value.as_bytes()).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(io_error(key, e));
        }
        if let Err(e) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(io_error(key, e));
        }

        debug!(key, bytes = value.len(), "Stored value");
        Ok(())
    }
}

/// Write `bytes` to a new file at `path` and flush it to the device.
///
/// The data must be durable before the rename, or a crash can leave the
/// target renamed but empty.
async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}
