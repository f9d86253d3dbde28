//! File-backed key-value storage
//!
//! Each key is stored as its own blob file under a data directory.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::Error;
use crate::Result;

use super::KeyValueStore;

/// Key-value store writing one file per key
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Store rooted at the given data directory
    ///
    /// The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| Error::Storage(format!("failed to read {}: {e}", path.display())))?;
        Ok(Some(content))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| Error::Storage(format!("failed to create {}: {e}", self.dir.display())))?;
        tokio::fs::write(&path, value)
            .await
            .map_err(|e| Error::Storage(format!("failed to write {}: {e}", path.display())))?;
        Ok(())
    }
}
