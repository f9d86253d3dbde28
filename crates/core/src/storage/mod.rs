//! Local persistence collaborators
//!
//! Key-value storage holding two independent records: the dark-theme flag
//! and the serialized project collection. Absent or corrupt data always
//! reads as "empty"; there is no schema versioning.

mod file;
mod memory;

pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;

use async_trait::async_trait;

use crate::Result;

/// Storage key for the serialized project collection
pub const PROJECTS_KEY: &str = "projects_data";

/// Storage key for the dark-theme flag
pub const THEME_KEY: &str = "app_theme";

/// Key-value storage interface
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the blob stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous blob
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}
