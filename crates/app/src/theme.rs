//! Theme preference
//!
//! A single persisted dark-theme flag. The app defaults to dark; absent or
//! unreadable storage keeps the default, and write failures are swallowed
//! like every other persistence error.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use mpm_core::storage::{KeyValueStore, THEME_KEY};

/// Dark theme is the default
pub const DEFAULT_DARK: bool = true;

/// Persisted light/dark preference
#[derive(Clone)]
pub struct ThemeManager {
    storage: Arc<dyn KeyValueStore>,
    dark: Arc<AtomicBool>,
}

impl ThemeManager {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            dark: Arc::new(AtomicBool::new(DEFAULT_DARK)),
        }
    }

    /// Populate the flag from storage
    pub async fn load(&self) {
        match self.storage.get(THEME_KEY).await {
            Ok(Some(blob)) => match serde_json::from_str::<bool>(&blob) {
                Ok(dark) => self.dark.store(dark, Ordering::Relaxed),
                Err(e) => tracing::warn!("discarding unreadable theme flag: {e}"),
            },
            Ok(None) => {}
            Err(e) => tracing::warn!("failed to read theme flag: {e}"),
        }
    }

    pub fn is_dark(&self) -> bool {
        self.dark.load(Ordering::Relaxed)
    }

    /// Flip the theme, persist, and return the new value
    pub async fn toggle(&self) -> bool {
        let dark = !self.is_dark();
        self.set(dark).await;
        dark
    }

    /// Set the theme and persist it
    pub async fn set(&self, dark: bool) {
        self.dark.store(dark, Ordering::Relaxed);
        let blob = if dark { "true" } else { "false" };
        if let Err(e) = self.storage.set(THEME_KEY, blob).await {
            tracing::warn!("failed to persist theme flag: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpm_core::storage::MemoryKeyValueStore;

    fn manager() -> (ThemeManager, Arc<MemoryKeyValueStore>) {
        let storage = Arc::new(MemoryKeyValueStore::new());
        let manager = ThemeManager::new(Arc::clone(&storage) as Arc<dyn KeyValueStore>);
        (manager, storage)
    }

    #[tokio::test]
    async fn test_defaults_to_dark() {
        let (manager, _) = manager();
        manager.load().await;
        assert!(manager.is_dark());
    }

    #[tokio::test]
    async fn test_toggle_persists() {
        let (manager, storage) = manager();

        assert!(!manager.toggle().await);
        assert_eq!(
            storage.get(THEME_KEY).await.unwrap(),
            Some("false".to_string())
        );

        assert!(manager.toggle().await);
        assert_eq!(
            storage.get(THEME_KEY).await.unwrap(),
            Some("true".to_string())
        );
    }

    #[tokio::test]
    async fn test_load_restores_saved_value() {
        let (manager, storage) = manager();
        manager.set(false).await;

        let restored = ThemeManager::new(storage as Arc<dyn KeyValueStore>);
        restored.load().await;
        assert!(!restored.is_dark());
    }

    #[tokio::test]
    async fn test_corrupt_flag_keeps_default() {
        let (manager, storage) = manager();
        storage.set(THEME_KEY, "not a bool").await.unwrap();

        manager.load().await;
        assert!(manager.is_dark());
    }
}
