//! Shared application state

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use mpm_core::project::ProjectStore;
use mpm_core::storage::{FileKeyValueStore, KeyValueStore};
use mpm_core::sync::SyncClient;

use crate::alert::{AlertSink, TracingAlertSink};
use crate::theme::ThemeManager;

/// Shared application state
///
/// Collaborators are handed in at construction; nothing reaches into shared
/// process globals.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: ProjectStore,
    sync: SyncClient,
    alerts: Arc<dyn AlertSink>,
    theme: ThemeManager,
    loading: AtomicBool,
}

impl AppState {
    /// State over file-backed storage in the given data directory
    pub async fn new(data_dir: PathBuf) -> Self {
        let storage: Arc<dyn KeyValueStore> = Arc::new(FileKeyValueStore::new(data_dir));
        Self::with_collaborators(storage, SyncClient::new(), Arc::new(TracingAlertSink)).await
    }

    /// State over explicit collaborators (tests, UI embeddings)
    ///
    /// The project collection is populated from storage here, before any
    /// operation can run.
    pub async fn with_collaborators(
        storage: Arc<dyn KeyValueStore>,
        sync: SyncClient,
        alerts: Arc<dyn AlertSink>,
    ) -> Self {
        let store = ProjectStore::load(Arc::clone(&storage)).await;
        let theme = ThemeManager::new(storage);
        Self {
            inner: Arc::new(AppStateInner {
                store,
                sync,
                alerts,
                theme,
                loading: AtomicBool::new(false),
            }),
        }
    }

    pub fn store(&self) -> &ProjectStore {
        &self.inner.store
    }

    pub fn sync(&self) -> &SyncClient {
        &self.inner.sync
    }

    pub fn alerts(&self) -> &dyn AlertSink {
        self.inner.alerts.as_ref()
    }

    pub fn theme(&self) -> &ThemeManager {
        &self.inner.theme
    }

    /// Whether a sync round trip is in flight
    pub fn is_loading(&self) -> bool {
        self.inner.loading.load(Ordering::Relaxed)
    }

    pub(crate) fn set_loading(&self, on: bool) {
        self.inner.loading.store(on, Ordering::Relaxed);
    }
}
