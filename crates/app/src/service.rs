//! Sync orchestration and input validation
//!
//! The flows behind the three screens: startup sync, board entry and card
//! moves, and task-detail save/delete. Store mutations always complete
//! before the sync call is issued, so the sync payload observes
//! post-mutation state.

use uuid::Uuid;

use mpm_core::project::{Project, ProjectUpdate};
use mpm_core::sync::SyncOutcome;
use mpm_core::task::{Task, TaskDraft, TaskStatus, TaskUpdate};

use crate::alert::Severity;
use crate::messages;
use crate::state::AppState;

/// Success toast raised after a completed round trip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SyncToast {
    None,
    ProjectSynced,
    TaskUpdated,
}

impl AppState {
    // -- validation boundary

    /// Create a project; an empty title is blocked with an alert and the
    /// store is never invoked
    pub async fn create_project(&self, title: &str) -> Option<Project> {
        let title = title.trim();
        if title.is_empty() {
            self.alerts()
                .show(messages::ENTER_PROJECT_TITLE, Severity::Error);
            return None;
        }
        Some(self.store().create_project(title).await)
    }

    /// Rename a project
    pub async fn rename_project(&self, id: Uuid, title: &str) {
        let title = title.trim();
        if title.is_empty() {
            self.alerts()
                .show(messages::ENTER_PROJECT_TITLE, Severity::Error);
            return;
        }
        self.store()
            .update_project(
                id,
                ProjectUpdate {
                    title: Some(title.to_string()),
                },
            )
            .await;
    }

    /// Delete a project from the list screen
    pub async fn remove_project(&self, id: Uuid) {
        self.store().delete_project(id).await;
    }

    /// Create a task on a board column; empty titles are blocked
    pub async fn create_task(
        &self,
        project_id: Uuid,
        title: &str,
        column: TaskStatus,
    ) -> Option<Task> {
        let title = title.trim();
        if title.is_empty() {
            self.alerts()
                .show(messages::ENTER_TASK_TITLE, Severity::Error);
            return None;
        }
        let task = self
            .store()
            .create_task(project_id, TaskDraft::new(title).with_status(column))
            .await;
        if task.is_some() {
            self.sync_on_board_open().await;
        }
        task
    }

    /// Projects whose title contains the query, case-insensitively
    ///
    /// A blank query returns the whole collection.
    pub async fn filtered_projects(&self, query: &str) -> Vec<Project> {
        let query = query.trim().to_lowercase();
        let projects = self.store().projects().await;
        if query.is_empty() {
            return projects;
        }
        projects
            .into_iter()
            .filter(|p| p.title.to_lowercase().contains(&query))
            .collect()
    }

    // -- board intents

    /// Apply a drop intent from the drag controller
    pub async fn move_task(&self, project_id: Uuid, task_id: Uuid, status: TaskStatus) {
        self.store().move_task(project_id, task_id, status).await;
        self.sync_on_board_open().await;
    }

    /// Save edits from the details screen
    pub async fn save_task(&self, project_id: Uuid, task_id: Uuid, update: TaskUpdate) {
        self.store().update_task(project_id, task_id, update).await;
        self.sync_on_task_update().await;
    }

    /// Delete a task from the details screen
    pub async fn remove_task(&self, project_id: Uuid, task_id: Uuid) {
        self.store().delete_task(project_id, task_id).await;
        self.sync_on_task_update().await;
    }

    // -- sync flows

    /// Startup: restore the theme, then mirror the loaded collection
    pub async fn startup(&self) {
        self.theme().load().await;
        self.sync_on_app_open().await;
    }

    /// Sync performed when the app opens; no success toast
    pub async fn sync_on_app_open(&self) {
        self.run_sync(SyncToast::None).await;
    }

    /// Sync performed when a board is opened or a card is moved
    pub async fn sync_on_board_open(&self) {
        self.run_sync(SyncToast::ProjectSynced).await;
    }

    /// Sync performed after task edits; supersedes any pending round trip
    pub async fn sync_on_task_update(&self) {
        self.sync().cancel_pending().await;
        self.run_sync(SyncToast::TaskUpdated).await;
    }

    async fn run_sync(&self, toast: SyncToast) {
        let payload = self.store().projects().await;
        self.set_loading(true);
        let result = self.sync().sync(payload).await;
        self.set_loading(false);

        match result {
            Ok(SyncOutcome::Completed(data)) => {
                self.store().replace_all(data).await;
                match toast {
                    SyncToast::ProjectSynced => self
                        .alerts()
                        .show(messages::PROJECT_SYNCED, Severity::Success),
                    SyncToast::TaskUpdated => self
                        .alerts()
                        .show(messages::TASK_UPDATED, Severity::Success),
                    SyncToast::None => {}
                }
            }
            Ok(SyncOutcome::Superseded) => {}
            Err(e) => {
                tracing::warn!("sync failed: {e}");
                self.alerts().show(messages::INTERNET_CHECK, Severity::Error);
                self.store().replace_all(Vec::new()).await;
            }
        }
    }
}
