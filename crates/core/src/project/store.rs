//! Project persistent store
//!
//! Order-preserving in-memory collection of projects with task-level
//! mutations, written back to key-value storage after every change.
//!
//! Mutations are reflected in memory before the persistence write is
//! issued. Storage failures are logged and swallowed, never surfaced to the
//! caller. Mutating a missing project or task is a silent no-op.

use std::sync::Arc;

use chrono::Utc;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::storage::{KeyValueStore, PROJECTS_KEY};
use crate::task::{Task, TaskDraft, TaskStatus, TaskUpdate};

use super::model::{Project, ProjectUpdate};

/// Thread-safe project store backed by key-value storage
#[derive(Clone)]
pub struct ProjectStore {
    /// Projects in insertion order
    projects: Arc<RwLock<IndexMap<Uuid, Project>>>,
    /// Pointer scoping the board view
    current: Arc<RwLock<Option<Uuid>>>,
    storage: Arc<dyn KeyValueStore>,
}

impl ProjectStore {
    /// Create an empty store over the given storage
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            projects: Arc::new(RwLock::new(IndexMap::new())),
            current: Arc::new(RwLock::new(None)),
            storage,
        }
    }

    /// Create a store populated from persisted storage
    ///
    /// An absent or unreadable blob loads as an empty collection.
    pub async fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let projects = match storage.get(PROJECTS_KEY).await {
            Ok(Some(blob)) => match serde_json::from_str::<Vec<Project>>(&blob) {
                Ok(list) => list.into_iter().map(|p| (p.id, p)).collect(),
                Err(e) => {
                    tracing::warn!("discarding unreadable project data: {e}");
                    IndexMap::new()
                }
            },
            Ok(None) => IndexMap::new(),
            Err(e) => {
                tracing::warn!("failed to read project data: {e}");
                IndexMap::new()
            }
        };

        Self {
            projects: Arc::new(RwLock::new(projects)),
            current: Arc::new(RwLock::new(None)),
            storage,
        }
    }

    // -- project operations

    /// Create a new project and persist the collection
    pub async fn create_project(&self, title: impl Into<String>) -> Project {
        let project = Project::new(title);
        {
            let mut projects = self.projects.write().await;
            projects.insert(project.id, project.clone());
        }
        self.persist().await;
        project
    }

    /// Merge fields onto a project; silent no-op if the id is absent
    pub async fn update_project(&self, id: Uuid, update: ProjectUpdate) {
        {
            let mut projects = self.projects.write().await;
            let Some(project) = projects.get_mut(&id) else {
                return;
            };
            if let Some(title) = update.title {
                project.title = title;
            }
            project.updated_at = Utc::now();
        }
        self.persist().await;
    }

    /// Delete a project; clears the current pointer if it pointed at it
    pub async fn delete_project(&self, id: Uuid) {
        let removed = {
            let mut projects = self.projects.write().await;
            projects.shift_remove(&id).is_some()
        };
        if !removed {
            return;
        }
        {
            let mut current = self.current.write().await;
            if *current == Some(id) {
                *current = None;
            }
        }
        self.persist().await;
    }

    /// Set or clear the current-project pointer; never persisted
    pub async fn set_current_project(&self, id: Option<Uuid>) {
        *self.current.write().await = id;
    }

    /// The current-project pointer
    pub async fn current_project_id(&self) -> Option<Uuid> {
        *self.current.read().await
    }

    /// The project the board is scoped to, if it still exists
    pub async fn current_project(&self) -> Option<Project> {
        let id = (*self.current.read().await)?;
        self.projects.read().await.get(&id).cloned()
    }

    /// Get a project by id
    pub async fn project(&self, id: Uuid) -> Option<Project> {
        self.projects.read().await.get(&id).cloned()
    }

    /// All projects in insertion order
    pub async fn projects(&self) -> Vec<Project> {
        self.projects.read().await.values().cloned().collect()
    }

    /// Replace the whole collection (sync reconcile) and persist it
    ///
    /// The current pointer is left alone; a stale pointer simply resolves to
    /// no project.
    pub async fn replace_all(&self, projects: Vec<Project>) {
        {
            let mut map = self.projects.write().await;
            *map = projects.into_iter().map(|p| (p.id, p)).collect();
        }
        self.persist().await;
    }

    // -- task operations

    /// Create a task under a project; `None` if the project is absent
    pub async fn create_task(&self, project_id: Uuid, draft: TaskDraft) -> Option<Task> {
        let task = {
            let mut projects = self.projects.write().await;
            let project = projects.get_mut(&project_id)?;
            let now = Utc::now();
            let task = Task {
                id: Uuid::new_v4(),
                project_id,
                title: draft.title,
                description: draft.description,
                due_date: draft.due_date,
                assigned_user: draft.assigned_user,
                estimated_hours: draft.estimated_hours,
                status: draft.status,
                image_uri: draft.image_uri,
                created_at: now,
                updated_at: now,
            };
            project.tasks.push(task.clone());
            project.updated_at = now;
            task
        };
        self.persist().await;
        Some(task)
    }

    /// Merge fields onto a task; silent no-op if project or task is absent
    pub async fn update_task(&self, project_id: Uuid, task_id: Uuid, update: TaskUpdate) {
        {
            let mut projects = self.projects.write().await;
            let Some(project) = projects.get_mut(&project_id) else {
                return;
            };
            let Some(task) = project.tasks.iter_mut().find(|t| t.id == task_id) else {
                return;
            };
            if let Some(title) = update.title {
                task.title = title;
            }
            if let Some(description) = update.description {
                task.description = description;
            }
            if let Some(due_date) = update.due_date {
                task.due_date = due_date;
            }
            if let Some(assigned_user) = update.assigned_user {
                task.assigned_user = assigned_user;
            }
            if let Some(hours) = update.estimated_hours {
                task.estimated_hours = hours;
            }
            if let Some(status) = update.status {
                task.status = status;
            }
            if let Some(image_uri) = update.image_uri {
                task.image_uri = image_uri;
            }
            let now = Utc::now();
            task.updated_at = now;
            project.updated_at = now;
        }
        self.persist().await;
    }

    /// Move a task to a new board column; silent no-op if absent
    pub async fn move_task(&self, project_id: Uuid, task_id: Uuid, status: TaskStatus) {
        {
            let mut projects = self.projects.write().await;
            let Some(project) = projects.get_mut(&project_id) else {
                return;
            };
            let Some(task) = project.tasks.iter_mut().find(|t| t.id == task_id) else {
                return;
            };
            task.status = status;
            let now = Utc::now();
            task.updated_at = now;
            project.updated_at = now;
        }
        self.persist().await;
    }

    /// Delete a task; silent no-op if project or task is absent
    pub async fn delete_task(&self, project_id: Uuid, task_id: Uuid) {
        {
            let mut projects = self.projects.write().await;
            let Some(project) = projects.get_mut(&project_id) else {
                return;
            };
            let before = project.tasks.len();
            project.tasks.retain(|t| t.id != task_id);
            if project.tasks.len() == before {
                return;
            }
            project.updated_at = Utc::now();
        }
        self.persist().await;
    }

    /// Write the collection back to storage, in insertion order
    ///
    /// Failures are logged and swallowed.
    async fn persist(&self) {
        let blob = {
            let projects = self.projects.read().await;
            let list: Vec<&Project> = projects.values().collect();
            match serde_json::to_string(&list) {
                Ok(blob) => blob,
                Err(e) => {
                    tracing::warn!("failed to serialize projects: {e}");
                    return;
                }
            }
        };
        if let Err(e) = self.storage.set(PROJECTS_KEY, &blob).await {
            tracing::warn!("failed to persist projects: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileKeyValueStore, MemoryKeyValueStore};
    use tempfile::tempdir;

    fn memory_store() -> ProjectStore {
        ProjectStore::new(Arc::new(MemoryKeyValueStore::new()))
    }

    #[tokio::test]
    async fn test_create_project() {
        let store = memory_store();

        let project = store.create_project("Launch").await;
        assert_eq!(project.title, "Launch");

        let projects = store.projects().await;
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].id, project.id);
    }

    #[tokio::test]
    async fn test_projects_keep_insertion_order() {
        let store = memory_store();

        store.create_project("first").await;
        store.create_project("second").await;
        store.create_project("third").await;

        let titles: Vec<String> = store
            .projects()
            .await
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_update_project_merges_and_bumps() {
        let store = memory_store();
        let project = store.create_project("Launch").await;

        store
            .update_project(
                project.id,
                ProjectUpdate {
                    title: Some("Launch v2".to_string()),
                },
            )
            .await;

        let updated = store.project(project.id).await.unwrap();
        assert_eq!(updated.title, "Launch v2");
        assert!(updated.updated_at >= project.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_project_is_noop() {
        let store = memory_store();
        store.create_project("Launch").await;

        store
            .update_project(
                Uuid::new_v4(),
                ProjectUpdate {
                    title: Some("ghost".to_string()),
                },
            )
            .await;

        let projects = store.projects().await;
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].title, "Launch");
    }

    #[tokio::test]
    async fn test_delete_project_clears_current_pointer() {
        let store = memory_store();
        let project = store.create_project("Launch").await;
        store.set_current_project(Some(project.id)).await;

        store.delete_project(project.id).await;

        assert_eq!(store.current_project_id().await, None);
        assert!(store.current_project().await.is_none());
        assert!(store.projects().await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_other_project_keeps_current_pointer() {
        let store = memory_store();
        let keep = store.create_project("keep").await;
        let doomed = store.create_project("doomed").await;
        store.set_current_project(Some(keep.id)).await;

        store.delete_project(doomed.id).await;

        assert_eq!(store.current_project_id().await, Some(keep.id));
    }

    #[tokio::test]
    async fn test_create_task_bumps_project() {
        let store = memory_store();
        let project = store.create_project("Launch").await;

        let task = store
            .create_task(project.id, TaskDraft::new("Design"))
            .await
            .unwrap();
        assert_eq!(task.project_id, project.id);
        assert_eq!(task.status, TaskStatus::Todo);

        let project = store.project(project.id).await.unwrap();
        assert_eq!(project.tasks.len(), 1);
        assert!(project.updated_at >= task.updated_at);
    }

    #[tokio::test]
    async fn test_create_task_under_missing_project() {
        let store = memory_store();

        let task = store
            .create_task(Uuid::new_v4(), TaskDraft::new("orphan"))
            .await;
        assert!(task.is_none());
    }

    #[tokio::test]
    async fn test_update_task_merges_fields() {
        let store = memory_store();
        let project = store.create_project("Launch").await;
        let task = store
            .create_task(project.id, TaskDraft::new("Design"))
            .await
            .unwrap();

        store
            .update_task(
                project.id,
                task.id,
                TaskUpdate {
                    description: Some("Sketch the landing screen".to_string()),
                    estimated_hours: Some(8),
                    status: Some(TaskStatus::InProgress),
                    ..TaskUpdate::default()
                },
            )
            .await;

        let project = store.project(project.id).await.unwrap();
        let task = project.task(task.id).unwrap();
        assert_eq!(task.title, "Design");
        assert_eq!(task.description, "Sketch the landing screen");
        assert_eq!(task.estimated_hours, 8);
        assert_eq!(task.status, TaskStatus::InProgress);
        assert!(project.updated_at >= task.updated_at);
    }

    #[tokio::test]
    async fn test_update_task_clears_optional_fields() {
        let store = memory_store();
        let project = store.create_project("Launch").await;
        let task = store
            .create_task(
                project.id,
                TaskDraft {
                    title: "Design".to_string(),
                    assigned_user: Some("dana".to_string()),
                    ..TaskDraft::default()
                },
            )
            .await
            .unwrap();

        store
            .update_task(
                project.id,
                task.id,
                TaskUpdate {
                    assigned_user: Some(None),
                    ..TaskUpdate::default()
                },
            )
            .await;

        let project = store.project(project.id).await.unwrap();
        assert_eq!(project.task(task.id).unwrap().assigned_user, None);
    }

    #[tokio::test]
    async fn test_move_task_changes_column() {
        let store = memory_store();
        let project = store.create_project("Launch").await;
        let task = store
            .create_task(project.id, TaskDraft::new("Design"))
            .await
            .unwrap();

        store
            .move_task(project.id, task.id, TaskStatus::Done)
            .await;

        let project = store.project(project.id).await.unwrap();
        assert_eq!(project.task(task.id).unwrap().status, TaskStatus::Done);
        assert_eq!(project.completion_percentage(), 100);
    }

    #[tokio::test]
    async fn test_delete_task() {
        let store = memory_store();
        let project = store.create_project("Launch").await;
        let task = store
            .create_task(project.id, TaskDraft::new("Design"))
            .await
            .unwrap();

        store.delete_task(project.id, task.id).await;

        let project = store.project(project.id).await.unwrap();
        assert!(project.tasks.is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_task_does_not_touch_storage() {
        let storage = Arc::new(MemoryKeyValueStore::new());
        let store = ProjectStore::new(Arc::clone(&storage) as Arc<dyn KeyValueStore>);
        let project = store.create_project("Launch").await;

        let before = storage.get(PROJECTS_KEY).await.unwrap();
        store.delete_task(project.id, Uuid::new_v4()).await;
        let after = storage.get(PROJECTS_KEY).await.unwrap();

        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_no_orphan_tasks_across_mutations() {
        let store = memory_store();
        let a = store.create_project("a").await;
        let b = store.create_project("b").await;

        let t1 = store
            .create_task(a.id, TaskDraft::new("one"))
            .await
            .unwrap();
        store.create_task(b.id, TaskDraft::new("two")).await;
        store
            .move_task(a.id, t1.id, TaskStatus::InProgress)
            .await;
        store.delete_project(b.id).await;
        store.create_task(a.id, TaskDraft::new("three")).await;

        let projects = store.projects().await;
        for project in &projects {
            for task in &project.tasks {
                assert_eq!(task.project_id, project.id);
                assert!(projects.iter().any(|p| p.id == task.project_id));
            }
        }
    }

    #[tokio::test]
    async fn test_persistence_across_instances() {
        let dir = tempdir().unwrap();
        let storage: Arc<dyn KeyValueStore> = Arc::new(FileKeyValueStore::new(dir.path()));

        let project_id;
        {
            let store = ProjectStore::load(Arc::clone(&storage)).await;
            let project = store.create_project("Launch").await;
            project_id = project.id;
            store
                .create_task(project.id, TaskDraft::new("Design"))
                .await
                .unwrap();
        }

        let store = ProjectStore::load(storage).await;
        let project = store.project(project_id).await.unwrap();
        assert_eq!(project.title, "Launch");
        assert_eq!(project.tasks.len(), 1);
        assert_eq!(project.tasks[0].title, "Design");
    }

    #[tokio::test]
    async fn test_corrupt_blob_loads_empty() {
        let storage = Arc::new(MemoryKeyValueStore::new());
        storage.set(PROJECTS_KEY, "not json at all").await.unwrap();

        let store = ProjectStore::load(storage as Arc<dyn KeyValueStore>).await;
        assert!(store.projects().await.is_empty());
    }

    #[tokio::test]
    async fn test_replace_all_persists() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryKeyValueStore::new());
        let store = ProjectStore::new(Arc::clone(&storage));
        store.create_project("old").await;

        store.replace_all(vec![Project::new("new")]).await;

        let reloaded = ProjectStore::load(storage).await;
        let titles: Vec<String> = reloaded
            .projects()
            .await
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["new"]);
    }

    #[tokio::test]
    async fn test_replace_all_with_empty_wipes() {
        let store = memory_store();
        store.create_project("Launch").await;

        store.replace_all(Vec::new()).await;

        assert!(store.projects().await.is_empty());
    }
}
