//! Project model definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::task::{Task, TaskStatus};

/// A named container of tasks
///
/// Tasks are kept in insertion order, not grouped by status; the board
/// groups them per column at render time. Task ids are unique within a
/// project, and `updated_at` is bumped on every mutation of the project or
/// any of its tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Create a new empty project with the given title
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            tasks: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Find a task by id
    pub fn task(&self, task_id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    /// Tasks in the given column, in insertion order
    pub fn tasks_by_status(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    /// Total number of tasks
    pub fn total_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Rounded percentage of tasks in the done column; 0 for an empty project
    pub fn completion_percentage(&self) -> u8 {
        if self.tasks.is_empty() {
            return 0;
        }
        let done = self
            .tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Done)
            .count();
        ((done as f64 / self.tasks.len() as f64) * 100.0).round() as u8
    }
}

/// Partial update merged onto an existing project
#[derive(Debug, Clone, Default)]
pub struct ProjectUpdate {
    pub title: Option<String>,
}
