//! Task model definitions

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task status, one per column of the kanban board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Todo
    }
}

impl TaskStatus {
    /// All statuses in board column order, left to right
    pub const COLUMNS: [TaskStatus; 3] = [Self::Todo, Self::InProgress, Self::Done];

    /// Column header label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }
}

/// A task on a project's board
///
/// A task belongs to exactly one project; `project_id` always points at the
/// project whose `tasks` list contains it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub project_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub assigned_user: Option<String>,
    #[serde(default)]
    pub estimated_hours: u32,
    #[serde(default)]
    pub status: TaskStatus,
    pub image_uri: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a new task under the given project
    pub fn new(project_id: Uuid, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            project_id,
            title: title.into(),
            description: String::new(),
            due_date: None,
            assigned_user: None,
            estimated_hours: 0,
            status: TaskStatus::default(),
            image_uri: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the status
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the due date
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Set the assigned user
    pub fn with_assigned_user(mut self, user: impl Into<String>) -> Self {
        self.assigned_user = Some(user.into());
        self
    }

    /// Set the estimated hours
    pub fn with_estimated_hours(mut self, hours: u32) -> Self {
        self.estimated_hours = hours;
        self
    }

    /// Set the image reference
    pub fn with_image_uri(mut self, uri: impl Into<String>) -> Self {
        self.image_uri = Some(uri.into());
        self
    }
}

/// Fields supplied when creating a task
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub assigned_user: Option<String>,
    #[serde(default)]
    pub estimated_hours: u32,
    #[serde(default)]
    pub status: TaskStatus,
    pub image_uri: Option<String>,
}

impl TaskDraft {
    /// Draft with the given title, everything else default
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the target column
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }
}

/// Partial update merged onto an existing task
///
/// `None` fields are left untouched. The double-optional fields clear the
/// value when set to `Some(None)`.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<Option<NaiveDate>>,
    pub assigned_user: Option<Option<String>>,
    pub estimated_hours: Option<u32>,
    pub status: Option<TaskStatus>,
    pub image_uri: Option<Option<String>>,
}
