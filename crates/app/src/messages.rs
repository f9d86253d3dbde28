//! User-facing message catalog

pub const ENTER_PROJECT_TITLE: &str = "Please enter a project title";
pub const ENTER_TASK_TITLE: &str = "Please enter a task title";
pub const PROJECT_SYNCED: &str = "Project synced successfully.";
pub const TASK_UPDATED: &str = "Task updated successfully.";
pub const INTERNET_CHECK: &str = "Please check your internet connection and try again.";
