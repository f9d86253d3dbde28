//! Headless bootstrap for MPM
//!
//! Boots the application state the way the mobile shell does: restore the
//! persisted theme and project collection, run the startup sync, and log a
//! board summary per project.

use std::path::PathBuf;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mpm_app::state::AppState;
use mpm_core::task::TaskStatus;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mpm_app=debug,mpm_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let data_dir = std::env::var("MPM_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(".mpm-data"));
    tracing::info!("Using data directory: {:?}", data_dir);

    let app = AppState::new(data_dir).await;
    app.startup().await;

    let projects = app.store().projects().await;
    tracing::info!(
        "Loaded {} project(s), theme: {}",
        projects.len(),
        if app.theme().is_dark() { "dark" } else { "light" },
    );
    for project in &projects {
        tracing::info!(
            "{}: {} task(s), {}% complete ({} todo / {} in progress / {} done)",
            project.title,
            project.total_tasks(),
            project.completion_percentage(),
            project.tasks_by_status(TaskStatus::Todo).len(),
            project.tasks_by_status(TaskStatus::InProgress).len(),
            project.tasks_by_status(TaskStatus::Done).len(),
        );
    }
}
