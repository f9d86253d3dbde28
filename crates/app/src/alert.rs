//! User-facing alert collaborator

/// Severity tag of a toast-style notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// Capability interface for raising notifications
///
/// The presentation layer implements this with its toast/flash widget; the
/// shell never reaches into shared process state to show one.
pub trait AlertSink: Send + Sync {
    fn show(&self, message: &str, severity: Severity);
}

/// Alert sink that logs through `tracing`, for headless runs
#[derive(Debug, Default, Clone)]
pub struct TracingAlertSink;

impl AlertSink for TracingAlertSink {
    fn show(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Success => tracing::info!(target: "mpm::alert", "{message}"),
            Severity::Error => tracing::error!(target: "mpm::alert", "{message}"),
        }
    }
}
