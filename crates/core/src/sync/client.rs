//! Simulated remote sync client
//!
//! Stands in for a real backend: a fixed-latency round trip that echoes the
//! payload back. At most one round trip may be pending at a time; a newer
//! call supersedes a pending one. The pending slot is cleared on every exit
//! path, success, failure, and supersession alike.
//!
//! A real replacement must keep the at-most-one-outstanding-call semantics,
//! resolve with exactly the superseding caller's payload, and keep a failure
//! path wired to the caller's alert-and-reset handling.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{oneshot, Mutex};

use crate::project::Project;
use crate::{Error, Result};

/// Latency of the simulated round trip
pub const SYNC_LATENCY: Duration = Duration::from_millis(1500);

/// Result of a sync round trip
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// The round trip finished; the server echoed the payload back
    Completed(Vec<Project>),
    /// A newer sync superseded this one before its timer fired
    Superseded,
}

/// The single-flight slot; `seq` identifies the round trip owning `cancel`
#[derive(Default)]
struct PendingSlot {
    seq: u64,
    cancel: Option<oneshot::Sender<()>>,
}

/// Simulated remote sync with single-flight supersession
#[derive(Clone)]
pub struct SyncClient {
    latency: Duration,
    fail: bool,
    pending: Arc<Mutex<PendingSlot>>,
}

impl Default for SyncClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncClient {
    pub fn new() -> Self {
        Self {
            latency: SYNC_LATENCY,
            fail: false,
            pending: Arc::new(Mutex::new(PendingSlot::default())),
        }
    }

    /// Override the simulated latency
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make every round trip fail
    ///
    /// The simulated server otherwise always succeeds; this flag exercises
    /// the failure path a real backend would have.
    pub fn with_failure(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Whether a round trip is currently pending
    pub async fn is_pending(&self) -> bool {
        self.pending.lock().await.cancel.is_some()
    }

    /// Drop any pending round trip without starting a new one
    ///
    /// The superseded caller resolves to [`SyncOutcome::Superseded`].
    pub async fn cancel_pending(&self) {
        if let Some(cancel) = self.pending.lock().await.cancel.take() {
            let _ = cancel.send(());
        }
    }

    /// Push the project list through a simulated round trip
    ///
    /// If a round trip is already pending, its timer is cancelled and this
    /// call short-circuits with its own payload: the latest caller's data is
    /// trusted, and no exchange happens for the superseded call.
    pub async fn sync(&self, payload: Vec<Project>) -> Result<SyncOutcome> {
        let (cancel_tx, cancel_rx) = oneshot::channel();
        let seq = {
            let mut slot = self.pending.lock().await;
            if let Some(previous) = slot.cancel.take() {
                let _ = previous.send(());
                return Ok(SyncOutcome::Completed(payload));
            }
            slot.seq = slot.seq.wrapping_add(1);
            slot.cancel = Some(cancel_tx);
            slot.seq
        };

        tokio::select! {
            _ = tokio::time::sleep(self.latency) => {
                let mut slot = self.pending.lock().await;
                // If the slot no longer holds this call's sender, a newer
                // call or an explicit cancel got there first.
                let still_ours = slot.seq == seq && slot.cancel.is_some();
                if still_ours {
                    slot.cancel = None;
                }
                drop(slot);

                if !still_ours {
                    Ok(SyncOutcome::Superseded)
                } else if self.fail {
                    Err(Error::SyncFailed)
                } else {
                    Ok(SyncOutcome::Completed(payload))
                }
            }
            _ = cancel_rx => Ok(SyncOutcome::Superseded),
        }
    }
}
