//! In-flight advisory request that never blocks plan entry.

use std::sync::Arc;

use futures::FutureExt;
use tokio::task::JoinHandle;
use tracing::debug;

use super::client::AdvisoryGenerator;
use super::prompt::PlanSummary;

/// A spawned advisory request.
///
/// The caller polls it with [`PendingAdvisory::try_take`] when committing a
/// plan and attaches the note only if it is already there. Dropping or
/// abandoning the request has no effect on stored data.
#[derive(Debug)]
pub struct PendingAdvisory {
    handle: Option<JoinHandle<String>>,
}

impl PendingAdvisory {
    /// Start generating a note on the current tokio runtime.
    #[must_use]
    pub fn spawn(generator: Arc<dyn AdvisoryGenerator>, summary: PlanSummary) -> Self {
        let handle = tokio::spawn(async move { generator.generate(&summary).await });
        Self {
            handle: Some(handle),
        }
    }

    /// Returns true once the note is ready to take.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_some_and(JoinHandle::is_finished)
    }

    /// Take the note if the request has already completed.
    ///
    /// Never waits. Returns `None` while the request is running, after the
    /// note has been taken once, or if the task did not complete normally.
    pub fn try_take(&mut self) -> Option<String> {
        if !self.is_finished() {
            return None;
        }
        let mut handle = self.handle.take()?;
        match (&mut handle).now_or_never()? {
            Ok(text) => Some(text),
            Err(e) => {
                debug!(error = %e, "Advisory task ended without a note");
                None
            }
        }
    }

    /// Wait for the note.
    pub async fn wait(mut self) -> Option<String> {
        self.handle.take()?.await.ok()
    }

    /// Stop the request. Its result, if any, is discarded.
    pub fn abandon(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for PendingAdvisory {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
