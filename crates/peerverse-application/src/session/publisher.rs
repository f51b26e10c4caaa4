//! Background publishing of hosted sessions.

use peerverse_core::error::{PeerverseError, Result};
use peerverse_core::session::{SessionLedger, SessionNotification, SessionRecord};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Handle to an in-flight publish of a hosted session.
///
/// The publish runs on its own task so the host can enter the video room
/// without waiting for the ledger. Dropping the handle detaches the task;
/// `cancel` (or the owning coordinator's shutdown) stops it.
#[derive(Debug)]
pub struct PublishHandle {
    session_id: String,
    room_identifier: String,
    token: CancellationToken,
    handle: JoinHandle<Result<()>>,
}

impl PublishHandle {
    /// Spawns the publish of `record` onto the current Tokio runtime.
    ///
    /// Failures other than cancellation are logged and reported through
    /// `notifications` as `SessionNotification::PublishFailed`.
    pub(crate) fn spawn(
        ledger: Arc<dyn SessionLedger>,
        record: SessionRecord,
        timeout: Duration,
        token: CancellationToken,
        notifications: mpsc::UnboundedSender<SessionNotification>,
    ) -> Self {
        let session_id = record.id.clone();
        let room_identifier = record.room_identifier.clone();
        let task_token = token.clone();

        let handle = tokio::spawn(async move {
            let outcome = tokio::select! {
                biased;
                _ = task_token.cancelled() => Err(PeerverseError::Cancelled),
                result = tokio::time::timeout(timeout, ledger.publish_session(&record)) => {
                    match result {
                        Ok(Ok(())) => Ok(()),
                        Ok(Err(e)) if e.is_publish() => Err(e),
                        Ok(Err(e)) => Err(PeerverseError::publish(e.to_string())),
                        Err(_) => Err(PeerverseError::publish(format!(
                            "ledger did not confirm within {}s",
                            timeout.as_secs()
                        ))),
                    }
                }
            };

            match &outcome {
                Ok(()) => {
                    tracing::info!(
                        session_id = %record.id,
                        room_identifier = %record.room_identifier,
                        "session published"
                    );
                }
                Err(PeerverseError::Cancelled) => {
                    tracing::debug!(session_id = %record.id, "session publish cancelled");
                }
                Err(e) => {
                    tracing::warn!(
                        session_id = %record.id,
                        room_identifier = %record.room_identifier,
                        error = %e,
                        "session publish failed"
                    );
                    let _ = notifications.send(SessionNotification::PublishFailed {
                        session_id: record.id.clone(),
                        room_identifier: record.room_identifier.clone(),
                        reason: e.to_string(),
                    });
                }
            }

            outcome
        });

        Self {
            session_id,
            room_identifier,
            token,
            handle,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn room_identifier(&self) -> &str {
        &self.room_identifier
    }

    /// Requests cancellation. A publish that already completed is unaffected.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the publish to settle.
    ///
    /// # Errors
    ///
    /// - `PeerverseError::Publish` if the ledger rejected or timed out
    /// - `PeerverseError::Cancelled` if the publish was cancelled first
    pub async fn wait(self) -> Result<()> {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => Err(PeerverseError::Cancelled),
            Err(e) => Err(PeerverseError::internal(format!(
                "publish task failed: {}",
                e
            ))),
        }
    }
}
