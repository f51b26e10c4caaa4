//! Session lifecycle coordination.
//!
//! `SessionCoordinator` is the owned state object the UI layer talks to. It
//! wraps the local `SessionRegistry`, the last ledger fetch, and the
//! collaborators (ledger, video room, identity), and republishes the
//! reconciled display list after every change.

use chrono::Utc;
use peerverse_core::config::CoordinatorConfig;
use peerverse_core::error::{PeerverseError, Result};
use peerverse_core::identity::IdentityProvider;
use peerverse_core::session::{
    ConferenceSignal, RoomHandoff, SessionDraft, SessionLedger, SessionNotification,
    SessionRecord, SessionRegistry, VideoRoom,
};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::session::{PublishHandle, SessionReconciler};

/// A session created by this client together with its ledger publish.
#[derive(Debug)]
pub struct HostedSession {
    pub record: SessionRecord,
    pub publish: PublishHandle,
}

/// Inputs to the display list. Guarded by a single lock so a recomputation
/// never observes half of an update.
struct CoordinatorState {
    registry: SessionRegistry,
    /// Records from the most recently completed ledger fetch
    external: Vec<SessionRecord>,
}

/// Coordinates live tutoring sessions for one client.
///
/// `SessionCoordinator` is responsible for:
/// - Registry mutations (start, add, remove, end)
/// - Refreshing the ledger view and falling back to local-only on failure
/// - Publishing hosted sessions in the background
/// - Mapping video-room lifecycle signals onto the registry
/// - Keeping the reconciled display list current for subscribers
pub struct SessionCoordinator {
    state: Mutex<CoordinatorState>,
    ledger: Arc<dyn SessionLedger>,
    identity: Arc<dyn IdentityProvider>,
    video_room: Arc<dyn VideoRoom>,
    reconciler: SessionReconciler,
    config: CoordinatorConfig,
    display_tx: watch::Sender<Vec<SessionRecord>>,
    notifications: mpsc::UnboundedSender<SessionNotification>,
    shutdown: CancellationToken,
}

impl SessionCoordinator {
    /// Creates a new `SessionCoordinator` with empty local state.
    ///
    /// # Arguments
    ///
    /// * `config` - Registry bound, TTL and timeout settings
    /// * `ledger` - External session source
    /// * `identity` - Viewer identity, used for host identifiers and fetch scope
    /// * `video_room` - Conferencing capability rooms are handed off to
    /// * `notifications` - Channel for user-facing failures
    pub fn new(
        config: CoordinatorConfig,
        ledger: Arc<dyn SessionLedger>,
        identity: Arc<dyn IdentityProvider>,
        video_room: Arc<dyn VideoRoom>,
        notifications: mpsc::UnboundedSender<SessionNotification>,
    ) -> Self {
        let (display_tx, _) = watch::channel(Vec::new());
        Self {
            state: Mutex::new(CoordinatorState {
                registry: SessionRegistry::new(config.max_active_sessions),
                external: Vec::new(),
            }),
            ledger,
            identity,
            video_room,
            reconciler: SessionReconciler::new(config.external_session_ttl()),
            config,
            display_tx,
            notifications,
            shutdown: CancellationToken::new(),
        }
    }

    // ============================================================================
    // Registry operations
    // ============================================================================

    /// Makes `record` the current session, adding it to the active list if
    /// its id is not already there.
    pub fn start_session(&self, record: SessionRecord) {
        self.mutate(|state| state.registry.start_session(record));
    }

    /// Creates a hosted session from `draft` and appends it to the active
    /// list. The current session is unchanged.
    ///
    /// # Errors
    ///
    /// Returns `PeerverseError::Validation` if a required field is blank.
    pub fn add_active_session(&self, draft: SessionDraft) -> Result<SessionRecord> {
        let host = self.identity.host_identifier();
        let now = Utc::now();
        self.mutate(|state| state.registry.add_active_session(draft, &host, now))
    }

    /// Removes the session with `id`. Unknown ids are ignored.
    pub fn remove_active_session(&self, id: &str) -> Option<SessionRecord> {
        self.mutate(|state| state.registry.remove_active_session(id))
    }

    /// Leaves the current session. The session stays listed.
    pub fn end_session(&self) {
        let ended = self.mutate(|state| state.registry.end_session());
        if let Some(id) = ended {
            tracing::debug!(session_id = %id, "ended current session");
        }
    }

    pub fn current_session(&self) -> Option<SessionRecord> {
        self.lock_state().registry.current().cloned()
    }

    /// Returns the local active list in insertion order.
    pub fn active_sessions(&self) -> Vec<SessionRecord> {
        self.lock_state().registry.active().to_vec()
    }

    // ============================================================================
    // Display view
    // ============================================================================

    /// Returns the reconciled list as of the last change.
    pub fn display_sessions(&self) -> Vec<SessionRecord> {
        self.display_tx.borrow().clone()
    }

    /// Subscribes to the reconciled list. The receiver is notified after
    /// every registry mutation and every completed fetch.
    pub fn subscribe(&self) -> watch::Receiver<Vec<SessionRecord>> {
        self.display_tx.subscribe()
    }

    /// Fetches the ledger and recomputes the display list.
    ///
    /// A failed or timed-out fetch is logged and treated as an empty result,
    /// so the returned list degrades to the local sessions. The error is
    /// never propagated.
    pub async fn refresh(&self) -> Vec<SessionRecord> {
        let viewer = self.identity.current_address();
        let timeout = self.config.fetch_timeout();

        let fetched =
            match tokio::time::timeout(timeout, self.ledger.fetch_sessions(viewer.as_deref()))
                .await
            {
                Ok(Ok(records)) => {
                    tracing::debug!(count = records.len(), "fetched ledger sessions");
                    records
                }
                Ok(Err(e)) => {
                    tracing::warn!(
                        error = %e,
                        "session source unavailable, showing local sessions only"
                    );
                    Vec::new()
                }
                Err(_) => {
                    let e = PeerverseError::source_unavailable(format!(
                        "fetch timed out after {}s",
                        timeout.as_secs()
                    ));
                    tracing::warn!(
                        error = %e,
                        "session source unavailable, showing local sessions only"
                    );
                    Vec::new()
                }
            };

        self.mutate(|state| state.external = fetched);
        self.display_sessions()
    }

    /// Spawns a task that calls `refresh` every `refresh_interval_secs` until
    /// `shutdown` is called.
    pub fn spawn_refresh_loop(self: &Arc<Self>) -> JoinHandle<()> {
        let coordinator = Arc::clone(self);
        let token = self.shutdown.child_token();
        let period = self.config.refresh_interval();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        tracing::debug!("session refresh loop stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        coordinator.refresh().await;
                    }
                }
            }
        })
    }

    // ============================================================================
    // Hosting and conferencing
    // ============================================================================

    /// Creates a hosted session and starts publishing it to the ledger.
    ///
    /// The session is listed locally straight away. If the publish later
    /// fails, a `PublishFailed` notification is sent and the session stays
    /// local-only, so the host can still run the room.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `PeerverseError::Validation` if a required field is blank.
    pub fn host_session(&self, draft: SessionDraft) -> Result<HostedSession> {
        let record = self.add_active_session(draft)?;
        let publish = PublishHandle::spawn(
            Arc::clone(&self.ledger),
            record.clone(),
            self.config.publish_timeout(),
            self.shutdown.child_token(),
            self.notifications.clone(),
        );
        Ok(HostedSession { record, publish })
    }

    /// Joins `record`'s room: makes it current and hands the room off to the
    /// video widget.
    ///
    /// # Errors
    ///
    /// Returns `PeerverseError::Conference` if the widget cannot open the
    /// room. The session stays current so the viewer can retry.
    pub async fn join_session(&self, record: SessionRecord) -> Result<RoomHandoff> {
        let handoff = RoomHandoff {
            room_identifier: record.room_identifier.clone(),
            display_name: self.identity.display_name(),
        };
        self.start_session(record);

        if let Err(e) = self.video_room.enter_room(&handoff).await {
            let err = match e {
                PeerverseError::Conference(_) => e,
                other => PeerverseError::conference(other.to_string()),
            };
            tracing::warn!(
                room_identifier = %handoff.room_identifier,
                error = %err,
                "failed to enter video room"
            );
            self.notify(SessionNotification::ConferenceError {
                room_identifier: Some(handoff.room_identifier.clone()),
                message: err.to_string(),
            });
            return Err(err);
        }

        Ok(handoff)
    }

    /// Applies a lifecycle signal from the video widget.
    ///
    /// - `Left` / `ReadyToClose` end the current session
    /// - `ParticipantJoined` / `ParticipantLeft` adjust the advisory count
    /// - `Error` notifies the user and leaves the session current
    pub fn handle_conference_signal(&self, signal: ConferenceSignal) {
        match signal {
            ConferenceSignal::Joined => {
                tracing::debug!("joined video room");
            }
            ConferenceSignal::Left | ConferenceSignal::ReadyToClose => {
                self.end_session();
            }
            ConferenceSignal::ParticipantJoined => {
                self.mutate(|state| {
                    if let Some(current) = state.registry.current_mut() {
                        current.participant_count = current.participant_count.saturating_add(1);
                    }
                });
            }
            ConferenceSignal::ParticipantLeft => {
                self.mutate(|state| {
                    if let Some(current) = state.registry.current_mut() {
                        current.participant_count = current.participant_count.saturating_sub(1);
                    }
                });
            }
            ConferenceSignal::Error(message) => {
                let room_identifier = self
                    .lock_state()
                    .registry
                    .current()
                    .map(|s| s.room_identifier.clone());
                tracing::warn!(
                    room_identifier = ?room_identifier,
                    error = %message,
                    "video room reported an error"
                );
                self.notify(SessionNotification::ConferenceError {
                    room_identifier,
                    message,
                });
            }
        }
    }

    /// Cancels outstanding publishes and the refresh loop.
    pub fn shutdown(&self) {
        tracing::debug!("shutting down session coordinator");
        self.shutdown.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    // ============================================================================
    // Internals
    // ============================================================================

    fn lock_state(&self) -> MutexGuard<'_, CoordinatorState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Applies `f` and republishes the display list under the same lock.
    fn mutate<R>(&self, f: impl FnOnce(&mut CoordinatorState) -> R) -> R {
        let mut state = self.lock_state();
        let result = f(&mut *state);
        let view = self
            .reconciler
            .reconcile(state.registry.active(), &state.external, Utc::now());
        self.display_tx.send_replace(view);
        result
    }

    fn notify(&self, notification: SessionNotification) {
        // The UI may have dropped its receiver; nothing else to do then
        let _ = self.notifications.send(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    // Mock SessionLedger for testing
    #[derive(Default)]
    struct MockLedger {
        records: Mutex<Vec<SessionRecord>>,
        published: Mutex<Vec<SessionRecord>>,
        fail_fetch: AtomicBool,
        fail_publish: bool,
        hang: bool,
        fetch_count: Mutex<usize>,
        last_viewer: Mutex<Option<String>>,
    }

    impl MockLedger {
        fn with_records(records: Vec<SessionRecord>) -> Self {
            Self {
                records: Mutex::new(records),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl SessionLedger for MockLedger {
        async fn fetch_sessions(&self, viewer: Option<&str>) -> Result<Vec<SessionRecord>> {
            *self.fetch_count.lock().unwrap() += 1;
            *self.last_viewer.lock().unwrap() = viewer.map(str::to_string);
            if self.hang {
                std::future::pending::<()>().await;
            }
            if self.fail_fetch.load(Ordering::SeqCst) {
                return Err(PeerverseError::source_unavailable("rpc unreachable"));
            }
            Ok(self.records.lock().unwrap().clone())
        }

        async fn publish_session(&self, record: &SessionRecord) -> Result<()> {
            if self.hang {
                std::future::pending::<()>().await;
            }
            if self.fail_publish {
                return Err(PeerverseError::publish("signature rejected"));
            }
            self.published.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    // Mock VideoRoom for testing
    #[derive(Default)]
    struct MockVideoRoom {
        entered: Mutex<Vec<RoomHandoff>>,
        fail: bool,
    }

    #[async_trait]
    impl VideoRoom for MockVideoRoom {
        async fn enter_room(&self, handoff: &RoomHandoff) -> Result<()> {
            if self.fail {
                return Err(PeerverseError::internal("widget not mounted"));
            }
            self.entered.lock().unwrap().push(handoff.clone());
            Ok(())
        }
    }

    struct MockIdentity;

    impl IdentityProvider for MockIdentity {
        fn current_address(&self) -> Option<String> {
            Some("0xviewer".to_string())
        }

        fn display_name(&self) -> String {
            "Ada".to_string()
        }
    }

    fn record(id: &str, room: &str) -> SessionRecord {
        SessionRecord {
            id: id.to_string(),
            room_identifier: room.to_string(),
            title: format!("Session {room}"),
            description: "desc".to_string(),
            category: "General".to_string(),
            duration: "30 min".to_string(),
            host_identifier: "0xother".to_string(),
            participant_count: 0,
            start_time: Utc::now(),
            is_host: false,
        }
    }

    fn draft() -> SessionDraft {
        SessionDraft::new("React Basics", "d", "Frontend", "30 min")
    }

    struct Harness {
        coordinator: SessionCoordinator,
        ledger: Arc<MockLedger>,
        video_room: Arc<MockVideoRoom>,
        notifications: mpsc::UnboundedReceiver<SessionNotification>,
    }

    fn harness_with(ledger: MockLedger, video_room: MockVideoRoom) -> Harness {
        let ledger = Arc::new(ledger);
        let video_room = Arc::new(video_room);
        let (tx, rx) = mpsc::unbounded_channel();
        let coordinator = SessionCoordinator::new(
            CoordinatorConfig::default(),
            ledger.clone(),
            Arc::new(MockIdentity),
            video_room.clone(),
            tx,
        );
        Harness {
            coordinator,
            ledger,
            video_room,
            notifications: rx,
        }
    }

    fn harness(ledger: MockLedger) -> Harness {
        harness_with(ledger, MockVideoRoom::default())
    }

    #[test]
    fn test_start_then_end_keeps_record() {
        let h = harness(MockLedger::default());
        let session = record("1", "x");

        h.coordinator.start_session(session.clone());
        h.coordinator.end_session();

        assert!(h.coordinator.current_session().is_none());
        assert_eq!(h.coordinator.active_sessions(), vec![session.clone()]);
        assert_eq!(h.coordinator.display_sessions(), vec![session]);
    }

    #[test]
    fn test_add_active_session_uses_identity() {
        let h = harness(MockLedger::default());
        let added = h.coordinator.add_active_session(draft()).unwrap();

        assert!(added.is_host);
        assert_eq!(added.host_identifier, "0xviewer");
        assert!(added.room_identifier.starts_with("reactbasics"));
        assert!(h.coordinator.current_session().is_none());
    }

    #[test]
    fn test_validation_error_reaches_caller() {
        let h = harness(MockLedger::default());
        let err = h
            .coordinator
            .add_active_session(SessionDraft::new("t", "d", " ", "1h"))
            .unwrap_err();
        assert_eq!(err, PeerverseError::validation("category"));
        assert!(h.coordinator.display_sessions().is_empty());
    }

    #[test]
    fn test_remove_unknown_id_on_empty_registry() {
        let h = harness(MockLedger::default());
        assert!(h.coordinator.remove_active_session("nonexistent").is_none());
        assert!(h.coordinator.active_sessions().is_empty());
        assert!(h.coordinator.current_session().is_none());
    }

    #[tokio::test]
    async fn test_refresh_merges_by_room_identifier() {
        let h = harness(MockLedger::with_records(vec![
            record("ext-x", "x"),
            record("ext-y", "y"),
        ]));
        let mut local = record("1", "x");
        local.is_host = true;
        h.coordinator.start_session(local);

        let merged = h.coordinator.refresh().await;

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].id, "1");
        assert!(merged[0].is_host);
        assert_eq!(merged[1].room_identifier, "y");
        assert_eq!(
            h.ledger.last_viewer.lock().unwrap().as_deref(),
            Some("0xviewer")
        );
    }

    #[test]
    fn test_started_record_reusing_a_room_is_not_displayed_twice() {
        let h = harness(MockLedger::default());
        h.coordinator.start_session(record("1", "x"));
        h.coordinator.start_session(record("2", "x"));

        let displayed = h.coordinator.display_sessions();
        assert_eq!(displayed.len(), 1);
        assert_eq!(displayed[0].id, "1");
        assert_eq!(h.coordinator.current_session().unwrap().id, "2");
    }

    #[test]
    fn test_hosted_session_stays_listed_at_bound() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let coordinator = SessionCoordinator::new(
            CoordinatorConfig {
                max_active_sessions: 1,
                ..Default::default()
            },
            Arc::new(MockLedger::default()),
            Arc::new(MockIdentity),
            Arc::new(MockVideoRoom::default()),
            tx,
        );
        coordinator.start_session(record("other", "x"));

        let mine = coordinator
            .add_active_session(SessionDraft::new("Mine", "d", "c", "1h"))
            .unwrap();

        assert!(coordinator.active_sessions().iter().any(|s| s.id == mine.id));
        assert!(coordinator.display_sessions().iter().any(|s| s.id == mine.id));
    }

    #[tokio::test]
    async fn test_failed_fetch_falls_back_to_local() {
        let h = harness(MockLedger {
            fail_fetch: AtomicBool::new(true),
            ..Default::default()
        });
        h.coordinator.start_session(record("1", "x"));
        h.coordinator.add_active_session(draft()).unwrap();

        let merged = h.coordinator.refresh().await;

        assert_eq!(merged, h.coordinator.active_sessions());
    }

    #[tokio::test]
    async fn test_failed_fetch_replaces_previous_external_view() {
        let h = harness(MockLedger::with_records(vec![record("ext-y", "y")]));
        h.coordinator.start_session(record("1", "x"));
        assert_eq!(h.coordinator.refresh().await.len(), 2);

        h.ledger.fail_fetch.store(true, Ordering::SeqCst);
        assert_eq!(h.coordinator.refresh().await, h.coordinator.active_sessions());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_fetch_times_out_to_local() {
        let h = harness(MockLedger {
            hang: true,
            ..Default::default()
        });
        h.coordinator.start_session(record("1", "x"));

        let merged = h.coordinator.refresh().await;
        assert_eq!(merged, h.coordinator.active_sessions());
    }

    #[tokio::test]
    async fn test_external_session_dropped_when_ledger_forgets_it() {
        let h = harness(MockLedger::with_records(vec![record("ext-y", "y")]));
        assert_eq!(h.coordinator.refresh().await.len(), 1);

        h.ledger.records.lock().unwrap().clear();
        assert!(h.coordinator.refresh().await.is_empty());
    }

    #[tokio::test]
    async fn test_subscribers_see_every_change() {
        let h = harness(MockLedger::with_records(vec![record("ext-y", "y")]));
        let mut rx = h.coordinator.subscribe();

        h.coordinator.start_session(record("1", "x"));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);

        h.coordinator.refresh().await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 2);
    }

    #[tokio::test]
    async fn test_host_session_publishes() {
        let h = harness(MockLedger::default());
        let hosted = h.coordinator.host_session(draft()).unwrap();
        let room = hosted.record.room_identifier.clone();

        assert_eq!(hosted.publish.room_identifier(), room);
        hosted.publish.wait().await.unwrap();

        let published = h.ledger.published.lock().unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].room_identifier, room);
    }

    #[tokio::test]
    async fn test_publish_failure_notifies_and_keeps_local() {
        let mut h = harness(MockLedger {
            fail_publish: true,
            ..Default::default()
        });
        let hosted = h.coordinator.host_session(draft()).unwrap();
        let session_id = hosted.record.id.clone();

        let err = hosted.publish.wait().await.unwrap_err();
        assert!(err.is_publish());

        match h.notifications.recv().await {
            Some(SessionNotification::PublishFailed {
                session_id: id, ..
            }) => assert_eq!(id, session_id),
            other => panic!("unexpected notification: {other:?}"),
        }
        assert_eq!(h.coordinator.active_sessions()[0].id, session_id);
    }

    #[tokio::test(start_paused = true)]
    async fn test_publish_timeout_is_publish_error() {
        let h = harness(MockLedger {
            hang: true,
            ..Default::default()
        });
        let hosted = h.coordinator.host_session(draft()).unwrap();
        let err = hosted.publish.wait().await.unwrap_err();
        assert!(err.is_publish());
    }

    #[tokio::test]
    async fn test_shutdown_cancels_pending_publish() {
        let mut h = harness(MockLedger {
            hang: true,
            ..Default::default()
        });
        let hosted = h.coordinator.host_session(draft()).unwrap();

        h.coordinator.shutdown();
        assert!(h.coordinator.is_shut_down());

        let err = hosted.publish.wait().await.unwrap_err();
        assert!(err.is_cancelled());
        assert!(h.notifications.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_cancel_single_publish() {
        let h = harness(MockLedger {
            hang: true,
            ..Default::default()
        });
        let hosted = h.coordinator.host_session(draft()).unwrap();
        hosted.publish.cancel();
        assert!(hosted.publish.wait().await.unwrap_err().is_cancelled());
        assert!(!h.coordinator.is_shut_down());
    }

    #[tokio::test]
    async fn test_join_hands_off_room() {
        let h = harness(MockLedger::default());
        let session = record("1", "x");

        let handoff = h.coordinator.join_session(session).await.unwrap();

        assert_eq!(handoff.room_identifier, "x");
        assert_eq!(handoff.display_name, "Ada");
        assert_eq!(h.video_room.entered.lock().unwrap().len(), 1);
        assert_eq!(h.coordinator.current_session().unwrap().id, "1");
    }

    #[tokio::test]
    async fn test_join_failure_is_conference_error_and_stays_current() {
        let mut h = harness_with(
            MockLedger::default(),
            MockVideoRoom {
                fail: true,
                ..Default::default()
            },
        );

        let err = h.coordinator.join_session(record("1", "x")).await.unwrap_err();

        assert!(err.is_conference());
        assert_eq!(h.coordinator.current_session().unwrap().id, "1");
        assert!(matches!(
            h.notifications.try_recv(),
            Ok(SessionNotification::ConferenceError { .. })
        ));
    }

    #[test]
    fn test_departure_signals_end_session() {
        for signal in [ConferenceSignal::Left, ConferenceSignal::ReadyToClose] {
            let h = harness(MockLedger::default());
            h.coordinator.start_session(record("1", "x"));

            h.coordinator.handle_conference_signal(signal);

            assert!(h.coordinator.current_session().is_none());
            assert_eq!(h.coordinator.active_sessions().len(), 1);
        }
    }

    #[test]
    fn test_conference_error_notifies_without_ending() {
        let mut h = harness(MockLedger::default());
        h.coordinator.start_session(record("1", "x"));

        h.coordinator
            .handle_conference_signal(ConferenceSignal::Error("camera denied".to_string()));

        assert_eq!(h.coordinator.current_session().unwrap().id, "1");
        assert_eq!(
            h.notifications.try_recv().unwrap(),
            SessionNotification::ConferenceError {
                room_identifier: Some("x".to_string()),
                message: "camera denied".to_string(),
            }
        );
    }

    #[test]
    fn test_participant_signals_adjust_advisory_count() {
        let h = harness(MockLedger::default());
        h.coordinator.start_session(record("1", "x"));

        h.coordinator
            .handle_conference_signal(ConferenceSignal::ParticipantJoined);
        h.coordinator
            .handle_conference_signal(ConferenceSignal::ParticipantJoined);
        h.coordinator
            .handle_conference_signal(ConferenceSignal::ParticipantLeft);
        assert_eq!(h.coordinator.current_session().unwrap().participant_count, 1);

        h.coordinator
            .handle_conference_signal(ConferenceSignal::ParticipantLeft);
        h.coordinator
            .handle_conference_signal(ConferenceSignal::ParticipantLeft);
        assert_eq!(h.coordinator.current_session().unwrap().participant_count, 0);
        assert_eq!(h.coordinator.display_sessions()[0].participant_count, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_loop_runs_until_shutdown() {
        let ledger = Arc::new(MockLedger::with_records(vec![record("ext-y", "y")]));
        let (tx, _rx) = mpsc::unbounded_channel();
        let coordinator = Arc::new(SessionCoordinator::new(
            CoordinatorConfig {
                refresh_interval_secs: 5,
                ..Default::default()
            },
            ledger.clone(),
            Arc::new(MockIdentity),
            Arc::new(MockVideoRoom::default()),
            tx,
        ));

        let handle = coordinator.spawn_refresh_loop();
        tokio::time::sleep(Duration::from_secs(11)).await;

        assert!(*ledger.fetch_count.lock().unwrap() >= 2);
        assert_eq!(coordinator.display_sessions().len(), 1);

        coordinator.shutdown();
        handle.await.unwrap();
    }
}
