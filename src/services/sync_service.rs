//! Cross-window session synchronization.
//!
//! Every window (process) persists its whole session to the shared store
//! after each transition and runs one hydration listener. The listener merges
//! foreign snapshots into the local session on change notifications and on a
//! sub-second poll — the poll bounds staleness when a notification is missed,
//! which is the whole reliability story: last writer wins, readers converge.

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    services::sse_events,
    state::{SharedState, session::GameSession},
    store::{SessionStore as _, storage::StorageError},
};

/// Read the shared store once at startup and adopt whatever snapshot a
/// previous run (or another window) left there. A snapshot that cannot be
/// decoded is discarded and its slot cleared; the session then starts fresh.
pub async fn bootstrap(state: &SharedState) {
    match state.store().load_session().await {
        Ok(Some(record)) => {
            let revision = record.revision.unwrap_or(0);
            state.session().write().await.hydrate(record);
            info!(revision, "restored session from shared store");
        }
        Ok(None) => {
            info!("no persisted session snapshot; starting fresh");
        }
        Err(err @ StorageError::Corrupted { .. }) => {
            warn!(error = %err, "discarding unusable session snapshot; starting fresh");
            if let Err(err) = state.store().clear_session().await {
                warn!(error = %err, "failed to clear unusable session snapshot");
            }
        }
        Err(err) => {
            warn!(error = %err, "failed to read shared store at startup; starting fresh");
        }
    }
}

/// Handle to a running hydration listener. Stopping it cancels both the
/// change-notification subscription and the poll; nothing is merged
/// afterwards.
pub struct SyncListener {
    stop: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl SyncListener {
    /// Install the hydration listener for this window.
    pub fn spawn(state: SharedState) -> Self {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let mut notify_rx = state.subscribe_sync();
        let poll_interval = state.config().sync_poll_interval();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut last_applied: Option<(Uuid, u64)> = None;

            loop {
                tokio::select! {
                    _ = stop_rx.changed() => break,
                    changed = notify_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                    _ = ticker.tick() => {}
                }

                hydrate_from_store(&state, &mut last_applied).await;
            }
        });

        Self {
            stop: stop_tx,
            handle,
        }
    }

    /// Tear the listener down and wait for it to finish.
    pub async fn stop(self) {
        let _ = self.stop.send(true);
        let _ = self.handle.await;
    }
}

/// One hydration pass: read the slot, skip our own writes and snapshots we
/// already merged, otherwise merge and rebroadcast.
async fn hydrate_from_store(state: &SharedState, last_applied: &mut Option<(Uuid, u64)>) {
    match state.store().load_session().await {
        Ok(Some(record)) => {
            let origin = record.origin.unwrap_or(Uuid::nil());
            if origin == state.instance_id() {
                // Our own notification echo; this window already holds the
                // freshest state.
                return;
            }

            let revision = record.revision.unwrap_or(0);
            if *last_applied == Some((origin, revision)) {
                return;
            }

            {
                let mut session = state.session().write().await;
                session.hydrate(record.clone());
            }
            *last_applied = Some((origin, revision));
            info!(%origin, revision, "hydrated session from shared store");

            sse_events::broadcast_phase_changed(state).await;
            sse_events::broadcast_session_hydrated(state, &record);
        }
        Ok(None) => {
            // The slot was cleared (a reset elsewhere). Follow suit once.
            if last_applied.take().is_some() {
                {
                    let mut session = state.session().write().await;
                    *session = GameSession::new();
                }
                info!("shared session slot cleared; reverting to initial state");
                sse_events::broadcast_phase_changed(state).await;
            }
        }
        Err(err @ StorageError::Corrupted { .. }) => {
            warn!(error = %err, "discarding unusable session snapshot");
            if let Err(err) = state.store().clear_session().await {
                warn!(error = %err, "failed to clear unusable session snapshot");
            }
        }
        Err(err) => {
            warn!(error = %err, "failed to read shared store");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use futures::future::BoxFuture;
    use indexmap::IndexMap;

    use super::*;
    use crate::catalog::ExampleCatalog;
    use crate::config::AppConfig;
    use crate::state::AppState;
    use crate::state::session::{Team, TeamColor};
    use crate::state::transitions::apply_transition;
    use crate::store::memory::MemoryStore;
    use crate::store::models::SessionRecord;
    use crate::store::storage::{StorageError, StorageResult};
    use crate::store::SessionStore;

    fn test_state(store: &MemoryStore) -> SharedState {
        let config = AppConfig::default().with_sync_poll_interval(Duration::from_millis(20));
        AppState::new(config, ExampleCatalog::builtin(), Arc::new(store.clone()))
    }

    fn roster() -> IndexMap<String, Team> {
        IndexMap::from([(
            "t1".to_string(),
            Team {
                name: "Alpha".into(),
                score: 0,
                color: TeamColor {
                    h: 0.0,
                    s: 1.0,
                    v: 1.0,
                },
            },
        )])
    }

    #[tokio::test]
    async fn reader_converges_on_writer_state() {
        let store = MemoryStore::new();
        let writer = test_state(&store);
        let reader = test_state(&store);
        let listener = SyncListener::spawn(reader.clone());

        apply_transition(&writer, |session| {
            session.set_teams(roster());
            session.set_selected_pattern_count(Some(2));
        })
        .await;

        tokio::time::sleep(Duration::from_millis(200)).await;

        let converged = reader
            .read_session(|session| {
                session.teams().contains_key("t1") && session.selected_pattern_count() == Some(2)
            })
            .await;
        assert!(converged);

        listener.stop().await;
    }

    #[tokio::test]
    async fn writer_skips_its_own_snapshots() {
        let store = MemoryStore::new();
        let writer = test_state(&store);
        let listener = SyncListener::spawn(writer.clone());

        apply_transition(&writer, |session| session.set_teams(roster())).await;
        let before = writer.read_session(|session| session.clone()).await;

        tokio::time::sleep(Duration::from_millis(200)).await;

        let after = writer.read_session(|session| session.clone()).await;
        assert_eq!(before, after);

        listener.stop().await;
    }

    #[tokio::test]
    async fn cleared_slot_resets_a_reader_that_had_hydrated() {
        let store = MemoryStore::new();
        let writer = test_state(&store);
        let reader = test_state(&store);
        let listener = SyncListener::spawn(reader.clone());

        apply_transition(&writer, |session| session.set_teams(roster())).await;
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(reader.read_session(|s| !s.teams().is_empty()).await);

        store.clear_session().await.unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(reader.read_session(|s| s.teams().is_empty()).await);

        listener.stop().await;
    }

    #[tokio::test]
    async fn stopped_listener_no_longer_merges() {
        let store = MemoryStore::new();
        let writer = test_state(&store);
        let reader = test_state(&store);

        let listener = SyncListener::spawn(reader.clone());
        listener.stop().await;

        apply_transition(&writer, |session| session.set_teams(roster())).await;
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(reader.read_session(|s| s.teams().is_empty()).await);
    }

    /// Store stub whose snapshot always fails to decode.
    #[derive(Clone, Default)]
    struct CorruptStore {
        cleared: Arc<AtomicBool>,
    }

    impl SessionStore for CorruptStore {
        fn save_session(&self, _record: SessionRecord) -> BoxFuture<'static, StorageResult<()>> {
            Box::pin(async { Ok(()) })
        }

        fn load_session(&self) -> BoxFuture<'static, StorageResult<Option<SessionRecord>>> {
            Box::pin(async {
                Err(StorageError::corrupted(
                    "unreadable snapshot".into(),
                    std::io::Error::new(std::io::ErrorKind::InvalidData, "bad payload"),
                ))
            })
        }

        fn clear_session(&self) -> BoxFuture<'static, StorageResult<()>> {
            let cleared = Arc::clone(&self.cleared);
            Box::pin(async move {
                cleared.store(true, Ordering::SeqCst);
                Ok(())
            })
        }

        fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
            Box::pin(async { Ok(()) })
        }
    }

    #[tokio::test]
    async fn bootstrap_discards_a_corrupted_snapshot() {
        let store = CorruptStore::default();
        let config = AppConfig::default();
        let state = AppState::new(
            config,
            ExampleCatalog::builtin(),
            Arc::new(store.clone()),
        );

        bootstrap(&state).await;

        assert!(store.cleared.load(Ordering::SeqCst));
        let fresh = state
            .read_session(|session| *session == GameSession::new())
            .await;
        assert!(fresh);
    }

    #[tokio::test]
    async fn bootstrap_adopts_a_persisted_snapshot() {
        let store = MemoryStore::new();
        let writer = test_state(&store);
        apply_transition(&writer, |session| {
            session.set_teams(roster());
            session.next_round();
        })
        .await;

        let restored = test_state(&store);
        bootstrap(&restored).await;

        assert_eq!(restored.read_session(|s| s.round_number()).await, 2);
        assert!(restored.read_session(|s| s.teams().contains_key("t1")).await);

        // The writer's timestamps survive at millisecond precision, so the
        // restored copy equals the writer's view modulo nothing.
        let writer_record = writer
            .read_session(|s| s.to_record(Uuid::nil()))
            .await;
        let restored_record = restored
            .read_session(|s| s.to_record(Uuid::nil()))
            .await;
        assert_eq!(writer_record, restored_record);
    }
}
