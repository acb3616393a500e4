use tracing::warn;

use crate::{
    services::sse_events,
    state::{SharedState, session::GameSession},
    store::SessionStore as _,
};

/// Apply a session mutation, then run the sync middleware: persist the whole
/// snapshot to the shared store, notify in-process observers, and broadcast
/// the resulting phase to every connected window.
///
/// A failed persist is logged and swallowed; the in-memory state stays
/// authoritative for this window and the next successful write replaces the
/// snapshot wholesale anyway.
pub async fn apply_transition<F, T>(state: &SharedState, mutate: F) -> T
where
    F: FnOnce(&mut GameSession) -> T,
{
    let (value, record, revision) = {
        let mut session = state.session().write().await;
        let value = mutate(&mut session);
        let record = session.to_record(state.instance_id());
        (value, record, session.revision())
    };

    if let Err(err) = state.store().save_session(record).await {
        warn!(error = %err, "failed to persist session snapshot; keeping in-memory state");
    }
    state.notify_sync(revision);
    sse_events::broadcast_phase_changed(state).await;

    value
}
