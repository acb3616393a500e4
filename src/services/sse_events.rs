use serde::Serialize;
use tracing::warn;

use crate::{
    dto::{
        common::{PhaseSnapshot, TeamSummary},
        sse::{PhaseChangedEvent, ScoreAwardedEvent, ServerEvent, TeamsUpdatedEvent},
    },
    state::SharedState,
    store::models::SessionRecord,
};

const EVENT_PHASE_CHANGED: &str = "phase_changed";
const EVENT_TEAMS_UPDATED: &str = "teams.updated";
const EVENT_SCORE_AWARDED: &str = "score.awarded";
const EVENT_SESSION_HYDRATED: &str = "session.hydrated";

/// Broadcast the current phase snapshot to every connected window.
pub async fn broadcast_phase_changed(state: &SharedState) {
    let snapshot = state.read_session(PhaseSnapshot::from_session).await;
    let payload = PhaseChangedEvent(snapshot);
    send_public_event(state, EVENT_PHASE_CHANGED, &payload);
    send_admin_event(state, EVENT_PHASE_CHANGED, &payload);
}

/// Broadcast the replaced roster.
pub fn broadcast_teams_updated(state: &SharedState, teams: Vec<TeamSummary>) {
    let payload = TeamsUpdatedEvent { teams };
    send_public_event(state, EVENT_TEAMS_UPDATED, &payload);
    send_admin_event(state, EVENT_TEAMS_UPDATED, &payload);
}

/// Broadcast a point being credited to a team.
pub fn broadcast_score_awarded(state: &SharedState, payload: ScoreAwardedEvent) {
    send_public_event(state, EVENT_SCORE_AWARDED, &payload);
    send_admin_event(state, EVENT_SCORE_AWARDED, &payload);
}

/// Broadcast the snapshot this window just merged from the shared store, so
/// its clients re-render without polling.
pub fn broadcast_session_hydrated(state: &SharedState, record: &SessionRecord) {
    send_public_event(state, EVENT_SESSION_HYDRATED, record);
    send_admin_event(state, EVENT_SESSION_HYDRATED, record);
}

fn send_public_event(state: &SharedState, event: &str, payload: &impl Serialize) {
    match ServerEvent::json(Some(event.to_string()), payload) {
        Ok(event) => state.public_sse().broadcast(event),
        Err(err) => warn!(event, error = %err, "failed to serialize public SSE payload"),
    }
}

fn send_admin_event(state: &SharedState, event: &str, payload: &impl Serialize) {
    match ServerEvent::json(Some(event.to_string()), payload) {
        Ok(event) => state.admin_sse().broadcast(event),
        Err(err) => warn!(event, error = %err, "failed to serialize admin SSE payload"),
    }
}
