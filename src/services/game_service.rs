use std::collections::HashSet;

use indexmap::IndexMap;

use crate::{
    config::AppConfig,
    dto::{
        common::{PhaseSnapshot, TeamSummary, teams_to_summaries},
        session::{SetFiltersRequest, SetTeamsRequest, SessionView, TeamInput},
    },
    error::ServiceError,
    services::sse_events,
    state::{
        SharedState,
        session::{GameSession, Team, TeamColor},
        transitions::apply_transition,
    },
    store::SessionStore as _,
};

/// Replace the team roster wholesale.
///
/// Teams without an explicit color get the first unused color from the
/// configured set, in roster order.
pub async fn set_teams(
    state: &SharedState,
    request: SetTeamsRequest,
) -> Result<Vec<TeamSummary>, ServiceError> {
    let roster = build_roster(state.config(), request.teams)?;

    let summaries = apply_transition(state, |session| {
        session.set_teams(roster);
        teams_to_summaries(session)
    })
    .await;

    sse_events::broadcast_teams_updated(state, summaries.clone());
    Ok(summaries)
}

/// Replace both draw filters. A request carrying only a category clears the
/// difficulty tier, so stale tier choices never leak into the next draw.
pub async fn set_filters(state: &SharedState, request: SetFiltersRequest) -> SessionView {
    apply_transition(state, |session| {
        session.set_selected_category(request.category);
        session.set_selected_pattern_count(request.pattern_count);
        SessionView::from_session(session)
    })
    .await
}

/// Flip the pause flag of the running round. A no-op outside a round.
pub async fn toggle_pause(state: &SharedState) -> PhaseSnapshot {
    apply_transition(state, |session| {
        session.toggle_pause();
        PhaseSnapshot::from_session(session)
    })
    .await
}

/// Destroy the session: reset to the initial state and clear the persisted
/// snapshot so siblings do not resurrect it.
pub async fn reset_session(state: &SharedState) -> PhaseSnapshot {
    let (snapshot, revision) = {
        let mut session = state.session().write().await;
        session.reset();
        (PhaseSnapshot::from_session(&session), session.revision())
    };

    if let Err(err) = state.store().clear_session().await {
        tracing::warn!(error = %err, "failed to clear persisted session snapshot");
    }
    state.notify_sync(revision);
    sse_events::broadcast_phase_changed(state).await;

    snapshot
}

fn build_roster(
    config: &AppConfig,
    inputs: Vec<TeamInput>,
) -> Result<IndexMap<String, Team>, ServiceError> {
    let mut seen_ids = HashSet::new();
    let mut assigned_colors: Vec<TeamColor> = Vec::new();
    let mut roster = IndexMap::with_capacity(inputs.len());

    for input in inputs {
        if !seen_ids.insert(input.id.clone()) {
            return Err(ServiceError::InvalidInput(format!(
                "duplicate team id `{}` detected",
                input.id
            )));
        }

        if input.name.trim().is_empty() {
            return Err(ServiceError::InvalidInput(
                "team name must not be empty".into(),
            ));
        }

        let color = match input.color {
            Some(color) => color.into(),
            None => config.first_unused_color(&assigned_colors),
        };
        assigned_colors.push(color);

        roster.insert(
            input.id,
            Team {
                name: input.name,
                score: input.score.unwrap_or(0),
                color,
            },
        );
    }

    Ok(roster)
}

/// Guard shared by mutating round operations: the roster must exist first.
pub(crate) fn ensure_teams_present(session: &GameSession) -> Result<(), ServiceError> {
    if session.teams().is_empty() {
        return Err(ServiceError::InvalidState(
            "add teams before starting a round".into(),
        ));
    }
    Ok(())
}
