use time::OffsetDateTime;

use crate::{
    catalog::{CategoryFilter, selector},
    dto::{
        common::PhaseSnapshot,
        session::{AwardPointRequest, AwardPointResponse, RoundView, StartRoundRequest,
            StartRoundResponse},
        sse::ScoreAwardedEvent,
    },
    error::ServiceError,
    services::{game_service::ensure_teams_present, sse_events},
    state::{SharedState, transitions::apply_transition},
};

/// Draw an unused example matching the filters and put it on screen.
///
/// Filters supplied in the request are stored on the session first, so the
/// round configuration visible to every window matches what was drawn. An
/// exhausted pool leaves the session in round configuration and returns the
/// informational variant.
pub async fn start_round(
    state: &SharedState,
    request: StartRoundRequest,
) -> Result<StartRoundResponse, ServiceError> {
    let catalog = state.catalog();
    let now = OffsetDateTime::now_utc();

    let outcome = apply_transition(state, move |session| {
        ensure_teams_present(session)?;

        if request.category.is_some() {
            session.set_selected_category(request.category);
        }
        if request.pattern_count.is_some() {
            session.set_selected_pattern_count(request.pattern_count);
        }

        let Some(pattern_count) = session.selected_pattern_count() else {
            return Err(ServiceError::InvalidInput(
                "select a pattern count before starting a round".into(),
            ));
        };
        let category = session
            .selected_category()
            .and_then(CategoryFilter::category);

        let Some(example) = selector::select_random_example(
            catalog,
            pattern_count,
            category,
            session.used_example_ids(),
        )
        .cloned() else {
            return Ok(None);
        };

        session.set_current_example(Some(example), now);
        Ok(session.active_round().map(RoundView::from))
    })
    .await?;

    Ok(match outcome {
        Some(round) => StartRoundResponse::started(round),
        None => StartRoundResponse::unavailable(),
    })
}

/// Make the solution of the running round visible. Revealing twice, or with
/// no round on screen, is a silent no-op.
pub async fn reveal_solution(state: &SharedState) -> PhaseSnapshot {
    apply_transition(state, |session| {
        session.reveal_solution();
        PhaseSnapshot::from_session(session)
    })
    .await
}

/// Credit a team for the current round.
///
/// An unknown team is a 404 before anything is dispatched. Awarding without
/// an active round is the documented stale no-op: reported as not applied,
/// never an error.
pub async fn award_point(
    state: &SharedState,
    request: AwardPointRequest,
) -> Result<AwardPointResponse, ServiceError> {
    let now = OffsetDateTime::now_utc();
    let team_id = request.team_id;

    let outcome = apply_transition(state, move |session| {
        if !session.teams().contains_key(&team_id) {
            return Err(ServiceError::NotFound(format!(
                "team `{team_id}` not found"
            )));
        }

        Ok(session.award_point(&team_id, now).and_then(|record| {
            record.winner.as_ref().map(|winner| ScoreAwardedEvent {
                team: winner.into(),
                round_number: record.round_number,
                elapsed_seconds: record.elapsed_seconds,
            })
        }))
    })
    .await?;

    Ok(match outcome {
        Some(event) => {
            let response = AwardPointResponse {
                applied: true,
                team: Some(event.team.clone()),
                elapsed_seconds: Some(event.elapsed_seconds),
            };
            sse_events::broadcast_score_awarded(state, event);
            response
        }
        None => AwardPointResponse {
            applied: false,
            team: None,
            elapsed_seconds: None,
        },
    })
}

/// Close the current round and return to round configuration.
pub async fn next_round(state: &SharedState) -> PhaseSnapshot {
    apply_transition(state, |session| {
        session.next_round();
        PhaseSnapshot::from_session(session)
    })
    .await
}
