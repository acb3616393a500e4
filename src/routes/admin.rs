use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::{post, put},
};
use axum_valid::Valid;

use crate::{
    dto::{
        common::{PhaseSnapshot, TeamSummary},
        session::{
            AwardPointRequest, AwardPointResponse, SessionView, SetFiltersRequest,
            SetTeamsRequest, StartRoundRequest, StartRoundResponse,
        },
    },
    error::AppError,
    services::{game_service, round_service},
    state::SharedState,
};

const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Game-master endpoints driving the session. Guarded by the admin token so
/// exactly one window ever issues mutating transitions.
pub fn router(state: SharedState) -> Router<SharedState> {
    Router::new()
        .route("/admin/session/teams", put(set_teams))
        .route("/admin/session/filters", put(set_filters))
        .route("/admin/session/pause", post(toggle_pause))
        .route("/admin/session/reset", post(reset_session))
        .route("/admin/rounds", post(start_round))
        .route("/admin/rounds/reveal", post(reveal_solution))
        .route("/admin/rounds/award", post(award_point))
        .route("/admin/rounds/next", post(next_round))
        .route_layer(middleware::from_fn_with_state(state, require_admin_token))
}

/// Replace the team roster.
#[utoipa::path(
    put,
    path = "/admin/session/teams",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Admin token issued by the /sse/admin stream")),
    request_body = SetTeamsRequest,
    responses((status = 200, description = "Roster replaced", body = [TeamSummary]))
)]
pub async fn set_teams(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<SetTeamsRequest>>,
) -> Result<Json<Vec<TeamSummary>>, AppError> {
    let roster = game_service::set_teams(&state, payload).await?;
    Ok(Json(roster))
}

/// Replace the draw filters for the next round.
#[utoipa::path(
    put,
    path = "/admin/session/filters",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Admin token issued by the /sse/admin stream")),
    request_body = SetFiltersRequest,
    responses((status = 200, description = "Filters replaced", body = SessionView))
)]
pub async fn set_filters(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<SetFiltersRequest>>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(game_service::set_filters(&state, payload).await))
}

/// Pause or resume the round timer display.
#[utoipa::path(
    post,
    path = "/admin/session/pause",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Admin token issued by the /sse/admin stream")),
    responses((status = 200, description = "Pause flag toggled", body = PhaseSnapshot))
)]
pub async fn toggle_pause(
    State(state): State<SharedState>,
) -> Result<Json<PhaseSnapshot>, AppError> {
    Ok(Json(game_service::toggle_pause(&state).await))
}

/// Reset the session and clear the persisted snapshot.
#[utoipa::path(
    post,
    path = "/admin/session/reset",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Admin token issued by the /sse/admin stream")),
    responses((status = 200, description = "Session reset", body = PhaseSnapshot))
)]
pub async fn reset_session(
    State(state): State<SharedState>,
) -> Result<Json<PhaseSnapshot>, AppError> {
    Ok(Json(game_service::reset_session(&state).await))
}

/// Draw an example and start the round.
#[utoipa::path(
    post,
    path = "/admin/rounds",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Admin token issued by the /sse/admin stream")),
    request_body = StartRoundRequest,
    responses((status = 200, description = "Round started, or an informational notice when no example was available", body = StartRoundResponse))
)]
pub async fn start_round(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<StartRoundRequest>>,
) -> Result<Json<StartRoundResponse>, AppError> {
    let response = round_service::start_round(&state, payload).await?;
    Ok(Json(response))
}

/// Reveal the solution of the running round.
#[utoipa::path(
    post,
    path = "/admin/rounds/reveal",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Admin token issued by the /sse/admin stream")),
    responses((status = 200, description = "Solution revealed", body = PhaseSnapshot))
)]
pub async fn reveal_solution(
    State(state): State<SharedState>,
) -> Result<Json<PhaseSnapshot>, AppError> {
    Ok(Json(round_service::reveal_solution(&state).await))
}

/// Credit a team for the current round.
#[utoipa::path(
    post,
    path = "/admin/rounds/award",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Admin token issued by the /sse/admin stream")),
    request_body = AwardPointRequest,
    responses((status = 200, description = "Award outcome", body = AwardPointResponse))
)]
pub async fn award_point(
    State(state): State<SharedState>,
    Json(payload): Json<AwardPointRequest>,
) -> Result<Json<AwardPointResponse>, AppError> {
    let response = round_service::award_point(&state, payload).await?;
    Ok(Json(response))
}

/// Close the current round and return to round configuration.
#[utoipa::path(
    post,
    path = "/admin/rounds/next",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Admin token issued by the /sse/admin stream")),
    responses((status = 200, description = "Next round prepared", body = PhaseSnapshot))
)]
pub async fn next_round(
    State(state): State<SharedState>,
) -> Result<Json<PhaseSnapshot>, AppError> {
    Ok(Json(round_service::next_round(&state).await))
}

async fn require_admin_token(
    State(state): State<SharedState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let provided = req
        .headers()
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_owned())
        .ok_or_else(|| {
            AppError::Unauthorized("missing admin token header `X-Admin-Token`".into())
        })?;

    let expected = {
        let guard = state.admin_token().lock().await;
        guard.clone()
    };

    match expected {
        Some(token) if token == provided => Ok(next.run(req).await),
        Some(_) => Err(AppError::Unauthorized("invalid admin token".into())),
        None => Err(AppError::Unauthorized(
            "admin SSE stream not initialised yet".into(),
        )),
    }
}
