use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    catalog::Category,
    dto::{
        catalog::{CategoriesResponse, ExampleDetail, ExampleListResponse},
        common::PhaseSnapshot,
        session::{AnswerHistoryResponse, ScoreboardResponse, SessionView},
    },
    error::AppError,
    services::public_service,
    state::SharedState,
};

/// Read-only endpoints consumed by viewer windows and the library browser.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/session", get(get_session))
        .route("/session/phase", get(get_phase))
        .route("/scoreboard", get(get_scoreboard))
        .route("/history", get(get_history))
        .route("/catalog/examples", get(list_examples))
        .route("/catalog/examples/{id}", get(get_example))
        .route("/catalog/categories", get(list_categories))
}

/// Return the full session projection.
#[utoipa::path(
    get,
    path = "/session",
    tag = "public",
    responses((status = 200, description = "Current session", body = SessionView))
)]
pub async fn get_session(State(state): State<SharedState>) -> Json<SessionView> {
    Json(public_service::get_session(&state).await)
}

/// Return the current phase snapshot.
#[utoipa::path(
    get,
    path = "/session/phase",
    tag = "public",
    responses((status = 200, description = "Current phase", body = PhaseSnapshot))
)]
pub async fn get_phase(State(state): State<SharedState>) -> Json<PhaseSnapshot> {
    Json(public_service::get_phase(&state).await)
}

/// Return the current scores.
#[utoipa::path(
    get,
    path = "/scoreboard",
    tag = "public",
    responses((status = 200, description = "Current scores", body = ScoreboardResponse))
)]
pub async fn get_scoreboard(State(state): State<SharedState>) -> Json<ScoreboardResponse> {
    Json(public_service::get_scoreboard(&state).await)
}

/// Return every resolved round.
#[utoipa::path(
    get,
    path = "/history",
    tag = "public",
    responses((status = 200, description = "Answer history", body = AnswerHistoryResponse))
)]
pub async fn get_history(State(state): State<SharedState>) -> Json<AnswerHistoryResponse> {
    Json(public_service::get_answer_history(&state).await)
}

/// Query filters accepted by the example listing.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ExampleListQuery {
    /// Narrow to one category.
    #[serde(default)]
    pub category: Option<Category>,
    /// Narrow to one difficulty tier.
    #[serde(default)]
    pub pattern_count: Option<u8>,
}

/// List catalogue examples.
#[utoipa::path(
    get,
    path = "/catalog/examples",
    tag = "public",
    params(ExampleListQuery),
    responses((status = 200, description = "Matching examples", body = ExampleListResponse))
)]
pub async fn list_examples(
    State(state): State<SharedState>,
    Query(query): Query<ExampleListQuery>,
) -> Json<ExampleListResponse> {
    Json(public_service::list_examples(
        &state,
        query.category,
        query.pattern_count,
    ))
}

/// Fetch one example with its solution material.
#[utoipa::path(
    get,
    path = "/catalog/examples/{id}",
    tag = "public",
    params(("id" = String, Path, description = "Identifier of the example")),
    responses((status = 200, description = "Example detail", body = ExampleDetail))
)]
pub async fn get_example(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<ExampleDetail>, AppError> {
    let detail = public_service::get_example(&state, &id)?;
    Ok(Json(detail))
}

/// List the fixed category set.
#[utoipa::path(
    get,
    path = "/catalog/categories",
    tag = "public",
    responses((status = 200, description = "Available categories", body = CategoriesResponse))
)]
pub async fn list_categories(State(_state): State<SharedState>) -> Json<CategoriesResponse> {
    Json(public_service::list_categories())
}
