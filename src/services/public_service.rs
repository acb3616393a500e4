//! Service helpers that expose read-only projections of the session and the
//! example catalogue.

use crate::{
    catalog::Category,
    dto::{
        catalog::{CategoriesResponse, ExampleDetail, ExampleListResponse, ExampleSummary},
        common::{PhaseSnapshot, teams_to_summaries},
        session::{AnswerHistoryResponse, ScoreboardResponse, SessionView},
    },
    error::ServiceError,
    state::SharedState,
};

/// Return the full read-only projection of the session.
pub async fn get_session(state: &SharedState) -> SessionView {
    state.read_session(SessionView::from_session).await
}

/// Return the current phase snapshot, the same payload the SSE stream pushes.
pub async fn get_phase(state: &SharedState) -> PhaseSnapshot {
    state.read_session(PhaseSnapshot::from_session).await
}

/// Return the current scores in roster order.
pub async fn get_scoreboard(state: &SharedState) -> ScoreboardResponse {
    let teams = state.read_session(teams_to_summaries).await;
    ScoreboardResponse { teams }
}

/// Return every resolved round, oldest first.
pub async fn get_answer_history(state: &SharedState) -> AnswerHistoryResponse {
    let entries = state
        .read_session(|session| {
            session
                .answer_history()
                .iter()
                .map(Into::into)
                .collect()
        })
        .await;
    AnswerHistoryResponse { entries }
}

/// List catalogue examples, optionally narrowed by category and tier.
pub fn list_examples(
    state: &SharedState,
    category: Option<Category>,
    pattern_count: Option<u8>,
) -> ExampleListResponse {
    let examples = state
        .catalog()
        .examples()
        .iter()
        .filter(|example| category.is_none_or(|wanted| example.category == wanted))
        .filter(|example| pattern_count.is_none_or(|wanted| example.pattern_count() == wanted))
        .map(ExampleSummary::from)
        .collect();
    ExampleListResponse { examples }
}

/// Fetch a single example with its full solution material.
pub fn get_example(state: &SharedState, id: &str) -> Result<ExampleDetail, ServiceError> {
    state
        .catalog()
        .get(id)
        .map(Into::into)
        .ok_or_else(|| ServiceError::NotFound(format!("example `{id}` not found")))
}

/// List the fixed category set.
pub fn list_categories() -> CategoriesResponse {
    CategoriesResponse {
        categories: Category::ALL.to_vec(),
    }
}
