use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::{
    catalog::CategoryFilter,
    dto::{
        catalog::{ExamplePrompt, ExampleSolution, ExampleSummary},
        common::{TeamColorDto, TeamSummary, teams_to_summaries},
        format_timestamp,
        phase::VisiblePhase,
        validation::validate_team_id,
    },
    state::GameSession,
    state::session::{ActiveRound, AnswerRecord},
};

/// Payload replacing the team roster wholesale.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SetTeamsRequest {
    /// The new roster, in display order.
    #[validate(nested)]
    pub teams: Vec<TeamInput>,
}

/// Incoming team definition.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TeamInput {
    /// Team identifier, unique within the roster.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Carried-over score; defaults to zero for a new roster.
    #[serde(default)]
    pub score: Option<u32>,
    /// Optional HSV color. If omitted, the backend picks the first unused
    /// color from the configured colors set.
    #[serde(default)]
    pub color: Option<TeamColorDto>,
}

impl Validate for TeamInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_team_id(&self.id) {
            errors.add("id", e);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Payload replacing both draw filters at once. Omitting a field clears it,
/// which is how picking a category resets the difficulty tier.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SetFiltersRequest {
    /// Category constraint, absent to clear.
    #[serde(default)]
    pub category: Option<CategoryFilter>,
    /// Difficulty tier (1-3), absent to clear.
    #[serde(default)]
    #[validate(range(min = 1, max = 3))]
    pub pattern_count: Option<u8>,
}

/// Payload starting a round, optionally overriding the stored filters.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct StartRoundRequest {
    /// Category constraint to store and use for this draw.
    #[serde(default)]
    pub category: Option<CategoryFilter>,
    /// Difficulty tier (1-3) to store and use for this draw.
    #[serde(default)]
    #[validate(range(min = 1, max = 3))]
    pub pattern_count: Option<u8>,
}

/// Result of a round start attempt.
///
/// An empty candidate pool is not an error: `started` is false and `message`
/// carries the notice to show, while the session stays in round
/// configuration.
#[derive(Debug, Serialize, ToSchema)]
pub struct StartRoundResponse {
    /// Whether an example was drawn and the round began.
    pub started: bool,
    /// User-facing notice when no example was available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The running round, when one was started.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<RoundView>,
}

impl StartRoundResponse {
    /// Build the "round started" variant.
    pub fn started(round: RoundView) -> Self {
        Self {
            started: true,
            message: None,
            round: Some(round),
        }
    }

    /// Build the informational "nothing left to draw" variant.
    pub fn unavailable() -> Self {
        Self {
            started: false,
            message: Some(
                "No example available for the selected category and pattern count".into(),
            ),
            round: None,
        }
    }
}

/// Projection of the running round.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RoundView {
    /// The code on screen.
    pub example: ExamplePrompt,
    /// When the round timer started (RFC 3339).
    pub started_at: String,
    /// Whether the solution is visible.
    pub solution_revealed: bool,
    /// Whether the timer display is paused.
    pub paused: bool,
    /// The answer material, present once revealed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<ExampleSolution>,
}

impl From<&ActiveRound> for RoundView {
    fn from(round: &ActiveRound) -> Self {
        Self {
            example: (&round.example).into(),
            started_at: format_timestamp(round.started_at),
            solution_revealed: round.solution_revealed,
            paused: round.paused,
            solution: round
                .solution_revealed
                .then(|| (&round.example).into()),
        }
    }
}

/// Payload crediting a team for the current round.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AwardPointRequest {
    /// Identifier of the team to credit.
    pub team_id: String,
}

/// Result of an award attempt. `applied` is false for the documented stale
/// no-op (no active round), which is reported but never an error.
#[derive(Debug, Serialize, ToSchema)]
pub struct AwardPointResponse {
    /// Whether a point was credited.
    pub applied: bool,
    /// The credited team after the increment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<TeamSummary>,
    /// Whole seconds between round start and award.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_seconds: Option<u64>,
}

/// Full read-only projection of the session.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionView {
    /// The observable phase.
    pub phase: VisiblePhase,
    /// Current round number.
    pub round_number: u32,
    /// Teams in roster order.
    pub teams: Vec<TeamSummary>,
    /// Category filter chosen for the next draw.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_category: Option<CategoryFilter>,
    /// Difficulty tier chosen for the next draw.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_pattern_count: Option<u8>,
    /// Ids of examples already played this session.
    pub used_example_ids: Vec<String>,
    /// The running round, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<RoundView>,
    /// Number of resolved rounds so far.
    pub answers_recorded: usize,
}

impl SessionView {
    /// Project the whole session for the read-only endpoint.
    pub fn from_session(session: &GameSession) -> Self {
        Self {
            phase: session.phase().into(),
            round_number: session.round_number(),
            teams: teams_to_summaries(session),
            selected_category: session.selected_category(),
            selected_pattern_count: session.selected_pattern_count(),
            used_example_ids: session.used_example_ids().to_vec(),
            round: session.active_round().map(Into::into),
            answers_recorded: session.answer_history().len(),
        }
    }
}

/// One resolved round in the history listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct AnswerEntryView {
    /// Round the point was awarded in.
    pub round_number: u32,
    /// The example that was played.
    pub example: ExampleSummary,
    /// Winning team snapshot, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<TeamSummary>,
    /// When the point was awarded (RFC 3339).
    pub answered_at: String,
    /// Whole seconds between round start and award.
    pub elapsed_seconds: u64,
}

impl From<&AnswerRecord> for AnswerEntryView {
    fn from(record: &AnswerRecord) -> Self {
        Self {
            round_number: record.round_number,
            example: (&record.example).into(),
            winner: record.winner.as_ref().map(Into::into),
            answered_at: format_timestamp(record.answered_at),
            elapsed_seconds: record.elapsed_seconds,
        }
    }
}

/// Response listing every resolved round, oldest first.
#[derive(Debug, Serialize, ToSchema)]
pub struct AnswerHistoryResponse {
    /// The resolved rounds.
    pub entries: Vec<AnswerEntryView>,
}

/// Response carrying the current scores.
#[derive(Debug, Serialize, ToSchema)]
pub struct ScoreboardResponse {
    /// Teams in roster order.
    pub teams: Vec<TeamSummary>,
}
