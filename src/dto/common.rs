use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::{
        catalog::{ExamplePrompt, ExampleSolution},
        format_timestamp,
        phase::VisiblePhase,
    },
    state::GameSession,
    state::session::{Team, TeamColor, WinnerSnapshot},
};

/// HSV color carried in requests and responses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct TeamColorDto {
    /// Hue in degrees.
    pub h: f32,
    /// Saturation in `[0, 1]`.
    pub s: f32,
    /// Value in `[0, 1]`.
    pub v: f32,
}

impl From<TeamColor> for TeamColorDto {
    fn from(value: TeamColor) -> Self {
        Self {
            h: value.h,
            s: value.s,
            v: value.v,
        }
    }
}

impl From<TeamColorDto> for TeamColor {
    fn from(value: TeamColorDto) -> Self {
        Self {
            h: value.h,
            s: value.s,
            v: value.v,
        }
    }
}

#[derive(Clone, Debug, Serialize, ToSchema)]
/// Public projection of a team exposed to REST/SSE clients.
pub struct TeamSummary {
    /// Team identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Current score.
    pub score: u32,
    /// Display color.
    pub color: TeamColorDto,
}

impl From<(String, Team)> for TeamSummary {
    fn from((id, team): (String, Team)) -> Self {
        Self {
            id,
            name: team.name,
            score: team.score,
            color: team.color.into(),
        }
    }
}

impl From<&WinnerSnapshot> for TeamSummary {
    fn from(winner: &WinnerSnapshot) -> Self {
        Self {
            id: winner.id.clone(),
            name: winner.name.clone(),
            score: winner.score,
            color: winner.color.into(),
        }
    }
}

/// Shared snapshot describing the current phase and the context every window
/// needs to render it.
#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct PhaseSnapshot {
    /// The observable phase.
    pub phase: VisiblePhase,
    /// Current round number.
    pub round_number: u32,
    /// Whether the timer display is paused.
    pub paused: bool,
    /// Scores in roster order, always present so viewers can keep the score
    /// strip on screen.
    pub scoreboard: Vec<TeamSummary>,
    /// Present while a round is active: the code the teams are guessing on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<ExamplePrompt>,
    /// Present once the solution has been revealed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<ExampleSolution>,
    /// Present while a round is active: when its timer started (RFC 3339).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_started_at: Option<String>,
}

impl PhaseSnapshot {
    /// Project the session into the snapshot broadcast on every change.
    pub fn from_session(session: &GameSession) -> Self {
        let round = session.active_round();
        Self {
            phase: session.phase().into(),
            round_number: session.round_number(),
            paused: round.is_some_and(|r| r.paused),
            scoreboard: teams_to_summaries(session),
            example: round.map(|r| (&r.example).into()),
            solution: round
                .filter(|r| r.solution_revealed)
                .map(|r| (&r.example).into()),
            round_started_at: round.map(|r| format_timestamp(r.started_at)),
        }
    }
}

pub(crate) fn teams_to_summaries(session: &GameSession) -> Vec<TeamSummary> {
    session
        .teams()
        .iter()
        .map(|(id, team)| (id.clone(), team.clone()).into())
        .collect()
}
