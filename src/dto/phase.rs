use serde::Serialize;
use utoipa::ToSchema;

use crate::state::SessionPhase;

/// Session phase exposed to clients (REST/SSE).
#[derive(Debug, Serialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VisiblePhase {
    /// No teams yet; the game is being set up.
    Setup,
    /// Teams exist and the next round's criteria are being chosen.
    RoundConfiguration,
    /// An example is on screen and the teams are guessing.
    RoundActive,
    /// The solution is visible.
    SolutionRevealed,
    /// A point has been awarded for the current round.
    RoundResolved,
}

impl From<SessionPhase> for VisiblePhase {
    fn from(value: SessionPhase) -> Self {
        match value {
            SessionPhase::Setup => VisiblePhase::Setup,
            SessionPhase::RoundConfiguration => VisiblePhase::RoundConfiguration,
            SessionPhase::RoundActive => VisiblePhase::RoundActive,
            SessionPhase::SolutionRevealed => VisiblePhase::SolutionRevealed,
            SessionPhase::RoundResolved => VisiblePhase::RoundResolved,
        }
    }
}
