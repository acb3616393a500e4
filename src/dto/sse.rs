use serde::Serialize;
use utoipa::ToSchema;

use crate::dto::common::{PhaseSnapshot, TeamSummary};

#[derive(Clone, Debug)]
/// Dispatched payload carried across SSE channels.
pub struct ServerEvent {
    /// Optional event name for the SSE `event:` field.
    pub event: Option<String>,
    /// Pre-serialized payload for the SSE `data:` field.
    pub data: String,
}

impl ServerEvent {
    /// Convenience wrapper that serialises `payload` into the SSE data field.
    pub fn json<E, T>(event: E, payload: &T) -> serde_json::Result<Self>
    where
        E: Into<Option<String>>,
        T: Serialize,
    {
        Ok(Self {
            event: event.into(),
            data: serde_json::to_string(payload)?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
/// Initial metadata sent to an SSE client when it connects.
pub struct Handshake {
    /// Identifier of the SSE stream (`public` or `admin`).
    pub stream: String,
    /// Human-readable message confirming the subscription.
    pub message: String,
    /// Whether the shared session store is currently unusable.
    pub degraded: bool,
}

#[derive(Debug, Serialize, ToSchema)]
/// Token handed to the single admin stream when it connects.
pub struct AdminHandshake {
    /// Token to present in `X-Admin-Token` on mutating requests.
    pub token: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
/// Broadcast whenever the session phase changes.
pub struct PhaseChangedEvent(pub PhaseSnapshot);

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when the roster is replaced.
pub struct TeamsUpdatedEvent {
    /// The new roster, in display order.
    pub teams: Vec<TeamSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when a team is credited with a point.
pub struct ScoreAwardedEvent {
    /// The credited team after the increment.
    pub team: TeamSummary,
    /// Round the point was awarded in.
    pub round_number: u32,
    /// Whole seconds between round start and award.
    pub elapsed_seconds: u64,
}
