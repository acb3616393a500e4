use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::catalog::{CategoryFilter, PatternExample};

/// Representation of a team persisted in the shared session slot, keyed by the
/// team id in [`SessionRecord::teams`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamEntity {
    /// Display name chosen for the team.
    pub name: String,
    /// Current score for the team.
    pub score: u32,
    /// HSV color assigned to the team.
    pub color: TeamColorEntity,
}

/// HSV color triple persisted with a team.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TeamColorEntity {
    /// Hue in degrees.
    pub h: f32,
    /// Saturation in `[0, 1]`.
    pub s: f32,
    /// Value in `[0, 1]`.
    pub v: f32,
}

impl PartialEq for TeamColorEntity {
    fn eq(&self, other: &Self) -> bool {
        self.h.to_bits() == other.h.to_bits()
            && self.s.to_bits() == other.s.to_bits()
            && self.v.to_bits() == other.v.to_bits()
    }
}

impl Eq for TeamColorEntity {}

/// Snapshot of the winning team captured when a point was awarded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WinnerEntity {
    /// Identifier of the winning team.
    pub id: String,
    /// Display name at award time.
    pub name: String,
    /// Score after the increment.
    pub score: u32,
    /// Color at award time.
    pub color: TeamColorEntity,
}

/// One resolved round persisted in the answer history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerEntity {
    /// Round the point was awarded in.
    pub round_number: u32,
    /// The example that was played.
    pub example: PatternExample,
    /// Winning team snapshot, if any team was credited.
    pub winner: Option<WinnerEntity>,
    /// Wall-clock timestamp of the award, unix milliseconds.
    pub answered_at_ms: i64,
    /// Whole seconds elapsed between round start and award.
    pub elapsed_seconds: u64,
}

/// Wire snapshot of the whole session, written to and read from the shared
/// store as one unit.
///
/// Every field is optional so the same shape doubles as the hydration patch: a
/// field absent from the payload never overwrites local state. Full snapshots
/// produced by [`crate::state::session::GameSession::to_record`] populate every
/// field. Nullable fields use double options to distinguish "absent" from
/// "explicitly cleared".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionRecord {
    /// Instance that produced this snapshot; hydration listeners skip their
    /// own writes.
    pub origin: Option<Uuid>,
    /// Session revision at write time, used to suppress duplicate hydrations.
    pub revision: Option<u64>,
    /// Teams keyed by id, in roster order.
    pub teams: Option<IndexMap<String, TeamEntity>>,
    /// Current round number.
    pub round_number: Option<u32>,
    /// Ids of examples already played, oldest first and duplicate-free.
    pub used_example_ids: Option<Vec<String>>,
    /// Example currently on screen, `null` when no round is active.
    #[serde(
        with = "serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub current_example: Option<Option<PatternExample>>,
    /// Whether the solution of the current example is visible.
    pub solution_revealed: Option<bool>,
    /// Round start timestamp, unix milliseconds, `null` when no round is
    /// active.
    #[serde(
        with = "serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub round_start_ms: Option<Option<i64>>,
    /// Whether the timer display is paused.
    pub is_paused: Option<bool>,
    /// Category filter chosen for the next draw, `null` when unset.
    #[serde(
        with = "serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub selected_category: Option<Option<CategoryFilter>>,
    /// Difficulty tier chosen for the next draw, `null` when unset.
    #[serde(
        with = "serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub selected_pattern_count: Option<Option<u8>>,
    /// Resolved rounds, oldest first.
    pub answer_history: Option<Vec<AnswerEntity>>,
}

/// Convert a unix-millisecond timestamp back to a wall-clock time, rejecting
/// out-of-range values.
pub fn timestamp_from_ms(ms: i64) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(ms) * 1_000_000).ok()
}

/// Convert a wall-clock time to unix milliseconds.
pub fn timestamp_to_ms(timestamp: OffsetDateTime) -> i64 {
    (timestamp.unix_timestamp_nanos() / 1_000_000) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_round_trip_at_millisecond_precision() {
        let now = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        let ms = timestamp_to_ms(now);
        assert_eq!(timestamp_from_ms(ms), Some(now));
    }

    #[test]
    fn absent_and_null_fields_decode_differently() {
        let record: SessionRecord = serde_json::from_str(r#"{"current_example": null}"#).unwrap();
        assert_eq!(record.current_example, Some(None));
        assert_eq!(record.round_start_ms, None);
        assert_eq!(record.teams, None);
    }

    #[test]
    fn empty_object_decodes_to_an_all_absent_patch() {
        let record: SessionRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record, SessionRecord::default());
    }

    #[test]
    fn garbage_fails_to_decode() {
        assert!(serde_json::from_str::<SessionRecord>("not json").is_err());
        assert!(serde_json::from_str::<SessionRecord>(r#"{"round_number": "one"}"#).is_err());
    }
}
