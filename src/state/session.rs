use std::collections::HashSet;

use indexmap::IndexMap;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::catalog::{CategoryFilter, PatternExample};
use crate::store::models::{
    AnswerEntity, SessionRecord, TeamColorEntity, TeamEntity, WinnerEntity, timestamp_from_ms,
    timestamp_to_ms,
};

/// Display color assigned to a team (HSV).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamColor {
    /// Hue in degrees.
    pub h: f32,
    /// Saturation in `[0, 1]`.
    pub s: f32,
    /// Value in `[0, 1]`.
    pub v: f32,
}

/// A competing team. The id lives as the key of the roster map.
#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    /// Display name chosen for the team.
    pub name: String,
    /// Current score. Only ever incremented; no transition lowers it.
    pub score: u32,
    /// Display color, purely cosmetic.
    pub color: TeamColor,
}

/// Everything tracked while an example is on screen.
///
/// Bundling these fields behind one `Option` makes the illegal flag
/// combinations (a revealed solution without an example, a running timer
/// without a round) unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveRound {
    /// The example being played.
    pub example: PatternExample,
    /// Wall-clock time the example was put on screen.
    pub started_at: OffsetDateTime,
    /// Whether the solution is visible to the teams.
    pub solution_revealed: bool,
    /// Whether the timer display is paused.
    pub paused: bool,
}

/// Snapshot of the winning team at the moment a point was awarded.
#[derive(Debug, Clone, PartialEq)]
pub struct WinnerSnapshot {
    /// Identifier of the winning team.
    pub id: String,
    /// Display name at award time.
    pub name: String,
    /// Score after the increment.
    pub score: u32,
    /// Color at award time.
    pub color: TeamColor,
}

/// One resolved round, appended when a point is awarded and never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerRecord {
    /// Round the point was awarded in.
    pub round_number: u32,
    /// The example that was played.
    pub example: PatternExample,
    /// Winning team snapshot, if any team was credited.
    pub winner: Option<WinnerSnapshot>,
    /// Wall-clock timestamp of the award.
    pub answered_at: OffsetDateTime,
    /// Whole seconds between round start and award, clamped at zero.
    pub elapsed_seconds: u64,
}

/// Observable phases of a session, derived from the typed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No teams yet; the game is being set up.
    Setup,
    /// Teams exist and the next round's criteria are being chosen.
    RoundConfiguration,
    /// An example is on screen and the teams are guessing.
    RoundActive,
    /// The solution is visible; scoring is now legal.
    SolutionRevealed,
    /// A point has been awarded for the current round.
    RoundResolved,
}

/// The session state shared between the game-master window and every viewer.
///
/// All transitions are total: payloads that cannot be applied leave the state
/// untouched instead of failing. The `revision` counter increments on every
/// effective mutation and lets the sync layer suppress duplicate hydrations.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    teams: IndexMap<String, Team>,
    round_number: u32,
    used_example_ids: Vec<String>,
    active_round: Option<ActiveRound>,
    selected_category: Option<CategoryFilter>,
    selected_pattern_count: Option<u8>,
    answer_history: Vec<AnswerRecord>,
    revision: u64,
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            teams: IndexMap::new(),
            round_number: 1,
            used_example_ids: Vec::new(),
            active_round: None,
            selected_category: None,
            selected_pattern_count: None,
            answer_history: Vec::new(),
            revision: 0,
        }
    }
}

impl GameSession {
    /// Create a fresh session in the setup phase, round 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Teams keyed by id, in roster order.
    pub fn teams(&self) -> &IndexMap<String, Team> {
        &self.teams
    }

    /// Current round number, starting at 1.
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    /// Ids of examples already played this session, oldest first.
    pub fn used_example_ids(&self) -> &[String] {
        &self.used_example_ids
    }

    /// The round currently on screen, if any.
    pub fn active_round(&self) -> Option<&ActiveRound> {
        self.active_round.as_ref()
    }

    /// Category filter chosen for the next draw.
    pub fn selected_category(&self) -> Option<CategoryFilter> {
        self.selected_category
    }

    /// Difficulty tier chosen for the next draw.
    pub fn selected_pattern_count(&self) -> Option<u8> {
        self.selected_pattern_count
    }

    /// Resolved rounds, oldest first.
    pub fn answer_history(&self) -> &[AnswerRecord] {
        &self.answer_history
    }

    /// Mutation counter; increments on every effective transition.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Derive the observable phase from the state.
    pub fn phase(&self) -> SessionPhase {
        match &self.active_round {
            None if self.teams.is_empty() => SessionPhase::Setup,
            None => SessionPhase::RoundConfiguration,
            Some(round) if !round.solution_revealed => SessionPhase::RoundActive,
            Some(_) if self.current_round_resolved() => SessionPhase::RoundResolved,
            Some(_) => SessionPhase::SolutionRevealed,
        }
    }

    /// Whether a point has already been awarded for the current round.
    fn current_round_resolved(&self) -> bool {
        self.answer_history
            .last()
            .is_some_and(|record| record.round_number == self.round_number)
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    /// Replace the roster wholesale. Used for initial setup and for
    /// cross-window reconciliation alike.
    pub fn set_teams(&mut self, teams: IndexMap<String, Team>) {
        self.teams = teams;
        self.touch();
    }

    /// Put an example on screen, or clear the current one.
    ///
    /// Setting an example records its id as used (at most once, even when the
    /// same example is set twice), restarts the round timer, hides the
    /// solution, and unpauses.
    pub fn set_current_example(&mut self, example: Option<PatternExample>, now: OffsetDateTime) {
        match example {
            Some(example) => {
                if !self.used_example_ids.iter().any(|id| *id == example.id) {
                    self.used_example_ids.push(example.id.clone());
                }
                self.active_round = Some(ActiveRound {
                    example,
                    started_at: now,
                    solution_revealed: false,
                    paused: false,
                });
            }
            None => self.active_round = None,
        }
        self.touch();
    }

    /// Set or clear the category filter for the next draw.
    pub fn set_selected_category(&mut self, filter: Option<CategoryFilter>) {
        self.selected_category = filter;
        self.touch();
    }

    /// Set or clear the difficulty tier for the next draw.
    pub fn set_selected_pattern_count(&mut self, count: Option<u8>) {
        self.selected_pattern_count = count;
        self.touch();
    }

    /// Make the solution visible. Returns `false` (and changes nothing) when
    /// no round is active or the solution is already showing.
    pub fn reveal_solution(&mut self) -> bool {
        match &mut self.active_round {
            Some(round) if !round.solution_revealed => {
                round.solution_revealed = true;
                self.touch();
                true
            }
            _ => false,
        }
    }

    /// Credit one point to a team and append the answer record, capturing a
    /// detached snapshot of the team after the increment.
    ///
    /// A silent no-op (returning `None`) when no round is active or the team
    /// id is unknown. There is deliberately no guard against awarding the same
    /// round twice: calling this twice credits two points and appends two
    /// records, reproducing the long-standing behavior the game masters rely
    /// on until a product decision says otherwise.
    pub fn award_point(&mut self, team_id: &str, now: OffsetDateTime) -> Option<&AnswerRecord> {
        let (example, elapsed_seconds) = match &self.active_round {
            Some(round) => (
                round.example.clone(),
                (now - round.started_at).whole_seconds().max(0) as u64,
            ),
            None => return None,
        };

        let team = self.teams.get_mut(team_id)?;
        team.score += 1;
        let winner = WinnerSnapshot {
            id: team_id.to_owned(),
            name: team.name.clone(),
            score: team.score,
            color: team.color,
        };

        self.answer_history.push(AnswerRecord {
            round_number: self.round_number,
            example,
            winner: Some(winner),
            answered_at: now,
            elapsed_seconds,
        });
        self.touch();
        self.answer_history.last()
    }

    /// Advance to the next round: bump the counter and clear the current
    /// example, both draw filters, and with them the reveal and pause flags.
    pub fn next_round(&mut self) {
        self.round_number += 1;
        self.active_round = None;
        self.selected_category = None;
        self.selected_pattern_count = None;
        self.touch();
    }

    /// Flip the pause flag of the active round; a no-op without one. Returns
    /// the new flag when a round is active.
    pub fn toggle_pause(&mut self) -> Option<bool> {
        let round = self.active_round.as_mut()?;
        round.paused = !round.paused;
        let paused = round.paused;
        self.touch();
        Some(paused)
    }

    /// Return to the initial state. The revision keeps counting so observers
    /// can tell the reset apart from their last applied snapshot.
    pub fn reset(&mut self) {
        let revision = self.revision;
        *self = Self::default();
        self.revision = revision + 1;
    }

    /// Produce the full wire snapshot of this session, stamped with the
    /// writing instance.
    pub fn to_record(&self, origin: Uuid) -> SessionRecord {
        SessionRecord {
            origin: Some(origin),
            revision: Some(self.revision),
            teams: Some(
                self.teams
                    .iter()
                    .map(|(id, team)| (id.clone(), team.clone().into()))
                    .collect(),
            ),
            round_number: Some(self.round_number),
            used_example_ids: Some(self.used_example_ids.clone()),
            current_example: Some(self.active_round.as_ref().map(|r| r.example.clone())),
            solution_revealed: Some(
                self.active_round
                    .as_ref()
                    .is_some_and(|r| r.solution_revealed),
            ),
            round_start_ms: Some(
                self.active_round
                    .as_ref()
                    .map(|r| timestamp_to_ms(r.started_at)),
            ),
            is_paused: Some(self.active_round.as_ref().is_some_and(|r| r.paused)),
            selected_category: Some(self.selected_category),
            selected_pattern_count: Some(self.selected_pattern_count),
            answer_history: Some(
                self.answer_history
                    .iter()
                    .cloned()
                    .map(Into::into)
                    .collect(),
            ),
        }
    }

    /// Merge externally-sourced fields into this session.
    ///
    /// A shallow merge: fields absent from the record stay untouched. The
    /// used-id list is de-duplicated on the way in. The round cluster is
    /// normalized back into typed form; a record claiming an example without a
    /// start timestamp violates the timer invariant and is dropped to "no
    /// active round" rather than propagated.
    ///
    /// Only the sync listener calls this, and only for snapshots produced by
    /// another instance; the producing instance already holds fresher state.
    pub fn hydrate(&mut self, record: SessionRecord) {
        if let Some(teams) = record.teams {
            self.teams = teams
                .into_iter()
                .map(|(id, entity)| (id, entity.into()))
                .collect();
        }
        if let Some(round_number) = record.round_number {
            self.round_number = round_number;
        }
        if let Some(ids) = record.used_example_ids {
            self.used_example_ids = dedup_ids(ids);
        }

        match record.current_example {
            Some(Some(example)) => {
                let started_at = record
                    .round_start_ms
                    .flatten()
                    .and_then(timestamp_from_ms)
                    .or_else(|| self.active_round.as_ref().map(|r| r.started_at));
                self.active_round = started_at.map(|started_at| ActiveRound {
                    example,
                    started_at,
                    solution_revealed: record.solution_revealed.unwrap_or(false),
                    paused: record.is_paused.unwrap_or(false),
                });
            }
            Some(None) => self.active_round = None,
            None => {
                if let Some(round) = &mut self.active_round {
                    if let Some(revealed) = record.solution_revealed {
                        round.solution_revealed = revealed;
                    }
                    if let Some(paused) = record.is_paused {
                        round.paused = paused;
                    }
                    if let Some(Some(ms)) = record.round_start_ms
                        && let Some(started_at) = timestamp_from_ms(ms)
                    {
                        round.started_at = started_at;
                    }
                }
            }
        }

        if let Some(filter) = record.selected_category {
            self.selected_category = filter;
        }
        if let Some(count) = record.selected_pattern_count {
            self.selected_pattern_count = count;
        }
        if let Some(history) = record.answer_history {
            self.answer_history = history.into_iter().map(Into::into).collect();
        }
        if let Some(revision) = record.revision {
            self.revision = revision;
        }
    }
}

fn dedup_ids(ids: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.into_iter()
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

impl From<TeamColorEntity> for TeamColor {
    fn from(value: TeamColorEntity) -> Self {
        Self {
            h: value.h,
            s: value.s,
            v: value.v,
        }
    }
}

impl From<TeamColor> for TeamColorEntity {
    fn from(value: TeamColor) -> Self {
        Self {
            h: value.h,
            s: value.s,
            v: value.v,
        }
    }
}

impl From<TeamEntity> for Team {
    fn from(value: TeamEntity) -> Self {
        Self {
            name: value.name,
            score: value.score,
            color: value.color.into(),
        }
    }
}

impl From<Team> for TeamEntity {
    fn from(value: Team) -> Self {
        Self {
            name: value.name,
            score: value.score,
            color: value.color.into(),
        }
    }
}

impl From<WinnerEntity> for WinnerSnapshot {
    fn from(value: WinnerEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            score: value.score,
            color: value.color.into(),
        }
    }
}

impl From<WinnerSnapshot> for WinnerEntity {
    fn from(value: WinnerSnapshot) -> Self {
        Self {
            id: value.id,
            name: value.name,
            score: value.score,
            color: value.color.into(),
        }
    }
}

impl From<AnswerEntity> for AnswerRecord {
    fn from(value: AnswerEntity) -> Self {
        Self {
            round_number: value.round_number,
            example: value.example,
            winner: value.winner.map(Into::into),
            answered_at: timestamp_from_ms(value.answered_at_ms)
                .unwrap_or(OffsetDateTime::UNIX_EPOCH),
            elapsed_seconds: value.elapsed_seconds,
        }
    }
}

impl From<AnswerRecord> for AnswerEntity {
    fn from(value: AnswerRecord) -> Self {
        Self {
            round_number: value.round_number,
            example: value.example,
            winner: value.winner.map(Into::into),
            answered_at_ms: timestamp_to_ms(value.answered_at),
            elapsed_seconds: value.elapsed_seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;

    fn example(id: &str) -> PatternExample {
        PatternExample {
            id: id.into(),
            title: id.to_uppercase(),
            category: Category::Creational,
            code: "struct S;".into(),
            patterns: vec!["Singleton".into()],
            explanation: "one instance".into(),
            steps: Vec::new(),
            advantages: vec!["global access".into()],
        }
    }

    fn team(name: &str) -> Team {
        Team {
            name: name.into(),
            score: 0,
            color: TeamColor {
                h: 120.0,
                s: 1.0,
                v: 1.0,
            },
        }
    }

    fn roster() -> IndexMap<String, Team> {
        IndexMap::from([("t1".to_string(), team("A")), ("t2".to_string(), team("B"))])
    }

    fn at(secs: i64) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(secs).unwrap()
    }

    #[test]
    fn fresh_session_is_in_setup_at_round_one() {
        let session = GameSession::new();
        assert_eq!(session.phase(), SessionPhase::Setup);
        assert_eq!(session.round_number(), 1);
        assert!(session.answer_history().is_empty());
    }

    #[test]
    fn phases_follow_the_round_lifecycle() {
        let mut session = GameSession::new();

        session.set_teams(roster());
        assert_eq!(session.phase(), SessionPhase::RoundConfiguration);

        session.set_current_example(Some(example("ex-1")), at(100));
        assert_eq!(session.phase(), SessionPhase::RoundActive);

        assert!(session.reveal_solution());
        assert_eq!(session.phase(), SessionPhase::SolutionRevealed);

        session.award_point("t1", at(130)).unwrap();
        assert_eq!(session.phase(), SessionPhase::RoundResolved);

        session.next_round();
        assert_eq!(session.phase(), SessionPhase::RoundConfiguration);
        assert_eq!(session.round_number(), 2);
    }

    #[test]
    fn setting_the_same_example_twice_records_usage_once() {
        let mut session = GameSession::new();
        session.set_current_example(Some(example("ex-1")), at(0));
        session.set_current_example(Some(example("ex-1")), at(5));
        assert_eq!(session.used_example_ids(), ["ex-1".to_string()]);
    }

    #[test]
    fn setting_an_example_resets_reveal_pause_and_timer() {
        let mut session = GameSession::new();
        session.set_current_example(Some(example("ex-1")), at(10));
        session.reveal_solution();
        session.toggle_pause().unwrap();

        session.set_current_example(Some(example("ex-2")), at(60));
        let round = session.active_round().unwrap();
        assert_eq!(round.example.id, "ex-2");
        assert_eq!(round.started_at, at(60));
        assert!(!round.solution_revealed);
        assert!(!round.paused);
    }

    #[test]
    fn clearing_the_example_clears_the_timer() {
        let mut session = GameSession::new();
        session.set_current_example(Some(example("ex-1")), at(10));
        session.set_current_example(None, at(20));
        assert!(session.active_round().is_none());
        assert_eq!(session.used_example_ids(), ["ex-1".to_string()]);
    }

    #[test]
    fn scoring_scenario_awards_and_records() {
        let mut session = GameSession::new();
        session.set_teams(roster());
        session.set_selected_category(Some(CategoryFilter::Creational));
        session.set_selected_pattern_count(Some(1));
        session.set_current_example(Some(example("ex-1")), at(100));
        session.reveal_solution();

        let record = session.award_point("t1", at(142)).unwrap().clone();
        assert_eq!(record.round_number, 1);
        assert_eq!(record.elapsed_seconds, 42);
        assert_eq!(record.winner.as_ref().unwrap().id, "t1");
        assert_eq!(record.winner.as_ref().unwrap().score, 1);

        assert_eq!(session.teams()["t1"].score, 1);
        assert_eq!(session.answer_history().len(), 1);
    }

    #[test]
    fn award_without_active_round_changes_nothing() {
        let mut session = GameSession::new();
        session.set_teams(roster());
        let before = session.clone();

        assert!(session.award_point("t1", at(10)).is_none());
        assert_eq!(session, before);
    }

    #[test]
    fn award_for_unknown_team_changes_nothing() {
        let mut session = GameSession::new();
        session.set_teams(roster());
        session.set_current_example(Some(example("ex-1")), at(0));
        let before = session.clone();

        assert!(session.award_point("nobody", at(5)).is_none());
        assert_eq!(session, before);
    }

    #[test]
    fn double_award_counts_twice() {
        // No dedup guard on purpose; see the award_point doc comment.
        let mut session = GameSession::new();
        session.set_teams(roster());
        session.set_current_example(Some(example("ex-1")), at(0));
        session.reveal_solution();

        session.award_point("t1", at(10)).unwrap();
        session.award_point("t1", at(12)).unwrap();

        assert_eq!(session.teams()["t1"].score, 2);
        assert_eq!(session.answer_history().len(), 2);
        assert_eq!(session.answer_history()[1].winner.as_ref().unwrap().score, 2);
    }

    #[test]
    fn winner_snapshot_is_detached_from_the_roster() {
        let mut session = GameSession::new();
        session.set_teams(roster());
        session.set_current_example(Some(example("ex-1")), at(0));
        session.award_point("t1", at(5)).unwrap();

        // Later rounds keep incrementing the live team...
        session.next_round();
        session.set_current_example(Some(example("ex-2")), at(100));
        session.award_point("t1", at(110)).unwrap();

        // ...while the first snapshot keeps the score it was taken with.
        assert_eq!(session.answer_history()[0].winner.as_ref().unwrap().score, 1);
        assert_eq!(session.teams()["t1"].score, 2);
    }

    #[test]
    fn elapsed_seconds_clamp_at_zero() {
        let mut session = GameSession::new();
        session.set_teams(roster());
        session.set_current_example(Some(example("ex-1")), at(100));

        let record = session.award_point("t1", at(90)).unwrap();
        assert_eq!(record.elapsed_seconds, 0);
    }

    #[test]
    fn next_round_clears_example_filters_and_flags() {
        let mut session = GameSession::new();
        session.set_teams(roster());
        session.set_selected_category(Some(CategoryFilter::All));
        session.set_selected_pattern_count(Some(2));
        session.set_current_example(Some(example("ex-1")), at(0));
        session.reveal_solution();
        session.toggle_pause();

        session.next_round();

        assert_eq!(session.round_number(), 2);
        assert!(session.active_round().is_none());
        assert!(session.selected_category().is_none());
        assert!(session.selected_pattern_count().is_none());
    }

    #[test]
    fn pause_toggles_only_during_a_round() {
        let mut session = GameSession::new();
        assert!(session.toggle_pause().is_none());

        session.set_current_example(Some(example("ex-1")), at(0));
        assert_eq!(session.toggle_pause(), Some(true));
        assert_eq!(session.toggle_pause(), Some(false));
    }

    #[test]
    fn reveal_twice_is_a_noop() {
        let mut session = GameSession::new();
        session.set_current_example(Some(example("ex-1")), at(0));

        assert!(session.reveal_solution());
        let revision = session.revision();
        assert!(!session.reveal_solution());
        assert_eq!(session.revision(), revision);
    }

    #[test]
    fn reset_returns_to_initial_state() {
        let mut session = GameSession::new();
        session.set_teams(roster());
        session.set_current_example(Some(example("ex-1")), at(0));
        session.award_point("t1", at(5));

        session.reset();

        let fresh = GameSession::new();
        assert_eq!(session.phase(), SessionPhase::Setup);
        assert_eq!(session.round_number(), fresh.round_number());
        assert!(session.teams().is_empty());
        assert!(session.used_example_ids().is_empty());
        assert!(session.answer_history().is_empty());
        assert!(session.revision() > 0);
    }

    #[test]
    fn record_round_trips_through_json_into_a_fresh_session() {
        let mut session = GameSession::new();
        session.set_teams(roster());
        session.set_selected_category(Some(CategoryFilter::Creational));
        session.set_selected_pattern_count(Some(1));
        session.set_current_example(Some(example("ex-1")), at(100));
        session.reveal_solution();
        session.award_point("t2", at(160)).unwrap();

        let origin = Uuid::new_v4();
        let payload = serde_json::to_string(&session.to_record(origin)).unwrap();
        let record: SessionRecord = serde_json::from_str(&payload).unwrap();

        let mut restored = GameSession::new();
        restored.hydrate(record);
        assert_eq!(restored, session);
    }

    #[test]
    fn hydrate_is_a_shallow_merge() {
        let mut session = GameSession::new();
        session.set_teams(roster());
        session.set_current_example(Some(example("ex-1")), at(0));
        session.set_selected_pattern_count(Some(2));

        session.hydrate(SessionRecord {
            round_number: Some(9),
            ..SessionRecord::default()
        });

        // The patched field landed, everything absent survived.
        assert_eq!(session.round_number(), 9);
        assert_eq!(session.teams().len(), 2);
        assert_eq!(session.selected_pattern_count(), Some(2));
        assert_eq!(session.active_round().unwrap().example.id, "ex-1");
    }

    #[test]
    fn hydrate_flag_overrides_touch_an_existing_round() {
        let mut session = GameSession::new();
        session.set_current_example(Some(example("ex-1")), at(0));

        session.hydrate(SessionRecord {
            solution_revealed: Some(true),
            is_paused: Some(true),
            ..SessionRecord::default()
        });

        let round = session.active_round().unwrap();
        assert!(round.solution_revealed);
        assert!(round.paused);
    }

    #[test]
    fn hydrate_dedups_used_ids() {
        let mut session = GameSession::new();
        session.hydrate(SessionRecord {
            used_example_ids: Some(vec!["a".into(), "b".into(), "a".into(), "b".into()]),
            ..SessionRecord::default()
        });
        assert_eq!(session.used_example_ids(), ["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn hydrate_drops_a_round_without_a_start_timestamp() {
        let mut session = GameSession::new();
        session.hydrate(SessionRecord {
            current_example: Some(Some(example("ex-1"))),
            solution_revealed: Some(true),
            ..SessionRecord::default()
        });
        assert!(session.active_round().is_none());
    }

    #[test]
    fn hydrate_clears_the_round_on_explicit_null() {
        let mut session = GameSession::new();
        session.set_current_example(Some(example("ex-1")), at(0));

        session.hydrate(SessionRecord {
            current_example: Some(None),
            ..SessionRecord::default()
        });
        assert!(session.active_round().is_none());
    }
}
