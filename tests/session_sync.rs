//! End-to-end exercises of the service layer: one game-master window driving
//! rounds, and a second window converging through the shared store.

use std::{sync::Arc, time::Duration};

use pattern_quiz_back::{
    catalog::{Category, CategoryFilter, ExampleCatalog, PatternExample},
    config::AppConfig,
    dto::session::{
        AwardPointRequest, SetFiltersRequest, SetTeamsRequest, StartRoundRequest, TeamInput,
    },
    error::ServiceError,
    services::{game_service, public_service, round_service, sync_service},
    state::{AppState, SessionPhase, SharedState},
    store::{SessionStore, memory::MemoryStore},
};

fn example(id: &str, category: Category, patterns: &[&str]) -> PatternExample {
    PatternExample {
        id: id.into(),
        title: id.to_uppercase(),
        category,
        code: "class Example {}".into(),
        patterns: patterns.iter().map(|p| p.to_string()).collect(),
        explanation: "because patterns".into(),
        steps: Vec::new(),
        advantages: Vec::new(),
    }
}

fn fixture_catalog() -> ExampleCatalog {
    ExampleCatalog::from_examples(vec![
        example("ex-singleton", Category::Creational, &["Singleton"]),
        example("ex-builder", Category::Creational, &["Builder"]),
        example(
            "ex-decorator",
            Category::Structural,
            &["Decorator", "Composite"],
        ),
    ])
}

fn make_state(store: &MemoryStore) -> SharedState {
    let config = AppConfig::default().with_sync_poll_interval(Duration::from_millis(20));
    AppState::new(config, fixture_catalog(), Arc::new(store.clone()))
}

fn teams_request() -> SetTeamsRequest {
    SetTeamsRequest {
        teams: vec![
            TeamInput {
                id: "t1".into(),
                name: "Alpha".into(),
                score: None,
                color: None,
            },
            TeamInput {
                id: "t2".into(),
                name: "Beta".into(),
                score: None,
                color: None,
            },
        ],
    }
}

#[tokio::test]
async fn full_round_flow_awards_and_records() {
    let store = MemoryStore::new();
    let state = make_state(&store);

    let roster = game_service::set_teams(&state, teams_request()).await.unwrap();
    assert_eq!(roster.len(), 2);
    assert_eq!(state.phase().await, SessionPhase::RoundConfiguration);

    let response = round_service::start_round(
        &state,
        StartRoundRequest {
            category: Some(CategoryFilter::Creational),
            pattern_count: Some(1),
        },
    )
    .await
    .unwrap();
    assert!(response.started);
    let round = response.round.unwrap();
    assert!(round.example.id.starts_with("ex-"));
    assert_eq!(round.example.category, Category::Creational);
    assert!(round.solution.is_none());
    assert_eq!(state.phase().await, SessionPhase::RoundActive);

    let snapshot = round_service::reveal_solution(&state).await;
    assert!(snapshot.solution.is_some());
    assert_eq!(state.phase().await, SessionPhase::SolutionRevealed);

    let award = round_service::award_point(
        &state,
        AwardPointRequest {
            team_id: "t1".into(),
        },
    )
    .await
    .unwrap();
    assert!(award.applied);
    assert_eq!(award.team.as_ref().unwrap().score, 1);
    assert_eq!(state.phase().await, SessionPhase::RoundResolved);

    let view = public_service::get_session(&state).await;
    assert_eq!(view.teams[0].id, "t1");
    assert_eq!(view.teams[0].score, 1);
    assert_eq!(view.answers_recorded, 1);

    let history = public_service::get_answer_history(&state).await;
    assert_eq!(history.entries.len(), 1);
    assert_eq!(history.entries[0].winner.as_ref().unwrap().id, "t1");

    let after = round_service::next_round(&state).await;
    assert_eq!(after.round_number, 2);
    assert!(after.example.is_none());
    assert_eq!(state.phase().await, SessionPhase::RoundConfiguration);

    let view = public_service::get_session(&state).await;
    assert!(view.selected_category.is_none());
    assert!(view.selected_pattern_count.is_none());
}

#[tokio::test]
async fn stale_award_is_reported_not_applied() {
    let store = MemoryStore::new();
    let state = make_state(&store);
    game_service::set_teams(&state, teams_request()).await.unwrap();

    let before = state.read_session(|session| session.clone()).await;
    let award = round_service::award_point(
        &state,
        AwardPointRequest {
            team_id: "t1".into(),
        },
    )
    .await
    .unwrap();

    assert!(!award.applied);
    let after = state.read_session(|session| session.clone()).await;
    assert_eq!(before.teams(), after.teams());
    assert_eq!(before.answer_history(), after.answer_history());
}

#[tokio::test]
async fn unknown_team_is_a_not_found_error() {
    let store = MemoryStore::new();
    let state = make_state(&store);
    game_service::set_teams(&state, teams_request()).await.unwrap();

    round_service::start_round(
        &state,
        StartRoundRequest {
            category: None,
            pattern_count: Some(1),
        },
    )
    .await
    .unwrap();

    let err = round_service::award_point(
        &state,
        AwardPointRequest {
            team_id: "ghost".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn exhausted_pool_returns_the_informational_notice() {
    let store = MemoryStore::new();
    let state = make_state(&store);
    game_service::set_teams(&state, teams_request()).await.unwrap();

    let request = || StartRoundRequest {
        category: Some(CategoryFilter::Creational),
        pattern_count: Some(1),
    };

    // Two creational tier-1 examples exist; the third draw finds nothing.
    assert!(round_service::start_round(&state, request()).await.unwrap().started);
    assert!(round_service::start_round(&state, request()).await.unwrap().started);

    let response = round_service::start_round(&state, request()).await.unwrap();
    assert!(!response.started);
    assert!(response.message.is_some());
    assert!(response.round.is_none());

    // Both examples were recorded as used, each exactly once.
    let view = public_service::get_session(&state).await;
    assert_eq!(view.used_example_ids.len(), 2);
}

#[tokio::test]
async fn starting_without_a_pattern_count_is_rejected() {
    let store = MemoryStore::new();
    let state = make_state(&store);
    game_service::set_teams(&state, teams_request()).await.unwrap();

    game_service::set_filters(
        &state,
        SetFiltersRequest {
            category: Some(CategoryFilter::All),
            pattern_count: None,
        },
    )
    .await;

    let err = round_service::start_round(&state, StartRoundRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
}

#[tokio::test]
async fn viewer_window_converges_on_the_game_window() {
    let store = MemoryStore::new();
    let game_window = make_state(&store);
    let viewer_window = make_state(&store);
    let listener = sync_service::SyncListener::spawn(viewer_window.clone());

    game_service::set_teams(&game_window, teams_request()).await.unwrap();
    round_service::start_round(
        &game_window,
        StartRoundRequest {
            category: Some(CategoryFilter::Creational),
            pattern_count: Some(1),
        },
    )
    .await
    .unwrap();
    round_service::reveal_solution(&game_window).await;
    round_service::award_point(
        &game_window,
        AwardPointRequest {
            team_id: "t2".into(),
        },
    )
    .await
    .unwrap();

    tokio::time::sleep(Duration::from_millis(300)).await;

    assert_eq!(viewer_window.phase().await, game_window.phase().await);

    let scoreboard = public_service::get_scoreboard(&viewer_window).await;
    let beta = scoreboard
        .teams
        .iter()
        .find(|team| team.id == "t2")
        .unwrap();
    assert_eq!(beta.score, 1);

    let history = public_service::get_answer_history(&viewer_window).await;
    assert_eq!(history.entries.len(), 1);

    listener.stop().await;
}

#[tokio::test]
async fn reset_clears_the_slot_and_every_window() {
    let store = MemoryStore::new();
    let game_window = make_state(&store);
    let viewer_window = make_state(&store);
    let listener = sync_service::SyncListener::spawn(viewer_window.clone());

    game_service::set_teams(&game_window, teams_request()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(viewer_window.read_session(|s| !s.teams().is_empty()).await);

    game_service::reset_session(&game_window).await;
    assert_eq!(game_window.phase().await, SessionPhase::Setup);
    assert!(store.load_session().await.unwrap().is_none());

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(viewer_window.read_session(|s| s.teams().is_empty()).await);

    listener.stop().await;
}
