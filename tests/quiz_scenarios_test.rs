//! Integration test: End-to-end quiz playthroughs
//!
//! Drives full sessions through the public API on a virtual clock:
//! perfect runs, wrong-answer retries, timeouts, hints and skips, plus the
//! score and timer invariants that must hold across any playthrough.

use codetrail::catalog::parse_levels;
use codetrail::{
    AchievementId, AnswerRule, Catalog, GameSession, LevelRecord, Outcome, Phase, QuizConfig,
    SessionEvent,
};
use std::sync::Arc;
use std::time::Duration;

fn level(answer: &str) -> LevelRecord {
    LevelRecord::new(format!("Say {}", answer), AnswerRule::Exact(answer.to_string()))
}

fn catalog(levels: Vec<LevelRecord>) -> Arc<Catalog> {
    Arc::new(Catalog::from_levels(levels).expect("non-empty catalog"))
}

fn start(levels: Vec<LevelRecord>) -> GameSession {
    let (game, _) = GameSession::start("Tester", Some(catalog(levels)), QuizConfig::default(), 0)
        .expect("session should start");
    game
}

fn unlocked(events: &[SessionEvent]) -> Vec<AchievementId> {
    events
        .iter()
        .filter_map(|e| match e {
            SessionEvent::AchievementUnlocked(id) => Some(*id),
            _ => None,
        })
        .collect()
}

fn outcomes(events: &[SessionEvent]) -> Vec<Outcome> {
    events
        .iter()
        .filter_map(|e| match e {
            SessionEvent::AnswerResolved { outcome, .. } => Some(*outcome),
            _ => None,
        })
        .collect()
}

// =============================================================================
// Scenario A: perfect run
// =============================================================================

#[test]
fn test_perfect_run_within_time_unlocks_all() {
    let mut game = start(vec![level("one"), level("two"), level("three")]);
    let mut events = Vec::new();
    let mut now = 0;

    for answer in ["one", "TWO", " Three "] {
        now += 10_000;
        events.extend(game.advance_clock(now));
        events.extend(game.submit_answer(answer, now).unwrap());
        now += 2_000;
        events.extend(game.advance_clock(now));
    }

    assert!(game.is_finished());
    let summary = game.summary().unwrap();
    assert_eq!(summary.score, 3);
    assert_eq!(summary.total_levels, 3);
    assert_eq!(summary.total_time, Duration::from_secs(36));

    let ids = unlocked(&events);
    assert!(ids.contains(&AchievementId::FirstPerfectScore));
    assert!(ids.contains(&AchievementId::NoHintsUsed));
    assert!(ids.contains(&AchievementId::FastFinisher));
}

#[test]
fn test_perfect_but_slow_run_misses_fast_finisher() {
    // Three levels, 120s each: the allowance is 360s
    let mut game = start(vec![level("a"), level("b"), level("c")]);
    let mut events = Vec::new();
    let mut now = 0;

    for answer in ["a", "b", "c"] {
        // Answer with one second to spare, then wait out the delay
        now += 119_000;
        events.extend(game.advance_clock(now));
        events.extend(game.submit_answer(answer, now).unwrap());
        now += 2_000;
        events.extend(game.advance_clock(now));
    }

    let summary = game.summary().unwrap();
    assert_eq!(summary.score, 3);
    assert_eq!(summary.total_time, Duration::from_secs(363));

    let ids = unlocked(&events);
    assert!(ids.contains(&AchievementId::FirstPerfectScore));
    assert!(!ids.contains(&AchievementId::FastFinisher));
}

// =============================================================================
// Scenario B: wrong answers keep the clock running
// =============================================================================

#[test]
fn test_two_wrong_answers_then_correct() {
    let mut game = start(vec![level("paris")]);
    let mut events = Vec::new();

    events.extend(game.advance_clock(5_000));
    events.extend(game.submit_answer("london", 5_000).unwrap());
    events.extend(game.advance_clock(6_500));
    assert_eq!(game.phase(), Phase::AwaitingAnswer { level: 0 });
    assert_eq!(game.countdown().remaining_secs(), 114);

    events.extend(game.submit_answer("berlin", 8_000).unwrap());
    events.extend(game.advance_clock(9_500));
    assert_eq!(game.countdown().remaining_secs(), 111);

    events.extend(game.submit_answer("Paris", 10_000).unwrap());
    events.extend(game.advance_clock(12_000));

    assert_eq!(
        outcomes(&events),
        vec![Outcome::Incorrect, Outcome::Incorrect, Outcome::Correct]
    );

    // Retries never reset the countdown to the full limit
    let full_resets = events
        .iter()
        .filter(|e| {
            matches!(
                e,
                SessionEvent::TimerTicked {
                    remaining_secs: 120,
                    ..
                }
            )
        })
        .count();
    assert_eq!(full_resets, 0);

    let summary = game.summary().unwrap();
    assert_eq!(summary.score, 1);
    assert!(unlocked(&events).contains(&AchievementId::NoHintsUsed));
}

#[test]
fn test_retry_views_report_running_countdown() {
    let mut game = start(vec![level("x")]);
    let mut retries = Vec::new();
    let mut now = 0;

    for _ in 0..3 {
        now += 3_000;
        game.advance_clock(now);
        game.submit_answer("nope", now).unwrap();
        now += 1_500;
        for event in game.advance_clock(now) {
            if let SessionEvent::LevelPresented(view) = event {
                retries.push(view.remaining_secs);
            }
        }
    }

    assert_eq!(retries.len(), 3);
    assert!(retries.windows(2).all(|w| w[1] < w[0]));
    assert_eq!(retries[0], 116);
}

// =============================================================================
// Scenario C: timeout
// =============================================================================

#[test]
fn test_timeout_without_submission() {
    let mut game = start(vec![level("a"), level("b")]);

    let events = game.advance_clock(120_000);
    assert_eq!(outcomes(&events), vec![Outcome::TimedOut]);
    assert_eq!(game.session().score, 0);
    assert_eq!(
        game.phase(),
        Phase::Resolved {
            level: 0,
            outcome: Outcome::TimedOut
        }
    );

    game.advance_clock(122_000);
    assert_eq!(game.phase(), Phase::AwaitingAnswer { level: 1 });
    assert_eq!(game.countdown().remaining_secs(), 120);
}

#[test]
fn test_all_levels_time_out() {
    let mut game = start(vec![level("a"), level("b")]);
    let mut events = Vec::new();
    events.extend(game.advance_clock(1_000_000));

    assert!(game.is_finished());
    assert_eq!(outcomes(&events), vec![Outcome::TimedOut, Outcome::TimedOut]);
    let summary = game.summary().unwrap();
    assert_eq!(summary.score, 0);
    // 2 × (120s + 2s delay) = 244s > 240s allowance
    assert_eq!(summary.total_time, Duration::from_secs(244));
    let ids = unlocked(&events);
    assert_eq!(ids, vec![AchievementId::NoHintsUsed]);
}

// =============================================================================
// Scenario D: hints
// =============================================================================

#[test]
fn test_hint_then_correct_keeps_hintless_locked() {
    let mut game = start(vec![level("rust").with_hint("a crab likes it")]);
    let mut events = Vec::new();

    events.extend(game.request_hint(1_000).unwrap());
    assert!(events.contains(&SessionEvent::HintRevealed("a crab likes it".to_string())));

    events.extend(game.submit_answer("rust", 2_000).unwrap());
    events.extend(game.advance_clock(4_000));

    let summary = game.summary().unwrap();
    assert_eq!(summary.score, 1);
    let ids = unlocked(&events);
    assert!(ids.contains(&AchievementId::FirstPerfectScore));
    assert!(!ids.contains(&AchievementId::NoHintsUsed));
    assert!(!game.achievements().ledger().is_unlocked(AchievementId::NoHintsUsed));
}

#[test]
fn test_missing_hint_does_not_count_as_used() {
    let mut game = start(vec![level("rust")]);
    let events = game.request_hint(0).unwrap();
    assert_eq!(events, vec![SessionEvent::NoHintAvailable]);
    game.submit_answer("rust", 0).unwrap();
    let events = game.advance_clock(2_000);
    assert!(unlocked(&events).contains(&AchievementId::NoHintsUsed));
}

// =============================================================================
// Invariants
// =============================================================================

#[test]
fn test_score_never_decreases_over_mixed_play() {
    let levels = vec![level("a"), level("b"), level("c"), level("d"), level("e")];
    let mut game = start(levels);
    let mut last_score = 0;
    let mut now = 0;

    let script: [(&str, bool); 5] = [
        ("a", false),
        ("wrong", true),
        ("c", false),
        ("", true),
        ("e", false),
    ];
    for (answer, skip_after) in script {
        now += 1_000;
        game.advance_clock(now);
        game.submit_answer(answer, now).unwrap();
        if skip_after {
            now += 1_500;
            game.advance_clock(now);
            game.skip(now).unwrap();
        }
        assert!(game.session().score >= last_score);
        last_score = game.session().score;
        now += 2_000;
        game.advance_clock(now);
    }

    assert!(game.is_finished());
    assert_eq!(game.summary().unwrap().score, 3);
}

#[test]
fn test_new_playthrough_starts_fresh() {
    let shared = catalog(vec![level("a")]);
    let config = QuizConfig::default();

    let (mut first, _) = GameSession::start("One", Some(Arc::clone(&shared)), config.clone(), 0).unwrap();
    first.request_hint(0).unwrap();
    first.submit_answer("a", 0).unwrap();
    first.advance_clock(2_000);
    assert!(first.session().used_any_hint);

    let (second, _) = GameSession::start("Two", Some(shared), config, 5_000).unwrap();
    assert_eq!(second.session().score, 0);
    assert!(!second.session().used_any_hint);
    assert_eq!(second.achievements().ledger().unlocked_count(), 0);
}

#[test]
fn test_catalog_from_json_plays_through() {
    let json = r#"[
        {"prompt":"2+2?","successMsg":"Yes","errorMsg":"No","answerCheck":"4"},
        {"prompt":"Name two pets","successMsg":"Yes","errorMsg":"No","answerCheck":["cat","dog"]},
        {"prompt":"Pick","successMsg":"Yes","errorMsg":"No","choices":["A","B"],"correctChoiceIndex":1}
    ]"#;
    let levels = parse_levels(json).unwrap();
    let mut game = start(levels);

    game.submit_answer("4", 0).unwrap();
    game.advance_clock(2_000);
    game.submit_answer("the dog and cat", 2_000).unwrap();
    game.advance_clock(4_000);
    game.submit_choice(1, 4_000).unwrap();
    game.advance_clock(6_000);

    assert_eq!(game.summary().unwrap().score, 3);
}
