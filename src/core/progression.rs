//! Level progression state machine.
//!
//! [`GameSession`] owns everything mutable about a playthrough: session
//! state, the countdown, the deferred-task scheduler and the achievement
//! ledger. All changes go through [`GameSession::transition`], one input at a
//! time. Time is supplied by the caller as a millisecond clock, so the same
//! code runs under the terminal loop and under tests.

use super::config::QuizConfig;
use super::constants::{SKIPPED_MESSAGE, TIMED_OUT_MESSAGE};
use super::evaluator::evaluate;
use super::events::{AudioCue, LevelView, SessionEvent, SessionSummary};
use super::scheduler::{CancelToken, Scheduler, Task};
use super::session::SessionState;
use super::timer::{Countdown, TimerSignal};
use crate::achievements::{AchievementEngine, FinalFacts};
use crate::catalog::{Catalog, LevelRecord};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// How a level attempt was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
    TimedOut,
    Skipped,
}

impl Outcome {
    /// Whether this outcome moves on to the next level.
    pub fn advances(&self) -> bool {
        !matches!(self, Outcome::Incorrect)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Presenting { level: usize },
    AwaitingAnswer { level: usize },
    Resolved { level: usize, outcome: Outcome },
    Finished,
}

impl Phase {
    pub fn level(&self) -> Option<usize> {
        match self {
            Phase::Presenting { level }
            | Phase::AwaitingAnswer { level }
            | Phase::Resolved { level, .. } => Some(*level),
            Phase::Finished => None,
        }
    }

    pub fn accepts_input(&self) -> bool {
        matches!(self, Phase::AwaitingAnswer { .. })
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Presenting { level } => write!(f, "presenting level {}", level + 1),
            Phase::AwaitingAnswer { level } => write!(f, "awaiting answer for level {}", level + 1),
            Phase::Resolved { level, outcome } => {
                write!(f, "showing {:?} feedback for level {}", outcome, level + 1)
            }
            Phase::Finished => write!(f, "finished"),
        }
    }
}

/// Inputs accepted by the transition function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Submit(String),
    RequestHint,
    Skip,
    TimerTick(CancelToken),
    DelayElapsed(CancelToken, Task),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StartError {
    #[error("Please enter your name!")]
    EmptyPlayerName,
    #[error("Please wait, game is still loading...")]
    CatalogNotLoaded,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("input is disabled while {phase}")]
    NotAwaitingAnswer { phase: Phase },
    #[error("the session has finished")]
    SessionFinished,
    #[error("choice {index} does not exist ({available} available)")]
    ChoiceOutOfRange { index: usize, available: usize },
}

pub struct GameSession {
    config: QuizConfig,
    catalog: Arc<Catalog>,
    session: SessionState,
    countdown: Countdown,
    scheduler: Scheduler,
    achievements: AchievementEngine,
    phase: Phase,
    /// Token of the pending advance/retry delay, if any.
    pending: Option<CancelToken>,
    summary: Option<SessionSummary>,
}

impl GameSession {
    /// Start a playthrough at level 0.
    ///
    /// Refuses to start without a player name or a loaded catalog; nothing
    /// is created in that case.
    pub fn start(
        player_name: &str,
        catalog: Option<Arc<Catalog>>,
        config: QuizConfig,
        now_ms: u64,
    ) -> Result<(Self, Vec<SessionEvent>), StartError> {
        let name = player_name.trim();
        if name.is_empty() {
            return Err(StartError::EmptyPlayerName);
        }
        let catalog = catalog
            .filter(|c| !c.is_empty())
            .ok_or(StartError::CatalogNotLoaded)?;

        tracing::info!(player = name, levels = catalog.len(), "session started");

        let mut game = Self {
            config,
            catalog,
            session: SessionState::new(name.to_string(), now_ms),
            countdown: Countdown::new(),
            scheduler: Scheduler::new(),
            achievements: AchievementEngine::new(),
            phase: Phase::Presenting { level: 0 },
            pending: None,
            summary: None,
        };

        let mut events = vec![SessionEvent::Audio(AudioCue::MusicStart)];
        game.present(0, true, now_ms, &mut events);
        Ok((game, events))
    }

    // ── Public actions ──────────────────────────────────────────

    pub fn submit_answer(
        &mut self,
        answer: &str,
        now_ms: u64,
    ) -> Result<Vec<SessionEvent>, ActionError> {
        self.transition(Input::Submit(answer.to_string()), now_ms)
    }

    /// Submit the text of the choice at `index` on a multiple-choice level.
    pub fn submit_choice(
        &mut self,
        index: usize,
        now_ms: u64,
    ) -> Result<Vec<SessionEvent>, ActionError> {
        let level = self.awaiting_level()?;
        let choices = self.level_record(level).choices();
        let choice = choices
            .get(index)
            .cloned()
            .ok_or(ActionError::ChoiceOutOfRange {
                index,
                available: choices.len(),
            })?;
        self.transition(Input::Submit(choice), now_ms)
    }

    pub fn request_hint(&mut self, now_ms: u64) -> Result<Vec<SessionEvent>, ActionError> {
        self.transition(Input::RequestHint, now_ms)
    }

    pub fn skip(&mut self, now_ms: u64) -> Result<Vec<SessionEvent>, ActionError> {
        self.transition(Input::Skip, now_ms)
    }

    /// Deliver every scheduled task due at or before `now_ms`, in order.
    ///
    /// Each task is processed at its own due time, so a late call replays
    /// ticks and delays exactly as if they had fired on schedule.
    pub fn advance_clock(&mut self, now_ms: u64) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Some(due) = self.scheduler.pop_due(now_ms) {
            let input = match due.task {
                Task::TimerTick => Input::TimerTick(due.token),
                task => Input::DelayElapsed(due.token, task),
            };
            match self.transition(input, due.due_ms) {
                Ok(produced) => events.extend(produced),
                Err(e) => tracing::debug!(error = %e, "scheduled task dropped"),
            }
        }
        events
    }

    // ── Transition function ─────────────────────────────────────

    /// Apply one input. Rejected inputs leave the session untouched.
    pub fn transition(
        &mut self,
        input: Input,
        now_ms: u64,
    ) -> Result<Vec<SessionEvent>, ActionError> {
        let mut events = Vec::new();
        match input {
            Input::Submit(answer) => {
                let level = self.awaiting_level()?;
                let outcome = if evaluate(self.level_record(level), &answer) {
                    Outcome::Correct
                } else {
                    Outcome::Incorrect
                };
                tracing::debug!(level = level + 1, ?outcome, "answer evaluated");
                self.resolve(level, outcome, now_ms, &mut events);
            }
            Input::RequestHint => {
                let level = self.awaiting_level()?;
                match self.level_record(level).hint_text().map(str::to_string) {
                    Some(hint) => {
                        self.session.used_any_hint = true;
                        events.push(SessionEvent::HintRevealed(hint));
                    }
                    None => events.push(SessionEvent::NoHintAvailable),
                }
            }
            Input::Skip => {
                let level = self.awaiting_level()?;
                self.resolve(level, Outcome::Skipped, now_ms, &mut events);
            }
            Input::TimerTick(token) => self.on_timer_tick(token, now_ms, &mut events),
            Input::DelayElapsed(token, task) => self.on_delay(token, task, now_ms, &mut events),
        }
        Ok(events)
    }

    fn on_timer_tick(&mut self, token: CancelToken, now_ms: u64, events: &mut Vec<SessionEvent>) {
        match self.countdown.on_tick(token, &mut self.scheduler, now_ms) {
            None => tracing::debug!(token = token.id(), "stale timer tick ignored"),
            Some(TimerSignal::Tick {
                remaining_secs,
                percent,
            }) => events.push(SessionEvent::TimerTicked {
                remaining_secs,
                percent,
            }),
            Some(TimerSignal::Expired) => {
                events.push(SessionEvent::TimerTicked {
                    remaining_secs: 0,
                    percent: 0.0,
                });
                match self.phase {
                    Phase::AwaitingAnswer { level }
                    | Phase::Resolved {
                        level,
                        outcome: Outcome::Incorrect,
                    } => self.resolve(level, Outcome::TimedOut, now_ms, events),
                    phase => tracing::warn!(%phase, "countdown expired outside an attempt"),
                }
            }
        }
    }

    fn on_delay(
        &mut self,
        token: CancelToken,
        task: Task,
        now_ms: u64,
        events: &mut Vec<SessionEvent>,
    ) {
        if self.pending != Some(token) {
            tracing::debug!(token = token.id(), ?task, "stale delay ignored");
            return;
        }
        self.pending = None;
        match (task, self.phase) {
            (Task::Advance, Phase::Resolved { level, outcome }) if outcome.advances() => {
                self.present(level + 1, true, now_ms, events);
            }
            (Task::Retry, Phase::Resolved { level, outcome: Outcome::Incorrect }) => {
                self.present(level, false, now_ms, events);
            }
            (task, phase) => tracing::warn!(?task, %phase, "delay does not match phase"),
        }
    }

    fn resolve(&mut self, level: usize, outcome: Outcome, now_ms: u64, events: &mut Vec<SessionEvent>) {
        self.phase = Phase::Resolved { level, outcome };
        let record = self.level_record(level);

        let (message, cue) = match outcome {
            Outcome::Correct => (record.success_msg.clone(), AudioCue::Correct),
            Outcome::Incorrect => (record.error_msg.clone(), AudioCue::Incorrect),
            Outcome::TimedOut => (TIMED_OUT_MESSAGE.to_string(), AudioCue::Incorrect),
            Outcome::Skipped => (SKIPPED_MESSAGE.to_string(), AudioCue::Incorrect),
        };

        match outcome {
            Outcome::Correct => {
                self.session.record_correct();
                self.countdown.cancel(&mut self.scheduler);
                self.schedule_delay(Task::Advance, self.config.advance_delay_ms, now_ms);
            }
            // Countdown keeps running through the retry delay
            Outcome::Incorrect => {
                self.schedule_delay(Task::Retry, self.config.retry_delay_ms, now_ms);
            }
            Outcome::TimedOut | Outcome::Skipped => {
                self.countdown.cancel(&mut self.scheduler);
                self.schedule_delay(Task::Advance, self.config.advance_delay_ms, now_ms);
            }
        }

        tracing::debug!(level = level + 1, ?outcome, score = self.session.score, "level resolved");
        events.push(SessionEvent::AnswerResolved {
            outcome,
            message,
            score: self.session.score,
        });
        events.push(SessionEvent::Audio(cue));
    }

    /// Show `level`. A new level gets a fresh countdown; a retry keeps the
    /// running one untouched.
    fn present(&mut self, level: usize, new_level: bool, now_ms: u64, events: &mut Vec<SessionEvent>) {
        if level >= self.catalog.len() {
            self.finish(now_ms, events);
            return;
        }

        self.phase = Phase::Presenting { level };
        self.session.current_level_index = level;

        if new_level {
            self.cancel_pending();
            self.countdown
                .start(self.config.time_limit_secs, &mut self.scheduler, now_ms);
        }

        let record = self.level_record(level);
        let view = LevelView {
            index: level,
            total: self.catalog.len(),
            prompt: record.prompt.clone(),
            choices: record.choices().to_vec(),
            score: self.session.score,
            remaining_secs: self.countdown.remaining_secs(),
            percent: self.countdown.percent_remaining(),
            retry: !new_level,
        };
        tracing::debug!(level = level + 1, retry = !new_level, "level presented");
        events.push(SessionEvent::LevelPresented(view));
        if new_level {
            events.push(SessionEvent::TimerTicked {
                remaining_secs: self.countdown.remaining_secs(),
                percent: self.countdown.percent_remaining(),
            });
        }

        self.phase = Phase::AwaitingAnswer { level };
    }

    fn finish(&mut self, now_ms: u64, events: &mut Vec<SessionEvent>) {
        self.countdown.cancel(&mut self.scheduler);
        self.cancel_pending();
        self.scheduler.clear();
        self.phase = Phase::Finished;

        let total_time = self.session.finish(now_ms);
        let facts = FinalFacts {
            score: self.session.score,
            catalog_len: self.catalog.len(),
            used_any_hint: self.session.used_any_hint,
            total_time,
            allowed_time: self.config.allowed_time(self.catalog.len()),
        };
        for id in self.achievements.evaluate(&facts) {
            events.push(SessionEvent::AchievementUnlocked(id));
        }

        let summary = SessionSummary {
            player_name: self.session.player_name.clone(),
            score: self.session.score,
            total_levels: self.catalog.len(),
            total_time,
            started_at: self.session.started_at,
            achievements: self.achievements.statuses(),
        };
        tracing::info!(
            player = %summary.player_name,
            score = summary.score,
            total = summary.total_levels,
            secs = total_time.as_secs(),
            "session finished"
        );

        events.push(SessionEvent::Audio(AudioCue::MusicStop));
        events.push(SessionEvent::Audio(AudioCue::SessionComplete));
        events.push(SessionEvent::SessionFinished(summary.clone()));
        self.summary = Some(summary);
    }

    fn schedule_delay(&mut self, task: Task, delay_ms: u64, now_ms: u64) {
        self.cancel_pending();
        let token = self.scheduler.issue_token();
        self.scheduler
            .schedule_at(now_ms.saturating_add(delay_ms), token, task);
        self.pending = Some(token);
    }

    fn cancel_pending(&mut self) {
        if let Some(token) = self.pending.take() {
            self.scheduler.cancel(token);
        }
    }

    fn awaiting_level(&self) -> Result<usize, ActionError> {
        match self.phase {
            Phase::AwaitingAnswer { level } => Ok(level),
            Phase::Finished => Err(ActionError::SessionFinished),
            phase => Err(ActionError::NotAwaitingAnswer { phase }),
        }
    }

    fn level_record(&self, level: usize) -> &LevelRecord {
        // Phases only ever carry indices below catalog.len()
        &self.catalog[level]
    }

    // ── Read access ─────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    pub fn achievements(&self) -> &AchievementEngine {
        &self.achievements
    }

    pub fn current_level(&self) -> Option<&LevelRecord> {
        self.phase.level().and_then(|i| self.catalog.get(i))
    }

    /// Available once the session has finished.
    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// When the next scheduled task falls due, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        self.scheduler.next_due()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AnswerRule;

    fn text_level(answer: &str) -> LevelRecord {
        LevelRecord::new(format!("Type {}", answer), AnswerRule::Exact(answer.to_string()))
            .with_messages("Well done", "Nope")
    }

    fn choice_level() -> LevelRecord {
        LevelRecord::new(
            "Pick green",
            AnswerRule::Choice {
                choices: vec!["Red".into(), "Green".into(), "Blue".into()],
                correct_index: 1,
            },
        )
    }

    fn shared(levels: Vec<LevelRecord>) -> Arc<Catalog> {
        Catalog::from_levels(levels).unwrap().into_shared()
    }

    fn start_with(levels: Vec<LevelRecord>, config: QuizConfig) -> (GameSession, Vec<SessionEvent>) {
        GameSession::start("Ada", Some(shared(levels)), config, 0).unwrap()
    }

    fn start(levels: Vec<LevelRecord>) -> GameSession {
        start_with(levels, QuizConfig::default()).0
    }

    fn presented(events: &[SessionEvent]) -> Option<&LevelView> {
        events.iter().find_map(|e| match e {
            SessionEvent::LevelPresented(view) => Some(view),
            _ => None,
        })
    }

    fn resolved(events: &[SessionEvent]) -> Option<Outcome> {
        events.iter().find_map(|e| match e {
            SessionEvent::AnswerResolved { outcome, .. } => Some(*outcome),
            _ => None,
        })
    }

    #[test]
    fn test_start_requires_name() {
        let result = GameSession::start("   ", Some(shared(vec![text_level("a")])), QuizConfig::default(), 0);
        assert_eq!(result.err(), Some(StartError::EmptyPlayerName));
    }

    #[test]
    fn test_start_requires_catalog() {
        let result = GameSession::start("Ada", None, QuizConfig::default(), 0);
        assert_eq!(result.err(), Some(StartError::CatalogNotLoaded));
        assert_eq!(
            StartError::CatalogNotLoaded.to_string(),
            "Please wait, game is still loading..."
        );
    }

    #[test]
    fn test_start_presents_first_level() {
        let (game, events) = start_with(vec![text_level("a"), text_level("b")], QuizConfig::default());
        assert_eq!(game.phase(), Phase::AwaitingAnswer { level: 0 });
        assert_eq!(events[0], SessionEvent::Audio(AudioCue::MusicStart));

        let view = presented(&events).unwrap();
        assert_eq!(view.index, 0);
        assert_eq!(view.total, 2);
        assert_eq!(view.remaining_secs, 120);
        assert!(!view.retry);
        assert!(events.contains(&SessionEvent::TimerTicked {
            remaining_secs: 120,
            percent: 100.0
        }));
        assert_eq!(game.session().player_name, "Ada");
    }

    #[test]
    fn test_correct_answer_scores_and_stops_timer() {
        let mut game = start(vec![text_level("a"), text_level("b")]);
        game.advance_clock(5_000);

        let events = game.submit_answer("A", 5_000).unwrap();
        assert_eq!(resolved(&events), Some(Outcome::Correct));
        assert!(events.contains(&SessionEvent::Audio(AudioCue::Correct)));
        assert_eq!(game.session().score, 1);
        assert!(!game.countdown().is_running());
        assert_eq!(game.next_deadline(), Some(7_000));

        let events = game.advance_clock(7_000);
        let view = presented(&events).unwrap();
        assert_eq!(view.index, 1);
        assert_eq!(view.remaining_secs, 120);
        assert_eq!(game.phase(), Phase::AwaitingAnswer { level: 1 });
    }

    #[test]
    fn test_incorrect_answer_keeps_timer_running() {
        let mut game = start(vec![text_level("a")]);
        game.advance_clock(10_000);
        assert_eq!(game.countdown().remaining_secs(), 110);

        let events = game.submit_answer("wrong", 10_000).unwrap();
        assert_eq!(resolved(&events), Some(Outcome::Incorrect));
        assert!(events.contains(&SessionEvent::Audio(AudioCue::Incorrect)));
        assert!(game.countdown().is_running());

        let events = game.advance_clock(11_500);
        let view = presented(&events).unwrap();
        assert!(view.retry);
        assert_eq!(view.index, 0);
        assert_eq!(view.remaining_secs, 109);
        assert_eq!(game.session().score, 0);
    }

    #[test]
    fn test_blank_answer_is_incorrect() {
        let mut game = start(vec![text_level("a")]);
        let events = game.submit_answer("   ", 0).unwrap();
        assert_eq!(resolved(&events), Some(Outcome::Incorrect));
    }

    #[test]
    fn test_input_rejected_during_feedback() {
        let mut game = start(vec![text_level("a")]);
        game.submit_answer("wrong", 0).unwrap();

        let err = game.submit_answer("a", 100).unwrap_err();
        assert!(matches!(err, ActionError::NotAwaitingAnswer { .. }));
        assert_eq!(game.session().score, 0);
        assert!(game.request_hint(100).is_err());
        assert!(game.skip(100).is_err());
    }

    #[test]
    fn test_timeout_advances_without_score() {
        let mut game = start(vec![text_level("a"), text_level("b")]);

        let events = game.advance_clock(120_000);
        assert_eq!(resolved(&events), Some(Outcome::TimedOut));
        assert!(events.contains(&SessionEvent::TimerTicked {
            remaining_secs: 0,
            percent: 0.0
        }));
        assert_eq!(game.session().score, 0);

        assert!(presented(&game.advance_clock(121_999)).is_none());
        let events = game.advance_clock(122_000);
        assert_eq!(presented(&events).unwrap().index, 1);
        assert_eq!(game.countdown().remaining_secs(), 120);
    }

    #[test]
    fn test_expiry_during_retry_delay_times_out() {
        let config = QuizConfig {
            time_limit_secs: 2,
            ..QuizConfig::default()
        };
        let (mut game, _) = start_with(vec![text_level("a"), text_level("b")], config);

        game.submit_answer("wrong", 1_500).unwrap();
        let events = game.advance_clock(2_000);
        assert_eq!(resolved(&events), Some(Outcome::TimedOut));

        // The retry that was due at 3000 never re-presents level 0
        let events = game.advance_clock(3_000);
        assert!(presented(&events).is_none());
        let events = game.advance_clock(4_000);
        let view = presented(&events).unwrap();
        assert_eq!(view.index, 1);
        assert!(!view.retry);
    }

    #[test]
    fn test_huge_delays_do_not_overflow_clock() {
        let config = QuizConfig::from_lookup(|key| match key {
            "CODETRAIL_ADVANCE_DELAY_MS" | "CODETRAIL_RETRY_DELAY_MS" => {
                Some(u64::MAX.to_string())
            }
            _ => None,
        });
        let (mut game, _) = GameSession::start(
            "Ada",
            Some(shared(vec![text_level("a"), text_level("b")])),
            config,
            5,
        )
        .unwrap();

        game.submit_answer("wrong", 5).unwrap();
        game.advance_clock(10_000);
        assert!(matches!(
            game.phase(),
            Phase::Resolved {
                outcome: Outcome::Incorrect,
                ..
            }
        ));

        // Expiry still resolves the level; the advance never comes due
        let events = game.advance_clock(200_000);
        assert_eq!(resolved(&events), Some(Outcome::TimedOut));
        assert_eq!(game.next_deadline(), Some(u64::MAX));
        assert!(!game.is_finished());
    }

    #[test]
    fn test_stale_timer_tick_is_ignored() {
        let mut game = start(vec![text_level("a"), text_level("b")]);
        let old_token = game.countdown().token().unwrap();
        game.submit_answer("a", 500).unwrap();
        game.advance_clock(2_500);
        assert_eq!(game.phase(), Phase::AwaitingAnswer { level: 1 });

        let events = game.transition(Input::TimerTick(old_token), 3_000).unwrap();
        assert!(events.is_empty());
        assert_eq!(game.countdown().remaining_secs(), 120);
        assert_eq!(game.phase(), Phase::AwaitingAnswer { level: 1 });
    }

    #[test]
    fn test_skip_advances_without_score() {
        let mut game = start(vec![text_level("a"), text_level("b")]);
        let events = game.skip(1_000).unwrap();
        assert_eq!(resolved(&events), Some(Outcome::Skipped));
        assert!(!game.countdown().is_running());
        game.advance_clock(3_000);
        assert_eq!(game.phase(), Phase::AwaitingAnswer { level: 1 });
        assert_eq!(game.session().score, 0);
    }

    #[test]
    fn test_hint_sets_flag_only_when_revealed() {
        let mut game = start(vec![text_level("a"), text_level("b").with_hint("starts with b")]);

        let events = game.request_hint(0).unwrap();
        assert_eq!(events, vec![SessionEvent::NoHintAvailable]);
        assert!(!game.session().used_any_hint);

        game.skip(0).unwrap();
        game.advance_clock(2_000);
        let events = game.request_hint(2_000).unwrap();
        assert_eq!(events, vec![SessionEvent::HintRevealed("starts with b".to_string())]);
        assert!(game.session().used_any_hint);
        assert_eq!(game.phase(), Phase::AwaitingAnswer { level: 1 });
    }

    #[test]
    fn test_submit_choice() {
        let mut game = start(vec![choice_level(), text_level("b")]);
        assert_eq!(
            game.submit_choice(7, 0).unwrap_err(),
            ActionError::ChoiceOutOfRange {
                index: 7,
                available: 3
            }
        );
        let events = game.submit_choice(1, 0).unwrap();
        assert_eq!(resolved(&events), Some(Outcome::Correct));

        game.advance_clock(2_000);
        assert_eq!(
            game.submit_choice(0, 2_000).unwrap_err(),
            ActionError::ChoiceOutOfRange {
                index: 0,
                available: 0
            }
        );
    }

    #[test]
    fn test_finish_runs_achievements_once() {
        let mut game = start(vec![text_level("a")]);
        game.submit_answer("a", 1_000).unwrap();
        let events = game.advance_clock(3_000);

        assert!(game.is_finished());
        let unlocked: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, SessionEvent::AchievementUnlocked(_)))
            .collect();
        assert_eq!(unlocked.len(), 3);
        assert!(events.contains(&SessionEvent::Audio(AudioCue::MusicStop)));
        assert!(events.contains(&SessionEvent::Audio(AudioCue::SessionComplete)));

        let summary = game.summary().unwrap();
        assert_eq!(summary.score, 1);
        assert_eq!(summary.total_time, std::time::Duration::from_secs(3));
        assert!(summary.is_perfect());
        assert_eq!(game.next_deadline(), None);

        assert_eq!(game.submit_answer("a", 4_000), Err(ActionError::SessionFinished));
        assert!(game.advance_clock(1_000_000).is_empty());
    }

    #[test]
    fn test_malformed_level_is_always_incorrect() {
        use crate::catalog::MalformedRule;
        let broken = LevelRecord::new("broken", AnswerRule::Malformed(MalformedRule::NoAcceptanceMode));
        let mut game = start(vec![broken]);
        let events = game.submit_answer("anything", 0).unwrap();
        assert_eq!(resolved(&events), Some(Outcome::Incorrect));
    }
}
