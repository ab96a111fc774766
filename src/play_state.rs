//! Maps [`SessionEvent`]s onto what the quiz and final screens draw.
//!
//! This is a binary-only module (not part of `lib.rs`) because it bridges
//! engine events to screen state and the [`AudioSink`].

use crate::audio::AudioSink;
use codetrail::achievements::get_achievement_def;
use codetrail::core::{ACHIEVEMENT_TOAST_MS, NOTICE_DISPLAY_MS, NO_HINT_MESSAGE};
use codetrail::{LevelView, Outcome, SessionEvent, SessionSummary};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Success(String),
    Error(String),
}

/// Achievement banners, shown one at a time for a fixed duration.
#[derive(Debug, Default)]
pub struct ToastQueue {
    waiting: VecDeque<String>,
    showing: Option<(String, u64)>,
}

impl ToastQueue {
    pub fn push(&mut self, text: String) {
        self.waiting.push_back(text);
    }

    /// Retire an expired toast and promote the next one.
    pub fn tick(&mut self, now_ms: u64) {
        if let Some((_, shown_at)) = &self.showing {
            if now_ms.saturating_sub(*shown_at) >= ACHIEVEMENT_TOAST_MS {
                self.showing = None;
            }
        }
        if self.showing.is_none() {
            self.showing = self.waiting.pop_front().map(|text| (text, now_ms));
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.showing.as_ref().map(|(text, _)| text.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.showing.is_none() && self.waiting.is_empty()
    }
}

/// Screen-facing state for one playthrough.
#[derive(Debug, Default)]
pub struct PlayState {
    pub view: Option<LevelView>,
    pub remaining_secs: u32,
    pub percent: f64,
    pub score: u32,
    pub feedback: Option<Feedback>,
    pub hint_line: Option<String>,
    pub answer_input: String,
    pub selected_choice: usize,
    pub toasts: ToastQueue,
    pub summary: Option<SessionSummary>,
    notice: Option<(String, u64)>,
}

impl PlayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_prev(&mut self) {
        self.selected_choice = self.selected_choice.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        let count = self.view.as_ref().map_or(0, |v| v.choices.len());
        if self.selected_choice + 1 < count {
            self.selected_choice += 1;
        }
    }

    pub fn is_multiple_choice(&self) -> bool {
        self.view.as_ref().is_some_and(|v| !v.choices.is_empty())
    }

    pub fn set_notice(&mut self, text: String, now_ms: u64) {
        self.notice = Some((text, now_ms));
    }

    pub fn notice(&self, now_ms: u64) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|(_, at)| now_ms.saturating_sub(*at) < NOTICE_DISPLAY_MS)
            .map(|(text, _)| text.as_str())
    }
}

/// Apply engine events to screen state and forward audio cues.
/// Returns true if the session finished.
pub fn apply_session_events(
    state: &mut PlayState,
    events: &[SessionEvent],
    audio: &mut dyn AudioSink,
) -> bool {
    let mut finished = false;
    for event in events {
        match event {
            SessionEvent::LevelPresented(view) => {
                if !view.retry {
                    state.selected_choice = 0;
                }
                state.feedback = None;
                state.hint_line = None;
                state.answer_input.clear();
                state.score = view.score;
                state.remaining_secs = view.remaining_secs;
                state.percent = view.percent;
                state.view = Some(view.clone());
            }
            SessionEvent::TimerTicked {
                remaining_secs,
                percent,
            } => {
                state.remaining_secs = *remaining_secs;
                state.percent = *percent;
            }
            SessionEvent::AnswerResolved {
                outcome,
                message,
                score,
            } => {
                state.score = *score;
                state.feedback = Some(match outcome {
                    Outcome::Correct => Feedback::Success(message.clone()),
                    _ => Feedback::Error(message.clone()),
                });
            }
            SessionEvent::HintRevealed(hint) => {
                state.hint_line = Some(format!("Hint: {}", hint));
            }
            SessionEvent::NoHintAvailable => {
                state.hint_line = Some(NO_HINT_MESSAGE.to_string());
            }
            SessionEvent::AchievementUnlocked(id) => {
                if let Some(def) = get_achievement_def(*id) {
                    state
                        .toasts
                        .push(format!("{} Achievement unlocked: {}", def.icon, def.name));
                }
            }
            SessionEvent::Audio(cue) => audio.play(*cue),
            SessionEvent::SessionFinished(summary) => {
                state.summary = Some(summary.clone());
                finished = true;
            }
        }
    }
    finished
}
