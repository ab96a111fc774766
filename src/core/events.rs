//! Events a game session emits for its presentation and audio collaborators.
//!
//! The engine never touches terminal or audio types; the binary maps these
//! events onto screen state and sound cues.

use super::progression::Outcome;
use crate::achievements::{AchievementId, AchievementStatus};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Everything needed to draw the current level.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelView {
    /// Zero-based level index.
    pub index: usize,
    pub total: usize,
    pub prompt: String,
    /// Empty for free-text levels.
    pub choices: Vec<String>,
    pub score: u32,
    pub remaining_secs: u32,
    pub percent: f64,
    /// Same level shown again after a wrong answer; countdown kept running.
    pub retry: bool,
}

/// Discrete sound cues; playback is up to the audio collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    Correct,
    /// Wrong answer, timeout and skip all share this cue.
    Incorrect,
    SessionComplete,
    MusicStart,
    MusicStop,
}

/// Read-only end-of-session data for the summary screen and score card.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub player_name: String,
    pub score: u32,
    pub total_levels: usize,
    pub total_time: Duration,
    pub started_at: DateTime<Utc>,
    pub achievements: Vec<AchievementStatus>,
}

impl SessionSummary {
    pub fn is_perfect(&self) -> bool {
        self.score as usize == self.total_levels
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    LevelPresented(LevelView),
    TimerTicked {
        remaining_secs: u32,
        percent: f64,
    },
    AnswerResolved {
        outcome: Outcome,
        message: String,
        score: u32,
    },
    HintRevealed(String),
    NoHintAvailable,
    AchievementUnlocked(AchievementId),
    Audio(AudioCue),
    SessionFinished(SessionSummary),
}
