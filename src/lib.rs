//! CodeTrail - Timed Terminal Quiz Library
//!
//! This module exposes the quiz engine for testing and external use. The
//! terminal front end (screens, audio cues, input loop) lives in the binary.

pub mod achievements;
pub mod build_info;
pub mod catalog;
pub mod core;
pub mod scorecard;

pub use achievements::{AchievementEngine, AchievementId, AchievementStatus};
pub use catalog::{load_catalog, AnswerRule, Catalog, CatalogError, LevelRecord};
pub use core::{
    ActionError, AudioCue, GameSession, LevelView, Outcome, Phase, QuizConfig, SessionEvent,
    SessionSummary, StartError,
};
pub use scorecard::{save_score_card, ExportError, ScoreCard};
