//! Core quiz engine: session state, countdown, answer checking and the
//! level progression state machine.

pub mod config;
pub mod constants;
pub mod evaluator;
pub mod events;
pub mod progression;
pub mod scheduler;
pub mod session;
pub mod timer;

pub use config::QuizConfig;
pub use constants::*;
pub use evaluator::evaluate;
pub use events::{AudioCue, LevelView, SessionEvent, SessionSummary};
pub use progression::{ActionError, GameSession, Input, Outcome, Phase, StartError};
pub use scheduler::{CancelToken, Scheduler, Task};
pub use session::SessionState;
pub use timer::{format_time, Countdown, TimerSignal};
