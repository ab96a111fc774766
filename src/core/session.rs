//! Per-playthrough session state.

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Mutable state of a single playthrough.
///
/// Owned by [`GameSession`](super::progression::GameSession); a fresh value
/// is built for every playthrough so nothing leaks between runs.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub player_name: String,
    pub current_level_index: usize,
    pub score: u32,
    pub used_any_hint: bool,
    /// Virtual-clock timestamp at start.
    pub started_at_ms: u64,
    /// Wall-clock start, for score cards.
    pub started_at: DateTime<Utc>,
    pub total_time_taken: Option<Duration>,
}

impl SessionState {
    pub fn new(player_name: String, now_ms: u64) -> Self {
        Self {
            player_name,
            current_level_index: 0,
            score: 0,
            used_any_hint: false,
            started_at_ms: now_ms,
            started_at: Utc::now(),
            total_time_taken: None,
        }
    }

    pub fn record_correct(&mut self) {
        self.score += 1;
    }

    /// Fix the total play time. Only the first call has an effect.
    pub fn finish(&mut self, now_ms: u64) -> Duration {
        *self.total_time_taken.get_or_insert_with(|| {
            Duration::from_millis(now_ms.saturating_sub(self.started_at_ms))
        })
    }

    pub fn is_finished(&self) -> bool {
        self.total_time_taken.is_some()
    }
}
