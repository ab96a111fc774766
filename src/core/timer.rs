//! Per-level countdown.
//!
//! The countdown never sleeps; it schedules one [`Task::TimerTick`] at a time
//! on the [`Scheduler`] and reacts when the engine hands that tick back.

use super::constants::TIMER_TICK_MS;
use super::scheduler::{CancelToken, Scheduler, Task};

/// What a delivered tick produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerSignal {
    Tick { remaining_secs: u32, percent: f64 },
    Expired,
}

#[derive(Debug, Clone, Default)]
pub struct Countdown {
    limit_secs: u32,
    remaining_secs: u32,
    token: Option<CancelToken>,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a fresh countdown, cancelling any running one.
    pub fn start(&mut self, limit_secs: u32, scheduler: &mut Scheduler, now_ms: u64) {
        self.cancel(scheduler);
        let token = scheduler.issue_token();
        self.limit_secs = limit_secs;
        self.remaining_secs = limit_secs;
        self.token = Some(token);
        scheduler.schedule_at(now_ms.saturating_add(TIMER_TICK_MS), token, Task::TimerTick);
    }

    /// Stop the countdown. Safe to call when nothing is running.
    pub fn cancel(&mut self, scheduler: &mut Scheduler) {
        if let Some(token) = self.token.take() {
            scheduler.cancel(token);
        }
    }

    /// Handle a tick delivered by the scheduler.
    ///
    /// Ticks for any token other than the running one are stale and return
    /// `None`. The tick that brings the countdown to zero yields `Expired`
    /// and leaves the countdown stopped, so expiry is reported exactly once.
    pub fn on_tick(
        &mut self,
        token: CancelToken,
        scheduler: &mut Scheduler,
        due_ms: u64,
    ) -> Option<TimerSignal> {
        if self.token != Some(token) {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.cancel(scheduler);
            return Some(TimerSignal::Expired);
        }
        scheduler.schedule_at(due_ms.saturating_add(TIMER_TICK_MS), token, Task::TimerTick);
        Some(TimerSignal::Tick {
            remaining_secs: self.remaining_secs,
            percent: self.percent_remaining(),
        })
    }

    pub fn is_running(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<CancelToken> {
        self.token
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn limit_secs(&self) -> u32 {
        self.limit_secs
    }

    /// `remaining / limit × 100`, for progress bars.
    pub fn percent_remaining(&self) -> f64 {
        if self.limit_secs == 0 {
            return 0.0;
        }
        f64::from(self.remaining_secs) / f64::from(self.limit_secs) * 100.0
    }
}

/// Format seconds as `m:ss`.
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
