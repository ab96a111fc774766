//! Deferred task queue driven by a virtual millisecond clock.
//!
//! Every scheduled task carries a [`CancelToken`]. Cancelling a token drops
//! all of its pending tasks, so a countdown or feedback delay belonging to an
//! earlier level presentation can never fire after the game has moved on.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Identifies a group of tasks that are cancelled together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CancelToken(u64);

impl CancelToken {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Work the progression engine can defer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// One-second countdown tick.
    TimerTick,
    /// Move on to the next level after feedback.
    Advance,
    /// Re-present the same level after a wrong answer.
    Retry,
}

/// A task popped from the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    pub due_ms: u64,
    pub token: CancelToken,
    pub task: Task,
}

#[derive(Debug)]
struct Entry {
    due_ms: u64,
    seq: u64,
    token: CancelToken,
    task: Task,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.due_ms == other.due_ms && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // Reversed so the max-heap yields the earliest (due, seq) first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due_ms
            .cmp(&self.due_ms)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Entry>,
    next_seq: u64,
    next_token: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out a token no earlier task can carry.
    pub fn issue_token(&mut self) -> CancelToken {
        self.next_token += 1;
        CancelToken(self.next_token)
    }

    pub fn schedule_at(&mut self, due_ms: u64, token: CancelToken, task: Task) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Entry {
            due_ms,
            seq,
            token,
            task,
        });
    }

    /// Drop every pending task for `token`. Returns how many were removed.
    pub fn cancel(&mut self, token: CancelToken) -> usize {
        let before = self.queue.len();
        self.queue.retain(|entry| entry.token != token);
        before - self.queue.len()
    }

    pub fn pending(&self, token: CancelToken) -> bool {
        self.queue.iter().any(|entry| entry.token == token)
    }

    /// Remove and return the earliest task due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Scheduled> {
        if self.queue.peek()?.due_ms > now_ms {
            return None;
        }
        self.queue.pop().map(|entry| Scheduled {
            due_ms: entry.due_ms,
            token: entry.token,
            task: entry.task,
        })
    }

    pub fn next_due(&self) -> Option<u64> {
        self.queue.peek().map(|entry| entry.due_ms)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
