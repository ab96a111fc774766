//! End-of-session achievement evaluation.

use super::data::get_achievement_def;
use super::types::{AchievementId, AchievementStatus, Achievements};
use std::time::Duration;

/// Final session facts the predicates are evaluated over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalFacts {
    pub score: u32,
    pub catalog_len: usize,
    pub used_any_hint: bool,
    pub total_time: Duration,
    /// Catalog length × per-level limit, from `QuizConfig::allowed_time`.
    pub allowed_time: Duration,
}

/// Owns the achievement ledger for one playthrough.
#[derive(Debug, Clone, Default)]
pub struct AchievementEngine {
    ledger: Achievements,
}

impl AchievementEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check every locked achievement and unlock those whose predicate holds.
    ///
    /// Returns only the newly unlocked IDs; achievements that are already
    /// unlocked are skipped, so repeated calls never re-fire or re-lock.
    pub fn evaluate(&mut self, facts: &FinalFacts) -> Vec<AchievementId> {
        let mut newly_unlocked = Vec::new();
        for id in AchievementId::ALL {
            if self.ledger.is_unlocked(id) || !predicate_holds(id, facts) {
                continue;
            }
            if self.ledger.unlock(id) {
                if let Some(def) = get_achievement_def(id) {
                    tracing::info!(achievement = def.name, "achievement unlocked");
                }
                newly_unlocked.push(id);
            }
        }
        newly_unlocked
    }

    pub fn ledger(&self) -> &Achievements {
        &self.ledger
    }

    pub fn statuses(&self) -> Vec<AchievementStatus> {
        self.ledger.statuses()
    }
}

fn predicate_holds(id: AchievementId, facts: &FinalFacts) -> bool {
    match id {
        AchievementId::FirstPerfectScore => facts.score as usize == facts.catalog_len,
        AchievementId::NoHintsUsed => !facts.used_any_hint,
        AchievementId::FastFinisher => facts.total_time <= facts.allowed_time,
    }
}
