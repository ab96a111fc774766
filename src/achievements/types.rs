//! Achievement system types and data structures.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identifier for each achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    /// Every level answered correctly.
    FirstPerfectScore,
    /// No hint revealed during the whole playthrough.
    NoHintsUsed,
    /// Finished within levels × time limit.
    FastFinisher,
}

impl AchievementId {
    /// All achievements in display order.
    pub const ALL: [AchievementId; 3] = [
        AchievementId::FirstPerfectScore,
        AchievementId::NoHintsUsed,
        AchievementId::FastFinisher,
    ];

    /// Stable key used in exported score cards.
    pub fn key(&self) -> &'static str {
        match self {
            AchievementId::FirstPerfectScore => "firstPerfectScore",
            AchievementId::NoHintsUsed => "noHintsUsed",
            AchievementId::FastFinisher => "fastFinisher",
        }
    }
}

/// Static definition of an achievement.
#[derive(Debug, Clone)]
pub struct AchievementDef {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

/// Record of an unlocked achievement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnlockedAchievement {
    pub unlocked_at: i64,
}

/// Locked/unlocked view of one achievement, for summaries and score cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AchievementStatus {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub achieved: bool,
}

/// Unlock ledger for one playthrough.
///
/// Unlocks are monotonic: nothing removes an entry once inserted.
#[derive(Debug, Clone, Default)]
pub struct Achievements {
    unlocked: HashMap<AchievementId, UnlockedAchievement>,
}

impl Achievements {
    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.unlocked.contains_key(&id)
    }

    /// Unlock an achievement. Returns true if newly unlocked.
    pub fn unlock(&mut self, id: AchievementId) -> bool {
        if self.is_unlocked(id) {
            return false;
        }
        self.unlocked.insert(
            id,
            UnlockedAchievement {
                unlocked_at: chrono::Utc::now().timestamp(),
            },
        );
        true
    }

    pub fn unlocked_at(&self, id: AchievementId) -> Option<i64> {
        self.unlocked.get(&id).map(|u| u.unlocked_at)
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked.len()
    }

    pub fn total_count(&self) -> usize {
        super::data::ALL_ACHIEVEMENTS.len()
    }

    /// Status of every achievement in display order.
    pub fn statuses(&self) -> Vec<AchievementStatus> {
        super::data::ALL_ACHIEVEMENTS
            .iter()
            .map(|def| AchievementStatus {
                id: def.id,
                name: def.name,
                description: def.description,
                icon: def.icon,
                achieved: self.is_unlocked(def.id),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlock_returns_true_only_once() {
        let mut achievements = Achievements::default();
        assert!(achievements.unlock(AchievementId::NoHintsUsed));
        assert!(!achievements.unlock(AchievementId::NoHintsUsed));
        assert!(achievements.is_unlocked(AchievementId::NoHintsUsed));
        assert!(achievements.unlocked_at(AchievementId::NoHintsUsed).is_some());
        assert_eq!(achievements.unlocked_count(), 1);
    }

    #[test]
    fn test_statuses_in_display_order() {
        let mut achievements = Achievements::default();
        achievements.unlock(AchievementId::FastFinisher);
        let statuses = achievements.statuses();
        let ids: Vec<AchievementId> = statuses.iter().map(|s| s.id).collect();
        assert_eq!(ids, AchievementId::ALL.to_vec());
        assert!(!statuses[0].achieved);
        assert!(statuses[2].achieved);
        assert_eq!(achievements.total_count(), 3);
    }

    #[test]
    fn test_keys_are_camel_case() {
        assert_eq!(AchievementId::FirstPerfectScore.key(), "firstPerfectScore");
        assert_eq!(AchievementId::NoHintsUsed.key(), "noHintsUsed");
        assert_eq!(AchievementId::FastFinisher.key(), "fastFinisher");
    }
}
