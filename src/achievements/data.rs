//! Static achievement definitions.

use super::types::{AchievementDef, AchievementId};

/// All achievement definitions in display order.
pub const ALL_ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef {
        id: AchievementId::FirstPerfectScore,
        name: "First Perfect Score",
        description: "Get a perfect score on your first playthrough.",
        icon: "🎯",
    },
    AchievementDef {
        id: AchievementId::NoHintsUsed,
        name: "Hintless Hero",
        description: "Finish the game without using any hints.",
        icon: "💡",
    },
    AchievementDef {
        id: AchievementId::FastFinisher,
        name: "Speed Runner",
        description: "Finish the game under the total time limit.",
        icon: "⚡",
    },
];

/// Look up an achievement definition by ID.
pub fn get_achievement_def(id: AchievementId) -> Option<&'static AchievementDef> {
    ALL_ACHIEVEMENTS.iter().find(|def| def.id == id)
}
