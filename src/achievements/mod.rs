//! Achievement system module.
//!
//! Three session-scoped achievements, evaluated once when a playthrough
//! finishes. The ledger lives only as long as the session that owns it.

pub mod data;
pub mod engine;
pub mod types;

pub use data::{get_achievement_def, ALL_ACHIEVEMENTS};
pub use engine::{AchievementEngine, FinalFacts};
pub use types::{AchievementDef, AchievementId, AchievementStatus, Achievements};
