// Level timing
pub const TIME_LIMIT_SECONDS: u32 = 120;
pub const TIMER_TICK_MS: u64 = 1000;

// Feedback display delays
pub const ADVANCE_DELAY_MS: u64 = 2000;
pub const RETRY_DELAY_MS: u64 = 1500;

// Terminal loop
pub const INPUT_POLL_MS: u64 = 50;
pub const ACHIEVEMENT_TOAST_MS: u64 = 4000;
pub const NOTICE_DISPLAY_MS: u64 = 3000;

// Files
pub const DEFAULT_LEVELS_FILE: &str = "levels.json";
pub const SCORE_CARD_PREFIX: &str = "CodeTrail-Score";
pub const APP_DIR_NAME: &str = "codetrail";

// Feedback messages for outcomes without a per-level message
pub const TIMED_OUT_MESSAGE: &str = "Time's up! Moving to next level.";
pub const SKIPPED_MESSAGE: &str = "Skipped! Moving to next level.";
pub const NO_HINT_MESSAGE: &str = "No hint available for this level.";
