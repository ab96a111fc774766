//! Runtime configuration.
use super::constants::{
    ADVANCE_DELAY_MS, DEFAULT_LEVELS_FILE, RETRY_DELAY_MS, TIME_LIMIT_SECONDS,
};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Timing and file locations for a quiz run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizConfig {
    pub time_limit_secs: u32,
    pub advance_delay_ms: u64,
    pub retry_delay_ms: u64,
    pub levels_path: PathBuf,
    /// Overrides `~/.codetrail/scorecards`.
    pub score_card_dir: Option<PathBuf>,
    /// Overrides the platform log directory.
    pub log_dir: Option<PathBuf>,
    /// Ring the terminal bell on feedback cues.
    pub bell: bool,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: TIME_LIMIT_SECONDS,
            advance_delay_ms: ADVANCE_DELAY_MS,
            retry_delay_ms: RETRY_DELAY_MS,
            levels_path: PathBuf::from(DEFAULT_LEVELS_FILE),
            score_card_dir: None,
            log_dir: None,
            bell: false,
        }
    }
}

impl QuizConfig {
    /// Construct configuration from process environment variables.
    ///
    /// - `CODETRAIL_TIME_LIMIT_SECS` (minimum 1)
    /// - `CODETRAIL_ADVANCE_DELAY_MS` / `CODETRAIL_RETRY_DELAY_MS`
    /// - `CODETRAIL_LEVELS`
    /// - `CODETRAIL_SCORE_DIR` / `CODETRAIL_LOG_DIR`
    /// - `CODETRAIL_BELL` (`1` or `true`)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`QuizConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(secs) = read_var::<u32>(&lookup, "CODETRAIL_TIME_LIMIT_SECS") {
            config.time_limit_secs = secs.max(1);
        }
        if let Some(ms) = read_var::<u64>(&lookup, "CODETRAIL_ADVANCE_DELAY_MS") {
            config.advance_delay_ms = ms;
        }
        if let Some(ms) = read_var::<u64>(&lookup, "CODETRAIL_RETRY_DELAY_MS") {
            config.retry_delay_ms = ms;
        }
        if let Some(path) = lookup("CODETRAIL_LEVELS").filter(|p| !p.is_empty()) {
            config.levels_path = PathBuf::from(path);
        }
        if let Some(dir) = lookup("CODETRAIL_SCORE_DIR").filter(|p| !p.is_empty()) {
            config.score_card_dir = Some(PathBuf::from(dir));
        }
        if let Some(dir) = lookup("CODETRAIL_LOG_DIR").filter(|p| !p.is_empty()) {
            config.log_dir = Some(PathBuf::from(dir));
        }
        if let Some(flag) = lookup("CODETRAIL_BELL") {
            config.bell = matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }

        config
    }

    /// Total time allowed across a catalog: levels × per-level limit.
    pub fn allowed_time(&self, levels: usize) -> Duration {
        let secs = u64::try_from(levels)
            .unwrap_or(u64::MAX)
            .saturating_mul(u64::from(self.time_limit_secs));
        Duration::from_secs(secs)
    }
}

fn read_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}
