//! Score card export.
//!
//! Writes the end-of-session summary as a plain-text card plus a JSON copy
//! under `~/.codetrail/scorecards/`. Export is one-way; nothing here is read
//! back by the game.

use crate::core::constants::SCORE_CARD_PREFIX;
use crate::core::events::SessionSummary;
use crate::core::timer::format_time;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not determine home directory")]
    NoHomeDir,
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode score card: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardBadge {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub achieved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreCard {
    pub player_name: String,
    pub score: u32,
    pub total_levels: usize,
    pub total_time: String,
    pub total_time_secs: u64,
    pub started_at: String,
    pub exported_at: String,
    pub achievements: Vec<CardBadge>,
    #[serde(skip)]
    exported: DateTime<Utc>,
}

impl ScoreCard {
    pub fn from_summary(summary: &SessionSummary) -> Self {
        Self::from_summary_at(summary, Utc::now())
    }

    pub fn from_summary_at(summary: &SessionSummary, exported: DateTime<Utc>) -> Self {
        let secs = summary.total_time.as_secs();
        Self {
            player_name: summary.player_name.clone(),
            score: summary.score,
            total_levels: summary.total_levels,
            total_time: format_time(u32::try_from(secs).unwrap_or(u32::MAX)),
            total_time_secs: secs,
            started_at: summary.started_at.to_rfc3339(),
            exported_at: exported.to_rfc3339(),
            achievements: summary
                .achievements
                .iter()
                .map(|status| CardBadge {
                    key: status.id.key(),
                    name: status.name,
                    description: status.description,
                    achieved: status.achieved,
                })
                .collect(),
            exported,
        }
    }

    /// One line of lock/unlock badges.
    pub fn badge_line(&self) -> String {
        self.achievements
            .iter()
            .map(|badge| format!("{} {}", if badge.achieved { "🔓" } else { "🔒" }, badge.name))
            .collect::<Vec<_>>()
            .join("   ")
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str("🎉 Congratulations 🎉\n");
        out.push_str(&format!("{}\n\n", self.player_name));
        out.push_str(&format!("{} / {}\n", self.score, self.total_levels));
        out.push_str(&format!("Time: {}\n\n", self.total_time));
        out.push_str("Your adventure is complete!\n\n");
        out.push_str(&self.badge_line());
        out.push('\n');
        out
    }

    /// File stem shared by the text and JSON copies.
    pub fn file_stem(&self) -> String {
        format!(
            "{}-{}",
            SCORE_CARD_PREFIX,
            self.exported.format("%Y%m%d-%H%M%S%3f")
        )
    }
}

/// Get the default export directory (~/.codetrail/scorecards).
pub fn default_score_card_dir() -> Result<PathBuf, ExportError> {
    let home = dirs::home_dir().ok_or(ExportError::NoHomeDir)?;
    Ok(home.join(".codetrail").join("scorecards"))
}

/// Write the card as `.txt` and `.json`. Returns the text file path.
pub fn save_score_card(card: &ScoreCard, dir: Option<&Path>) -> Result<PathBuf, ExportError> {
    let dir = match dir {
        Some(d) => d.to_path_buf(),
        None => default_score_card_dir()?,
    };
    fs::create_dir_all(&dir).map_err(|source| ExportError::Io {
        path: dir.clone(),
        source,
    })?;

    let stem = card.file_stem();
    let text_path = dir.join(format!("{}.txt", stem));
    let json_path = dir.join(format!("{}.json", stem));

    write_file(&text_path, card.render_text())?;
    write_file(&json_path, serde_json::to_string_pretty(card)?)?;

    tracing::info!(path = %text_path.display(), "score card exported");
    Ok(text_path)
}

fn write_file(path: &Path, contents: String) -> Result<(), ExportError> {
    fs::write(path, contents).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
