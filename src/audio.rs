//! Sound cue playback for the terminal front end.
//!
//! Binary-only module: the engine emits [`AudioCue`]s and never knows how
//! (or whether) they are played.

use codetrail::AudioCue;
use std::io::Write;

pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

/// Rings the terminal bell for feedback cues and tracks whether background
/// music is "on". A terminal has no music channel, so the music state only
/// drives the footer indicator.
pub struct TerminalBell {
    enabled: bool,
    music_playing: bool,
    /// Set by the player with [F2]; survives across playthroughs.
    music_muted: bool,
}

impl TerminalBell {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            music_playing: false,
            music_muted: false,
        }
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing && !self.music_muted
    }

    /// Flip the music toggle. Returns the new on/off state.
    pub fn toggle_music(&mut self) -> bool {
        self.music_muted = !self.music_muted;
        tracing::debug!(muted = self.music_muted, "music toggled");
        !self.music_muted
    }

    fn ring(&self) {
        if !self.enabled {
            return;
        }
        let mut out = std::io::stdout();
        if let Err(e) = out.write_all(b"\x07").and_then(|_| out.flush()) {
            tracing::debug!(error = %e, "bell failed");
        }
    }
}

impl AudioSink for TerminalBell {
    fn play(&mut self, cue: AudioCue) {
        tracing::debug!(?cue, "audio cue");
        match cue {
            AudioCue::Correct | AudioCue::Incorrect | AudioCue::SessionComplete => self.ring(),
            AudioCue::MusicStart => self.music_playing = true,
            AudioCue::MusicStop => self.music_playing = false,
        }
    }
}
