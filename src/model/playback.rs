//! Now-playing state for the bottom bar

use std::time::Instant;

/// The track last handed to the platform player
#[derive(Clone, Debug)]
pub struct NowPlaying {
    pub key: String,
    pub label: String,
    pub location: String,
    pub started: Instant,
}

/// What the bottom bar shows
#[derive(Clone, Debug, Default)]
pub struct PlaybackInfo {
    pub now_playing: Option<NowPlaying>,
}

impl PlaybackInfo {
    pub fn status_text(&self) -> String {
        match &self.now_playing {
            Some(track) => format!(" ▶ {}", track.label),
            None => " Nothing playing".to_string(),
        }
    }

    pub fn elapsed_text(&self) -> String {
        self.now_playing
            .as_ref()
            .map(|track| format_elapsed(track.started.elapsed().as_secs()))
            .unwrap_or_default()
    }
}

pub fn format_elapsed(total_seconds: u64) -> String {
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}
