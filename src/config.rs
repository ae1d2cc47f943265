//! Configuration: content root, directory layout, manifests and UI timing.
//!
//! Loaded from `<config dir>/archive-browser/config.toml`. A default file is
//! written on first run so it can be edited in place.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR: &str = "archive-browser";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Local directory or `http(s)://` base URL the documents are read from
    pub content_root: String,
    pub layout: LayoutConfig,
    pub manifest: ManifestConfig,
    pub media: MediaConfig,
    pub ui: UiConfig,
}

/// Where each kind of document lives, relative to the content root
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub albums_dir: String,
    pub songs_dir: String,
    pub artists_dir: String,
    pub audio_dir: String,
    pub cover_dir: String,
    pub artist_image_dir: String,
    pub placeholder_image: String,
    pub site_document: String,
}

/// Ordered file lists for each home section. Empty lists are filled from
/// disk when the content root is local.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    pub albums: Vec<String>,
    pub extras: Vec<String>,
    pub top_tracks: Vec<String>,
    pub artists: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Tried in order when probing; the first one is used when probing is off
    pub extensions: Vec<String>,
    pub probe: bool,
    /// Stripped from album file stems before deriving cover image names
    pub cover_prefix_pattern: String,
    pub cover_extension: String,
    /// Upper bound for every request against a remote root, probes included
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub close_delay_ms: u64,
    pub error_display_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_root: ".".to_string(),
            layout: LayoutConfig::default(),
            manifest: ManifestConfig::defaults(),
            media: MediaConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            albums_dir: "assets/data".to_string(),
            songs_dir: "assets/data/qsd-songs".to_string(),
            artists_dir: "assets/artists".to_string(),
            audio_dir: "assets/audio".to_string(),
            cover_dir: "assets/images/albumcovers".to_string(),
            artist_image_dir: "assets/images/artists".to_string(),
            placeholder_image: "assets/images/QSD.png".to_string(),
            site_document: "assets/data/site.json".to_string(),
        }
    }
}

impl ManifestConfig {
    fn defaults() -> Self {
        let owned = |names: &[&str]| names.iter().map(|n| n.to_string()).collect();
        Self {
            albums: owned(&[
                "qsd1-emoslay.json",
                "qsd2-idhat.json",
                "qsd-khakishorts.json",
                "qsd3-sissypuss.json",
                "qsd4-thecandidates.json",
                "qsd5-psychward.json",
            ]),
            extras: owned(&["jw-heelz.json", "jw-theiconicpop.json", "py-thesoundtrack.json"]),
            top_tracks: owned(&[
                "dontbeshy.json",
                "dourthing.json",
                "thenewbreakingpoint.json",
                "sissypuss.json",
                "cinematicoutro.json",
                "heelzremix.json",
                "icon.json",
            ]),
            artists: owned(&["cameronreid.json"]),
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["opus".to_string(), "mp3".to_string()],
            probe: true,
            cover_prefix_pattern: r"^qsd\d?-".to_string(),
            cover_extension: "jpg".to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            close_delay_ms: 300,
            error_display_secs: 5,
        }
    }
}

impl MediaConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl UiConfig {
    pub fn close_delay(&self) -> Duration {
        Duration::from_millis(self.close_delay_ms)
    }

    pub fn error_display(&self) -> Duration {
        Duration::from_secs(self.error_display_secs)
    }
}

impl Config {
    /// Load from `path`, or from the default location when `None`.
    /// A missing default file is created; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::read(&path)
                } else {
                    let config = Config::default();
                    config.save(&path)?;
                    Ok(config)
                }
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;

        Ok(())
    }

    fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join(APP_DIR);

        Ok(config_dir.join(CONFIG_FILE))
    }

    pub fn is_remote(&self) -> bool {
        self.content_root.starts_with("http://") || self.content_root.starts_with("https://")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            content_root = "https://example.org/archive"

            [ui]
            close_delay_ms = 250
            "#,
        )
        .unwrap();

        assert!(config.is_remote());
        assert_eq!(config.ui.close_delay(), Duration::from_millis(250));
        assert_eq!(config.ui.error_display_secs, 5);
        assert_eq!(config.layout.audio_dir, "assets/audio");
        assert_eq!(config.media.extensions, vec!["opus", "mp3"]);
        assert_eq!(config.media.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.manifest.albums.len(), 6);
    }

    #[test]
    fn save_then_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.content_root = "/srv/archive".to_string();
        config.manifest.artists.clear();
        config.save(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.content_root, "/srv/archive");
        assert!(!loaded.is_remote());
        assert!(loaded.manifest.artists.is_empty());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("absent.toml"))).is_err());
    }
}
