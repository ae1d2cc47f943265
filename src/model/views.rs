//! Pure view-models: catalog entries shaped for display.
//!
//! Nothing here touches the terminal or the content root. The view layer
//! turns these into widgets; the presenter decides when to build them.

use chrono::NaiveDate;
use regex::Regex;

use crate::config::{LayoutConfig, MediaConfig};
use super::entry::{Album, Artist, Entry, Track};

/// Whether lyrics can be shown for a track
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LyricsStatus {
    Unavailable,
    Instrumental,
    Available,
}

impl LyricsStatus {
    pub fn classify(lines: Option<&[String]>) -> Self {
        match lines {
            None | Some([]) => LyricsStatus::Unavailable,
            Some([only]) if is_instrumental_marker(only) => LyricsStatus::Instrumental,
            Some(_) => LyricsStatus::Available,
        }
    }

    pub fn notice(self) -> Option<&'static str> {
        match self {
            LyricsStatus::Unavailable => Some("Lyrics for this song aren't available."),
            LyricsStatus::Instrumental => Some("This song is an instrumental."),
            LyricsStatus::Available => None,
        }
    }
}

fn is_instrumental_marker(line: &str) -> bool {
    line.trim()
        .trim_matches(|c: char| matches!(c, '[' | ']' | '(' | ')'))
        .trim()
        .eq_ignore_ascii_case("instrumental")
}

/// Paths needed to derive media and image locations from file keys
#[derive(Clone, Debug)]
pub struct MediaPaths {
    pub audio_dir: String,
    pub extensions: Vec<String>,
    pub cover_dir: String,
    pub cover_extension: String,
    pub cover_prefix: Option<Regex>,
    pub artist_image_dir: String,
    pub placeholder_image: String,
}

impl MediaPaths {
    pub fn from_config(layout: &LayoutConfig, media: &MediaConfig) -> Self {
        let cover_prefix = if media.cover_prefix_pattern.is_empty() {
            None
        } else {
            match Regex::new(&media.cover_prefix_pattern) {
                Ok(re) => Some(re),
                Err(e) => {
                    tracing::warn!(
                        pattern = %media.cover_prefix_pattern,
                        error = %e,
                        "Invalid cover prefix pattern, covers use the full file name"
                    );
                    None
                }
            }
        };

        Self {
            audio_dir: layout.audio_dir.clone(),
            extensions: media.extensions.clone(),
            cover_dir: layout.cover_dir.clone(),
            cover_extension: media.cover_extension.clone(),
            cover_prefix,
            artist_image_dir: layout.artist_image_dir.clone(),
            placeholder_image: layout.placeholder_image.clone(),
        }
    }

    pub fn primary_extension(&self) -> &str {
        self.extensions.first().map(String::as_str).unwrap_or("opus")
    }

    /// `audio_dir/<stem>.<ext>` for a track file key
    pub fn media_uri(&self, key: &str, extension: &str) -> String {
        join(&self.audio_dir, &format!("{}.{}", super::entry::file_stem(key), extension))
    }

    pub fn cover_path(&self, key: &str) -> String {
        let stem = super::entry::file_stem(key);
        let name = match &self.cover_prefix {
            Some(re) => re.replace(stem, ""),
            None => stem.into(),
        };
        join(&self.cover_dir, &format!("{}.{}", name, self.cover_extension))
    }
}

fn join(dir: &str, name: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}

/// Everything the track modal shows for one entry
#[derive(Clone, Debug, PartialEq)]
pub struct TrackView {
    pub key: String,
    pub heading: String,
    pub title: String,
    /// `"feat. A, B"`
    pub credits: Option<String>,
    pub duration: Option<String>,
    pub lyrics: LyricsStatus,
    pub lyric_lines: Vec<String>,
    pub bio: Option<String>,
    pub related: Vec<RelatedLine>,
    pub media_uri: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RelatedLine {
    pub title: String,
    pub reason: Option<String>,
}

impl TrackView {
    pub fn from_entry(entry: &Entry<Track>, paths: &MediaPaths) -> Self {
        let track = &entry.doc;
        let heading = match non_empty(&track.version) {
            Some(version) => format!("{} — {}", track.title, version),
            None => track.title.clone(),
        };
        let credits = track
            .feature
            .as_ref()
            .filter(|credits| !credits.is_empty())
            .map(|credits| format!("feat. {}", credits.joined()));
        let lyric_lines = track
            .lyrics
            .as_ref()
            .map(|lyrics| lyrics.lines())
            .unwrap_or_default();
        let lyrics = LyricsStatus::classify(track.lyrics.as_ref().map(|_| lyric_lines.as_slice()));

        Self {
            key: entry.key.clone(),
            heading,
            title: track.title.clone(),
            credits,
            duration: non_empty(&track.length),
            lyrics,
            lyric_lines,
            bio: non_empty(&track.bio),
            related: track
                .related
                .iter()
                .map(|r| RelatedLine {
                    title: r.title.clone(),
                    reason: non_empty(&r.reason),
                })
                .collect(),
            media_uri: paths.media_uri(&entry.key, paths.primary_extension()),
        }
    }

    /// Credits and duration on one line: `"feat. A • 3:12"`
    pub fn subtitle(&self) -> String {
        match (&self.credits, &self.duration) {
            (Some(credits), Some(duration)) => format!("{} • {}", credits, duration),
            (Some(credits), None) => credits.clone(),
            (None, Some(duration)) => duration.clone(),
            (None, None) => String::new(),
        }
    }

    /// Label for the now-playing bar: `"Title (feat. A)"`
    pub fn now_playing_label(&self) -> String {
        match &self.credits {
            Some(credits) => format!("{} ({})", self.title, credits),
            None => self.title.clone(),
        }
    }
}

/// One row in a home section
#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    pub key: String,
    pub title: String,
    pub subtitle: String,
    pub image: Option<String>,
}

impl Card {
    pub fn album(entry: &Entry<Album>, paths: &MediaPaths) -> Self {
        Self {
            key: entry.key.clone(),
            title: entry.doc.title.clone(),
            subtitle: entry.doc.artist.clone().unwrap_or_default(),
            image: Some(paths.cover_path(&entry.key)),
        }
    }

    pub fn artist(entry: &Entry<Artist>, paths: &MediaPaths) -> Self {
        let subtitle = match non_empty(&entry.doc.bio) {
            Some(bio) => format!("{}…", bio.chars().take(50).collect::<String>()),
            None => String::new(),
        };
        Self {
            key: entry.key.clone(),
            title: entry.doc.name.clone(),
            subtitle,
            image: Some(artist_thumbnail(&entry.doc, paths)),
        }
    }

    pub fn track(entry: &Entry<Track>) -> Self {
        Self {
            key: entry.key.clone(),
            title: entry.doc.title.clone(),
            subtitle: non_empty(&entry.doc.artist).unwrap_or_else(|| "QSD".to_string()),
            image: None,
        }
    }
}

fn artist_thumbnail(artist: &Artist, paths: &MediaPaths) -> String {
    match artist.gallery.first() {
        Some(image) => artist_image(artist, image, paths),
        None => paths.placeholder_image.clone(),
    }
}

fn artist_image(artist: &Artist, image: &str, paths: &MediaPaths) -> String {
    let folder = artist.folder.as_deref().unwrap_or_default();
    join(&join(&paths.artist_image_dir, folder), image)
}

/// Album detail header
#[derive(Clone, Debug, PartialEq)]
pub struct AlbumView {
    pub key: String,
    pub title: String,
    pub artist: String,
    pub released: String,
    pub description: Option<String>,
    pub cover: String,
    /// Used when the derived cover is missing
    pub fallback_cover: Option<String>,
}

impl AlbumView {
    pub fn from_entry(entry: &Entry<Album>, paths: &MediaPaths) -> Self {
        let album = &entry.doc;
        Self {
            key: entry.key.clone(),
            title: album.title.clone(),
            artist: album.artist.clone().unwrap_or_default(),
            released: non_empty(&album.release_date)
                .map(|date| format_release_date(&date))
                .unwrap_or_else(|| "Unknown".to_string()),
            description: non_empty(&album.description),
            cover: paths.cover_path(&entry.key),
            fallback_cover: non_empty(&album.cover_art),
        }
    }
}

/// ISO dates are spelled out; anything else is shown as written
pub fn format_release_date(date: &str) -> String {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|_| date.to_string())
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArtistView {
    pub key: String,
    pub name: String,
    pub bio: Option<String>,
    /// `(platform, url)` in document order
    pub links: Vec<(String, String)>,
    pub gallery: Vec<String>,
}

impl ArtistView {
    pub fn from_entry(entry: &Entry<Artist>, paths: &MediaPaths) -> Self {
        let artist = &entry.doc;
        Self {
            key: entry.key.clone(),
            name: artist.name.clone(),
            bio: non_empty(&artist.bio),
            links: artist
                .links
                .iter()
                .filter_map(|(platform, url)| {
                    url.as_str().map(|url| (platform.clone(), url.to_string()))
                })
                .collect(),
            gallery: artist
                .gallery
                .iter()
                .map(|image| artist_image(artist, image, paths))
                .collect(),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LayoutConfig, MediaConfig};
    use crate::model::entry::{Credits, LyricsField};

    fn paths() -> MediaPaths {
        MediaPaths::from_config(&LayoutConfig::default(), &MediaConfig::default())
    }

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn track(json: &str) -> Entry<Track> {
        Entry::new("dontbeshy.json", serde_json::from_str(json).unwrap())
    }

    #[test]
    fn lyrics_tri_state() {
        assert_eq!(LyricsStatus::classify(None), LyricsStatus::Unavailable);
        assert_eq!(LyricsStatus::classify(Some(&[])), LyricsStatus::Unavailable);
        assert_eq!(
            LyricsStatus::classify(Some(&lines(&["Instrumental"]))),
            LyricsStatus::Instrumental
        );
        assert_eq!(
            LyricsStatus::classify(Some(&lines(&["  INSTRUMENTAL "]))),
            LyricsStatus::Instrumental
        );
        assert_eq!(
            LyricsStatus::classify(Some(&lines(&["Instrumental", "la la"]))),
            LyricsStatus::Available
        );
        assert_eq!(
            LyricsStatus::classify(Some(&lines(&["not an instrumental break"]))),
            LyricsStatus::Available
        );
    }

    #[test]
    fn media_uri_replaces_extension_under_audio_dir() {
        let paths = paths();
        assert_eq!(paths.media_uri("dontbeshy.json", "opus"), "assets/audio/dontbeshy.opus");
        assert_eq!(paths.media_uri("dontbeshy.json", "mp3"), "assets/audio/dontbeshy.mp3");
    }

    #[test]
    fn cover_path_strips_discography_prefix() {
        let paths = paths();
        assert_eq!(paths.cover_path("qsd1-emoslay.json"), "assets/images/albumcovers/emoslay.jpg");
        assert_eq!(
            paths.cover_path("qsd-khakishorts.json"),
            "assets/images/albumcovers/khakishorts.jpg"
        );
        assert_eq!(paths.cover_path("jw-heelz.json"), "assets/images/albumcovers/jw-heelz.jpg");
    }

    #[test]
    fn track_view_heading_credits_and_duration() {
        let entry = track(
            r#"{"title":"Don't Be Shy","version":"Demo","feature":["JW","PY"],"length":"3:12",
                "lyrics":["line one","line two"],"related":[{"title":"Icon","reason":"same session"}]}"#,
        );
        let view = TrackView::from_entry(&entry, &paths());

        assert_eq!(view.heading, "Don't Be Shy — Demo");
        assert_eq!(view.credits.as_deref(), Some("feat. JW, PY"));
        assert_eq!(view.subtitle(), "feat. JW, PY • 3:12");
        assert_eq!(view.lyrics, LyricsStatus::Available);
        assert_eq!(view.lyric_lines.len(), 2);
        assert_eq!(view.media_uri, "assets/audio/dontbeshy.opus");
        assert_eq!(view.related[0].reason.as_deref(), Some("same session"));
        assert_eq!(view.now_playing_label(), "Don't Be Shy (feat. JW, PY)");
    }

    #[test]
    fn track_view_without_optional_fields() {
        let view = TrackView::from_entry(&track(r#"{"title":"Icon","version":""}"#), &paths());
        assert_eq!(view.heading, "Icon");
        assert_eq!(view.credits, None);
        assert_eq!(view.subtitle(), "");
        assert_eq!(view.lyrics, LyricsStatus::Unavailable);
        assert_eq!(view.lyrics.notice(), Some("Lyrics for this song aren't available."));
    }

    #[test]
    fn empty_credit_list_is_not_rendered() {
        let mut entry = track(r#"{"title":"Icon"}"#);
        entry.doc.feature = Some(Credits::Many(vec![]));
        entry.doc.lyrics = Some(LyricsField::Lines(vec!["Instrumental".to_string()]));

        let view = TrackView::from_entry(&entry, &paths());
        assert_eq!(view.credits, None);
        assert_eq!(view.lyrics, LyricsStatus::Instrumental);
    }

    #[test]
    fn artist_card_uses_first_gallery_image_or_placeholder() {
        let with_gallery: Entry<Artist> = Entry::new(
            "cameronreid.json",
            serde_json::from_str(
                r#"{"name":"Cameron Reid","folder":"cameron","gallery":["a.jpg","b.jpg"],"bio":"Songwriter"}"#,
            )
            .unwrap(),
        );
        let card = Card::artist(&with_gallery, &paths());
        assert_eq!(card.image.as_deref(), Some("assets/images/artists/cameron/a.jpg"));
        assert_eq!(card.subtitle, "Songwriter…");

        let bare: Entry<Artist> =
            Entry::new("x.json", serde_json::from_str(r#"{"name":"X"}"#).unwrap());
        let card = Card::artist(&bare, &paths());
        assert_eq!(card.image.as_deref(), Some("assets/images/QSD.png"));
        assert_eq!(card.subtitle, "");
    }

    #[test]
    fn album_view_formats_release_date() {
        let entry: Entry<Album> = Entry::new(
            "qsd2-idhat.json",
            serde_json::from_str(r#"{"title":"IDHAT","releaseDate":"2019-03-08"}"#).unwrap(),
        );
        let view = AlbumView::from_entry(&entry, &paths());
        assert_eq!(view.released, "March 8, 2019");
        assert_eq!(view.cover, "assets/images/albumcovers/idhat.jpg");

        assert_eq!(format_release_date("Summer 2018"), "Summer 2018");
    }
}
