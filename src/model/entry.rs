//! Catalog documents as they appear in the content root

use serde::Deserialize;
use std::fmt;

/// A loaded document together with the file name it was read from.
/// The file name is the entry's identity and the basis for derived paths.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry<T> {
    pub key: String,
    pub doc: T,
}

impl<T> Entry<T> {
    pub fn new(key: impl Into<String>, doc: T) -> Self {
        Self {
            key: key.into(),
            doc,
        }
    }
}

/// File name without its extension (`"dontbeshy.json"` -> `"dontbeshy"`)
pub fn file_stem(key: &str) -> &str {
    let base = key.rsplit('/').next().unwrap_or(key);
    match base.rfind('.') {
        Some(0) | None => base,
        Some(dot) => &base[..dot],
    }
}

pub type Tracklist = Vec<Entry<Track>>;

/// Feature credits are written either as a single name or as a list
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Credits {
    One(String),
    Many(Vec<String>),
}

impl Credits {
    pub fn joined(&self) -> String {
        match self {
            Credits::One(name) => name.clone(),
            Credits::Many(names) => names.join(", "),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Credits::One(name) => name.trim().is_empty(),
            Credits::Many(names) => names.iter().all(|n| n.trim().is_empty()),
        }
    }
}

/// Lyrics are usually an array of lines; a plain string is split on newlines
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LyricsField {
    Lines(Vec<String>),
    Text(String),
}

impl LyricsField {
    pub fn lines(&self) -> Vec<String> {
        match self {
            LyricsField::Lines(lines) => lines.clone(),
            LyricsField::Text(text) if text.is_empty() => Vec::new(),
            LyricsField::Text(text) => text.lines().map(str::to_string).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RelatedSong {
    pub title: String,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Track {
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub feature: Option<Credits>,
    #[serde(default)]
    pub length: Option<String>,
    #[serde(default)]
    pub lyrics: Option<LyricsField>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub related: Vec<RelatedSong>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover_art: Option<String>,
    #[serde(default)]
    pub tracklist: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Artist {
    pub name: String,
    #[serde(default)]
    pub bio: Option<String>,
    /// Platform name -> URL, in document order
    #[serde(default)]
    pub links: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub gallery: Vec<String>,
}

/// `site.json`: the archive's own title card and timeline
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SiteInfo {
    pub title: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "Archive".to_string(),
            tagline: None,
            bio: None,
            timeline: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TimelineEvent {
    pub year: YearLabel,
    pub event: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum YearLabel {
    Number(i64),
    Text(String),
}

impl fmt::Display for YearLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearLabel::Number(year) => write!(f, "{}", year),
            YearLabel::Text(year) => f.write_str(year),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_strips_directory_and_extension() {
        assert_eq!(file_stem("dontbeshy.json"), "dontbeshy");
        assert_eq!(file_stem("songs/icon.remix.json"), "icon.remix");
        assert_eq!(file_stem("README"), "README");
        assert_eq!(file_stem(".hidden"), ".hidden");
    }

    #[test]
    fn track_accepts_both_credit_shapes() {
        let single: Track =
            serde_json::from_str(r#"{"title":"Icon","feature":"JW"}"#).unwrap();
        let many: Track =
            serde_json::from_str(r#"{"title":"Icon","feature":["JW","PY"]}"#).unwrap();

        assert_eq!(single.feature.unwrap().joined(), "JW");
        assert_eq!(many.feature.unwrap().joined(), "JW, PY");
    }

    #[test]
    fn null_lyrics_and_missing_lyrics_both_parse() {
        let null: Track = serde_json::from_str(r#"{"title":"A","lyrics":null}"#).unwrap();
        let missing: Track = serde_json::from_str(r#"{"title":"A"}"#).unwrap();
        assert_eq!(null.lyrics, None);
        assert_eq!(missing.lyrics, None);

        let text: Track =
            serde_json::from_str(r#"{"title":"A","lyrics":"one\ntwo"}"#).unwrap();
        assert_eq!(text.lyrics.unwrap().lines(), vec!["one", "two"]);
    }

    #[test]
    fn album_uses_camel_case_fields() {
        let album: Album = serde_json::from_str(
            r#"{"title":"Emo Slay","releaseDate":"2019-02-01","coverArt":"x.jpg","tracklist":["a.json"]}"#,
        )
        .unwrap();
        assert_eq!(album.release_date.as_deref(), Some("2019-02-01"));
        assert_eq!(album.cover_art.as_deref(), Some("x.jpg"));
        assert_eq!(album.tracklist, vec!["a.json"]);
    }

    #[test]
    fn artist_links_keep_document_order() {
        let artist: Artist = serde_json::from_str(
            r#"{"name":"Cameron","links":{"youtube":"https://y","bandcamp":"https://b"}}"#,
        )
        .unwrap();
        let platforms: Vec<&String> = artist.links.keys().collect();
        assert_eq!(platforms, vec!["youtube", "bandcamp"]);
    }

    #[test]
    fn timeline_years_may_be_numbers_or_text() {
        let site: SiteInfo = serde_json::from_str(
            r#"{"title":"QSD","timeline":[{"year":2016,"event":"Formed"},{"year":"2020s","event":"Archive"}]}"#,
        )
        .unwrap();
        assert_eq!(site.timeline[0].year.to_string(), "2016");
        assert_eq!(site.timeline[1].year.to_string(), "2020s");
    }
}
