//! Catalog loading: fetch and parse batches of documents from the content root.
//!
//! A document that cannot be fetched or parsed is logged and left out; the
//! rest of the batch is unaffected. Fetches within a batch run concurrently
//! and results keep the order of the requested names.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use serde::de::DeserializeOwned;

use crate::config::{LayoutConfig, ManifestConfig};
use crate::error::ArchiveError;
use super::entry::{Album, Artist, Entry, SiteInfo, Track, Tracklist};
use super::source::DocumentSource;

/// Everything shown on the home screen
#[derive(Clone, Debug, Default)]
pub struct HomeCatalog {
    pub albums: Vec<Entry<Album>>,
    pub extras: Vec<Entry<Album>>,
    pub top_tracks: Tracklist,
    pub artists: Vec<Entry<Artist>>,
    pub site: SiteInfo,
}

pub struct CatalogLoader<S> {
    source: Arc<S>,
    layout: LayoutConfig,
}

impl<S> Clone for CatalogLoader<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            layout: self.layout.clone(),
        }
    }
}

impl<S: DocumentSource> CatalogLoader<S> {
    pub fn new(source: Arc<S>, layout: LayoutConfig) -> Self {
        Self { source, layout }
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    /// Load every named document under `dir`, skipping the ones that fail.
    /// A name requested twice is loaded once, at its first position.
    pub async fn load_all<T>(&self, dir: &str, names: &[String]) -> Vec<Entry<T>>
    where
        T: DeserializeOwned + Send,
    {
        let mut seen = HashSet::new();
        let unique: Vec<&str> = names
            .iter()
            .map(String::as_str)
            .filter(|name| seen.insert(*name))
            .collect();

        let loads = unique.iter().map(|name| self.load_or_skip::<T>(dir, name));
        let entries: Vec<Entry<T>> = join_all(loads).await.into_iter().flatten().collect();

        tracing::debug!(
            dir,
            requested = unique.len(),
            loaded = entries.len(),
            "Catalog batch loaded"
        );
        entries
    }

    async fn load_or_skip<T: DeserializeOwned>(&self, dir: &str, name: &str) -> Option<Entry<T>> {
        match self.load_one(dir, name).await {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(dir, name, error = %e, "Skipping catalog entry");
                None
            }
        }
    }

    /// Fetch and parse a single document
    pub async fn load_one<T: DeserializeOwned>(
        &self,
        dir: &str,
        name: &str,
    ) -> Result<Entry<T>, ArchiveError> {
        let path = document_path(dir, name);
        let bytes = self.source.fetch(&path).await?;
        let doc = serde_json::from_slice(&bytes).map_err(|source| ArchiveError::Parse {
            path: path.clone(),
            source,
        })?;
        Ok(Entry::new(name, doc))
    }

    pub async fn load_albums(&self, names: &[String]) -> Vec<Entry<Album>> {
        self.load_all(&self.layout.albums_dir, names).await
    }

    pub async fn load_tracks(&self, names: &[String]) -> Tracklist {
        self.load_all(&self.layout.songs_dir, names).await
    }

    pub async fn load_artists(&self, names: &[String]) -> Vec<Entry<Artist>> {
        self.load_all(&self.layout.artists_dir, names).await
    }

    /// Second phase of opening an album: its declared tracklist
    pub async fn load_tracklist(&self, album: &Album) -> Tracklist {
        self.load_tracks(&album.tracklist).await
    }

    /// Reload an album by file name, then its tracks
    pub async fn load_album_with_tracks(
        &self,
        name: &str,
    ) -> Result<(Entry<Album>, Tracklist), ArchiveError> {
        let album: Entry<Album> = self.load_one(&self.layout.albums_dir, name).await?;
        let tracks = self.load_tracklist(&album.doc).await;
        Ok((album, tracks))
    }

    pub async fn load_site_info(&self) -> SiteInfo {
        let path = self.layout.site_document.clone();
        let (dir, name) = match path.rsplit_once('/') {
            Some((dir, name)) => (dir.to_string(), name.to_string()),
            None => (String::new(), path),
        };
        match self.load_one::<SiteInfo>(&dir, &name).await {
            Ok(entry) => entry.doc,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load site info");
                SiteInfo::default()
            }
        }
    }

    /// All home sections, loaded side by side
    pub async fn load_home(&self, manifest: &ManifestConfig) -> HomeCatalog {
        let (albums, extras, top_tracks, artists, site) = tokio::join!(
            self.load_albums(&manifest.albums),
            self.load_albums(&manifest.extras),
            self.load_tracks(&manifest.top_tracks),
            self.load_artists(&manifest.artists),
            self.load_site_info(),
        );

        tracing::info!(
            albums = albums.len(),
            extras = extras.len(),
            top_tracks = top_tracks.len(),
            artists = artists.len(),
            "Home catalog loaded"
        );

        HomeCatalog {
            albums,
            extras,
            top_tracks,
            artists,
            site,
        }
    }
}

pub fn document_path(dir: &str, name: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::source::MemorySource;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn loader(source: MemorySource) -> CatalogLoader<MemorySource> {
        CatalogLoader::new(Arc::new(source), LayoutConfig::default())
    }

    fn song(title: &str) -> String {
        format!(r#"{{"title":"{}"}}"#, title)
    }

    #[tokio::test]
    async fn failures_are_omitted_and_order_is_kept() {
        let source = MemorySource::new()
            .with("songs/a.json", &song("A"))
            .with("songs/c.json", "{ not json")
            .with("songs/d.json", &song("D"))
            .with("songs/e.json", &song("E"));
        let loader = loader(source);

        let requested = names(&["e.json", "a.json", "b.json", "c.json", "d.json"]);
        let tracks: Vec<Entry<Track>> = loader.load_all("songs", &requested).await;

        let keys: Vec<&str> = tracks.iter().map(|t| t.key.as_str()).collect();
        assert_eq!(keys, vec!["e.json", "a.json", "d.json"]);
        assert_eq!(tracks[1].doc.title, "A");
    }

    #[tokio::test]
    async fn duplicate_names_load_once() {
        let loader = loader(MemorySource::new().with("songs/a.json", &song("A")));
        let tracks: Vec<Entry<Track>> =
            loader.load_all("songs", &names(&["a.json", "a.json"])).await;
        assert_eq!(tracks.len(), 1);
    }

    #[tokio::test]
    async fn load_one_reports_fetch_and_parse_failures() {
        let loader = loader(MemorySource::new().with("songs/bad.json", "[1, 2]"));

        let missing = loader.load_one::<Track>("songs", "missing.json").await;
        assert!(matches!(missing, Err(ArchiveError::Fetch { .. })));

        let bad = loader.load_one::<Track>("songs", "bad.json").await;
        assert!(matches!(bad, Err(ArchiveError::Parse { ref path, .. }) if path == "songs/bad.json"));
    }

    #[tokio::test]
    async fn album_tracklist_loads_in_two_phases() {
        let layout = LayoutConfig::default();
        let source = MemorySource::new()
            .with(
                &document_path(&layout.albums_dir, "qsd1-emoslay.json"),
                r#"{"title":"Emo Slay","tracklist":["a.json","b.json","c.json"]}"#,
            )
            .with(&document_path(&layout.songs_dir, "a.json"), &song("A"))
            .with(&document_path(&layout.songs_dir, "c.json"), &song("C"));
        let loader = loader(source);

        let (album, tracks) = loader.load_album_with_tracks("qsd1-emoslay.json").await.unwrap();
        assert_eq!(album.doc.title, "Emo Slay");
        let titles: Vec<&str> = tracks.iter().map(|t| t.doc.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
    }

    #[tokio::test]
    async fn home_survives_missing_site_document() {
        let layout = LayoutConfig::default();
        let source = MemorySource::new()
            .with(&document_path(&layout.albums_dir, "x.json"), r#"{"title":"X"}"#)
            .with(&document_path(&layout.artists_dir, "r.json"), r#"{"name":"R"}"#);
        let loader = loader(source);

        let manifest = ManifestConfig {
            albums: names(&["x.json", "y.json"]),
            extras: vec![],
            top_tracks: names(&["t.json"]),
            artists: names(&["r.json"]),
        };
        let home = loader.load_home(&manifest).await;

        assert_eq!(home.albums.len(), 1);
        assert!(home.extras.is_empty());
        assert!(home.top_tracks.is_empty());
        assert_eq!(home.artists[0].doc.name, "R");
        assert_eq!(home.site, SiteInfo::default());
    }
}
