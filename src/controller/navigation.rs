//! Navigation-related controller methods (home, album and artist views, track modal)

use crate::error::ArchiveError;
use crate::model::{DocumentSource, SelectedItem, Tracklist};
use super::AppController;

impl<S: DocumentSource + 'static> AppController<S> {
    pub async fn load_home(&self) {
        self.model.lock().await.set_content_loading(true).await;

        let home = self.loader.load_home(self.manifest()).await;
        let nothing_loaded = home.albums.is_empty()
            && home.extras.is_empty()
            && home.top_tracks.is_empty()
            && home.artists.is_empty();

        let model = self.model.lock().await;
        model.set_home(home).await;
        model.set_content_loading(false).await;
        if nothing_loaded {
            tracing::warn!("Home catalog is empty");
            model
                .set_error("Nothing could be loaded from the content root.".to_string())
                .await;
        }
    }

    /// Show the album header at once, then load its tracks. Albums missing
    /// from the home catalog are fetched by name first.
    pub async fn open_album(&self, key: &str) {
        let model = self.model.lock().await;
        let Some(album) = model.find_album(key).await else {
            drop(model);
            self.open_uncatalogued_album(key).await;
            return;
        };
        model.push_album_detail(&album).await;
        drop(model);

        let tracks = self.loader.load_tracklist(&album.doc).await;
        tracing::info!(
            album = key,
            declared = album.doc.tracklist.len(),
            loaded = tracks.len(),
            "Album tracks loaded"
        );
        self.model.lock().await.set_album_tracks(key, tracks).await;
    }

    async fn open_uncatalogued_album(&self, key: &str) {
        self.model.lock().await.set_content_loading(true).await;
        let result = self.loader.load_album_with_tracks(key).await;

        let model = self.model.lock().await;
        model.set_content_loading(false).await;
        match result {
            Ok((album, tracks)) => {
                model.push_album_detail(&album).await;
                model.set_album_tracks(key, tracks).await;
            }
            Err(e) => {
                tracing::warn!(album = key, error = %e, "Album could not be opened");
                model.set_error(Self::format_error(&e)).await;
            }
        }
    }

    pub async fn open_artist(&self, key: &str) {
        let model = self.model.lock().await;
        match model.find_artist(key).await {
            Some(artist) => model.push_artist_detail(&artist).await,
            None => model.set_error(Self::format_error(&ArchiveError::NotFound)).await,
        }
    }

    pub async fn handle_selected_item(&self, item: SelectedItem) {
        match item {
            SelectedItem::Album { key } => {
                let controller = self.clone();
                tokio::spawn(async move {
                    controller.open_album(&key).await;
                });
            }
            SelectedItem::Artist { key } => self.open_artist(&key).await,
            SelectedItem::Track { index } => {
                let tracks = self.model.lock().await.get_top_tracks().await;
                self.open_track(tracks, index);
            }
        }
    }

    pub async fn open_selected_album_track(&self) {
        let selected = self.model.lock().await.get_selected_album_track().await;
        if let Some((tracks, index)) = selected {
            self.open_track(tracks, index);
        }
    }

    /// Open the track modal in the background so the opening state is drawn
    /// while media is resolved
    pub fn open_track(&self, tracks: Tracklist, index: usize) {
        let controller = self.clone();
        tokio::spawn(async move {
            let modal = controller.model.lock().await.modal.clone();
            if let Err(e) = modal.open_at(tracks, index).await {
                tracing::warn!(index, error = %e, "Could not open track");
                let model = controller.model.lock().await;
                model.set_error(Self::format_error(&e)).await;
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::controller;
    use crate::config::ManifestConfig;
    use crate::model::source::MemorySource;
    use crate::model::ContentView;

    fn source() -> MemorySource {
        MemorySource::new()
            .with(
                "assets/data/emo.json",
                r#"{"title":"Emo","tracklist":["a.json","b.json","c.json"]}"#,
            )
            .with("assets/data/qsd-songs/a.json", r#"{"title":"A"}"#)
            .with("assets/data/qsd-songs/c.json", r#"{"title":"C"}"#)
            .with("assets/artists/cr.json", r#"{"name":"CR"}"#)
    }

    fn manifest() -> ManifestConfig {
        ManifestConfig {
            albums: vec!["emo.json".into()],
            artists: vec!["cr.json".into()],
            ..ManifestConfig::default()
        }
    }

    #[tokio::test]
    async fn album_tracklist_skips_missing_tracks_in_order() {
        let controller = controller(source(), manifest());
        controller.load_home().await;
        controller.open_album("emo.json").await;

        let model = controller.model.lock().await;
        let (tracks, index) = model.get_selected_album_track().await.unwrap();
        let titles: Vec<_> = tracks.iter().map(|t| t.doc.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
        assert_eq!(index, 0);
        assert!(!model.has_error().await);
    }

    #[tokio::test]
    async fn album_outside_the_catalog_is_fetched_by_name() {
        let source = source()
            .with("assets/data/extra.json", r#"{"title":"Extra","tracklist":["c.json"]}"#);
        let controller = controller(source, manifest());
        controller.load_home().await;
        controller.open_album("extra.json").await;

        let model = controller.model.lock().await;
        let (tracks, _) = model.get_selected_album_track().await.unwrap();
        assert_eq!(tracks[0].doc.title, "C");
    }

    #[tokio::test]
    async fn missing_album_sets_an_error_and_stays_home() {
        let controller = controller(source(), manifest());
        controller.load_home().await;
        controller.open_album("missing.json").await;

        let model = controller.model.lock().await;
        assert!(model.is_at_home().await);
        assert!(model.has_error().await);
    }

    #[tokio::test]
    async fn artist_detail_is_pushed() {
        let controller = controller(source(), manifest());
        controller.load_home().await;
        controller.open_artist("cr.json").await;

        let state = controller.model.lock().await.get_content_state().await;
        match state.view {
            ContentView::ArtistDetail { detail, .. } => assert_eq!(detail.name, "CR"),
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_root_reports_an_error() {
        let controller = controller(MemorySource::new(), manifest());
        controller.load_home().await;
        assert!(controller.model.lock().await.has_error().await);
    }
}
