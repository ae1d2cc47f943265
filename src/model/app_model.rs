//! Main application model with state management

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use super::content::{AlbumDetail, ContentState, ContentView};
use super::entry::{Album, Artist, Entry, SiteInfo, Tracklist};
use super::loader::HomeCatalog;
use super::playback::{NowPlaying, PlaybackInfo};
use super::presenter::ModalPresenter;
use super::source::{ContentSource, DocumentSource};
use super::types::{Section, SelectedItem, UiState};
use super::views::{AlbumView, ArtistView, Card, MediaPaths};

/// Cards for every home section, in `Section::ALL` order
pub type HomeCards = [Vec<Card>; 4];

/// Main application model containing all session state
pub struct AppModel<S = ContentSource> {
    pub ui_state: Arc<Mutex<UiState>>,
    pub content_state: Arc<Mutex<ContentState>>,
    home: Arc<Mutex<HomeCatalog>>,
    playback: Arc<Mutex<PlaybackInfo>>,
    pub modal: ModalPresenter<S>,
    paths: MediaPaths,
    error_display: Duration,
    pub should_quit: Arc<Mutex<bool>>,
}

impl<S: DocumentSource> AppModel<S> {
    pub fn new(modal: ModalPresenter<S>, paths: MediaPaths, error_display: Duration) -> Self {
        Self {
            ui_state: Arc::new(Mutex::new(UiState::default())),
            content_state: Arc::new(Mutex::new(ContentState::default())),
            home: Arc::new(Mutex::new(HomeCatalog::default())),
            playback: Arc::new(Mutex::new(PlaybackInfo::default())),
            modal,
            paths,
            error_display,
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    // ========================================================================
    // Home catalog
    // ========================================================================

    pub async fn set_home(&self, home: HomeCatalog) {
        *self.home.lock().await = home;

        // Selections may point past the end of a section that came back shorter
        let lens = self.section_lens().await;
        let mut state = self.ui_state.lock().await;
        for section in Section::ALL {
            let i = section.index();
            state.selected[i] = state.selected[i].min(lens[i].saturating_sub(1));
        }
    }

    pub async fn get_site_info(&self) -> SiteInfo {
        self.home.lock().await.site.clone()
    }

    pub async fn get_top_tracks(&self) -> Tracklist {
        self.home.lock().await.top_tracks.clone()
    }

    pub async fn get_home_cards(&self) -> HomeCards {
        let home = self.home.lock().await;
        [
            home.albums.iter().map(|a| Card::album(a, &self.paths)).collect(),
            home.extras.iter().map(|a| Card::album(a, &self.paths)).collect(),
            home.top_tracks.iter().map(Card::track).collect(),
            home.artists.iter().map(|a| Card::artist(a, &self.paths)).collect(),
        ]
    }

    async fn section_lens(&self) -> [usize; 4] {
        let home = self.home.lock().await;
        [
            home.albums.len(),
            home.extras.len(),
            home.top_tracks.len(),
            home.artists.len(),
        ]
    }

    pub async fn find_album(&self, key: &str) -> Option<Entry<Album>> {
        let home = self.home.lock().await;
        home.albums
            .iter()
            .chain(home.extras.iter())
            .find(|album| album.key == key)
            .cloned()
    }

    pub async fn find_artist(&self, key: &str) -> Option<Entry<Artist>> {
        let home = self.home.lock().await;
        home.artists.iter().find(|artist| artist.key == key).cloned()
    }

    // ========================================================================
    // Home navigation
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn cycle_section_forward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.next();
    }

    pub async fn cycle_section_backward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.prev();
    }

    pub async fn move_selection_up(&self) {
        let mut state = self.ui_state.lock().await;
        let i = state.active_section.index();
        state.selected[i] = state.selected[i].saturating_sub(1);
    }

    pub async fn move_selection_down(&self) {
        let lens = self.section_lens().await;
        let mut state = self.ui_state.lock().await;
        let i = state.active_section.index();
        if state.selected[i] + 1 < lens[i] {
            state.selected[i] += 1;
        }
    }

    pub async fn get_selected_home_item(&self) -> Option<SelectedItem> {
        let state = self.ui_state.lock().await;
        let section = state.active_section;
        let index = state.selected_in(section);
        drop(state);

        let home = self.home.lock().await;
        match section {
            Section::Albums => home.albums.get(index).map(|a| SelectedItem::Album { key: a.key.clone() }),
            Section::Extras => home.extras.get(index).map(|a| SelectedItem::Album { key: a.key.clone() }),
            Section::TopTracks => (index < home.top_tracks.len()).then_some(SelectedItem::Track { index }),
            Section::Artists => home.artists.get(index).map(|a| SelectedItem::Artist { key: a.key.clone() }),
        }
    }

    // ========================================================================
    // Errors and popups
    // ========================================================================

    pub async fn set_error(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.error_message = Some(message);
        state.error_timestamp = Some(Instant::now());
    }

    pub async fn clear_error(&self) {
        let mut state = self.ui_state.lock().await;
        state.error_message = None;
        state.error_timestamp = None;
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    pub async fn auto_clear_old_errors(&self) {
        let mut state = self.ui_state.lock().await;
        if let Some(timestamp) = state.error_timestamp {
            if timestamp.elapsed() >= self.error_display {
                state.error_message = None;
                state.error_timestamp = None;
            }
        }
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    // ========================================================================
    // Content views
    // ========================================================================

    pub async fn get_content_state(&self) -> ContentState {
        self.content_state.lock().await.clone()
    }

    pub async fn set_content_loading(&self, loading: bool) {
        self.content_state.lock().await.is_loading = loading;
    }

    /// Push the album header right away; tracks arrive with `set_album_tracks`
    pub async fn push_album_detail(&self, album: &Entry<Album>) {
        let detail = AlbumDetail {
            view: AlbumView::from_entry(album, &self.paths),
            tracks: Vec::new(),
            loading_tracks: true,
        };
        let mut state = self.content_state.lock().await;
        state.push(ContentView::AlbumDetail {
            detail,
            selected_index: 0,
        });
        state.is_loading = false;
    }

    /// Fill in the tracklist of the album detail for `album_key`, if it is
    /// still the current view
    pub async fn set_album_tracks(&self, album_key: &str, tracks: Tracklist) {
        let mut state = self.content_state.lock().await;
        if let ContentView::AlbumDetail {
            detail,
            selected_index,
        } = &mut state.view
        {
            if detail.view.key == album_key {
                detail.tracks = tracks;
                detail.loading_tracks = false;
                *selected_index = 0;
            }
        }
    }

    pub async fn push_artist_detail(&self, artist: &Entry<Artist>) {
        let mut state = self.content_state.lock().await;
        state.push(ContentView::ArtistDetail {
            detail: ArtistView::from_entry(artist, &self.paths),
            scroll: 0,
        });
        state.is_loading = false;
    }

    pub async fn navigate_back(&self) -> bool {
        self.content_state.lock().await.back()
    }

    pub async fn is_at_home(&self) -> bool {
        self.content_state.lock().await.is_home()
    }

    pub async fn content_move_up(&self) {
        let mut state = self.content_state.lock().await;
        match &mut state.view {
            ContentView::AlbumDetail { selected_index, .. } => {
                *selected_index = selected_index.saturating_sub(1);
            }
            ContentView::ArtistDetail { scroll, .. } => {
                *scroll = scroll.saturating_sub(1);
            }
            ContentView::Home => {}
        }
    }

    pub async fn content_move_down(&self) {
        let mut state = self.content_state.lock().await;
        match &mut state.view {
            ContentView::AlbumDetail {
                detail,
                selected_index,
            } => {
                if *selected_index + 1 < detail.tracks.len() {
                    *selected_index += 1;
                }
            }
            ContentView::ArtistDetail { scroll, .. } => {
                *scroll = scroll.saturating_add(1);
            }
            ContentView::Home => {}
        }
    }

    /// The open album's tracklist and the selected position in it
    pub async fn get_selected_album_track(&self) -> Option<(Tracklist, usize)> {
        let state = self.content_state.lock().await;
        match &state.view {
            ContentView::AlbumDetail {
                detail,
                selected_index,
            } if *selected_index < detail.tracks.len() => {
                Some((detail.tracks.clone(), *selected_index))
            }
            _ => None,
        }
    }

    // ========================================================================
    // Playback
    // ========================================================================

    pub async fn set_now_playing(&self, now_playing: NowPlaying) {
        self.playback.lock().await.now_playing = Some(now_playing);
    }

    pub async fn get_playback_info(&self) -> PlaybackInfo {
        self.playback.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LayoutConfig, MediaConfig};
    use crate::model::media::MediaResolver;
    use crate::model::source::MemorySource;

    fn model() -> AppModel<MemorySource> {
        let paths = MediaPaths::from_config(&LayoutConfig::default(), &MediaConfig::default());
        let modal = ModalPresenter::new(
            Arc::new(MemorySource::new()),
            MediaResolver::new(paths.clone(), true),
            Duration::from_millis(300),
        );
        AppModel::new(modal, paths, Duration::from_secs(5))
    }

    fn home() -> HomeCatalog {
        HomeCatalog {
            albums: vec![
                Entry::new("qsd1-emoslay.json", serde_json::from_str(r#"{"title":"Emo Slay"}"#).unwrap()),
                Entry::new("qsd2-idhat.json", serde_json::from_str(r#"{"title":"IDHAT"}"#).unwrap()),
            ],
            extras: vec![],
            top_tracks: vec![Entry::new("icon.json", serde_json::from_str(r#"{"title":"Icon"}"#).unwrap())],
            artists: vec![Entry::new("cr.json", serde_json::from_str(r#"{"name":"CR"}"#).unwrap())],
            site: SiteInfo::default(),
        }
    }

    #[tokio::test]
    async fn selection_is_clamped_to_section_length() {
        let model = model();
        model.set_home(home()).await;

        for _ in 0..5 {
            model.move_selection_down().await;
        }
        assert_eq!(
            model.get_selected_home_item().await,
            Some(SelectedItem::Album { key: "qsd2-idhat.json".into() })
        );

        model.cycle_section_forward().await;
        assert_eq!(model.get_selected_home_item().await, None);

        model.cycle_section_forward().await;
        assert_eq!(
            model.get_selected_home_item().await,
            Some(SelectedItem::Track { index: 0 })
        );
    }

    #[tokio::test]
    async fn album_tracks_only_land_on_their_own_detail() {
        let model = model();
        model.set_home(home()).await;
        let album = model.find_album("qsd1-emoslay.json").await.unwrap();
        model.push_album_detail(&album).await;

        model.set_album_tracks("other.json", home().top_tracks).await;
        assert!(model.get_selected_album_track().await.is_none());

        model.set_album_tracks("qsd1-emoslay.json", home().top_tracks).await;
        let (tracks, index) = model.get_selected_album_track().await.unwrap();
        assert_eq!((tracks.len(), index), (1, 0));

        assert!(model.navigate_back().await);
        assert!(model.is_at_home().await);
        assert!(!model.navigate_back().await);
    }

    #[tokio::test(start_paused = true)]
    async fn errors_clear_after_display_time() {
        let model = model();
        model.set_error("boom".into()).await;
        model.auto_clear_old_errors().await;
        assert!(model.has_error().await);

        tokio::time::advance(Duration::from_secs(6)).await;
        model.auto_clear_old_errors().await;
        assert!(!model.has_error().await);
    }

    #[tokio::test]
    async fn home_cards_follow_section_order() {
        let model = model();
        model.set_home(home()).await;
        let cards = model.get_home_cards().await;

        assert_eq!(cards[0][0].image.as_deref(), Some("assets/images/albumcovers/emoslay.jpg"));
        assert!(cards[1].is_empty());
        assert_eq!(cards[2][0].subtitle, "QSD");
        assert_eq!(cards[3][0].title, "CR");
    }
}
