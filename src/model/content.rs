//! Content view state: home screen and the detail views pushed over it

use super::entry::Tracklist;
use super::views::{AlbumView, ArtistView};

/// Album detail view data
#[derive(Clone, Debug)]
pub struct AlbumDetail {
    pub view: AlbumView,
    pub tracks: Tracklist,
    /// True while the tracklist documents are still being fetched
    pub loading_tracks: bool,
}

/// Represents the current view in the main content area
#[derive(Clone, Debug, Default)]
pub enum ContentView {
    #[default]
    Home,
    AlbumDetail {
        detail: AlbumDetail,
        selected_index: usize,
    },
    ArtistDetail {
        detail: ArtistView,
        scroll: u16,
    },
}

/// State for the main content area
#[derive(Clone, Debug, Default)]
pub struct ContentState {
    pub view: ContentView,
    pub navigation_stack: Vec<ContentView>,
    pub is_loading: bool,
}

impl ContentState {
    pub fn push(&mut self, view: ContentView) {
        let previous = std::mem::replace(&mut self.view, view);
        self.navigation_stack.push(previous);
    }

    /// Returns false when already at the home screen
    pub fn back(&mut self) -> bool {
        match self.navigation_stack.pop() {
            Some(previous) => {
                self.view = previous;
                true
            }
            None => false,
        }
    }

    pub fn is_home(&self) -> bool {
        matches!(self.view, ContentView::Home)
    }
}
