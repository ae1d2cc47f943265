//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (styles, popups, scrollable lists)
//! - `layout`: Main layout structure (top bar, sidebar)
//! - `content`: Main content area rendering
//! - `progress`: Now-playing bar rendering
//! - `overlays`: Track modal, lyrics popout, error and help popups

mod utils;
mod layout;
mod content;
mod progress;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{ContentState, HomeCards, ModalSnapshot, PlaybackInfo, SiteInfo, UiState};

/// Everything drawn in one frame, gathered from the model before drawing
pub struct FrameState {
    pub site: SiteInfo,
    pub cards: HomeCards,
    pub playback: PlaybackInfo,
    pub ui_state: UiState,
    pub content_state: ContentState,
    pub modal: ModalSnapshot,
}

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, state: &FrameState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Site title + status
                Constraint::Min(0),    // Main content (sidebar + content)
                Constraint::Length(3), // Now playing
            ])
            .split(frame.area());

        layout::render_top_bar(frame, chunks[0], &state.site, state.content_state.is_loading);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30), // Sidebar (sections + about)
                Constraint::Percentage(70), // Main content
            ])
            .split(chunks[1]);

        let at_home = state.content_state.is_home();
        let modal_shown = state.modal.visibility.is_shown();

        layout::render_sidebar(frame, main_chunks[0], &state.ui_state, &state.cards, &state.site, at_home);

        let now_playing_key = state.playback.now_playing.as_ref().map(|track| track.key.as_str());
        content::render_main_content(
            frame,
            main_chunks[1],
            &state.ui_state,
            &state.content_state,
            &state.cards,
            now_playing_key,
            !modal_shown,
        );

        progress::render_now_playing_bar(frame, chunks[2], &state.playback);

        if modal_shown {
            overlays::render_track_modal(frame, &state.modal);
        }

        if state.modal.lyrics_open {
            overlays::render_lyrics_popout(frame, &state.modal);
        }

        // Error notification overlay (if there's an error)
        if state.ui_state.error_message.is_some() {
            overlays::render_error_notification(frame, &state.ui_state);
        }

        // Help popup overlay (if open)
        if state.ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::config::{LayoutConfig, MediaConfig};
    use crate::model::{Entry, MediaPaths, MediaStatus, ModalVisibility, TrackView};

    fn draw(state: &FrameState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| AppView::render(f, state)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    fn state() -> FrameState {
        FrameState {
            site: SiteInfo::default(),
            cards: Default::default(),
            playback: PlaybackInfo::default(),
            ui_state: UiState::default(),
            content_state: ContentState::default(),
            modal: ModalSnapshot::default(),
        }
    }

    #[test]
    fn empty_home_shows_notice_and_idle_bar() {
        let screen = draw(&state());
        assert!(screen.contains("Nothing here yet."));
        assert!(screen.contains("Nothing playing"));
    }

    #[test]
    fn open_modal_reports_missing_media() {
        let paths = MediaPaths::from_config(&LayoutConfig::default(), &MediaConfig::default());
        let entry = Entry::new(
            "icon.json",
            serde_json::from_str(r#"{"title":"Icon","feature":"JW"}"#).unwrap(),
        );
        let mut state = state();
        state.modal = ModalSnapshot {
            visibility: ModalVisibility::Open,
            view: Some(TrackView::from_entry(&entry, &paths)),
            media: MediaStatus::Unavailable,
            position: Some((0, 3)),
            ..ModalSnapshot::default()
        };

        let screen = draw(&state);
        assert!(screen.contains("Icon"));
        assert!(screen.contains("feat. JW"));
        assert!(screen.contains("Media unavailable"));
        assert!(screen.contains("1/3"));
    }
}
