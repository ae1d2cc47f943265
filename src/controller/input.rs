//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{DocumentSource, KeyDisposition, ModalKey, ModalVisibility};
use super::AppController;

impl From<KeyCode> for ModalKey {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Esc => ModalKey::Escape,
            KeyCode::Left => ModalKey::Left,
            KeyCode::Right => ModalKey::Right,
            _ => ModalKey::Other,
        }
    }
}

impl<S: DocumentSource + 'static> AppController<S> {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = self.model.lock().await;

        // Handle error message first (blocks all other interactions)
        if model.has_error().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter => {
                    model.clear_error().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        // Handle help popup
        if model.is_help_popup_open().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H') => {
                    model.hide_help_popup().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        let modal = model.modal.clone();
        drop(model);

        // Track modal
        let visibility = modal.visibility().await;
        if visibility == ModalVisibility::Open {
            if modal.is_lyrics_open().await {
                match key.code {
                    KeyCode::Up => {
                        modal.scroll_lyrics(false).await;
                        return Ok(());
                    }
                    KeyCode::Down => {
                        modal.scroll_lyrics(true).await;
                        return Ok(());
                    }
                    _ => {}
                }
            }

            if modal.handle_key(key.code.into()).await == KeyDisposition::Handled {
                return Ok(());
            }

            match key.code {
                KeyCode::Char('l') | KeyCode::Char('L') => {
                    if !modal.open_lyrics().await {
                        tracing::debug!("No lyrics to pop out");
                    }
                    return Ok(());
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.play_current().await;
                    return Ok(());
                }
                _ => {}
            }
        }

        let model = self.model.lock().await;

        // The background list stays put while the modal is up or still closing
        if modal.is_scroll_locked().await {
            match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') => model.set_should_quit(true).await,
                KeyCode::Char('s') | KeyCode::Char('S') => {
                    drop(model);
                    self.shuffle_play().await;
                }
                KeyCode::Char('h') | KeyCode::Char('H') => model.show_help_popup().await,
                _ => {}
            }
            return Ok(());
        }

        // Album and artist detail views
        if !model.is_at_home().await {
            match key.code {
                KeyCode::Up => {
                    model.content_move_up().await;
                    return Ok(());
                }
                KeyCode::Down => {
                    model.content_move_down().await;
                    return Ok(());
                }
                KeyCode::Enter => {
                    drop(model);
                    self.open_selected_album_track().await;
                    return Ok(());
                }
                KeyCode::Backspace | KeyCode::Esc => {
                    model.navigate_back().await;
                    return Ok(());
                }
                _ => {}
            }
        }

        // Global keybindings
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true).await;
            }
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    model.cycle_section_backward().await;
                } else {
                    model.cycle_section_forward().await;
                }
            }
            KeyCode::BackTab => {
                model.cycle_section_backward().await;
            }
            KeyCode::Up => {
                model.move_selection_up().await;
            }
            KeyCode::Down => {
                model.move_selection_down().await;
            }
            KeyCode::Enter => {
                // Only the home screen gets here
                let selected = model.get_selected_home_item().await;
                drop(model);
                if let Some(item) = selected {
                    self.handle_selected_item(item).await;
                }
            }
            // Shuffle play
            KeyCode::Char('s') | KeyCode::Char('S') => {
                drop(model);
                self.shuffle_play().await;
            }
            // Show help popup
            KeyCode::Char('h') | KeyCode::Char('H') => {
                model.show_help_popup().await;
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::super::tests::controller;
    use crate::config::ManifestConfig;
    use crate::model::source::MemorySource;
    use crate::model::{ModalKey, ModalVisibility, Section};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn source() -> MemorySource {
        MemorySource::new()
            .with("assets/data/qsd-songs/a.json", r#"{"title":"A","lyrics":["la"]}"#)
            .with("assets/data/qsd-songs/b.json", r#"{"title":"B"}"#)
            .with("assets/audio/a.opus", "")
            .with("assets/audio/b.mp3", "")
    }

    fn manifest() -> ManifestConfig {
        ManifestConfig {
            top_tracks: vec!["a.json".into(), "b.json".into()],
            ..ManifestConfig::default()
        }
    }

    #[test]
    fn only_escape_and_arrows_map_to_modal_keys() {
        assert_eq!(ModalKey::from(KeyCode::Esc), ModalKey::Escape);
        assert_eq!(ModalKey::from(KeyCode::Left), ModalKey::Left);
        assert_eq!(ModalKey::from(KeyCode::Right), ModalKey::Right);
        assert_eq!(ModalKey::from(KeyCode::Up), ModalKey::Other);
    }

    #[tokio::test]
    async fn tab_cycles_home_sections() {
        let controller = controller(source(), manifest());
        controller.handle_key_event(press(KeyCode::Tab)).await.unwrap();
        controller.handle_key_event(press(KeyCode::Tab)).await.unwrap();

        let state = controller.model.lock().await.get_ui_state().await;
        assert_eq!(state.active_section, Section::TopTracks);
    }

    #[tokio::test(start_paused = true)]
    async fn modal_swallows_list_keys_until_closed() {
        let controller = controller(source(), manifest());
        controller.load_home().await;
        let modal = controller.model.lock().await.modal.clone();
        let tracks = controller.model.lock().await.get_top_tracks().await;
        modal.open_at(tracks, 0).await.unwrap();
        assert_eq!(modal.visibility().await, ModalVisibility::Open);

        // Right moves the modal cursor, not the home selection
        controller.handle_key_event(press(KeyCode::Right)).await.unwrap();
        assert_eq!(modal.current().await.unwrap().key, "b.json");
        controller.handle_key_event(press(KeyCode::Down)).await.unwrap();
        let state = controller.model.lock().await.get_ui_state().await;
        assert_eq!(state.selected, [0; 4]);

        controller.handle_key_event(press(KeyCode::Left)).await.unwrap();
        controller.handle_key_event(press(KeyCode::Char('l'))).await.unwrap();
        assert!(modal.is_lyrics_open().await);

        // First Escape closes the lyrics, the second one the modal
        controller.handle_key_event(press(KeyCode::Esc)).await.unwrap();
        assert!(!modal.is_lyrics_open().await);
        assert_eq!(modal.visibility().await, ModalVisibility::Open);
        controller.handle_key_event(press(KeyCode::Esc)).await.unwrap();
        assert_eq!(modal.visibility().await, ModalVisibility::Closing);

        tokio::time::sleep(Duration::from_millis(350)).await;
        assert_eq!(modal.visibility().await, ModalVisibility::Closed);
        assert!(!modal.is_scroll_locked().await);
    }
}
