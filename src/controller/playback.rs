//! Playback control methods
//!
//! Tracks are handed to the platform's default player; the browser only
//! remembers what it launched last.

use std::time::Instant;

use rand::Rng;

use crate::error::ArchiveError;
use crate::model::{DocumentSource, Entry, MediaStatus, NowPlaying, Track, TrackView};

use super::AppController;

impl<S: DocumentSource + 'static> AppController<S> {
    /// Play the track shown in the modal, once its media is resolved
    pub async fn play_current(&self) {
        let modal = self.model.lock().await.modal.clone();
        let (view, media) = modal.current_media().await;
        let Some(view) = view else {
            return;
        };

        match media {
            MediaStatus::Ready(uri) => self.launch(&view, &uri).await,
            MediaStatus::Unavailable => {
                let error = ArchiveError::MediaUnavailable(view.key.clone());
                self.model.lock().await.set_error(Self::format_error(&error)).await;
            }
            MediaStatus::Probing => tracing::debug!(key = %view.key, "Media still resolving"),
        }
    }

    /// Play a random track from the open tracklist, or from the top tracks
    /// when no modal is showing
    pub async fn shuffle_play(&self) {
        let (modal, top_tracks) = {
            let model = self.model.lock().await;
            (model.modal.clone(), model.get_top_tracks().await)
        };

        let tracks = if modal.visibility().await.is_shown() {
            modal.tracklist().await
        } else {
            top_tracks
        };
        let Some(entry) = pick_random(&tracks) else {
            tracing::debug!("Nothing to shuffle");
            return;
        };

        let view = TrackView::from_entry(entry, self.resolver.paths());
        match self.resolver.resolve(&**self.loader.source(), &entry.key).await {
            Ok(uri) => self.launch(&view, &uri).await,
            Err(e) => {
                self.model.lock().await.set_error(Self::format_error(&e)).await;
            }
        }
    }

    async fn launch(&self, view: &TrackView, uri: &str) {
        let location = self.loader.source().locate(uri);
        tracing::info!(key = %view.key, location = %location, "Launching player");

        match open::that_detached(&location) {
            Ok(()) => {
                let model = self.model.lock().await;
                model
                    .set_now_playing(NowPlaying {
                        key: view.key.clone(),
                        label: view.now_playing_label(),
                        location,
                        started: Instant::now(),
                    })
                    .await;
            }
            Err(e) => {
                tracing::error!(location = %location, error = %e, "Failed to launch player");
                let model = self.model.lock().await;
                model.set_error(format!("Could not start a player: {}", e)).await;
            }
        }
    }
}

fn pick_random(tracks: &[Entry<Track>]) -> Option<&Entry<Track>> {
    if tracks.is_empty() {
        return None;
    }
    let index = rand::thread_rng().gen_range(0..tracks.len());
    tracks.get(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(title: &str) -> Entry<Track> {
        Entry::new(
            format!("{}.json", title),
            serde_json::from_value(serde_json::json!({ "title": title })).unwrap(),
        )
    }

    #[test]
    fn random_pick_stays_in_the_list() {
        assert!(pick_random(&[]).is_none());

        let tracks = vec![track("a"), track("b"), track("c")];
        for _ in 0..20 {
            let picked = pick_random(&tracks).unwrap();
            assert!(tracks.iter().any(|t| t.key == picked.key));
        }
    }
}
