//! Track modal: visibility lifecycle, in-place navigation and the lyrics popout.
//!
//! Visibility moves strictly `Closed -> Opening -> Open -> Closing -> Closed`.
//! Opening lasts while the media for the entry is being resolved; Closing
//! lasts for the configured close delay, which runs as a spawned task so the
//! caller is never blocked. Reopening during Closing aborts that task, and
//! the task re-checks a generation counter before it applies the transition,
//! so a stale close never lands on a newer open.
//!
//! Background list scrolling is suppressed from the moment the modal starts
//! opening until the close delay has elapsed.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::error::ArchiveError;
use super::entry::{Entry, Track, Tracklist};
use super::media::{MediaResolver, MediaStatus};
use super::navigation::NavigationState;
use super::source::DocumentSource;
use super::views::{LyricsStatus, TrackView};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalVisibility {
    Closed,
    Opening,
    Open,
    Closing,
}

impl ModalVisibility {
    /// Whether the overlay is on screen at all
    pub fn is_shown(self) -> bool {
        self != ModalVisibility::Closed
    }
}

/// Keys the modal cares about; everything else is `Other`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalKey {
    Escape,
    Left,
    Right,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyDisposition {
    Handled,
    PassThrough,
}

/// What the view needs to draw the modal for one frame
#[derive(Clone, Debug)]
pub struct ModalSnapshot {
    pub visibility: ModalVisibility,
    pub view: Option<TrackView>,
    pub media: MediaStatus,
    pub lyrics_open: bool,
    pub lyrics_scroll: u16,
    /// `(index, len)` of the cursor
    pub position: Option<(usize, usize)>,
}

impl Default for ModalSnapshot {
    fn default() -> Self {
        Self {
            visibility: ModalVisibility::Closed,
            view: None,
            media: MediaStatus::Probing,
            lyrics_open: false,
            lyrics_scroll: 0,
            position: None,
        }
    }
}

struct PresenterState {
    visibility: ModalVisibility,
    cursor: NavigationState<Entry<Track>>,
    view: Option<TrackView>,
    media: MediaStatus,
    lyrics_open: bool,
    lyrics_scroll: u16,
    scroll_locked: bool,
    generation: u64,
    pending_close: Option<JoinHandle<()>>,
}

impl PresenterState {
    fn new() -> Self {
        Self {
            visibility: ModalVisibility::Closed,
            cursor: NavigationState::new(),
            view: None,
            media: MediaStatus::Probing,
            lyrics_open: false,
            lyrics_scroll: 0,
            scroll_locked: false,
            generation: 0,
            pending_close: None,
        }
    }

    /// Complete a pending close right away
    fn finish_close(&mut self) {
        if let Some(pending) = self.pending_close.take() {
            pending.abort();
        }
        self.visibility = ModalVisibility::Closed;
        self.scroll_locked = false;
    }
}

pub struct ModalPresenter<S> {
    state: Arc<Mutex<PresenterState>>,
    source: Arc<S>,
    resolver: MediaResolver,
    close_delay: Duration,
}

impl<S> Clone for ModalPresenter<S> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            source: self.source.clone(),
            resolver: self.resolver.clone(),
            close_delay: self.close_delay,
        }
    }
}

impl<S: DocumentSource> ModalPresenter<S> {
    pub fn new(source: Arc<S>, resolver: MediaResolver, close_delay: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(PresenterState::new())),
            source,
            resolver,
            close_delay,
        }
    }

    pub fn render(&self, entry: &Entry<Track>) -> TrackView {
        TrackView::from_entry(entry, self.resolver.paths())
    }

    // ========================================================================
    // Cursor
    // ========================================================================

    /// Replace the tracklist and select `index`. A visible modal re-renders
    /// in place.
    pub async fn seek(&self, tracks: Tracklist, index: usize) {
        let refreshed = {
            let mut state = self.state.lock().await;
            state.cursor.seek(tracks, index as isize);
            if state.visibility.is_shown() {
                self.rerender(&mut state)
            } else {
                None
            }
        };
        if let Some(entry) = refreshed {
            self.resolve_media(entry).await;
        }
    }

    pub async fn next(&self) -> Result<(), ArchiveError> {
        self.step(true).await
    }

    pub async fn prev(&self) -> Result<(), ArchiveError> {
        self.step(false).await
    }

    async fn step(&self, forward: bool) -> Result<(), ArchiveError> {
        let refreshed = {
            let mut state = self.state.lock().await;
            let index = if forward {
                state.cursor.next()?
            } else {
                state.cursor.prev()?
            };
            tracing::debug!(index, "Modal cursor moved");
            self.rerender(&mut state)
        };
        if let Some(entry) = refreshed {
            self.resolve_media(entry).await;
        }
        Ok(())
    }

    fn rerender(&self, state: &mut PresenterState) -> Option<Entry<Track>> {
        let entry = state.cursor.current().ok()?.clone();
        state.view = Some(self.render(&entry));
        state.media = MediaStatus::Probing;
        state.lyrics_open = false;
        state.lyrics_scroll = 0;
        Some(entry)
    }

    async fn resolve_media(&self, entry: Entry<Track>) {
        let media: MediaStatus = self.resolver.resolve(&*self.source, &entry.key).await.into();
        let mut state = self.state.lock().await;
        // The cursor may have moved on while the probe was running
        if state.view.as_ref().is_some_and(|view| view.key == entry.key) {
            state.media = media;
        }
    }

    // ========================================================================
    // Visibility
    // ========================================================================

    /// Show the entry at the cursor. No-op while already opening or open.
    pub async fn open(&self) -> Result<(), ArchiveError> {
        let (entry, generation) = {
            let mut state = self.state.lock().await;
            match state.visibility {
                ModalVisibility::Opening | ModalVisibility::Open => return Ok(()),
                ModalVisibility::Closing => state.finish_close(),
                ModalVisibility::Closed => {}
            }

            let entry = state.cursor.current()?.clone();
            state.generation += 1;
            state.visibility = ModalVisibility::Opening;
            state.scroll_locked = true;
            state.view = Some(self.render(&entry));
            state.media = MediaStatus::Probing;
            state.lyrics_open = false;
            state.lyrics_scroll = 0;
            tracing::debug!(key = %entry.key, "Modal opening");
            (entry, state.generation)
        };

        self.resolve_media(entry).await;

        let mut state = self.state.lock().await;
        if state.generation == generation && state.visibility == ModalVisibility::Opening {
            state.visibility = ModalVisibility::Open;
            tracing::debug!("Modal open");
        }
        Ok(())
    }

    /// Seek, then open. An already open modal just re-renders.
    pub async fn open_at(&self, tracks: Tracklist, index: usize) -> Result<(), ArchiveError> {
        self.seek(tracks, index).await;
        self.open().await
    }

    /// Start closing. Closed is reached after the close delay, off the
    /// caller's task. No-op unless open.
    pub async fn close(&self) {
        let mut state = self.state.lock().await;
        if state.visibility != ModalVisibility::Open {
            return;
        }

        state.visibility = ModalVisibility::Closing;
        state.lyrics_open = false;
        state.generation += 1;
        let generation = state.generation;
        tracing::debug!("Modal closing");

        let shared = Arc::clone(&self.state);
        let delay = self.close_delay;
        state.pending_close = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = shared.lock().await;
            if state.generation == generation && state.visibility == ModalVisibility::Closing {
                state.visibility = ModalVisibility::Closed;
                state.scroll_locked = false;
                state.pending_close = None;
                tracing::debug!("Modal closed");
            }
        }));
    }

    // ========================================================================
    // Lyrics popout
    // ========================================================================

    /// Open the popout if the current track has lyrics to show
    pub async fn open_lyrics(&self) -> bool {
        let mut state = self.state.lock().await;
        let available = state.visibility == ModalVisibility::Open
            && state
                .view
                .as_ref()
                .is_some_and(|view| view.lyrics == LyricsStatus::Available);
        if available {
            state.lyrics_open = true;
            state.lyrics_scroll = 0;
        }
        available
    }

    pub async fn close_lyrics(&self) -> bool {
        let mut state = self.state.lock().await;
        std::mem::replace(&mut state.lyrics_open, false)
    }

    pub async fn scroll_lyrics(&self, down: bool) {
        let mut state = self.state.lock().await;
        if !state.lyrics_open {
            return;
        }
        let max = state
            .view
            .as_ref()
            .map(|view| view.lyric_lines.len().saturating_sub(1) as u16)
            .unwrap_or(0);
        state.lyrics_scroll = if down {
            (state.lyrics_scroll + 1).min(max)
        } else {
            state.lyrics_scroll.saturating_sub(1)
        };
    }

    // ========================================================================
    // Keyboard
    // ========================================================================

    /// Escape, Left and Right are handled while open; everything else, and
    /// every key while not open, passes through. Escape closes the lyrics
    /// popout before the modal itself.
    pub async fn handle_key(&self, key: ModalKey) -> KeyDisposition {
        let (visibility, lyrics_open) = {
            let state = self.state.lock().await;
            (state.visibility, state.lyrics_open)
        };
        if visibility != ModalVisibility::Open {
            return KeyDisposition::PassThrough;
        }

        match key {
            ModalKey::Escape => {
                if lyrics_open {
                    self.close_lyrics().await;
                } else {
                    self.close().await;
                }
                KeyDisposition::Handled
            }
            ModalKey::Left => {
                if let Err(e) = self.prev().await {
                    tracing::debug!(error = %e, "Nothing to go back to");
                }
                KeyDisposition::Handled
            }
            ModalKey::Right => {
                if let Err(e) = self.next().await {
                    tracing::debug!(error = %e, "Nothing to advance to");
                }
                KeyDisposition::Handled
            }
            ModalKey::Other => KeyDisposition::PassThrough,
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub async fn visibility(&self) -> ModalVisibility {
        self.state.lock().await.visibility
    }

    pub async fn is_scroll_locked(&self) -> bool {
        self.state.lock().await.scroll_locked
    }

    pub async fn is_lyrics_open(&self) -> bool {
        self.state.lock().await.lyrics_open
    }

    pub async fn current(&self) -> Result<Entry<Track>, ArchiveError> {
        self.state.lock().await.cursor.current().cloned()
    }

    pub async fn tracklist(&self) -> Tracklist {
        self.state.lock().await.cursor.collection().to_vec()
    }

    /// Current view and media, once resolution has finished
    pub async fn current_media(&self) -> (Option<TrackView>, MediaStatus) {
        let state = self.state.lock().await;
        (state.view.clone(), state.media.clone())
    }

    pub async fn snapshot(&self) -> ModalSnapshot {
        let state = self.state.lock().await;
        ModalSnapshot {
            visibility: state.visibility,
            view: state.view.clone(),
            media: state.media.clone(),
            lyrics_open: state.lyrics_open,
            lyrics_scroll: state.lyrics_scroll,
            position: state.cursor.index().map(|i| (i, state.cursor.len())),
        }
    }
}
