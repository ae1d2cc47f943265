//! Model module - Application state and data types
//!
//! This module contains the archive documents and all state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `entry`: Document types as stored on disk (albums, tracks, artists, site info)
//! - `source`: Where documents come from (local directory or HTTP root)
//! - `loader`: Concurrent, failure-tolerant document loading
//! - `navigation`: Wrapping cursor over a loaded collection
//! - `media`: Media file resolution for tracks
//! - `views`: Display projections of documents
//! - `presenter`: Track modal lifecycle, lyrics popout and keyboard handling
//! - `discover`: File discovery for local roots
//! - `types`, `content`, `playback`: UI, content view and now-playing state
//! - `app_model`: Main application model with state management methods

mod types;
mod playback;
mod content;
mod app_model;

pub mod entry;
pub mod source;
pub mod loader;
pub mod navigation;
pub mod media;
pub mod views;
pub mod presenter;
pub mod discover;

// Re-export all public types for convenient access
pub use types::{Section, SelectedItem, UiState};

pub use playback::{NowPlaying, PlaybackInfo};

pub use content::{AlbumDetail, ContentState, ContentView};

pub use entry::{Entry, SiteInfo, Track, Tracklist};
pub use loader::CatalogLoader;
pub use media::{MediaResolver, MediaStatus};
pub use presenter::{KeyDisposition, ModalKey, ModalPresenter, ModalSnapshot, ModalVisibility};
pub use source::{ContentSource, DocumentSource};
pub use views::{Card, LyricsStatus, MediaPaths, TrackView};

pub use app_model::{AppModel, HomeCards};
