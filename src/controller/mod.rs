//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and view, and hands tracks to the player.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `playback`: Launching tracks in the platform player, shuffle
//! - `navigation`: Home loading, album/artist detail views, the track modal

mod input;
mod playback;
mod navigation;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::ManifestConfig;
use crate::error::ArchiveError;
use crate::model::{AppModel, CatalogLoader, ContentSource, MediaResolver};

pub struct AppController<S = ContentSource> {
    pub(crate) model: Arc<Mutex<AppModel<S>>>,
    pub(crate) loader: CatalogLoader<S>,
    pub(crate) resolver: MediaResolver,
    manifest: Arc<ManifestConfig>,
}

impl<S> Clone for AppController<S> {
    fn clone(&self) -> Self {
        Self {
            model: self.model.clone(),
            loader: self.loader.clone(),
            resolver: self.resolver.clone(),
            manifest: self.manifest.clone(),
        }
    }
}

impl<S> AppController<S> {
    pub fn new(
        model: Arc<Mutex<AppModel<S>>>,
        loader: CatalogLoader<S>,
        resolver: MediaResolver,
        manifest: ManifestConfig,
    ) -> Self {
        Self {
            model,
            loader,
            resolver,
            manifest: Arc::new(manifest),
        }
    }

    pub(crate) fn manifest(&self) -> &ManifestConfig {
        &self.manifest
    }

    pub(crate) fn format_error(error: &ArchiveError) -> String {
        match error {
            ArchiveError::MediaUnavailable(key) => {
                format!("No playable media for {}.", crate::model::entry::file_stem(key))
            }
            ArchiveError::Fetch { path, reason } if reason.contains("404") => {
                format!("Not found: {}", path)
            }
            ArchiveError::Parse { path, .. } => format!("Malformed document: {}", path),
            ArchiveError::EmptyCollection | ArchiveError::NotFound => {
                "Nothing to show here.".to_string()
            }
            _ => format!("Error: {}", error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LayoutConfig, MediaConfig, UiConfig};
    use crate::model::source::MemorySource;
    use crate::model::{MediaPaths, ModalPresenter};

    pub(crate) fn controller(source: MemorySource, manifest: ManifestConfig) -> AppController<MemorySource> {
        let layout = LayoutConfig::default();
        let paths = MediaPaths::from_config(&layout, &MediaConfig::default());
        let source = Arc::new(source);
        let resolver = MediaResolver::new(paths.clone(), true);
        let ui = UiConfig::default();
        let modal = ModalPresenter::new(source.clone(), resolver.clone(), ui.close_delay());
        let model = AppModel::new(modal, paths, ui.error_display());
        AppController::new(
            Arc::new(Mutex::new(model)),
            CatalogLoader::new(source, layout),
            resolver,
            manifest,
        )
    }

    #[test]
    fn errors_are_worded_for_the_status_line() {
        let unavailable = ArchiveError::MediaUnavailable("icon.json".into());
        assert_eq!(
            AppController::<MemorySource>::format_error(&unavailable),
            "No playable media for icon."
        );

        let missing = ArchiveError::fetch("assets/data/x.json", "HTTP 404");
        assert_eq!(
            AppController::<MemorySource>::format_error(&missing),
            "Not found: assets/data/x.json"
        );
    }
}
