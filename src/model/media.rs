//! Media resolution for track entries.
//!
//! The derived URI for the first configured extension is always known up
//! front. With probing on, each extension is checked in order and the first
//! file that exists wins; with probing off the first extension is trusted.

use crate::error::ArchiveError;
use super::source::DocumentSource;
use super::views::MediaPaths;

/// Result of resolving a track's media, as shown in the modal
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MediaStatus {
    Probing,
    Ready(String),
    Unavailable,
}

impl MediaStatus {
    pub fn ready_uri(&self) -> Option<&str> {
        match self {
            MediaStatus::Ready(uri) => Some(uri),
            _ => None,
        }
    }
}

impl From<Result<String, ArchiveError>> for MediaStatus {
    fn from(result: Result<String, ArchiveError>) -> Self {
        match result {
            Ok(uri) => MediaStatus::Ready(uri),
            Err(_) => MediaStatus::Unavailable,
        }
    }
}

#[derive(Clone, Debug)]
pub struct MediaResolver {
    paths: MediaPaths,
    probe: bool,
}

impl MediaResolver {
    pub fn new(paths: MediaPaths, probe: bool) -> Self {
        Self { paths, probe }
    }

    pub fn paths(&self) -> &MediaPaths {
        &self.paths
    }

    pub async fn resolve<S: DocumentSource>(
        &self,
        source: &S,
        key: &str,
    ) -> Result<String, ArchiveError> {
        if !self.probe {
            return Ok(self.paths.media_uri(key, self.paths.primary_extension()));
        }

        for extension in &self.paths.extensions {
            let uri = self.paths.media_uri(key, extension);
            if source.exists(&uri).await {
                tracing::debug!(key, uri = %uri, "Media resolved");
                return Ok(uri);
            }
        }

        tracing::warn!(key, tried = ?self.paths.extensions, "No playable media found");
        Err(ArchiveError::MediaUnavailable(key.to_string()))
    }
}
