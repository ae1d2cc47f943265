//! Error taxonomy for catalog loading, navigation and media resolution

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The document could not be read from the content root
    #[error("failed to fetch {path}: {reason}")]
    Fetch { path: String, reason: String },

    /// The document was read but is not valid for the expected entity
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("collection is empty")]
    EmptyCollection,

    #[error("nothing to show")]
    NotFound,

    /// No playable file exists for the entry under any configured extension
    #[error("media unavailable for {0}")]
    MediaUnavailable(String),
}

impl ArchiveError {
    pub fn fetch(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::Fetch {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
