//! Core type definitions for the application

use tokio::time::Instant;

/// Home screen section with keyboard focus
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Albums,
    Extras,
    TopTracks,
    Artists,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Albums,
        Section::Extras,
        Section::TopTracks,
        Section::Artists,
    ];

    pub fn next(self) -> Self {
        match self {
            Section::Albums => Section::Extras,
            Section::Extras => Section::TopTracks,
            Section::TopTracks => Section::Artists,
            Section::Artists => Section::Albums,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Section::Albums => Section::Artists,
            Section::Extras => Section::Albums,
            Section::TopTracks => Section::Extras,
            Section::Artists => Section::TopTracks,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::Albums => "Albums",
            Section::Extras => "Other Albums",
            Section::TopTracks => "Top Tracks",
            Section::Artists => "Artists",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Section::Albums => 0,
            Section::Extras => 1,
            Section::TopTracks => 2,
            Section::Artists => 3,
        }
    }
}

/// Represents a selected item for action handling
#[derive(Clone, Debug, PartialEq)]
pub enum SelectedItem {
    Album { key: String },
    Artist { key: String },
    /// A track in the top-tracks list or an album tracklist, by position
    Track { index: usize },
}

/// UI state for the application
#[derive(Clone, Debug)]
pub struct UiState {
    pub active_section: Section,
    /// Selected row per home section, indexed by `Section::index`
    pub selected: [usize; 4],
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    pub show_help_popup: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_section: Section::Albums,
            selected: [0; 4],
            error_message: None,
            error_timestamp: None,
            show_help_popup: false,
        }
    }
}

impl UiState {
    pub fn selected_in(&self, section: Section) -> usize {
        self.selected[section.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_cycle_both_ways() {
        for section in Section::ALL {
            assert_eq!(section.next().prev(), section);
        }
        assert_eq!(Section::Artists.next(), Section::Albums);
        assert_eq!(Section::Albums.prev(), Section::Artists);
    }
}
