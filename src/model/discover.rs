//! File discovery for local content roots

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use walkdir::WalkDir;

use crate::config::{Config, ManifestConfig};

pub const FILE_LIST_NAME: &str = "file-list.txt";

/// Every file under `root`, as `/`-separated paths relative to it, sorted
pub fn list_files(root: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(root)?;
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        files.push(parts.join("/"));
    }
    Ok(files)
}

/// Write the listing to `file-list.txt` at the root and return its path.
/// The previous listing is not included in the new one.
pub fn write_file_list(root: &Path) -> Result<PathBuf> {
    let output = root.join(FILE_LIST_NAME);
    let files: Vec<String> = list_files(root)?
        .into_iter()
        .filter(|f| f != FILE_LIST_NAME)
        .collect();
    fs::write(&output, files.join("\n"))?;
    Ok(output)
}

/// `*.json` file names directly inside `dir`, sorted by name
pub fn json_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| name.ends_with(".json"))
        .collect();
    names.sort();
    names
}

/// Fill empty manifest lists from the matching directories of a local root
pub fn fill_manifest(config: &mut Config, root: &Path) {
    let layout = config.layout.clone();
    let under = |dir: &str| root.join(dir.trim_start_matches('/'));
    let ManifestConfig {
        albums,
        extras: _,
        top_tracks,
        artists,
    } = &mut config.manifest;

    if albums.is_empty() {
        // site.json may sit next to the album documents
        let site_name = layout.site_document.rsplit('/').next().unwrap_or_default();
        *albums = json_names(&under(&layout.albums_dir))
            .into_iter()
            .filter(|name| name != site_name)
            .collect();
        tracing::info!(count = albums.len(), "Album manifest filled from disk");
    }
    if top_tracks.is_empty() {
        *top_tracks = json_names(&under(&layout.songs_dir));
        tracing::info!(count = top_tracks.len(), "Top track manifest filled from disk");
    }
    if artists.is_empty() {
        *artists = json_names(&under(&layout.artists_dir));
        tracing::info!(count = artists.len(), "Artist manifest filled from disk");
    }
}
