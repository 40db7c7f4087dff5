//! Reading `songs.json` playlist manifests.
//!
//! A manifest lives inside a playlist folder and looks like
//! `{ "songs": [ { "title": "...", "filePath": "..." } ] }`. Loading happens on
//! a background thread and the result is handed back to the event loop through
//! a channel, so a slow disk never blocks the UI.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use log::{debug, info};
use serde::Deserialize;

use crate::error::PlayerError;

use super::catalog::PlaylistSource;
use super::model::{Playlist, Track};

#[derive(Debug, Deserialize)]
struct Manifest {
    // A manifest without a `songs` key is an empty playlist, not an error.
    #[serde(default)]
    songs: Vec<ManifestEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ManifestEntry {
    title: String,
    file_path: String,
}

/// Result of a background manifest load, delivered to the event loop.
#[derive(Debug)]
pub struct PlaylistLoaded {
    /// Catalog index the load was issued for.
    pub catalog_index: usize,
    pub result: Result<Playlist, PlayerError>,
}

/// Path of the manifest file inside `folder`.
pub fn manifest_path(folder: &Path, manifest_name: &str) -> PathBuf {
    folder.join(manifest_name)
}

/// Parse manifest text into tracks.
pub fn parse_manifest(text: &str) -> Result<Vec<Track>, serde_json::Error> {
    let manifest: Manifest = serde_json::from_str(text)?;
    Ok(manifest
        .songs
        .into_iter()
        .map(|e| Track::new(e.title, e.file_path))
        .collect())
}

/// Read and parse the manifest of `source`.
pub fn load_playlist(source: &PlaylistSource, manifest_name: &str) -> Result<Playlist, PlayerError> {
    let path = manifest_path(&source.folder, manifest_name);
    debug!("reading playlist manifest {}", path.display());

    let text = fs::read_to_string(&path).map_err(|e| PlayerError::playlist_fetch(&path, e))?;
    let tracks = parse_manifest(&text).map_err(|e| PlayerError::playlist_fetch(&path, e))?;

    info!(
        "loaded {} track(s) for playlist \"{}\" from {}",
        tracks.len(),
        source.name,
        path.display()
    );
    Ok(Playlist::with_tracks(source.name.clone(), tracks))
}

/// Load `source` on a background thread and send the outcome to `tx`.
pub fn spawn_load(
    catalog_index: usize,
    source: PlaylistSource,
    manifest_name: String,
    tx: Sender<PlaylistLoaded>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let result = load_playlist(&source, &manifest_name);
        // The receiver is gone only when the app is shutting down.
        let _ = tx.send(PlaylistLoaded {
            catalog_index,
            result,
        });
    })
}
