use std::path::PathBuf;

use crate::config::LibrarySettings;

/// A named folder holding a playlist manifest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaylistSource {
    pub name: String,
    pub folder: PathBuf,
}

/// Flat, indexed collection of the playlists the user can switch between.
#[derive(Clone, Debug)]
pub struct Catalog {
    sources: Vec<PlaylistSource>,
    selected: usize,
}

impl Catalog {
    /// Build a catalog whose first entry is `primary`, followed by any
    /// configured playlists that point at a different folder.
    pub fn new(primary: PlaylistSource, settings: &LibrarySettings) -> Self {
        let mut sources = vec![primary];
        for p in &settings.playlists {
            if sources.iter().any(|s| s.folder == p.folder) {
                continue;
            }
            sources.push(PlaylistSource {
                name: p.name.clone(),
                folder: p.folder.clone(),
            });
        }
        Self {
            sources,
            selected: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn current(&self) -> &PlaylistSource {
        &self.sources[self.selected]
    }

    /// Select the entry at `index`; out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.sources.len() {
            self.selected = index;
            true
        } else {
            false
        }
    }

    /// Move to the next playlist, wrapping to the first.
    pub fn cycle(&mut self) -> usize {
        self.selected = (self.selected + 1) % self.sources.len();
        self.selected
    }
}
