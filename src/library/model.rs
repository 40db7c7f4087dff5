use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TRACK_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique track identity. Titles are display text only and may repeat.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TrackId(u64);

impl TrackId {
    fn allocate() -> Self {
        Self(NEXT_TRACK_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub source: PathBuf,
}

impl Track {
    pub fn new(title: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            id: TrackId::allocate(),
            title: title.into(),
            source: source.into(),
        }
    }
}

/// A named, ordered list of tracks.
#[derive(Clone, Debug, Default)]
pub struct Playlist {
    name: String,
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_tracks(name, Vec::new())
    }

    pub fn with_tracks(name: impl Into<String>, tracks: Vec<Track>) -> Self {
        Self {
            name: name.into(),
            tracks,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn position(&self, id: TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    /// Append a track and return its id.
    pub fn push(&mut self, title: impl Into<String>, source: impl AsRef<Path>) -> TrackId {
        let track = Track::new(title, source.as_ref());
        let id = track.id;
        self.tracks.push(track);
        id
    }

    /// Remove the track with `id`, returning its former index.
    pub fn remove(&mut self, id: TrackId) -> Option<(usize, Track)> {
        let index = self.position(id)?;
        Some((index, self.tracks.remove(index)))
    }
}
