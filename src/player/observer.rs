//! Notification fan-out.
//!
//! Listeners are called synchronously, in registration order, after every
//! transport transition and playlist mutation. They receive a read-only view
//! of the player and must tolerate redundant calls.

use crate::library::{Track, TrackId};

use super::types::{PlaybackModes, PlaybackState};

/// Read-only snapshot handed to observers.
#[derive(Debug, Clone, Copy)]
pub struct PlayerView<'a> {
    pub playlist_name: &'a str,
    pub tracks: &'a [Track],
    pub cursor: usize,
    pub state: PlaybackState,
    pub modes: PlaybackModes,
    /// Track the media handle is bound to, if any.
    pub bound: Option<TrackId>,
    /// Whether the bound handle has confirmed that output started.
    pub media_started: bool,
}

impl<'a> PlayerView<'a> {
    pub fn current(&self) -> Option<&'a Track> {
        self.tracks.get(self.cursor)
    }

    /// Track before the cursor, wrapping around.
    pub fn previous(&self) -> Option<&'a Track> {
        let len = self.tracks.len();
        if len == 0 {
            return None;
        }
        self.tracks.get((self.cursor.min(len - 1) + len - 1) % len)
    }

    /// Track after the cursor, wrapping around.
    pub fn next(&self) -> Option<&'a Track> {
        let len = self.tracks.len();
        if len == 0 {
            return None;
        }
        self.tracks.get((self.cursor.min(len - 1) + 1) % len)
    }
}

pub trait Observer {
    fn update(&mut self, view: &PlayerView<'_>);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

#[derive(Default)]
pub struct ObserverRegistry {
    next_id: u64,
    entries: Vec<(ObserverId, Box<dyn Observer>)>,
}

impl ObserverRegistry {
    pub fn register(&mut self, observer: Box<dyn Observer>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    /// Remove `id`. Unknown ids are ignored.
    pub fn unregister(&mut self, id: ObserverId) -> bool {
        match self.entries.iter().position(|(e, _)| *e == id) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn notify(&mut self, view: &PlayerView<'_>) {
        for (_, observer) in &mut self.entries {
            observer.update(view);
        }
    }
}
