//! Observers shipped with the player.

use std::cell::RefCell;
use std::rc::Rc;

use log::info;

use crate::library::{Track, TrackId};

use super::observer::{Observer, PlayerView};
use super::types::PlaybackState;

/// Titles shown in the previous/current/next slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NowPlaying {
    pub previous: Option<String>,
    pub current: Option<String>,
    pub next: Option<String>,
}

/// Keeps a shared `NowPlaying` in sync with the cursor.
///
/// While random mode is on the neighbours are not predictable, so both
/// slots show `placeholder` instead.
pub struct NowPlayingLabels {
    shared: Rc<RefCell<NowPlaying>>,
    placeholder: String,
}

impl NowPlayingLabels {
    pub fn new(shared: Rc<RefCell<NowPlaying>>, placeholder: impl Into<String>) -> Self {
        Self {
            shared,
            placeholder: placeholder.into(),
        }
    }
}

impl Observer for NowPlayingLabels {
    fn update(&mut self, view: &PlayerView<'_>) {
        let title = |t: Option<&Track>| t.map(|t| t.title.clone());

        let labels = if view.tracks.is_empty() {
            NowPlaying::default()
        } else if view.modes.random {
            NowPlaying {
                previous: Some(self.placeholder.clone()),
                current: title(view.current()),
                next: Some(self.placeholder.clone()),
            }
        } else {
            NowPlaying {
                previous: title(view.previous()),
                current: title(view.current()),
                next: title(view.next()),
            }
        };

        *self.shared.borrow_mut() = labels;
    }
}

/// Logs the current song and transport state whenever either changes.
#[derive(Default)]
pub struct SongChangeLogger {
    last_track: Option<TrackId>,
    last_state: Option<PlaybackState>,
}

impl Observer for SongChangeLogger {
    fn update(&mut self, view: &PlayerView<'_>) {
        let current = view.current();
        let track_id = current.map(|t| t.id);

        if track_id != self.last_track {
            match current {
                Some(t) => info!("current song: {} (index {})", t.title, view.cursor),
                None => info!("no current song"),
            }
            self.last_track = track_id;
        }

        if Some(view.state) != self.last_state {
            info!("music is {}", view.state);
            self.last_state = Some(view.state);
        }
    }
}
