//! Application model types: `App` and the status line.

use std::cell::RefCell;
use std::rc::Rc;

use crate::library::{Catalog, PlaylistSource};
use crate::player::NowPlaying;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// One line of feedback shown under the track list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

/// The main application model.
pub struct App {
    pub catalog: Catalog,
    /// Labels kept current by the `NowPlayingLabels` observer.
    pub now_playing: Rc<RefCell<NowPlaying>>,
    pub status: Option<Status>,
    /// Catalog index whose manifest is being fetched.
    pub loading: Option<usize>,
    /// Catalog index of the playlist the player currently holds.
    pub active: usize,
    pub volume_step: u8,
}

impl App {
    pub fn new(catalog: Catalog, now_playing: Rc<RefCell<NowPlaying>>, volume_step: u8) -> Self {
        Self {
            catalog,
            now_playing,
            status: None,
            loading: None,
            active: 0,
            volume_step,
        }
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            kind: StatusKind::Info,
            text: text.into(),
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            kind: StatusKind::Error,
            text: text.into(),
        });
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Mark the selected catalog entry as loading and return it.
    pub fn begin_load(&mut self) -> (usize, PlaylistSource) {
        let index = self.catalog.selected();
        self.loading = Some(index);
        self.set_info(format!("loading \"{}\"...", self.catalog.current().name));
        (index, self.catalog.current().clone())
    }

    /// Accept a finished load only if it is the one still awaited.
    ///
    /// A failed load puts the catalog selection back on the playlist the
    /// player still holds. Pending errors stay on the status line.
    pub fn finish_load(&mut self, catalog_index: usize, loaded: bool) -> bool {
        if self.loading != Some(catalog_index) {
            return false;
        }
        self.loading = None;
        if self.status.as_ref().is_some_and(|s| s.kind == StatusKind::Info) {
            self.clear_status();
        }
        if loaded {
            self.active = catalog_index;
        } else {
            self.catalog.select(self.active);
        }
        true
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    /// Select the next playlist in the catalog and start loading it.
    pub fn next_playlist(&mut self) -> (usize, PlaylistSource) {
        self.catalog.cycle();
        self.begin_load()
    }

    /// Volume step as a signed delta for `Player::adjust_volume`.
    pub fn volume_delta(&self, up: bool) -> i32 {
        let step = i32::from(self.volume_step.max(1));
        if up { step } else { -step }
    }
}
