//! The audio rendering surface.
//!
//! The player never touches decoding or output directly. It asks a
//! `MediaBackend` for a handle per track and receives lifecycle notifications
//! as `MediaEvent`s tagged with the generation the handle was created with.

mod equalizer;
mod rodio_backend;

use std::time::Duration;

use crate::error::PlayerError;
use crate::library::Track;
use crate::player::Generation;

pub use rodio_backend::RodioBackend;

#[derive(Debug, Clone, PartialEq)]
pub enum MediaEventKind {
    /// Output has begun (or resumed) for the handle.
    Started,
    /// The track played through to its end.
    Finished,
    /// The handle failed after it was created.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaEvent {
    pub generation: Generation,
    pub kind: MediaEventKind,
}

impl MediaEvent {
    pub fn started(generation: Generation) -> Self {
        Self {
            generation,
            kind: MediaEventKind::Started,
        }
    }

    pub fn finished(generation: Generation) -> Self {
        Self {
            generation,
            kind: MediaEventKind::Finished,
        }
    }

    pub fn failed(generation: Generation, reason: impl Into<String>) -> Self {
        Self {
            generation,
            kind: MediaEventKind::Failed(reason.into()),
        }
    }
}

/// A playable handle bound to one track.
pub trait MediaHandle {
    /// Begin or resume output.
    fn start(&mut self) -> Result<(), PlayerError>;
    /// Suspend output, keeping the position.
    fn pause(&mut self);
    /// Current playback offset.
    fn position(&self) -> Duration;
    fn seek(&mut self, to: Duration);
    /// Linear gain in `0.0..=1.0`.
    fn set_gain(&mut self, gain: f32);
    /// Stop output and rewind. The handle emits no further events.
    fn release(self);
}

/// Creates media handles for tracks.
pub trait MediaBackend {
    type Handle: MediaHandle;

    /// Prepare a paused handle for `track`. Events it emits carry `generation`.
    fn load(&mut self, track: &Track, generation: Generation) -> Result<Self::Handle, PlayerError>;
}
