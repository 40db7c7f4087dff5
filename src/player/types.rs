//! Small transport types shared by the player, the UI and the error type.

use std::fmt;

/// The transport state of the player.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Stopped => "stopped",
            Self::Playing => "playing",
            Self::Paused => "paused",
        };
        f.write_str(s)
    }
}

/// User-facing transport commands. Used to describe rejected transitions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Play,
    Pause,
    Stop,
    Next,
    Previous,
    Seek,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Play => "play",
            Self::Pause => "pause",
            Self::Stop => "stop",
            Self::Next => "skip to next",
            Self::Previous => "skip to previous",
            Self::Seek => "seek",
        };
        f.write_str(s)
    }
}

/// Which way the cursor moves on next/previous.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

pub const MAX_VOLUME: u8 = 100;

/// Mode flags read by the cursor policy and applied to the media handle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlaybackModes {
    /// Wrap around at either end of the playlist.
    pub looping: bool,
    /// Pick the next track uniformly at random, ignoring direction.
    pub random: bool,
    /// Volume in `0..=100`.
    pub volume: u8,
}

impl Default for PlaybackModes {
    fn default() -> Self {
        Self {
            looping: true,
            random: false,
            volume: MAX_VOLUME,
        }
    }
}

impl PlaybackModes {
    /// Volume as a linear gain fraction for the media handle.
    pub fn gain(&self) -> f32 {
        f32::from(self.volume.min(MAX_VOLUME)) / f32::from(MAX_VOLUME)
    }
}

/// Tag carried by every media handle and every event it emits.
///
/// The player only honours events whose generation matches the handle it
/// currently has bound.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(pub u64);

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
