//! Crate-wide error type.
//!
//! Nothing in here is fatal to the player: the runtime reports every variant
//! through the `log` facade and carries on.

use std::path::PathBuf;

use thiserror::Error;

use crate::player::{Command, PlaybackState};

#[derive(Error, Debug)]
pub enum PlayerError {
    /// A transport command was issued while the playlist holds no tracks.
    #[error("playlist is empty")]
    EmptyPlaylist,

    /// The command is not valid from the current transport state.
    #[error("cannot {command} while {state}")]
    InvalidTransition {
        command: Command,
        state: PlaybackState,
    },

    /// The media backend rejected a track (missing file, undecodable data, ...).
    #[error("failed to load \"{title}\": {reason}")]
    MediaLoad { title: String, reason: String },

    /// The playlist manifest could not be read or parsed.
    #[error("failed to load playlist from {}: {reason}", .path.display())]
    PlaylistFetch { path: PathBuf, reason: String },

    /// No audio output device could be opened.
    #[error("audio output unavailable: {0}")]
    AudioOutput(String),

    #[error(transparent)]
    Config(#[from] ::config::ConfigError),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl PlayerError {
    pub fn invalid_transition(command: Command, state: PlaybackState) -> Self {
        Self::InvalidTransition { command, state }
    }

    pub fn media_load(title: impl Into<String>, reason: impl ToString) -> Self {
        Self::MediaLoad {
            title: title.into(),
            reason: reason.to_string(),
        }
    }

    pub fn playlist_fetch(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::PlaylistFetch {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
