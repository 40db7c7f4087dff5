//! Playback core: cursor policy, transport state machine and the observer
//! fan-out that keeps displays in sync with them.

mod cursor;
mod listeners;
mod observer;
mod transport;
mod types;

pub use listeners::{NowPlaying, NowPlayingLabels, SongChangeLogger};
pub use observer::{Observer, ObserverId, PlayerView};
pub use transport::Player;
pub use types::*;
