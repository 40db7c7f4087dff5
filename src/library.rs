//! Tracks, playlists and where they come from.
//!
//! Playlists are described by a `songs.json` manifest inside a folder; the
//! `Catalog` lists every folder the user can switch between.

mod catalog;
mod manifest;
mod model;

pub use catalog::{Catalog, PlaylistSource};
pub use manifest::{PlaylistLoaded, load_playlist, manifest_path, parse_manifest, spawn_load};
pub use model::{Playlist, Track, TrackId};
