//! Application model: what the TUI shows besides the player itself.
//!
//! The `App` model lives in `app::model` and holds the playlist catalog, the
//! shared now-playing labels and the status line.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
