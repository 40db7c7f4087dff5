use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/encore/config.toml` or `~/.config/encore/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ENCORE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub library: LibrarySettings,
    pub equalizer: EqualizerSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Whether next/previous wrap around at the ends of the playlist.
    pub looping: bool,
    /// Whether random mode starts enabled.
    pub random: bool,
    /// Initial volume, `0..=100`.
    pub volume: u8,
    /// Step used by the `+` / `-` keys.
    pub volume_step: u8,
    /// Seconds moved by the `H` / `L` keys.
    pub seek_seconds: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            looping: true,
            random: false,
            volume: 100,
            volume_step: 5,
            seek_seconds: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Folder holding the startup playlist manifest. A folder passed on the
    /// command line wins over this.
    pub folder: PathBuf,
    /// File name of the manifest inside each playlist folder.
    pub manifest: String,
    /// Extra playlists offered by the playlist switcher.
    pub playlists: Vec<PlaylistSettings>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("./songs/"),
            manifest: "songs.json".to_string(),
            playlists: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistSettings {
    pub name: String,
    pub folder: PathBuf,
}

/// Single peaking band applied to every track.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EqualizerSettings {
    pub enabled: bool,
    /// Centre frequency of the band (Hz).
    pub frequency_hz: f32,
    /// Boost (positive) or cut (negative) at the centre frequency (dB).
    pub gain_db: f32,
    /// Band quality factor; higher is narrower.
    pub q: f32,
}

impl Default for EqualizerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            frequency_hz: 1000.0,
            gain_db: 5.0,
            q: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Shown in the previous/next slots while random mode is on.
    pub random_placeholder: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ encore ~ ".to_string(),
            random_placeholder: "?".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter when `RUST_LOG` is unset (`error`, `warn`, `info`, `debug`, `trace`).
    pub level: String,
    /// Log file. Defaults to `$XDG_STATE_HOME/encore/encore.log`.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
