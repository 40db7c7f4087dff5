use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::config::{self, LoggingSettings, PlaybackSettings};
use crate::player::PlaybackModes;

/// Send log records to a file; the terminal belongs to the UI.
///
/// `RUST_LOG` overrides `logging.level`. Returns the log path, or `None` when
/// no file could be opened, in which case logging stays disabled.
pub fn init_logging(settings: &LoggingSettings) -> Option<PathBuf> {
    let path = settings.file.clone().or_else(config::default_log_path)?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!("encore: cannot create {}: {e}", dir.display());
            return None;
        }
    }

    let file = match File::create(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("encore: cannot open log file {}: {e}", path.display());
            return None;
        }
    };

    let env = env_logger::Env::default().default_filter_or(settings.level.as_str());
    env_logger::Builder::from_env(env)
        .filter_module("symphonia_core", log::LevelFilter::Warn)
        .format_timestamp_millis()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .ok()?;

    Some(path)
}

pub fn modes_from_settings(playback: &PlaybackSettings) -> PlaybackModes {
    PlaybackModes {
        looping: playback.looping,
        random: playback.random,
        volume: playback.volume,
    }
}

/// Display name for a playlist folder: its last path component.
pub fn source_name(folder: &Path) -> String {
    folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| folder.display().to_string())
}
