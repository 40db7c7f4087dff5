use std::{env, path::PathBuf};

use crate::error::PlayerError;
use crate::player::MAX_VOLUME;

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` reads the optional config file, then lets environment
/// variables (prefix `ENCORE__`) override it, and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, PlayerError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("ENCORE")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Load and validate, falling back to defaults.
    ///
    /// Configuration is optional, so a bad file never stops startup. The
    /// error is handed back so it can be logged and shown once the UI is up.
    pub fn load_or_default() -> (Self, Option<PlayerError>) {
        match Self::load().and_then(|s| s.validate().map(|()| s)) {
            Ok(s) => (s, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), PlayerError> {
        if self.playback.volume > MAX_VOLUME {
            return Err(PlayerError::InvalidConfig(format!(
                "playback.volume must be <= {MAX_VOLUME}"
            )));
        }
        if self.library.manifest.trim().is_empty() {
            return Err(PlayerError::InvalidConfig(
                "library.manifest must not be empty".to_string(),
            ));
        }
        if !(self.equalizer.frequency_hz > 0.0) {
            return Err(PlayerError::InvalidConfig(
                "equalizer.frequency_hz must be > 0".to_string(),
            ));
        }
        if !(self.equalizer.q > 0.0) {
            return Err(PlayerError::InvalidConfig(
                "equalizer.q must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Resolve the config path from `ENCORE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("ENCORE_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/encore/config.toml`
/// or `~/.config/encore/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", &[".config"]).map(|d| d.join("encore").join("config.toml"))
}

/// Compute the default log file under `$XDG_STATE_HOME/encore/encore.log`
/// or `~/.local/state/encore/encore.log`.
pub fn default_log_path() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", &[".local", "state"]).map(|d| d.join("encore").join("encore.log"))
}

fn xdg_dir(var: &str, home_fallback: &[&str]) -> Option<PathBuf> {
    if let Some(dir) = env::var_os(var) {
        return Some(PathBuf::from(dir));
    }
    env::var_os("HOME").map(|home| {
        home_fallback
            .iter()
            .fold(PathBuf::from(home), |acc, part| acc.join(part))
    })
}
