use super::load::{default_config_path, default_log_path, resolve_config_path};
use super::schema::*;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_encore_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("ENCORE_CONFIG_PATH", "/tmp/encore-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        PathBuf::from("/tmp/encore-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/xdg-config-home")
            .join("encore")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("encore")
            .join("config.toml")
    );
}

#[test]
fn default_log_path_falls_back_to_local_state() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_STATE_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_log_path().unwrap(),
        PathBuf::from("/tmp/home-dir/.local/state/encore/encore.log")
    );
}

#[test]
fn defaults_match_the_classic_player() {
    let s = Settings::default();
    assert!(s.playback.looping);
    assert!(!s.playback.random);
    assert_eq!(s.playback.volume, 100);
    assert_eq!(s.library.manifest, "songs.json");
    assert_eq!(s.equalizer.frequency_hz, 1000.0);
    assert_eq!(s.equalizer.gain_db, 5.0);
    assert_eq!(s.ui.random_placeholder, "?");
    assert!(s.validate().is_ok());
}

#[test]
fn partial_toml_keeps_defaults_for_missing_fields() {
    let s: Settings = toml::from_str(
        r#"
[playback]
random = true

[[library.playlists]]
name = "Road trip"
folder = "/music/road"
"#,
    )
    .unwrap();

    assert!(s.playback.random);
    assert!(s.playback.looping);
    assert_eq!(s.playback.volume_step, 5);
    assert_eq!(s.library.playlists.len(), 1);
    assert_eq!(s.library.playlists[0].folder, PathBuf::from("/music/road"));
    assert!(s.equalizer.enabled);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.playback.volume = 101;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.equalizer.q = 0.0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.library.manifest = "  ".into();
    assert!(s.validate().is_err());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
looping = false
random = true
volume = 40

[library]
folder = "/srv/music/"
manifest = "list.json"

[equalizer]
enabled = false
frequency_hz = 250.0
gain_db = -3.0

[ui]
header_text = "hello"
random_placeholder = "*"

[logging]
level = "debug"
file = "/tmp/encore-test.log"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("ENCORE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("ENCORE__PLAYBACK__VOLUME");

    let s = Settings::load().unwrap();
    assert!(!s.playback.looping);
    assert!(s.playback.random);
    assert_eq!(s.playback.volume, 40);
    assert_eq!(s.library.folder, PathBuf::from("/srv/music/"));
    assert_eq!(s.library.manifest, "list.json");
    assert!(!s.equalizer.enabled);
    assert_eq!(s.equalizer.frequency_hz, 250.0);
    assert_eq!(s.equalizer.gain_db, -3.0);
    assert_eq!(s.equalizer.q, 1.0);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.random_placeholder, "*");
    assert_eq!(s.logging.level, "debug");
    assert_eq!(s.logging.file, Some(PathBuf::from("/tmp/encore-test.log")));
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
volume = 80
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("ENCORE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("ENCORE__PLAYBACK__VOLUME", "30");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.volume, 30);
}

#[test]
fn load_or_default_falls_back_and_keeps_the_reason() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
volume = 80

[equalizer]
q = 0.0
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("ENCORE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("ENCORE__PLAYBACK__VOLUME");

    let (s, err) = Settings::load_or_default();
    assert_eq!(s.playback.volume, 100);
    assert!(matches!(err, Some(crate::error::PlayerError::InvalidConfig(_))));
}

#[test]
fn load_or_default_passes_valid_settings_through() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(&cfg_path, "[playback]\nvolume = 55\n").unwrap();

    let _g1 = EnvGuard::set("ENCORE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("ENCORE__PLAYBACK__VOLUME");

    let (s, err) = Settings::load_or_default();
    assert_eq!(s.playback.volume, 55);
    assert!(err.is_none());
}
