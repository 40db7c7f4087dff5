use super::*;
use crate::config::{LibrarySettings, PlaylistSettings};
use std::path::PathBuf;
use crate::library::{Catalog, PlaylistSource};
use crate::player::NowPlaying;
use std::cell::RefCell;
use std::rc::Rc;

fn source(name: &str, folder: &str) -> PlaylistSource {
    PlaylistSource {
        name: name.into(),
        folder: PathBuf::from(folder),
    }
}

fn app_with(extra: &[(&str, &str)]) -> App {
    let library = LibrarySettings {
        playlists: extra
            .iter()
            .map(|(name, folder)| PlaylistSettings {
                name: name.to_string(),
                folder: PathBuf::from(folder),
            })
            .collect(),
        ..LibrarySettings::default()
    };
    let catalog = Catalog::new(source("songs", "./songs/"), &library);
    App::new(catalog, Rc::new(RefCell::new(NowPlaying::default())), 5)
}

#[test]
fn begin_load_marks_selected_entry() {
    let mut app = app_with(&[]);
    let (index, src) = app.begin_load();
    assert_eq!(index, 0);
    assert_eq!(src.name, "songs");
    assert!(app.is_loading());
    assert_eq!(app.status.as_ref().map(|s| s.kind), Some(StatusKind::Info));
}

#[test]
fn finish_load_ignores_superseded_requests() {
    let mut app = app_with(&[("jazz", "/music/jazz")]);
    app.begin_load();
    let (index, src) = app.next_playlist();
    assert_eq!(index, 1);
    assert_eq!(src.name, "jazz");

    assert!(!app.finish_load(0, true));
    assert!(app.is_loading());
    assert!(app.finish_load(1, true));
    assert!(!app.is_loading());
    assert!(app.status.is_none());
    assert_eq!(app.active, 1);
}

#[test]
fn failed_switch_puts_selection_back_on_active_playlist() {
    let mut app = app_with(&[("jazz", "/music/jazz")]);
    let (index, _) = app.begin_load();
    assert!(app.finish_load(index, true));

    let (index, _) = app.next_playlist();
    assert_eq!(app.catalog.current().name, "jazz");
    assert!(app.finish_load(index, false));

    assert_eq!(app.catalog.selected(), 0);
    assert_eq!(app.catalog.current().name, "songs");
    assert_eq!(app.active, 0);

    // Reload targets the playlist on screen, not the broken one.
    let (index, src) = app.begin_load();
    assert_eq!(index, 0);
    assert_eq!(src.name, "songs");
}

#[test]
fn successful_switch_becomes_active() {
    let mut app = app_with(&[("jazz", "/music/jazz")]);
    app.begin_load();
    assert!(app.finish_load(0, true));

    let (index, _) = app.next_playlist();
    assert!(app.finish_load(index, true));
    assert_eq!(app.active, 1);
    assert_eq!(app.catalog.current().name, "jazz");
}

#[test]
fn next_playlist_wraps_around() {
    let mut app = app_with(&[("jazz", "/music/jazz")]);
    app.next_playlist();
    let (index, _) = app.next_playlist();
    assert_eq!(index, 0);
}

#[test]
fn error_status_replaces_info() {
    let mut app = app_with(&[]);
    app.set_info("hello");
    app.set_error("boom");
    assert_eq!(
        app.status,
        Some(Status {
            kind: StatusKind::Error,
            text: "boom".into()
        })
    );
    app.clear_status();
    assert!(app.status.is_none());
}

#[test]
fn volume_delta_uses_step_and_never_zero() {
    let mut app = app_with(&[]);
    assert_eq!(app.volume_delta(true), 5);
    assert_eq!(app.volume_delta(false), -5);
    app.volume_step = 0;
    assert_eq!(app.volume_delta(true), 1);
}

#[test]
fn finished_load_keeps_an_earlier_error() {
    let mut app = app_with(&[]);
    let (index, _) = app.begin_load();
    app.set_error("invalid config: playback.volume must be <= 100");

    assert!(app.finish_load(index, true));
    assert_eq!(app.status.as_ref().map(|s| s.kind), Some(StatusKind::Error));
}
