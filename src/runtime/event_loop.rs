use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::{debug, warn};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config;
use crate::error::PlayerError;
use crate::library::{self, PlaylistLoaded, PlaylistSource};
use crate::media::{MediaBackend, MediaEvent};
use crate::player::{PlaybackState, Player};
use crate::ui;

/// Channels feeding the loop from background work.
pub struct Channels {
    pub load_tx: Sender<PlaylistLoaded>,
    pub load_rx: Receiver<PlaylistLoaded>,
    pub media_rx: Receiver<MediaEvent>,
}

/// Main terminal event loop: applies finished playlist loads and media
/// events, draws, and handles input. Returns `Ok(())` when shutdown is
/// requested.
pub fn run<B: MediaBackend>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    player: &mut Player<B>,
    channels: &Channels,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        while let Ok(loaded) = channels.load_rx.try_recv() {
            apply_loaded(loaded, app, player);
        }

        while let Ok(event) = channels.media_rx.try_recv() {
            if let Err(e) = player.handle_media_event(event) {
                report(app, &e);
            }
        }

        let view = player.view();
        let position = player.position();
        terminal.draw(|f| ui::draw(f, app, &view, position, settings))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, player, &channels.load_tx) {
                    break;
                }
            }
        }
    }

    if player.state() != PlaybackState::Stopped {
        let _ = player.stop();
    }
    Ok(())
}

/// Install a fetched playlist, unless the user has since asked for another.
/// A failed fetch keeps the current playlist.
fn apply_loaded<B: MediaBackend>(loaded: PlaylistLoaded, app: &mut App, player: &mut Player<B>) {
    if !app.finish_load(loaded.catalog_index, loaded.result.is_ok()) {
        debug!("dropping superseded load of catalog entry {}", loaded.catalog_index);
        return;
    }
    match loaded.result {
        Ok(playlist) => {
            if playlist.is_empty() {
                app.set_info(format!("\"{}\" has no songs", playlist.name()));
            }
            player.replace_playlist(playlist);
        }
        Err(e) => report(app, &e),
    }
}

fn report(app: &mut App, err: &PlayerError) {
    match err {
        PlayerError::InvalidTransition { .. } => {
            debug!("{err}");
            app.set_info(err.to_string());
        }
        _ => {
            warn!("{err}");
            app.set_error(err.to_string());
        }
    }
}

fn apply(app: &mut App, result: Result<(), PlayerError>) {
    match result {
        Ok(()) if !app.is_loading() => app.clear_status(),
        Ok(()) => {}
        Err(e) => report(app, &e),
    }
}

fn start_load(app: &mut App, settings: &config::Settings, load_tx: &Sender<PlaylistLoaded>, target: (usize, PlaylistSource)) {
    let (index, source) = target;
    library::spawn_load(index, source, settings.library.manifest.clone(), load_tx.clone());
    debug!("requested catalog entry {index} of {}", app.catalog.len());
}

/// Returns `true` when the user asked to quit.
fn handle_key_event<B: MediaBackend>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    player: &mut Player<B>,
    load_tx: &Sender<PlaylistLoaded>,
) -> bool {
    let seek = i64::try_from(settings.playback.seek_seconds).unwrap_or(i64::MAX);

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('p') | KeyCode::Char(' ') => apply(app, player.play()),
        KeyCode::Char('a') => apply(app, player.pause()),
        KeyCode::Char('x') => apply(app, player.stop()),
        KeyCode::Char('l') => apply(app, player.next()),
        KeyCode::Char('h') => apply(app, player.previous()),
        KeyCode::Char('L') => {
            let result = player.seek_by(seek).map(|_| ());
            apply(app, result);
        }
        KeyCode::Char('H') => {
            let result = player.seek_by(-seek).map(|_| ());
            apply(app, result);
        }
        KeyCode::Char('r') => {
            let on = player.toggle_looping();
            app.set_info(format!("loop {}", if on { "on" } else { "off" }));
        }
        KeyCode::Char('s') => {
            let on = player.toggle_random();
            app.set_info(format!("random {}", if on { "on" } else { "off" }));
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            let volume = player.adjust_volume(app.volume_delta(true));
            app.set_info(format!("volume {volume}"));
        }
        KeyCode::Char('-') => {
            let volume = player.adjust_volume(app.volume_delta(false));
            app.set_info(format!("volume {volume}"));
        }
        KeyCode::Tab => {
            let target = app.next_playlist();
            start_load(app, settings, load_tx, target);
        }
        KeyCode::Char('R') => {
            let target = app.begin_load();
            start_load(app, settings, load_tx, target);
        }
        _ => {}
    }

    false
}
