use std::cell::RefCell;
use std::env;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config::Settings;
use crate::library::{self, Catalog, Playlist, PlaylistLoaded, PlaylistSource};
use crate::media::{MediaEvent, RodioBackend};
use crate::player::{NowPlaying, NowPlayingLabels, Player, SongChangeLogger};

mod event_loop;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_error) = Settings::load_or_default();
    if let Some(path) = startup::init_logging(&settings.logging) {
        info!("encore {} logging to {}", env!("CARGO_PKG_VERSION"), path.display());
    }
    if let Some(e) = &config_error {
        warn!("{e}; using default settings");
    }

    let folder = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| settings.library.folder.clone());
    let primary = PlaylistSource {
        name: startup::source_name(&folder),
        folder,
    };
    let catalog = Catalog::new(primary, &settings.library);

    let (media_tx, media_rx) = mpsc::channel::<MediaEvent>();
    let (load_tx, load_rx) = mpsc::channel::<PlaylistLoaded>();

    let backend = RodioBackend::new(media_tx, &settings.equalizer)?;
    let now_playing = Rc::new(RefCell::new(NowPlaying::default()));
    let mut player = Player::new(
        backend,
        Playlist::new(catalog.current().name.clone()),
        startup::modes_from_settings(&settings.playback),
    );
    player.register(Box::new(NowPlayingLabels::new(
        now_playing.clone(),
        settings.ui.random_placeholder.clone(),
    )));
    player.register(Box::new(SongChangeLogger::default()));
    player.notify_all();

    let mut app = App::new(catalog, now_playing, settings.playback.volume_step);
    let (index, source) = app.begin_load();
    library::spawn_load(index, source, settings.library.manifest.clone(), load_tx.clone());
    if let Some(e) = config_error {
        app.set_error(format!("{e}; using default settings"));
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let channels = event_loop::Channels {
        load_tx,
        load_rx,
        media_rx,
    };
    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &mut player, &channels);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("encore exiting");
    run_result
}
