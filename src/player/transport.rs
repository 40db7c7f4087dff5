//! Transport state machine.
//!
//! `Player` owns the playlist, the cursor, the bound media handle and the
//! observer registry. It is created once at startup and driven from the
//! event loop, which also feeds it the media events of the handle it bound.

use std::time::Duration;

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::PlayerError;
use crate::library::{Playlist, Track, TrackId};
use crate::media::{MediaBackend, MediaEvent, MediaEventKind, MediaHandle};

use super::cursor;
use super::observer::{Observer, ObserverId, ObserverRegistry, PlayerView};
use super::types::{Command, Direction, Generation, MAX_VOLUME, PlaybackModes, PlaybackState};

struct BoundMedia<H> {
    handle: H,
    generation: Generation,
    track: TrackId,
    /// Set once the handle reported `Started`.
    started: bool,
}

pub struct Player<B: MediaBackend> {
    backend: B,
    playlist: Playlist,
    cursor: usize,
    state: PlaybackState,
    modes: PlaybackModes,
    bound: Option<BoundMedia<B::Handle>>,
    last_generation: u64,
    paused_at: Duration,
    observers: ObserverRegistry,
    rng: StdRng,
}

fn view_of<'a, H>(
    playlist: &'a Playlist,
    cursor: usize,
    state: PlaybackState,
    modes: PlaybackModes,
    bound: &Option<BoundMedia<H>>,
) -> PlayerView<'a> {
    PlayerView {
        playlist_name: playlist.name(),
        tracks: playlist.tracks(),
        cursor,
        state,
        modes,
        bound: bound.as_ref().map(|b| b.track),
        media_started: bound.as_ref().is_some_and(|b| b.started),
    }
}

impl<B: MediaBackend> Player<B> {
    pub fn new(backend: B, playlist: Playlist, modes: PlaybackModes) -> Self {
        Self {
            backend,
            playlist,
            cursor: 0,
            state: PlaybackState::Stopped,
            modes: PlaybackModes {
                volume: modes.volume.min(MAX_VOLUME),
                ..modes
            },
            bound: None,
            last_generation: 0,
            paused_at: Duration::ZERO,
            observers: ObserverRegistry::default(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Replace the random source used by random mode.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn modes(&self) -> PlaybackModes {
        self.modes
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.playlist.get(self.cursor)
    }

    pub fn bound_generation(&self) -> Option<Generation> {
        self.bound.as_ref().map(|b| b.generation)
    }

    pub fn bound_track(&self) -> Option<TrackId> {
        self.bound.as_ref().map(|b| b.track)
    }

    /// Playback offset of the bound track.
    pub fn position(&self) -> Option<Duration> {
        let bound = self.bound.as_ref()?;
        Some(match self.state {
            PlaybackState::Paused => self.paused_at,
            _ => bound.handle.position(),
        })
    }

    pub fn view(&self) -> PlayerView<'_> {
        view_of(&self.playlist, self.cursor, self.state, self.modes, &self.bound)
    }

    pub fn register(&mut self, observer: Box<dyn Observer>) -> ObserverId {
        self.observers.register(observer)
    }

    pub fn unregister(&mut self, id: ObserverId) -> bool {
        self.observers.unregister(id)
    }

    /// Call every observer with the current view.
    pub fn notify_all(&mut self) {
        let view = view_of(&self.playlist, self.cursor, self.state, self.modes, &self.bound);
        self.observers.notify(&view);
    }

    pub fn play(&mut self) -> Result<(), PlayerError> {
        match self.state {
            PlaybackState::Playing => Err(PlayerError::invalid_transition(Command::Play, self.state)),
            PlaybackState::Paused => self.resume(),
            PlaybackState::Stopped => self.start_at_cursor(),
        }
    }

    pub fn pause(&mut self) -> Result<(), PlayerError> {
        if self.state != PlaybackState::Playing {
            return Err(PlayerError::invalid_transition(Command::Pause, self.state));
        }
        if let Some(bound) = self.bound.as_mut() {
            self.paused_at = bound.handle.position();
            bound.handle.pause();
        }
        self.transition(PlaybackState::Paused);
        Ok(())
    }

    pub fn stop(&mut self) -> Result<(), PlayerError> {
        if self.state == PlaybackState::Stopped {
            return Err(PlayerError::invalid_transition(Command::Stop, self.state));
        }
        self.release_bound();
        self.transition(PlaybackState::Stopped);
        Ok(())
    }

    pub fn next(&mut self) -> Result<(), PlayerError> {
        self.skip(Command::Next, Direction::Forward)
    }

    pub fn previous(&mut self) -> Result<(), PlayerError> {
        self.skip(Command::Previous, Direction::Backward)
    }

    /// Apply a media event. Returns `false` when the event was ignored, either
    /// because it came from a handle that is no longer bound or because it
    /// does not apply in the current state.
    pub fn handle_media_event(&mut self, event: MediaEvent) -> Result<bool, PlayerError> {
        let Some(bound) = self
            .bound
            .as_mut()
            .filter(|b| b.generation == event.generation)
        else {
            debug!("ignoring stale {:?} from {}", event.kind, event.generation);
            return Ok(false);
        };

        match event.kind {
            MediaEventKind::Started => {
                bound.started = true;
                Ok(true)
            }
            MediaEventKind::Finished => {
                if self.state != PlaybackState::Playing {
                    return Ok(false);
                }
                debug!("{} finished, advancing", event.generation);
                self.skip(Command::Next, Direction::Forward).map(|()| true)
            }
            MediaEventKind::Failed(reason) => {
                let title = self
                    .current_track()
                    .map(|t| t.title.clone())
                    .unwrap_or_default();
                self.release_bound();
                self.transition(PlaybackState::Stopped);
                Err(PlayerError::media_load(title, reason))
            }
        }
    }

    /// Clamp `volume` to `0..=100`, store it and apply it to the bound handle.
    pub fn set_volume(&mut self, volume: i32) -> u8 {
        self.modes.volume = volume.clamp(0, i32::from(MAX_VOLUME)) as u8;
        let gain = self.modes.gain();
        if let Some(bound) = self.bound.as_mut() {
            bound.handle.set_gain(gain);
        }
        self.modes.volume
    }

    pub fn adjust_volume(&mut self, delta: i32) -> u8 {
        self.set_volume(i32::from(self.modes.volume) + delta)
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.modes.looping = looping;
        self.notify_all();
    }

    pub fn toggle_looping(&mut self) -> bool {
        self.set_looping(!self.modes.looping);
        self.modes.looping
    }

    pub fn set_random(&mut self, random: bool) {
        self.modes.random = random;
        self.notify_all();
    }

    pub fn toggle_random(&mut self) -> bool {
        self.set_random(!self.modes.random);
        self.modes.random
    }

    /// Move the playback offset of the bound track by `delta_secs`.
    pub fn seek_by(&mut self, delta_secs: i64) -> Result<Duration, PlayerError> {
        let Some(current) = self.position() else {
            return Err(PlayerError::invalid_transition(Command::Seek, self.state));
        };
        let target = if delta_secs >= 0 {
            current + Duration::from_secs(delta_secs.unsigned_abs())
        } else {
            current.saturating_sub(Duration::from_secs(delta_secs.unsigned_abs()))
        };
        if let Some(bound) = self.bound.as_mut() {
            bound.handle.seek(target);
        }
        if self.state == PlaybackState::Paused {
            self.paused_at = target;
        }
        Ok(target)
    }

    /// Append a track to the playlist.
    pub fn add_track(&mut self, title: impl Into<String>, source: impl AsRef<std::path::Path>) -> TrackId {
        let id = self.playlist.push(title, source);
        self.notify_all();
        id
    }

    /// Remove a track. Removing the bound track stops playback; the cursor
    /// keeps pointing at the same track when an earlier one is removed.
    pub fn remove_track(&mut self, id: TrackId) -> bool {
        let Some((index, track)) = self.playlist.remove(id) else {
            return false;
        };

        if self.bound_track() == Some(id) {
            self.release_bound();
            self.state = PlaybackState::Stopped;
        }

        if index < self.cursor {
            self.cursor -= 1;
        } else if self.cursor >= self.playlist.len() {
            self.cursor = self.playlist.len().saturating_sub(1);
        }

        debug!("removed \"{}\" from \"{}\"", track.title, self.playlist.name());
        self.notify_all();
        true
    }

    /// Swap in a different playlist. Playback stops and the cursor rewinds.
    pub fn replace_playlist(&mut self, playlist: Playlist) {
        self.release_bound();
        self.state = PlaybackState::Stopped;
        self.cursor = 0;
        info!(
            "switched to playlist \"{}\" ({} tracks)",
            playlist.name(),
            playlist.len()
        );
        self.playlist = playlist;
        self.notify_all();
    }

    fn skip(&mut self, command: Command, direction: Direction) -> Result<(), PlayerError> {
        // Implicit stop: never an error, even when already stopped.
        self.release_bound();
        self.state = PlaybackState::Stopped;

        let Some(index) = cursor::advance(
            self.cursor,
            self.playlist.len(),
            direction,
            &self.modes,
            &mut self.rng,
        ) else {
            self.notify_all();
            return Err(PlayerError::EmptyPlaylist);
        };

        debug!("{command}: cursor {} -> {}", self.cursor, index);
        self.cursor = index;
        self.start_at_cursor()
    }

    fn resume(&mut self) -> Result<(), PlayerError> {
        let Some(bound) = self.bound.as_mut() else {
            self.state = PlaybackState::Stopped;
            return self.start_at_cursor();
        };

        match bound.handle.start() {
            Ok(()) => {
                self.transition(PlaybackState::Playing);
                Ok(())
            }
            Err(e) => {
                self.release_bound();
                self.transition(PlaybackState::Stopped);
                Err(e)
            }
        }
    }

    /// Bind a fresh handle to the track under the cursor and start it.
    fn start_at_cursor(&mut self) -> Result<(), PlayerError> {
        let Some(track) = self.playlist.get(self.cursor).cloned() else {
            return Err(PlayerError::EmptyPlaylist);
        };

        self.last_generation += 1;
        let generation = Generation(self.last_generation);
        let gain = self.modes.gain();

        let loaded = self.backend.load(&track, generation).and_then(|mut handle| {
            handle.set_gain(gain);
            match handle.start() {
                Ok(()) => Ok(handle),
                Err(e) => {
                    handle.release();
                    Err(e)
                }
            }
        });

        match loaded {
            Ok(handle) => {
                self.bound = Some(BoundMedia {
                    handle,
                    generation,
                    track: track.id,
                    started: false,
                });
                self.paused_at = Duration::ZERO;
                info!("playing \"{}\" ({})", track.title, generation);
                self.transition(PlaybackState::Playing);
                Ok(())
            }
            Err(e) => {
                self.transition(PlaybackState::Stopped);
                Err(e)
            }
        }
    }

    fn release_bound(&mut self) {
        if let Some(bound) = self.bound.take() {
            debug!("releasing {}", bound.generation);
            bound.handle.release();
        }
        self.paused_at = Duration::ZERO;
    }

    fn transition(&mut self, next: PlaybackState) {
        if self.state != next {
            debug!("transport: {} -> {}", self.state, next);
        }
        self.state = next;
        self.notify_all();
    }
}
