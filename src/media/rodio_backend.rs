//! `rodio`-backed media handles.
//!
//! Each loaded track gets its own paused `Sink` on the shared output stream.
//! A small watcher thread per sink reports natural completion back to the
//! event loop; it exits as soon as the handle is released.

use std::fs::File;
use std::io::BufReader;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Weak};
use std::thread;
use std::time::Duration;

use log::{debug, warn};
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};

use crate::config::EqualizerSettings;
use crate::error::PlayerError;
use crate::library::Track;
use crate::player::Generation;

use super::equalizer::{EqBand, PeakingEq};
use super::{MediaBackend, MediaEvent, MediaHandle};

const WATCH_INTERVAL: Duration = Duration::from_millis(200);

pub struct RodioBackend {
    stream: OutputStream,
    events: Sender<MediaEvent>,
    equalizer: Option<EqBand>,
}

impl RodioBackend {
    /// Open the default output device. Handles report through `events`.
    pub fn new(
        events: Sender<MediaEvent>,
        equalizer: &EqualizerSettings,
    ) -> Result<Self, PlayerError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| PlayerError::AudioOutput(e.to_string()))?;
        // rodio logs to stderr when the stream is dropped, which would land on top of the UI.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            events,
            equalizer: equalizer.enabled.then(|| EqBand::from(equalizer)),
        })
    }
}

impl MediaBackend for RodioBackend {
    type Handle = RodioHandle;

    fn load(&mut self, track: &Track, generation: Generation) -> Result<RodioHandle, PlayerError> {
        let file = File::open(&track.source).map_err(|e| PlayerError::media_load(&track.title, e))?;
        let source = Decoder::new(BufReader::new(file))
            .map_err(|e| PlayerError::media_load(&track.title, e))?;

        let sink = Sink::connect_new(self.stream.mixer());
        match self.equalizer {
            Some(band) => sink.append(PeakingEq::new(source, band)),
            None => sink.append(source),
        }
        sink.pause();

        let sink = Arc::new(sink);
        spawn_watcher(Arc::downgrade(&sink), generation, self.events.clone());
        debug!(
            "loaded {} for \"{}\" from {}",
            generation,
            track.title,
            track.source.display()
        );

        Ok(RodioHandle {
            sink,
            generation,
            events: self.events.clone(),
        })
    }
}

/// Report how the sink ended once it drains while not paused.
///
/// A sink that drains without ever advancing its position had nothing
/// decodable past the header and is reported as `Failed`.
fn spawn_watcher(sink: Weak<Sink>, generation: Generation, events: Sender<MediaEvent>) {
    thread::spawn(move || {
        loop {
            thread::sleep(WATCH_INTERVAL);
            // Handle released: nothing left to watch.
            let Some(sink) = sink.upgrade() else {
                break;
            };
            if !sink.is_paused() && sink.empty() {
                let event = if sink.get_pos().is_zero() {
                    warn!("{generation} drained without producing audio");
                    MediaEvent::failed(generation, "no decodable audio")
                } else {
                    MediaEvent::finished(generation)
                };
                let _ = events.send(event);
                break;
            }
        }
    });
}

pub struct RodioHandle {
    sink: Arc<Sink>,
    generation: Generation,
    events: Sender<MediaEvent>,
}

impl MediaHandle for RodioHandle {
    fn start(&mut self) -> Result<(), PlayerError> {
        self.sink.play();
        let _ = self.events.send(MediaEvent::started(self.generation));
        Ok(())
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn position(&self) -> Duration {
        self.sink.get_pos()
    }

    fn seek(&mut self, to: Duration) {
        if let Err(e) = self.sink.try_seek(to) {
            warn!("seek to {:?} failed for {}: {e}", to, self.generation);
        }
    }

    fn set_gain(&mut self, gain: f32) {
        self.sink.set_volume(gain);
    }

    fn release(self) {
        // Pause first so the watcher cannot mistake the stop for a natural end.
        self.sink.pause();
        self.sink.stop();
    }
}
