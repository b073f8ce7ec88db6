//! `rodio`-backed sound engine.
//!
//! Each handle reads its file on a loader thread, checks that it decodes and
//! keeps the bytes in memory. Playback builds a `Sink` over those bytes.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use lofty::prelude::AudioFile;
use rodio::mixer::Mixer;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source, StreamError};
use tracing::{debug, warn};

use super::sink::create_sink_at;
use super::types::{InstanceId, LoadState, Notifier, SoundEngine, SoundHandle};

/// Sound engine playing through the default output device.
pub struct RodioEngine {
    stream: OutputStream,
}

impl RodioEngine {
    pub fn open() -> Result<Self, StreamError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // The drop message would land on the UI's terminal.
        stream.log_on_drop(false);
        Ok(Self { stream })
    }
}

impl SoundEngine for RodioEngine {
    fn create(&mut self, source: &str, notifier: Notifier) -> Box<dyn SoundHandle> {
        Box::new(RodioHandle::new(
            self.stream.mixer().clone(),
            PathBuf::from(source),
            notifier,
        ))
    }
}

#[derive(Default)]
struct Loaded {
    state: LoadState,
    data: Option<Arc<[u8]>>,
    duration: Option<Duration>,
    // Bumped by every load/unload; a loader only publishes when it still matches.
    generation: u64,
}

pub struct RodioHandle {
    mixer: Mixer,
    path: PathBuf,
    notifier: Notifier,
    loaded: Arc<Mutex<Loaded>>,
    sink: Option<Sink>,
    offset: Duration,
    playing: bool,
}

const INSTANCE: InstanceId = 1;

impl RodioHandle {
    fn new(mixer: Mixer, path: PathBuf, notifier: Notifier) -> Self {
        Self {
            mixer,
            path,
            notifier,
            loaded: Arc::new(Mutex::new(Loaded::default())),
            sink: None,
            offset: Duration::ZERO,
            playing: false,
        }
    }

    fn data(&self) -> Option<Arc<[u8]>> {
        self.loaded.lock().ok().and_then(|l| l.data.clone())
    }

    fn start_fresh(&mut self) {
        let Some(data) = self.data() else {
            self.notifier.play_failed("audio data is not loaded");
            return;
        };

        match create_sink_at(&self.mixer, data, Duration::ZERO) {
            Ok(sink) => {
                sink.play();
                self.sink = Some(sink);
                self.offset = Duration::ZERO;
                self.playing = true;
                self.notifier.play_started();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot start playback");
                self.notifier.play_failed(e);
            }
        }
    }
}

impl SoundHandle for RodioHandle {
    fn state(&self) -> LoadState {
        match self.loaded.lock() {
            Ok(l) => l.state,
            Err(_) => LoadState::Error,
        }
    }

    fn load(&mut self) {
        let generation = {
            let Ok(mut l) = self.loaded.lock() else {
                self.notifier.load_failed("loader state poisoned");
                return;
            };
            if matches!(l.state, LoadState::Loading | LoadState::Loaded) {
                return;
            }
            l.generation += 1;
            l.state = LoadState::Loading;
            l.generation
        };

        let loaded = Arc::clone(&self.loaded);
        let path = self.path.clone();
        let notifier = self.notifier.clone();

        thread::spawn(move || {
            let outcome = read_source(&path);

            let Ok(mut l) = loaded.lock() else {
                return;
            };
            if l.generation != generation {
                debug!(path = %path.display(), "discarding result of an aborted load");
                return;
            }

            match outcome {
                Ok((data, duration)) => {
                    l.data = Some(data);
                    l.duration = duration;
                    l.state = LoadState::Loaded;
                    drop(l);
                    notifier.loaded();
                }
                Err(e) => {
                    l.state = LoadState::Error;
                    drop(l);
                    notifier.load_failed(e);
                }
            }
        });
    }

    fn unload(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.playing = false;
        self.offset = Duration::ZERO;

        if let Ok(mut l) = self.loaded.lock() {
            l.generation += 1;
            l.state = LoadState::Unloaded;
            l.data = None;
        }
    }

    fn play(&mut self, _instance: Option<InstanceId>) -> InstanceId {
        if self.state() != LoadState::Loaded {
            return INSTANCE;
        }

        match self.sink.as_ref() {
            Some(sink) if !sink.empty() => {
                sink.play();
                self.playing = true;
                self.notifier.play_started();
            }
            _ => self.start_fresh(),
        }
        INSTANCE
    }

    fn pause(&mut self, _instance: Option<InstanceId>) {
        if let Some(sink) = self.sink.as_ref() {
            sink.pause();
        }
        self.playing = false;
    }

    fn stop(&mut self, _instance: Option<InstanceId>) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.playing = false;
        self.offset = Duration::ZERO;
    }

    fn seek(&mut self, position: f64, _instance: Option<InstanceId>) {
        // Scrubbing: rebuild the current sink and skip into the data.
        if self.sink.is_none() {
            return;
        }
        let Some(data) = self.data() else {
            return;
        };

        let position = if position.is_finite() { position.max(0.0) } else { 0.0 };
        let start_at = Duration::from_secs_f64(position);

        if let Some(old) = self.sink.take() {
            old.stop();
        }

        match create_sink_at(&self.mixer, data, start_at) {
            Ok(sink) => {
                if self.playing {
                    sink.play();
                }
                self.sink = Some(sink);
                self.offset = start_at;
            }
            Err(e) => {
                self.playing = false;
                self.notifier.play_failed(e);
            }
        }
    }

    fn duration(&self) -> f64 {
        self.loaded
            .lock()
            .ok()
            .and_then(|l| l.duration)
            .map_or(0.0, |d| d.as_secs_f64())
    }

    fn position(&self) -> f64 {
        self.sink
            .as_ref()
            .map_or(Duration::ZERO, |s| self.offset + s.get_pos())
            .as_secs_f64()
    }

    fn poll(&mut self) {
        let drained = self.sink.as_ref().is_some_and(Sink::empty);
        if self.playing && drained {
            self.playing = false;
            self.sink = None;
            self.offset = Duration::ZERO;
            self.notifier.ended();
        }
    }
}

/// Read and probe an audio file, returning its bytes and duration.
fn read_source(path: &Path) -> Result<(Arc<[u8]>, Option<Duration>), String> {
    let bytes = fs::read(path).map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let data: Arc<[u8]> = Arc::from(bytes);

    let decoder = Decoder::new(Cursor::new(Arc::clone(&data)))
        .map_err(|e| format!("failed to decode {}: {e}", path.display()))?;

    let duration = lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
        .filter(|d| !d.is_zero())
        .or_else(|| decoder.total_duration());

    Ok((data, duration))
}
