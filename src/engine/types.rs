//! Engine-facing types: load states, notifications and the port traits.

use std::sync::mpsc::Sender;

use tracing::debug;

use crate::track::TrackId;

/// Identifier of a playing instance inside a handle.
pub type InstanceId = u32;

/// Load state as reported by an engine handle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoadState {
    Unloaded,
    Loading,
    Loaded,
    Error,
}

impl Default for LoadState {
    fn default() -> Self {
        Self::Unloaded
    }
}

/// Asynchronous notification raised by a handle.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Loaded,
    PlayStarted,
    Ended,
    LoadFailed(String),
    PlayFailed(String),
}

/// An [`EngineEvent`] tagged with the track that owns the handle.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineNotice {
    pub track: TrackId,
    pub event: EngineEvent,
}

/// Callback channel handed to a handle at creation.
///
/// Cloneable and `Send`, so loader threads can report back.
#[derive(Debug, Clone)]
pub struct Notifier {
    track: TrackId,
    tx: Sender<EngineNotice>,
}

impl Notifier {
    pub fn new(track: TrackId, tx: Sender<EngineNotice>) -> Self {
        Self { track, tx }
    }

    pub fn track(&self) -> TrackId {
        self.track
    }

    pub fn loaded(&self) {
        self.send(EngineEvent::Loaded);
    }

    pub fn play_started(&self) {
        self.send(EngineEvent::PlayStarted);
    }

    pub fn ended(&self) {
        self.send(EngineEvent::Ended);
    }

    pub fn load_failed(&self, reason: impl Into<String>) {
        self.send(EngineEvent::LoadFailed(reason.into()));
    }

    pub fn play_failed(&self, reason: impl Into<String>) {
        self.send(EngineEvent::PlayFailed(reason.into()));
    }

    fn send(&self, event: EngineEvent) {
        let notice = EngineNotice {
            track: self.track,
            event,
        };
        if let Err(e) = self.tx.send(notice) {
            debug!(track = self.track, event = ?e.0.event, "player gone, dropping engine notice");
        }
    }
}

/// One loaded (or loadable) audio source.
pub trait SoundHandle {
    fn state(&self) -> LoadState;
    /// Start loading. Completion is reported through the notifier.
    fn load(&mut self);
    /// Abort an in-flight load and release loaded data.
    fn unload(&mut self);
    fn play(&mut self, instance: Option<InstanceId>) -> InstanceId;
    fn pause(&mut self, instance: Option<InstanceId>);
    fn stop(&mut self, instance: Option<InstanceId>);
    /// Seek to `position` seconds.
    fn seek(&mut self, position: f64, instance: Option<InstanceId>);
    /// Duration in seconds, 0 when unknown.
    fn duration(&self) -> f64;
    /// Elapsed position in seconds.
    fn position(&self) -> f64;
    /// Give the handle a chance to detect end of playback.
    fn poll(&mut self) {}
}

/// Factory of [`SoundHandle`]s.
pub trait SoundEngine {
    fn create(&mut self, source: &str, notifier: Notifier) -> Box<dyn SoundHandle>;
}
