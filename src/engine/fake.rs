//! Scripted in-memory engine for tests.
//!
//! Handles record every command they receive. Loads only complete when the
//! test says so (unless the engine is built with [`FakeEngine::instant`]).

use std::cell::RefCell;
use std::rc::Rc;

use super::types::{InstanceId, LoadState, Notifier, SoundEngine, SoundHandle};
use crate::track::TrackId;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Load,
    Unload,
    Play(Option<InstanceId>),
    Pause(Option<InstanceId>),
    Stop(Option<InstanceId>),
    Seek(f64),
}

#[derive(Debug)]
struct Record {
    source: String,
    notifier: Notifier,
    state: LoadState,
    commands: Vec<Command>,
    position: f64,
    duration: f64,
}

#[derive(Debug, Default)]
struct Shared {
    handles: Vec<Record>,
    instant_load: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FakeEngine {
    shared: Rc<RefCell<Shared>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine whose loads complete (and notify) as soon as they are requested.
    pub fn instant() -> Self {
        let engine = Self::default();
        engine.shared.borrow_mut().instant_load = true;
        engine
    }

    pub fn created(&self) -> usize {
        self.shared.borrow().handles.len()
    }

    pub fn sources(&self) -> Vec<String> {
        self.shared
            .borrow()
            .handles
            .iter()
            .map(|h| h.source.clone())
            .collect()
    }

    pub fn commands(&self, track: TrackId) -> Vec<Command> {
        self.with(track, |h| h.commands.clone()).unwrap_or_default()
    }

    pub fn set_position(&self, track: TrackId, seconds: f64) {
        self.with(track, |h| h.position = seconds);
    }

    pub fn set_duration(&self, track: TrackId, seconds: f64) {
        self.with(track, |h| h.duration = seconds);
    }

    pub fn finish_load(&self, track: TrackId) {
        if let Some(notifier) = self.with(track, |h| {
            h.state = LoadState::Loaded;
            h.notifier.clone()
        }) {
            notifier.loaded();
        }
    }

    pub fn fail_load(&self, track: TrackId) {
        if let Some(notifier) = self.with(track, |h| {
            h.state = LoadState::Error;
            h.notifier.clone()
        }) {
            notifier.load_failed("decoder exploded");
        }
    }

    pub fn fail_play(&self, track: TrackId) {
        if let Some(notifier) = self.with(track, |h| h.notifier.clone()) {
            notifier.play_failed("device lost");
        }
    }

    pub fn end(&self, track: TrackId) {
        if let Some(notifier) = self.with(track, |h| h.notifier.clone()) {
            notifier.ended();
        }
    }

    fn with<R>(&self, track: TrackId, f: impl FnOnce(&mut Record) -> R) -> Option<R> {
        let mut shared = self.shared.borrow_mut();
        shared
            .handles
            .iter_mut()
            .find(|h| h.notifier.track() == track)
            .map(f)
    }
}

impl SoundEngine for FakeEngine {
    fn create(&mut self, source: &str, notifier: Notifier) -> Box<dyn SoundHandle> {
        let mut shared = self.shared.borrow_mut();
        let index = shared.handles.len();
        shared.handles.push(Record {
            source: source.to_string(),
            notifier,
            state: LoadState::Unloaded,
            commands: Vec::new(),
            position: 0.0,
            duration: 0.0,
        });
        Box::new(FakeHandle {
            index,
            shared: Rc::clone(&self.shared),
        })
    }
}

struct FakeHandle {
    index: usize,
    shared: Rc<RefCell<Shared>>,
}

impl FakeHandle {
    fn record<R>(&self, f: impl FnOnce(&mut Record, bool) -> R) -> R {
        let mut shared = self.shared.borrow_mut();
        let instant = shared.instant_load;
        f(&mut shared.handles[self.index], instant)
    }
}

impl SoundHandle for FakeHandle {
    fn state(&self) -> LoadState {
        self.record(|h, _| h.state)
    }

    fn load(&mut self) {
        self.record(|h, instant| {
            h.commands.push(Command::Load);
            if instant {
                h.state = LoadState::Loaded;
                h.notifier.loaded();
            } else {
                h.state = LoadState::Loading;
            }
        });
    }

    fn unload(&mut self) {
        self.record(|h, _| {
            h.commands.push(Command::Unload);
            h.state = LoadState::Unloaded;
        });
    }

    fn play(&mut self, instance: Option<InstanceId>) -> InstanceId {
        self.record(|h, _| {
            h.commands.push(Command::Play(instance));
            if h.state == LoadState::Loaded {
                h.notifier.play_started();
            }
        });
        instance.unwrap_or(7)
    }

    fn pause(&mut self, instance: Option<InstanceId>) {
        self.record(|h, _| h.commands.push(Command::Pause(instance)));
    }

    fn stop(&mut self, instance: Option<InstanceId>) {
        self.record(|h, _| {
            h.commands.push(Command::Stop(instance));
            h.position = 0.0;
        });
    }

    fn seek(&mut self, position: f64, _instance: Option<InstanceId>) {
        self.record(|h, _| {
            h.commands.push(Command::Seek(position));
            h.position = position;
        });
    }

    fn duration(&self) -> f64 {
        self.record(|h, _| h.duration)
    }

    fn position(&self) -> f64 {
        self.record(|h, _| h.position)
    }
}
