//! A single playlist entry and its playback state machine.
//!
//! The engine handle is created lazily by the player on first play and is
//! never replaced afterwards. All transitions go through [`PlaybackState`];
//! there are no side flags.

use std::fmt;

use tracing::{debug, warn};

use crate::analytics::Analytics;
use crate::engine::{InstanceId, LoadState, SoundHandle};
use crate::library::TrackItem;

/// Ordinal position of a track in its playlist.
pub type TrackId = usize;

/// Formatted zero position.
pub const ZERO_TIME: &str = "00:00";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlaybackState {
    /// No engine handle. Tracks without a source never leave this state.
    NoSound,
    /// Handle exists but nothing is loaded (aborted load).
    Unloaded,
    /// Load in flight; `play_when_loaded` carries the user's intent.
    Loading { play_when_loaded: bool },
    /// Loaded and idle at the start (after stop or end of track).
    Stopped,
    Paused,
    Playing,
    /// Last load or play attempt failed.
    Error,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::NoSound
    }
}

pub struct Track {
    id: TrackId,
    name: String,
    artist: Option<String>,
    declared_duration: Option<f64>,
    source: Option<String>,
    state: PlaybackState,
    sound: Option<Box<dyn SoundHandle>>,
    instance: Option<InstanceId>,
    analytics: Analytics,
}

impl Track {
    pub fn new(id: TrackId, item: TrackItem, analytics: Analytics) -> Self {
        Self {
            id,
            name: item.name,
            artist: item.artist,
            declared_duration: item.duration.filter(|d| d.is_finite() && *d > 0.0),
            source: item.source.filter(|s| !s.trim().is_empty()),
            state: PlaybackState::NoSound,
            sound: None,
            instance: None,
            analytics,
        }
    }

    pub fn id(&self) -> TrackId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn artist(&self) -> Option<&str> {
        self.artist.as_deref()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn is_playable(&self) -> bool {
        self.source.is_some()
    }

    pub fn has_sound(&self) -> bool {
        self.sound.is_some()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// True while playing, or while loading with the intent to play.
    pub fn is_playing(&self) -> bool {
        matches!(
            self.state,
            PlaybackState::Playing
                | PlaybackState::Loading {
                    play_when_loaded: true
                }
        )
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, PlaybackState::Loading { .. })
    }

    /// Label used for analytics: `artist - name`, or just the name.
    pub fn label(&self) -> String {
        match self.artist.as_deref().map(str::trim) {
            Some(a) if !a.is_empty() => format!("{} - {}", a, self.name),
            _ => self.name.clone(),
        }
    }

    /// Bind the engine handle. Only the first handle is kept.
    pub fn attach_sound(&mut self, sound: Box<dyn SoundHandle>) {
        if !self.is_playable() {
            warn!(track = self.id, "refusing to attach a sound to a track without source");
            return;
        }
        if self.sound.is_some() {
            warn!(track = self.id, "track already has a sound, keeping the existing one");
            return;
        }
        self.sound = Some(sound);
        self.state = PlaybackState::Unloaded;
    }

    pub fn play(&mut self) {
        match self.state {
            PlaybackState::NoSound | PlaybackState::Playing => {}
            PlaybackState::Unloaded | PlaybackState::Error => {
                let Some(sound) = self.sound.as_mut() else {
                    return;
                };
                if sound.state() == LoadState::Loaded {
                    self.state = PlaybackState::Stopped;
                    self.start();
                } else {
                    sound.load();
                    self.state = PlaybackState::Loading {
                        play_when_loaded: true,
                    };
                }
            }
            PlaybackState::Loading { .. } => {
                self.state = PlaybackState::Loading {
                    play_when_loaded: true,
                };
            }
            PlaybackState::Stopped | PlaybackState::Paused => self.start(),
        }
    }

    // Loaded-Stopped or Loaded-Paused to Loaded-Playing.
    fn start(&mut self) {
        let fresh = self.state == PlaybackState::Stopped;
        if fresh {
            self.analytics.report("play", &self.label());
        }

        let Some(sound) = self.sound.as_mut() else {
            return;
        };
        match self.instance {
            None => self.instance = Some(sound.play(None)),
            Some(instance) => {
                sound.play(Some(instance));
            }
        }
        self.state = PlaybackState::Playing;
    }

    /// Apply the engine's load notification.
    ///
    /// Returns whether playback was requested while loading; the caller
    /// then calls [`Track::play`].
    pub fn mark_loaded(&mut self) -> bool {
        match self.state {
            PlaybackState::Loading { play_when_loaded } => {
                self.state = PlaybackState::Stopped;
                play_when_loaded
            }
            other => {
                debug!(track = self.id, state = ?other, "ignoring load notice");
                false
            }
        }
    }

    pub fn pause(&mut self) {
        match self.state {
            PlaybackState::Playing => {
                self.analytics.report("pause", &self.label());
                if let Some(sound) = self.sound.as_mut() {
                    sound.pause(self.instance);
                }
                self.state = PlaybackState::Paused;
            }
            PlaybackState::Loading { .. } => {
                self.state = PlaybackState::Loading {
                    play_when_loaded: false,
                };
            }
            _ => {}
        }
    }

    pub fn stop(&mut self) {
        let Some(sound) = self.sound.as_mut() else {
            return;
        };
        match self.state {
            PlaybackState::Loading { .. } => {
                sound.unload();
                self.state = PlaybackState::Unloaded;
            }
            PlaybackState::Playing | PlaybackState::Paused | PlaybackState::Stopped => {
                sound.stop(self.instance);
                self.state = PlaybackState::Stopped;
            }
            _ => {}
        }
    }

    /// Seek to `position` seconds. Only acts while playing.
    pub fn seek(&mut self, position: f64) {
        if self.state != PlaybackState::Playing {
            return;
        }
        self.analytics.report("seek", &self.label());
        if let Some(sound) = self.sound.as_mut() {
            sound.seek(position, self.instance);
        }
    }

    /// The engine reached the end of the track.
    pub fn finish(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Stopped;
        }
    }

    /// The engine failed to load or play this track.
    pub fn fail(&mut self) {
        if let Some(sound) = self.sound.as_mut() {
            match sound.state() {
                LoadState::Loading => sound.unload(),
                LoadState::Loaded => sound.stop(self.instance),
                _ => {}
            }
            self.state = PlaybackState::Error;
        }
    }

    pub fn poll(&mut self) {
        if let Some(sound) = self.sound.as_mut() {
            sound.poll();
        }
    }

    /// Elapsed seconds, 0 without a handle.
    pub fn seek_position(&self) -> f64 {
        self.sound.as_ref().map_or(0.0, |s| s.position())
    }

    /// Elapsed time as `mm:ss`.
    pub fn seek_text(&self) -> String {
        format_time(self.seek_position().round())
    }

    /// Declared duration when known, otherwise whatever the engine reports.
    pub fn duration(&self) -> f64 {
        match (self.declared_duration, self.sound.as_ref()) {
            (Some(d), _) => d,
            (None, Some(sound)) => sound.duration(),
            (None, None) => 0.0,
        }
    }
}

impl fmt::Debug for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Track")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("source", &self.source)
            .field("state", &self.state)
            .field("has_sound", &self.has_sound())
            .finish()
    }
}

/// Format seconds as `mm:ss`. Minutes keep counting past an hour.
pub fn format_time(seconds: f64) -> String {
    let secs = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests;
