//! Playback orchestration.
//!
//! The [`Player`] turns input events into playlist and track operations,
//! creates engine handles lazily, applies engine notifications and keeps the
//! render surface in sync. It is single-threaded: the host calls
//! [`Player::tick`] once per display refresh and forwards input through
//! [`Player::handle_input`].

mod tasks;

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::analytics::{self, Analytics};
use crate::engine::{EngineEvent, EngineNotice, Notifier, SoundEngine};
use crate::error::{PlayerError, Result};
use crate::library::TrackItem;
use crate::playlist::{Direction, Playlist};
use crate::surface::{ControlState, InputEvent, RenderSurface, TrackRow};
use crate::track::{TrackId, ZERO_TIME};

use tasks::{LoadingIndicator, ProgressLoop, progress_percent};

/// Container used when none is configured.
pub const DEFAULT_CONTAINER_ID: &str = "srr-player";

/// Period of the loading animation.
pub const DEFAULT_LOADING_TICK: Duration = Duration::from_millis(500);

/// Construction-time configuration.
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    pub items: Vec<TrackItem>,
    pub container_id: String,
    pub analytics_port: Option<String>,
    pub loading_tick: Duration,
}

impl PlayerConfig {
    pub fn new(items: Vec<TrackItem>) -> Self {
        Self {
            items,
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            analytics_port: None,
            loading_tick: DEFAULT_LOADING_TICK,
        }
    }
}

pub struct Player<S: RenderSurface> {
    playlist: Playlist,
    engine: Box<dyn SoundEngine>,
    surface: S,
    notices_tx: Sender<EngineNotice>,
    notices_rx: Receiver<EngineNotice>,
    progress: ProgressLoop,
    loading: Option<LoadingIndicator>,
    loading_tick: Duration,
    last_tick: Instant,
    interactive: bool,
}

impl<S: RenderSurface> Player<S> {
    /// Build a player, resolving the analytics port from its configured name.
    pub fn new(config: PlayerConfig, engine: Box<dyn SoundEngine>, surface: S) -> Result<Self> {
        let analytics = analytics::from_port_name(config.analytics_port.as_deref());
        Self::with_analytics(config, engine, surface, analytics)
    }

    /// Build a player with an explicit analytics handle.
    ///
    /// Fails only when the surface cannot mount the configured container.
    pub fn with_analytics(
        config: PlayerConfig,
        engine: Box<dyn SoundEngine>,
        mut surface: S,
        analytics: Analytics,
    ) -> Result<Self> {
        if !surface.mount(&config.container_id) {
            error!(container = %config.container_id, "player container not found");
            return Err(PlayerError::ContainerNotFound(config.container_id));
        }

        let playlist = Playlist::new(config.items, &analytics);
        let rows: Vec<TrackRow> = playlist.tracks().iter().map(TrackRow::from).collect();

        let interactive = match playlist.current() {
            Some(current) => {
                surface.render_player(&rows, current.name());
                surface.set_progress(0.0);
                surface.set_elapsed(ZERO_TIME);
                surface.set_control_state(ControlState::Idle);
                true
            }
            None => {
                info!(tracks = rows.len(), "no playable track, rendering a read-only listing");
                surface.render_listing(&rows);
                false
            }
        };

        let (notices_tx, notices_rx) = mpsc::channel();

        Ok(Self {
            playlist,
            engine,
            surface,
            notices_tx,
            notices_rx,
            progress: ProgressLoop::default(),
            loading: None,
            loading_tick: config.loading_tick,
            last_tick: Instant::now(),
            interactive,
        })
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// False in display-only mode, where no controls are wired.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn is_progress_active(&self) -> bool {
        self.progress.is_active()
    }

    pub fn is_loading_indicator_active(&self) -> bool {
        self.loading.is_some()
    }

    pub fn handle_input(&mut self, event: InputEvent) -> Result<()> {
        if !self.interactive {
            debug!(?event, "ignoring input in listing mode");
            return Ok(());
        }

        match event {
            InputEvent::TogglePlay => self.toggle(None),
            InputEvent::SelectRow(id) => self.toggle(Some(id)),
            InputEvent::SkipPrev => self.skip(Direction::Prev, false),
            InputEvent::SkipNext => self.skip(Direction::Next, false),
            InputEvent::SeekAt(fraction) => {
                self.seek_fraction(fraction);
                Ok(())
            }
        }
    }

    /// Advance the cooperative tasks: engine notices, the loading animation
    /// and one progress step.
    pub fn tick(&mut self, now: Instant) -> Result<()> {
        self.last_tick = now;

        if let Some(current) = self.playlist.current_mut() {
            current.poll();
        }

        // Notices raised while applying others are handled in the same tick.
        while let Ok(notice) = self.notices_rx.try_recv() {
            self.apply_notice(notice)?;
        }

        self.run_loading_indicator(now);
        self.step_progress();
        Ok(())
    }

    /// Play/pause the current track, or switch to `id` and play it.
    pub fn toggle(&mut self, id: Option<TrackId>) -> Result<()> {
        let track = self
            .playlist
            .get_track(id)
            .ok_or(PlayerError::NoPlayableTrack)?;
        let target = track.id();

        if !track.is_playable() {
            warn!(track = target, "track has no source, ignoring selection");
            return Ok(());
        }

        let same_track = track.has_sound() && self.playlist.current_id() == Some(target);
        if !same_track {
            self.switch_to(target, true);
            return Ok(());
        }

        if let Some(track) = self.playlist.track_mut(target) {
            if track.is_playing() {
                track.pause();
            } else {
                track.play();
            }
        }
        self.sync_row(target);
        self.update_display(target);
        Ok(())
    }

    /// Skip to the neighbouring playable track.
    ///
    /// A requested autoplay is dropped when the scan wrapped around the
    /// playlist, so auto-advance stops at the end of the list.
    pub fn skip(&mut self, direction: Direction, autoplay: bool) -> Result<()> {
        let candidate = self.playlist.neighbour(direction)?;
        let current = self
            .playlist
            .current_id()
            .ok_or(PlayerError::NoPlayableTrack)?;

        let mut autoplay = autoplay;
        if autoplay && !direction.is_past(candidate, current) {
            debug!(?direction, candidate, current, "navigation wrapped, not autoplaying");
            autoplay = false;
        }

        self.switch_to(candidate, autoplay);
        Ok(())
    }

    /// Make `target` current, stopping the previous track first.
    ///
    /// `target` plays when `autoplay` is set or the previous track was playing.
    pub fn switch_to(&mut self, target: TrackId, autoplay: bool) {
        let mut was_playing = false;
        let mut stopped = None;
        if let Some(current) = self.playlist.current_mut() {
            if current.has_sound() {
                was_playing = current.is_playing();
                current.stop();
                stopped = Some(current.id());
            }
        }
        if let Some(id) = stopped {
            self.sync_row(id);
        }

        if autoplay || was_playing {
            self.play(target);
        }

        self.update_display(target);
        self.playlist.set_current(target);
        debug!(target, autoplay, was_playing, "switched track");
    }

    /// Seek the current track to `fraction` of its duration.
    pub fn seek_fraction(&mut self, fraction: f64) {
        if !fraction.is_finite() {
            return;
        }
        let fraction = fraction.clamp(0.0, 1.0);

        let Some(track) = self.playlist.current_mut() else {
            return;
        };
        if track.has_sound() && track.is_playing() {
            let position = track.duration() * fraction;
            track.seek(position);
        }
    }

    /// Stop the current track and cancel the loading animation.
    pub fn stop(&mut self) {
        self.loading = None;
        let Some(current) = self.playlist.current_mut() else {
            return;
        };
        current.stop();
        let id = current.id();
        self.sync_row(id);
        self.update_display(id);
    }

    // Create the engine handle on first play, then play.
    fn play(&mut self, target: TrackId) {
        let Some(track) = self.playlist.track_mut(target) else {
            return;
        };

        if !track.has_sound() {
            let Some(source) = track.source().map(str::to_owned) else {
                warn!(track = target, "cannot play a track without source");
                return;
            };
            let notifier = Notifier::new(target, self.notices_tx.clone());
            track.attach_sound(self.engine.create(&source, notifier));
        }

        track.play();
        self.sync_row(target);
    }

    fn apply_notice(&mut self, notice: EngineNotice) -> Result<()> {
        let id = notice.track;
        let is_current = self.playlist.current_id() == Some(id);

        match notice.event {
            EngineEvent::Loaded => {
                if let Some(track) = self.playlist.track_mut(id) {
                    if track.mark_loaded() {
                        track.play();
                    }
                }
                self.sync_row(id);
            }
            EngineEvent::PlayStarted => {
                if is_current {
                    self.progress.start();
                }
            }
            EngineEvent::Ended => {
                if let Some(track) = self.playlist.track_mut(id) {
                    track.finish();
                }
                self.sync_row(id);
                if is_current {
                    self.skip(Direction::Next, true)?;
                }
            }
            EngineEvent::LoadFailed(reason) | EngineEvent::PlayFailed(reason) => {
                warn!(track = id, %reason, "playback failed");
                if let Some(track) = self.playlist.track_mut(id) {
                    track.fail();
                }
                self.sync_row(id);
                if is_current {
                    self.update_display(id);
                }
            }
        }
        Ok(())
    }

    // Refresh the shell for `track`, which is about to become (or already
    // is) the current track.
    fn update_display(&mut self, track: TrackId) {
        let Some(shown) = self.playlist.track(track) else {
            return;
        };

        if self.playlist.current_id() != Some(track) {
            self.loading = None;
            self.surface.set_title(shown.name());
            self.surface.set_progress(0.0);
            self.surface.set_elapsed(ZERO_TIME);
        }

        if shown.is_loading() && self.loading.is_none() {
            self.loading = Some(LoadingIndicator::new(
                track,
                self.loading_tick,
                self.last_tick,
            ));
        }

        self.surface
            .set_control_state(ControlState::from_playing(shown.is_playing()));
    }

    fn run_loading_indicator(&mut self, now: Instant) {
        let Some(indicator) = self.loading.as_mut() else {
            return;
        };
        if !indicator.is_due(now) {
            return;
        }

        let still_loading = self
            .playlist
            .track(indicator.track())
            .is_some_and(|t| t.is_loading());
        let frame = indicator.advance(now);
        self.surface.set_elapsed(&frame);

        if !still_loading {
            self.loading = None;
            self.surface.set_elapsed(ZERO_TIME);
        }
    }

    fn step_progress(&mut self) {
        if !self.progress.is_active() {
            return;
        }

        let Some(track) = self.playlist.current() else {
            self.progress.stop();
            return;
        };
        if !track.has_sound() || track.is_loading() {
            self.progress.stop();
            return;
        }

        let percent = progress_percent(track.seek_position(), track.duration());
        let elapsed = track.seek_text();
        let playing = track.is_playing();

        self.surface.set_progress(percent);
        self.surface.set_elapsed(&elapsed);
        if !playing {
            self.progress.stop();
        }
    }

    fn sync_row(&mut self, id: TrackId) {
        if let Some(track) = self.playlist.track(id) {
            let state = ControlState::from_playing(track.is_playing());
            self.surface.set_row_state(id, state);
        }
    }
}
