//! Render surface port.
//!
//! The player pushes display updates through [`RenderSurface`]; the host
//! translates user input into [`InputEvent`]s and feeds them back.

use crate::track::{Track, TrackId};

#[cfg(test)]
pub(crate) mod recording;

/// Visual state of a play control.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ControlState {
    Idle,
    Playing,
}

impl Default for ControlState {
    fn default() -> Self {
        Self::Idle
    }
}

impl ControlState {
    pub fn from_playing(playing: bool) -> Self {
        if playing { Self::Playing } else { Self::Idle }
    }
}

/// Static row data handed to the surface when it renders the track list.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackRow {
    pub id: TrackId,
    pub name: String,
    pub artist: Option<String>,
    pub playable: bool,
}

impl From<&Track> for TrackRow {
    fn from(track: &Track) -> Self {
        Self {
            id: track.id(),
            name: track.name().to_string(),
            artist: track.artist().map(str::to_string),
            playable: track.is_playable(),
        }
    }
}

/// Input raised by the surface.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    TogglePlay,
    SkipPrev,
    SkipNext,
    /// Pointer position on the progress bar, as a fraction of its width.
    SeekAt(f64),
    SelectRow(TrackId),
}

pub trait RenderSurface {
    /// Bind the surface to a container. `false` when it does not exist.
    fn mount(&mut self, container_id: &str) -> bool;
    /// Full player shell: title, progress, controls and the track list.
    fn render_player(&mut self, rows: &[TrackRow], title: &str);
    /// Read-only listing used when nothing is playable.
    fn render_listing(&mut self, rows: &[TrackRow]);
    fn set_title(&mut self, title: &str);
    fn set_progress(&mut self, percent: f64);
    fn set_elapsed(&mut self, text: &str);
    fn set_control_state(&mut self, state: ControlState);
    fn set_row_state(&mut self, id: TrackId, state: ControlState);
}
