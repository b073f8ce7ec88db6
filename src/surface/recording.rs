//! Surface that records what it was told, for tests.

use std::collections::BTreeMap;

use super::{ControlState, RenderSurface, TrackRow};
use crate::track::TrackId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Unmounted,
    Player,
    Listing,
}

#[derive(Debug)]
pub struct RecordingSurface {
    pub accept_mount: bool,
    pub container: Option<String>,
    pub mode: Mode,
    pub rows: Vec<TrackRow>,
    pub title: String,
    pub progress: f64,
    pub elapsed: String,
    pub elapsed_history: Vec<String>,
    pub control: ControlState,
    pub row_states: BTreeMap<TrackId, ControlState>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            accept_mount: true,
            container: None,
            mode: Mode::Unmounted,
            rows: Vec::new(),
            title: String::new(),
            progress: 0.0,
            elapsed: String::new(),
            elapsed_history: Vec::new(),
            control: ControlState::Idle,
            row_states: BTreeMap::new(),
        }
    }
}

impl RecordingSurface {
    pub fn rejecting() -> Self {
        Self {
            accept_mount: false,
            ..Self::default()
        }
    }

    pub fn row_state(&self, id: TrackId) -> ControlState {
        self.row_states.get(&id).copied().unwrap_or_default()
    }
}

impl RenderSurface for RecordingSurface {
    fn mount(&mut self, container_id: &str) -> bool {
        if self.accept_mount {
            self.container = Some(container_id.to_string());
        }
        self.accept_mount
    }

    fn render_player(&mut self, rows: &[TrackRow], title: &str) {
        self.mode = Mode::Player;
        self.rows = rows.to_vec();
        self.title = title.to_string();
    }

    fn render_listing(&mut self, rows: &[TrackRow]) {
        self.mode = Mode::Listing;
        self.rows = rows.to_vec();
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_progress(&mut self, percent: f64) {
        self.progress = percent;
    }

    fn set_elapsed(&mut self, text: &str) {
        self.elapsed = text.to_string();
        self.elapsed_history.push(text.to_string());
    }

    fn set_control_state(&mut self, state: ControlState) {
        self.control = state;
    }

    fn set_row_state(&mut self, id: TrackId, state: ControlState) {
        self.row_states.insert(id, state);
    }
}
