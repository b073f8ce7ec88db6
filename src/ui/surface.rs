//! `RenderSurface` backed by the terminal.
//!
//! The player pushes state into the surface; the event loop draws it once
//! per frame and asks it to translate cursor and mouse positions back into
//! player input.

use std::collections::BTreeMap;

use ratatui::layout::{Position, Rect};
use ratatui::widgets::ListState;

use crate::surface::{ControlState, RenderSurface, TrackRow};
use crate::track::{TrackId, ZERO_TIME};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ViewMode {
    /// Nothing mounted yet.
    Blank,
    Player,
    /// Read-only numbered listing.
    Listing,
}

#[derive(Debug)]
pub struct TerminalSurface {
    pub(super) header_text: String,
    pub(super) container: Option<String>,
    pub(super) mode: ViewMode,
    pub(super) rows: Vec<TrackRow>,
    pub(super) row_states: BTreeMap<TrackId, ControlState>,
    pub(super) title: String,
    pub(super) progress: f64,
    pub(super) elapsed: String,
    pub(super) control: ControlState,
    pub(super) list_state: ListState,
    // Filled in by the last draw.
    pub(super) gauge_area: Option<Rect>,
    pub(super) list_area: Option<Rect>,
}

impl TerminalSurface {
    pub fn new(header_text: impl Into<String>) -> Self {
        Self {
            header_text: header_text.into(),
            container: None,
            mode: ViewMode::Blank,
            rows: Vec::new(),
            row_states: BTreeMap::new(),
            title: String::new(),
            progress: 0.0,
            elapsed: ZERO_TIME.to_string(),
            control: ControlState::Idle,
            list_state: ListState::default(),
            gauge_area: None,
            list_area: None,
        }
    }

    pub fn container(&self) -> Option<&str> {
        self.container.as_deref()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn elapsed(&self) -> &str {
        &self.elapsed
    }

    pub fn control(&self) -> ControlState {
        self.control
    }

    pub fn row_state(&self, id: TrackId) -> ControlState {
        self.row_states.get(&id).copied().unwrap_or_default()
    }

    /// Track under the row cursor.
    pub fn cursor_row(&self) -> Option<TrackId> {
        self.list_state
            .selected()
            .and_then(|i| self.rows.get(i))
            .map(|row| row.id)
    }

    /// Move the row cursor by `delta`, clamped to the list.
    pub fn move_cursor(&mut self, delta: isize) {
        if self.rows.is_empty() {
            return;
        }
        let last = self.rows.len() - 1;
        let current = self.list_state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(last);
        self.list_state.select(Some(next));
    }

    /// Horizontal fraction of the progress gauge at a terminal cell, if the
    /// cell lies on the gauge.
    pub fn fraction_at(&self, column: u16, row: u16) -> Option<f64> {
        let area = self.gauge_area?;
        if area.width == 0 || !area.contains(Position::new(column, row)) {
            return None;
        }
        Some(f64::from(column - area.x) / f64::from(area.width))
    }

    /// Track drawn at a terminal cell of the list, if any.
    pub fn row_at(&self, column: u16, row: u16) -> Option<TrackId> {
        let area = self.list_area?;
        if !area.contains(Position::new(column, row)) {
            return None;
        }
        let index = usize::from(row - area.y) + self.list_state.offset();
        self.rows.get(index).map(|r| r.id)
    }

    fn index_of(&self, id: TrackId) -> Option<usize> {
        self.rows.iter().position(|r| r.id == id)
    }
}

impl RenderSurface for TerminalSurface {
    fn mount(&mut self, container_id: &str) -> bool {
        let id = container_id.trim();
        if id.is_empty() {
            return false;
        }
        self.container = Some(id.to_string());
        true
    }

    fn render_player(&mut self, rows: &[TrackRow], title: &str) {
        self.mode = ViewMode::Player;
        self.rows = rows.to_vec();
        self.row_states.clear();
        self.title = title.to_string();
        let first_playable = rows.iter().position(|r| r.playable);
        self.list_state.select(first_playable);
    }

    fn render_listing(&mut self, rows: &[TrackRow]) {
        self.mode = ViewMode::Listing;
        self.rows = rows.to_vec();
        self.row_states.clear();
        self.list_state.select(None);
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_progress(&mut self, percent: f64) {
        self.progress = if percent.is_finite() {
            percent.clamp(0.0, 100.0)
        } else {
            0.0
        };
    }

    fn set_elapsed(&mut self, text: &str) {
        self.elapsed = text.to_string();
    }

    fn set_control_state(&mut self, state: ControlState) {
        self.control = state;
    }

    fn set_row_state(&mut self, id: TrackId, state: ControlState) {
        self.row_states.insert(id, state);
        // The cursor follows the track that starts playing.
        if state == ControlState::Playing {
            if let Some(index) = self.index_of(id) {
                self.list_state.select(Some(index));
            }
        }
    }
}
