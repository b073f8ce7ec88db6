//! Ordered track collection with a playability-aware cursor.

use tracing::warn;

use crate::analytics::Analytics;
use crate::error::{PlayerError, Result};
use crate::library::TrackItem;
use crate::track::{Track, TrackId};

/// Travel direction for skips.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    /// Whether `candidate` lies strictly beyond `current` in this direction,
    /// i.e. the scan did not wrap around the playlist boundary.
    pub fn is_past(self, candidate: TrackId, current: TrackId) -> bool {
        match self {
            Self::Next => candidate > current,
            Self::Prev => candidate < current,
        }
    }
}

#[derive(Debug)]
pub struct Playlist {
    tracks: Vec<Track>,
    current: Option<TrackId>,
}

impl Playlist {
    /// Build one track per item. The first playable track becomes current.
    pub fn new(items: Vec<TrackItem>, analytics: &Analytics) -> Self {
        let tracks: Vec<Track> = items
            .into_iter()
            .enumerate()
            .map(|(id, item)| Track::new(id, item, analytics.clone()))
            .collect();
        let current = tracks.iter().find(|t| t.is_playable()).map(Track::id);

        Self { tracks, current }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn track(&self, id: TrackId) -> Option<&Track> {
        self.tracks.get(id)
    }

    pub fn track_mut(&mut self, id: TrackId) -> Option<&mut Track> {
        self.tracks.get_mut(id)
    }

    /// Track at `id`, falling back to the current track when `id` is absent
    /// or out of range. An out-of-range id is logged as a usage warning.
    pub fn get_track(&self, id: Option<TrackId>) -> Option<&Track> {
        match id {
            Some(id) => match self.tracks.get(id) {
                Some(track) => Some(track),
                None => {
                    warn!(id, len = self.tracks.len(), "playlist: track not found");
                    self.current()
                }
            },
            None => self.current(),
        }
    }

    pub fn current(&self) -> Option<&Track> {
        self.current.and_then(|id| self.tracks.get(id))
    }

    pub fn current_mut(&mut self) -> Option<&mut Track> {
        self.current.and_then(|id| self.tracks.get_mut(id))
    }

    pub fn current_id(&self) -> Option<TrackId> {
        self.current
    }

    /// Move the cursor. Callers only pass playable tracks.
    pub fn set_current(&mut self, id: TrackId) {
        debug_assert!(
            self.tracks.get(id).is_some_and(Track::is_playable),
            "current track must be playable"
        );
        self.current = Some(id);
    }

    pub fn next_track(&self) -> Result<TrackId> {
        self.scan(Direction::Next)
    }

    pub fn prev_track(&self) -> Result<TrackId> {
        self.scan(Direction::Prev)
    }

    pub fn neighbour(&self, direction: Direction) -> Result<TrackId> {
        self.scan(direction)
    }

    // Circular scan from the current track, visiting every other slot once
    // before coming back to the current one.
    fn scan(&self, direction: Direction) -> Result<TrackId> {
        let current = self.current.ok_or(PlayerError::NoPlayableTrack)?;
        let len = self.tracks.len();

        for step in 1..=len {
            let id = match direction {
                Direction::Next => (current + step) % len,
                Direction::Prev => (current + len - step) % len,
            };
            if self.tracks[id].is_playable() {
                return Ok(id);
            }
        }

        Err(PlayerError::NoPlayableTrack)
    }
}
