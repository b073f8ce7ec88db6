//! The two repeating display tasks owned by a player.
//!
//! Both are plain state driven from `Player::tick`; neither owns a timer.

use std::time::{Duration, Instant};

use crate::track::TrackId;

/// Number of dot frames in the loading animation (0 to 7 dots).
const DOT_FRAMES: usize = 8;

/// Progress updates, run once per tick while the current track plays.
#[derive(Debug, Default)]
pub(crate) struct ProgressLoop {
    active: bool,
}

impl ProgressLoop {
    pub fn start(&mut self) {
        self.active = true;
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Fixed-period dots animation shown while a track loads.
#[derive(Debug)]
pub(crate) struct LoadingIndicator {
    track: TrackId,
    dots: usize,
    period: Duration,
    due: Instant,
}

impl LoadingIndicator {
    pub fn new(track: TrackId, period: Duration, now: Instant) -> Self {
        Self {
            track,
            dots: 0,
            period,
            due: now + period,
        }
    }

    pub fn track(&self) -> TrackId {
        self.track
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }

    /// Move to the next frame and return its text.
    pub fn advance(&mut self, now: Instant) -> String {
        self.dots = (self.dots + 1) % DOT_FRAMES;
        self.due = now + self.period;
        ".".repeat(self.dots)
    }
}

/// Share of `duration` covered by `elapsed`, in percent.
pub(crate) fn progress_percent(elapsed: f64, duration: f64) -> f64 {
    if !(duration.is_finite() && duration > 0.0 && elapsed.is_finite()) {
        return 0.0;
    }
    (elapsed / duration * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dots_cycle_through_eight_frames() {
        let t0 = Instant::now();
        let period = Duration::from_millis(500);
        let mut indicator = LoadingIndicator::new(4, period, t0);
        assert!(!indicator.is_due(t0));
        assert!(indicator.is_due(t0 + period));

        let frames: Vec<String> = (1..=9)
            .map(|i| indicator.advance(t0 + period * i))
            .collect();
        assert_eq!(frames[0], ".");
        assert_eq!(frames[6], ".......");
        assert_eq!(frames[7], "");
        assert_eq!(frames[8], ".");
        assert_eq!(indicator.track(), 4);
    }

    #[test]
    fn late_ticks_do_not_burst() {
        let t0 = Instant::now();
        let period = Duration::from_millis(500);
        let mut indicator = LoadingIndicator::new(0, period, t0);
        let late = t0 + Duration::from_secs(5);
        indicator.advance(late);
        assert!(!indicator.is_due(late));
        assert!(indicator.is_due(late + period));
    }

    #[test]
    fn progress_guards_zero_duration() {
        assert_eq!(progress_percent(10.0, 0.0), 0.0);
        assert_eq!(progress_percent(10.0, f64::NAN), 0.0);
        assert_eq!(progress_percent(30.0, 120.0), 25.0);
        assert_eq!(progress_percent(130.0, 120.0), 100.0);
    }
}
