//! Timer-driven life regeneration.

use super::logic::regenerate_life;
use super::state::SessionState;

/// Restores one life per `interval` seconds while the session is below its cap.
///
/// Owned by the session and advanced explicitly with [`RegenTimer::tick`].
/// Partial progress is dropped whenever lives are full, so the countdown
/// always restarts from zero after the first life is lost.
#[derive(Debug, Clone, PartialEq)]
pub struct RegenTimer {
    interval: f64,
    elapsed: f64,
}

impl RegenTimer {
    pub fn new(interval: f64) -> Self {
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    /// Timer that has already accumulated `elapsed` seconds toward the next life.
    pub fn with_progress(interval: f64, elapsed: f64) -> Self {
        Self {
            interval,
            elapsed: elapsed.max(0.0),
        }
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Seconds accumulated toward the next life.
    pub fn progress(&self) -> f64 {
        self.elapsed
    }

    /// Advance by `dt` seconds, restoring every life that came due.
    pub fn tick(&mut self, state: &mut SessionState, dt: f64) -> u32 {
        if state.lives_full() {
            self.elapsed = 0.0;
            return 0;
        }

        let mut restored = 0;
        if self.interval <= 0.0 {
            while regenerate_life(state) {
                restored += 1;
            }
            self.elapsed = 0.0;
            return restored;
        }

        self.elapsed += dt.max(0.0);
        while self.elapsed >= self.interval && regenerate_life(state) {
            self.elapsed -= self.interval;
            restored += 1;
        }
        if state.lives_full() {
            self.elapsed = 0.0;
        }
        restored
    }

    /// Seconds until the next life, or `None` when nothing is pending.
    pub fn seconds_until_next(&self, state: &SessionState) -> Option<f64> {
        if state.lives_full() {
            None
        } else {
            Some((self.interval - self.elapsed).max(0.0))
        }
    }

    /// Drop any accumulated progress.
    pub fn cancel(&mut self) {
        self.elapsed = 0.0;
    }
}
