//! Offline life regeneration.
//!
//! Credits the lives a player would have regenerated while the session was
//! closed, based on the time since the last save.

use super::logic::regenerate_life;
use super::state::SessionState;

/// Report of lives credited while offline.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct OfflineReport {
    pub elapsed_seconds: i64,
    pub lives_restored: u32,
    /// Seconds already accumulated toward the next life.
    pub carry_seconds: f64,
}

/// Restore one life per whole `interval` elapsed since `state.saved_at`.
///
/// Clock skew (a save timestamp in the future) credits nothing, and so does a
/// timestamp too far in the past to measure.
pub fn process_offline_regen(state: &mut SessionState, now: i64, interval: f64) -> OfflineReport {
    let Some(saved_at) = state.saved_at else {
        return OfflineReport::default();
    };
    let Some(elapsed_seconds) = now.checked_sub(saved_at) else {
        return OfflineReport::default();
    };
    if elapsed_seconds <= 0 || state.lives_full() {
        return OfflineReport {
            elapsed_seconds: elapsed_seconds.max(0),
            ..OfflineReport::default()
        };
    }

    if interval <= 0.0 {
        let mut lives_restored = 0;
        while regenerate_life(state) {
            lives_restored += 1;
        }
        return OfflineReport {
            elapsed_seconds,
            lives_restored,
            carry_seconds: 0.0,
        };
    }

    let due = (elapsed_seconds as f64 / interval).floor() as u64;
    let mut lives_restored = 0;
    while (lives_restored as u64) < due && regenerate_life(state) {
        lives_restored += 1;
    }

    let carry_seconds = if state.lives_full() {
        0.0
    } else {
        elapsed_seconds as f64 - due as f64 * interval
    };

    OfflineReport {
        elapsed_seconds,
        lives_restored,
        carry_seconds,
    }
}
