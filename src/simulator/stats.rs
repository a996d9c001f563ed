//! Per-session statistics gathered from draw reports.

use crate::economy::logic::ApplyReport;
use crate::loot::types::{DrawResult, Tier};
use serde::Serialize;

pub const TIER_COUNT: usize = 9;

/// Everything tracked for one simulated session.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    pub draws: u64,
    /// Hits per tier, indexed by `Tier as usize`.
    pub tier_counts: [u64; TIER_COUNT],
    pub final_banked: u64,
    /// Run currency still unbanked when the session ended.
    pub unbanked_at_end: u64,
    pub currency_lost_to_bombs: u64,
    pub collectibles: u32,
    pub lives_lost: u32,
    pub lives_regenerated: u32,
    pub cashouts: u32,
    pub longest_streak: u32,
    /// Draws made with no lives left.
    pub draws_at_zero_lives: u64,
}

impl RunStats {
    pub fn record_draw(&mut self, result: &DrawResult, report: &ApplyReport, streak_after: u32) {
        self.draws += 1;
        self.tier_counts[result.tier as usize] += 1;
        self.currency_lost_to_bombs += report.run_forfeited;
        if report.collectible_added {
            self.collectibles += 1;
        }
        if report.life_lost {
            self.lives_lost += 1;
        }
        self.longest_streak = self.longest_streak.max(streak_after);
    }

    pub fn record_cashout(&mut self, amount: u64) {
        if amount > 0 {
            self.cashouts += 1;
        }
    }

    pub fn count(&self, tier: Tier) -> u64 {
        self.tier_counts[tier as usize]
    }

    /// Observed share of draws that landed on `tier`.
    pub fn frequency(&self, tier: Tier) -> f64 {
        if self.draws == 0 {
            0.0
        } else {
            self.count(tier) as f64 / self.draws as f64
        }
    }
}
