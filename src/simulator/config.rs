//! Simulation configuration.

use crate::core::constants::DRAW_DELAY_SECONDS;
use crate::loot::tables::Variant;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of independent sessions to simulate
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random). Run `i` uses `seed + i`.
    pub seed: Option<u64>,

    /// Draws performed in each session
    pub draws_per_run: u64,

    /// Which preset table and rules to play
    pub variant: Variant,

    /// Cash out once run currency reaches this much (0 = after every gain)
    pub cashout_at: u64,

    /// Simulated wall-clock seconds per draw, fed to life regeneration
    pub seconds_per_draw: f64,

    /// Log verbosity (0 = silent, 1 = summary, 2 = detailed)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            draws_per_run: 500,
            variant: Variant::Prospect,
            cashout_at: 50,
            seconds_per_draw: DRAW_DELAY_SECONDS,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Many short sessions, for checking hit rates against the table
    pub fn frequency_check(variant: Variant) -> Self {
        Self {
            num_runs: 200,
            draws_per_run: 5000,
            variant,
            ..Default::default()
        }
    }

    /// Compare the payoff of a cashout threshold
    pub fn cashout_strategy(cashout_at: u64) -> Self {
        Self {
            num_runs: 500,
            cashout_at,
            ..Default::default()
        }
    }
}
