//! Draw-economy simulator for Monte Carlo analysis.
//!
//! Plays thousands of seeded sessions to check:
//! - Observed hit rates against the table's configured chances
//! - What a cashout threshold earns and what bombs take
//! - How fast lives drain and regenerate
//!
//! Each run drives a real `Session`, so results match actual play.

mod config;
mod report;
mod runner;
mod stats;

pub use config::SimConfig;
pub use report::{SimReport, TierRow};
pub use runner::{run_simulation, simulate_single_run};
pub use stats::RunStats;
