//! Main simulation runner.
//!
//! Each run drives a real [`Session`] over an in-memory store, so the
//! simulator exercises exactly the rules the shell plays by.

use super::config::SimConfig;
use super::report::SimReport;
use super::stats::RunStats;
use crate::core::config::EngineConfig;
use crate::error::ConfigError;
use crate::loot::random::{RandomSource, RngSource};
use crate::persistence::store::MemoryStore;
use crate::session::Session;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> Result<SimReport, ConfigError> {
    let engine = EngineConfig::instant(config.variant);
    let table = engine.build_table()?;
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };
        let mut rng = RngSource(rng);

        let run_stats = simulate_single_run(&engine, config, &mut rng)?;

        if config.verbosity >= 2 {
            tracing::info!(
                run = run_idx + 1,
                of = config.num_runs,
                banked = run_stats.final_banked,
                lost = run_stats.currency_lost_to_bombs,
                collectibles = run_stats.collectibles,
                lives_lost = run_stats.lives_lost,
                "run finished"
            );
        }
        all_runs.push(run_stats);
    }

    Ok(SimReport::from_runs(config, &table, all_runs))
}

/// Play one session of `config.draws_per_run` draws.
pub fn simulate_single_run(
    engine: &EngineConfig,
    config: &SimConfig,
    rng: &mut impl RandomSource,
) -> Result<RunStats, ConfigError> {
    let mut session = Session::open_at(engine.clone(), MemoryStore::new(), 0)?;
    session.connect();
    let run_mechanic = engine.run_mechanic();
    let mut stats = RunStats::default();

    for _ in 0..config.draws_per_run {
        if session.state().is_out_of_lives() {
            stats.draws_at_zero_lives += 1;
        }
        let (result, report) = match session.draw_now(rng) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(error = %e, "simulated draw refused");
                break;
            }
        };
        stats.record_draw(&result, &report, session.state().streak);

        if run_mechanic {
            let run = session.state().active_run_currency;
            if run > 0 && run >= config.cashout_at {
                if let Ok(amount) = session.cashout() {
                    stats.record_cashout(amount);
                }
            }
        }

        let tick = session.tick(config.seconds_per_draw, rng);
        stats.lives_regenerated += tick.lives_regenerated;
    }

    stats.final_banked = session.state().banked_currency;
    stats.unbanked_at_end = session.state().active_run_currency;
    Ok(stats)
}
