//! Simulation report generation.

use super::config::SimConfig;
use super::stats::{RunStats, TIER_COUNT};
use crate::loot::tables::{LootTable, Variant};
use crate::loot::types::Tier;
use serde::Serialize;

/// Configured against observed hit rate for one tier.
#[derive(Debug, Clone, Serialize)]
pub struct TierRow {
    pub tier: Tier,
    pub hits: u64,
    /// Chance implied by the table, residual mass included.
    pub configured: f64,
    pub observed: f64,
}

impl TierRow {
    /// Observed minus configured, in percentage points.
    pub fn drift_points(&self) -> f64 {
        (self.observed - self.configured) * 100.0
    }
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub variant: Variant,
    pub num_runs: u32,
    pub draws_per_run: u64,
    pub cashout_at: u64,
    pub seed: Option<u64>,
    pub total_draws: u64,

    pub tiers: Vec<TierRow>,

    // Per-run averages
    pub avg_banked: f64,
    pub avg_unbanked_at_end: f64,
    pub avg_lost_to_bombs: f64,
    pub avg_collectibles: f64,
    pub avg_lives_lost: f64,
    pub avg_lives_regenerated: f64,
    pub avg_cashouts: f64,
    pub avg_longest_streak: f64,
    pub avg_draws_at_zero_lives: f64,

    #[serde(skip)]
    pub runs: Vec<RunStats>,
}

fn average(runs: &[RunStats], f: impl Fn(&RunStats) -> f64) -> f64 {
    if runs.is_empty() {
        0.0
    } else {
        runs.iter().map(f).sum::<f64>() / runs.len() as f64
    }
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(config: &SimConfig, table: &LootTable, runs: Vec<RunStats>) -> Self {
        let total_draws: u64 = runs.iter().map(|r| r.draws).sum();

        let mut configured = [0.0; TIER_COUNT];
        for (tier, chance) in table.effective_chances() {
            configured[tier as usize] += chance;
        }
        let mut hits = [0u64; TIER_COUNT];
        for run in &runs {
            for (slot, count) in hits.iter_mut().zip(run.tier_counts.iter()) {
                *slot += count;
            }
        }

        let tiers = Tier::all()
            .into_iter()
            .filter(|&tier| configured[tier as usize] > 0.0 || hits[tier as usize] > 0)
            .map(|tier| TierRow {
                tier,
                hits: hits[tier as usize],
                configured: configured[tier as usize],
                observed: if total_draws == 0 {
                    0.0
                } else {
                    hits[tier as usize] as f64 / total_draws as f64
                },
            })
            .collect();

        Self {
            variant: config.variant,
            num_runs: runs.len() as u32,
            draws_per_run: config.draws_per_run,
            cashout_at: config.cashout_at,
            seed: config.seed,
            total_draws,
            tiers,
            avg_banked: average(&runs, |r| r.final_banked as f64),
            avg_unbanked_at_end: average(&runs, |r| r.unbanked_at_end as f64),
            avg_lost_to_bombs: average(&runs, |r| r.currency_lost_to_bombs as f64),
            avg_collectibles: average(&runs, |r| r.collectibles as f64),
            avg_lives_lost: average(&runs, |r| r.lives_lost as f64),
            avg_lives_regenerated: average(&runs, |r| r.lives_regenerated as f64),
            avg_cashouts: average(&runs, |r| r.cashouts as f64),
            avg_longest_streak: average(&runs, |r| r.longest_streak as f64),
            avg_draws_at_zero_lives: average(&runs, |r| r.draws_at_zero_lives as f64),
            runs,
        }
    }

    pub fn tier(&self, tier: Tier) -> Option<&TierRow> {
        self.tiers.iter().find(|row| row.tier == tier)
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str(&format!(
            "         {} variant, {} runs x {} draws\n",
            self.variant.name(),
            self.num_runs,
            self.draws_per_run
        ));
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str("── HIT RATES ────────────────────────────────────────────────────\n");
        report.push_str("  Tier         Hits      Configured   Observed    Drift\n");
        report.push_str("  ─────────    ───────   ──────────   ────────    ──────\n");
        for row in &self.tiers {
            report.push_str(&format!(
                "  {:<10}   {:>7}   {:>9.3}%   {:>7.3}%   {:>+6.3}\n",
                row.tier.name(),
                row.hits,
                row.configured * 100.0,
                row.observed * 100.0,
                row.drift_points()
            ));
        }
        report.push('\n');

        report.push_str("── ECONOMY (per run) ────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Banked:          {:.1}\n", self.avg_banked));
        if self.variant.has_run_mechanic() {
            report.push_str(&format!("  Cashout At:          {}\n", self.cashout_at));
            report.push_str(&format!("  Avg Cashouts:        {:.1}\n", self.avg_cashouts));
            report.push_str(&format!(
                "  Avg Lost to Bombs:   {:.1}\n",
                self.avg_lost_to_bombs
            ));
            report.push_str(&format!(
                "  Avg Left Unbanked:   {:.1}\n",
                self.avg_unbanked_at_end
            ));
        }
        report.push_str(&format!(
            "  Avg Collectibles:    {:.2}\n",
            self.avg_collectibles
        ));
        report.push_str(&format!(
            "  Avg Longest Streak:  {:.1}\n\n",
            self.avg_longest_streak
        ));

        report.push_str("── LIVES (per run) ──────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Lives Lost:      {:.1}\n", self.avg_lives_lost));
        report.push_str(&format!(
            "  Avg Regenerated:     {:.1}\n",
            self.avg_lives_regenerated
        ));
        report.push_str(&format!(
            "  Avg Draws at 0 Lives: {:.1}\n",
            self.avg_draws_at_zero_lives
        ));

        let drifting: Vec<_> = self
            .tiers
            .iter()
            .filter(|row| row.configured > 0.01 && row.drift_points().abs() > 1.0)
            .collect();
        if !drifting.is_empty() {
            report.push('\n');
            for row in drifting {
                report.push_str(&format!(
                    "  ⚠️  {} observed {:.2}% vs configured {:.2}%\n",
                    row.tier.name(),
                    row.observed * 100.0,
                    row.configured * 100.0
                ));
            }
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
