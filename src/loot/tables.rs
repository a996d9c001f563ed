//! Validated loot tables and the preset table for each game variant.

use super::names::{default_name_pools, NamePools};
use super::types::{OutcomeSpec, Tier};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Which iteration of the prospecting game a session plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Variant {
    /// Currency only, paid straight into the bank.
    Basic,
    /// Currency plus collectibles, no hazards.
    Collector,
    /// Full table with bombs and the prospect-run / cashout mechanic.
    #[default]
    Prospect,
}

impl Variant {
    pub fn name(&self) -> &'static str {
        match self {
            Variant::Basic => "basic",
            Variant::Collector => "collector",
            Variant::Prospect => "prospect",
        }
    }

    pub fn parse(s: &str) -> Option<Variant> {
        match s.to_ascii_lowercase().as_str() {
            "basic" => Some(Variant::Basic),
            "collector" => Some(Variant::Collector),
            "prospect" => Some(Variant::Prospect),
            _ => None,
        }
    }

    /// Whether currency accrues to an unbanked run that must be cashed out.
    pub fn has_run_mechanic(&self) -> bool {
        matches!(self, Variant::Prospect)
    }

    pub fn table(&self) -> Result<LootTable, ConfigError> {
        match self {
            Variant::Basic => basic_table(),
            Variant::Collector => collector_table(),
            Variant::Prospect => prospect_table(),
        }
    }
}

/// An ordered set of weighted outcomes that has passed validation.
///
/// Construction is the only place a table can be rejected, so drawing from a
/// `LootTable` never fails.
#[derive(Debug, Clone, PartialEq)]
pub struct LootTable {
    entries: Vec<OutcomeSpec>,
    pools: NamePools,
    fallback: usize,
}

impl LootTable {
    /// Validate `entries` and build a table.
    ///
    /// `fallback` names the entry returned when a roll lands in the residual
    /// mass above the summed weights. When `None`, the lowest-tier non-hazard
    /// entry with a positive weight is used.
    pub fn new(
        entries: Vec<OutcomeSpec>,
        pools: NamePools,
        fallback: Option<usize>,
    ) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::EmptyTable);
        }

        for (index, entry) in entries.iter().enumerate() {
            if !entry.weight.is_finite() || entry.weight < 0.0 {
                return Err(ConfigError::InvalidWeight {
                    index,
                    tier: entry.tier,
                    weight: entry.weight,
                });
            }
            if entry.currency_range.min > entry.currency_range.max {
                return Err(ConfigError::InvalidCurrencyRange {
                    index,
                    tier: entry.tier,
                    min: entry.currency_range.min,
                    max: entry.currency_range.max,
                });
            }
            if entry.is_collectible {
                let usable = entry
                    .collectible_pool
                    .and_then(|tier| pools.get(tier))
                    .is_some_and(|names| !names.is_empty());
                if !usable {
                    return Err(ConfigError::MissingNamePool {
                        index,
                        tier: entry.tier,
                    });
                }
            }
        }

        if entries.iter().all(|e| e.weight == 0.0) {
            return Err(ConfigError::AllZeroWeight);
        }

        check_pools_disjoint(&pools)?;

        let fallback = match fallback {
            Some(index) => {
                let entry = entries.get(index).ok_or(ConfigError::FallbackOutOfRange {
                    index,
                    len: entries.len(),
                })?;
                if entry.is_hazard {
                    return Err(ConfigError::HazardFallback {
                        index,
                        tier: entry.tier,
                    });
                }
                index
            }
            None => default_fallback(&entries).ok_or(ConfigError::AllZeroWeight)?,
        };

        Ok(Self {
            entries,
            pools,
            fallback,
        })
    }

    pub fn entries(&self) -> &[OutcomeSpec] {
        &self.entries
    }

    pub fn pools(&self) -> &NamePools {
        &self.pools
    }

    pub fn fallback_index(&self) -> usize {
        self.fallback
    }

    pub fn fallback(&self) -> &OutcomeSpec {
        &self.entries[self.fallback]
    }

    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    /// Probability of landing on each entry, with residual mass credited to
    /// the fallback. Used by the simulator to compare against observed rates.
    pub fn effective_chances(&self) -> Vec<(Tier, f64)> {
        let mut chances: Vec<(Tier, f64)> = self
            .entries
            .iter()
            .map(|e| (e.tier, e.weight.min(1.0)))
            .collect();

        // Rolls are in [0, 1), so mass past 1.0 is never reached.
        let mut running: f64 = 0.0;
        for (_, chance) in chances.iter_mut() {
            let reachable = (1.0 - running).max(0.0);
            *chance = chance.min(reachable);
            running += *chance;
        }
        let residual = (1.0 - running).max(0.0);
        chances[self.fallback].1 += residual;
        chances
    }
}

fn default_fallback(entries: &[OutcomeSpec]) -> Option<usize> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, e)| e.weight > 0.0 && !e.is_hazard)
        .min_by_key(|(_, e)| e.tier)
        .map(|(index, _)| index)
}

fn check_pools_disjoint(pools: &NamePools) -> Result<(), ConfigError> {
    let mut seen: std::collections::HashMap<&str, Tier> = std::collections::HashMap::new();
    for (tier, names) in pools.iter() {
        for name in names {
            if let Some(first) = seen.insert(name.as_str(), tier) {
                if first != tier {
                    return Err(ConfigError::SharedName {
                        name: name.clone(),
                        first,
                        second: tier,
                    });
                }
            }
        }
    }
    Ok(())
}

// Preset tables all fall back to Common.

fn preset(entries: Vec<OutcomeSpec>) -> Result<LootTable, ConfigError> {
    let fallback = entries.iter().position(|e| e.tier == Tier::Common);
    LootTable::new(entries, default_name_pools(), fallback)
}

/// Currency-only table. Weights sum to 0.3; the rest lands on Common.
pub fn basic_table() -> Result<LootTable, ConfigError> {
    preset(vec![
        OutcomeSpec::currency(Tier::Common, 0.0, 1, 5),
        OutcomeSpec::currency(Tier::Uncommon, 0.2, 8, 15),
        OutcomeSpec::currency(Tier::Rare, 0.08, 20, 35),
        OutcomeSpec::currency(Tier::Epic, 0.02, 50, 100),
    ])
}

/// Currency and collectibles, no hazards.
pub fn collector_table() -> Result<LootTable, ConfigError> {
    preset(vec![
        OutcomeSpec::dud(0.1),
        OutcomeSpec::currency(Tier::Common, 0.5, 1, 5),
        OutcomeSpec::currency(Tier::Uncommon, 0.25, 8, 15),
        OutcomeSpec::currency(Tier::Rare, 0.1, 20, 35),
        OutcomeSpec::currency(Tier::Epic, 0.03, 50, 100),
        OutcomeSpec::collectible(Tier::Legendary, 0.015, "Rare NFT", 0),
        OutcomeSpec::collectible(Tier::Mythic, 0.004, "Ultra Rare NFT + 200 Coins", 200),
        OutcomeSpec::collectible(Tier::Divine, 0.001, "Divine NFT + 1000 Coins", 1000),
    ])
}

/// Full prospecting table with bombs.
pub fn prospect_table() -> Result<LootTable, ConfigError> {
    preset(vec![
        OutcomeSpec::dud(0.08),
        OutcomeSpec::currency(Tier::Common, 0.45, 1, 5),
        OutcomeSpec::currency(Tier::Uncommon, 0.25, 8, 15),
        OutcomeSpec::currency(Tier::Rare, 0.12, 20, 35),
        OutcomeSpec::hazard(0.05, "BOOM! All coins lost!"),
        OutcomeSpec::currency(Tier::Epic, 0.03, 50, 100),
        OutcomeSpec::collectible(Tier::Legendary, 0.015, "Rare NFT", 0),
        OutcomeSpec::collectible(Tier::Mythic, 0.004, "Ultra Rare NFT + 200 Coins", 200),
        OutcomeSpec::collectible(Tier::Divine, 0.001, "Divine NFT + 1000 Coins", 1000),
    ])
}
