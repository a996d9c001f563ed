use super::random::RandomSource;
use super::tables::LootTable;
use super::types::{DrawResult, OutcomeSpec};

/// Index of the table entry hit by `roll`.
///
/// Weights accumulate in table order and the first entry whose running sum
/// reaches the roll wins, so a roll exactly on a boundary belongs to the
/// earlier entry. Rolls past the summed weights land on the fallback.
pub fn select_index(table: &LootTable, roll: f64) -> usize {
    let mut cumulative = 0.0;
    for (index, entry) in table.entries().iter().enumerate() {
        cumulative += entry.weight;
        // Zero-weight entries can only tie with their predecessor, which wins.
        if entry.weight > 0.0 && roll <= cumulative {
            return index;
        }
    }
    table.fallback_index()
}

/// Draw one outcome from `table`.
///
/// Consumes one roll for the outcome, one for the currency amount when the
/// entry's range spans more than one value, and one for the collectible name.
pub fn draw(table: &LootTable, rng: &mut impl RandomSource) -> DrawResult {
    let roll = rng.next_unit();
    let index = select_index(table, roll);
    resolve(table, &table.entries()[index], rng)
}

fn resolve(table: &LootTable, spec: &OutcomeSpec, rng: &mut impl RandomSource) -> DrawResult {
    let currency_awarded = if spec.is_hazard {
        0
    } else {
        rng.next_in_range(spec.currency_range.min, spec.currency_range.max)
    };

    let collectible_name = if spec.is_collectible {
        spec.collectible_pool
            .and_then(|tier| table.pools().get(tier))
            .filter(|names| !names.is_empty())
            .map(|names| names[rng.next_index(names.len())].clone())
    } else {
        None
    };

    DrawResult {
        tier: spec.tier,
        reward: spec.reward.clone(),
        currency_awarded,
        is_collectible: spec.is_collectible,
        is_hazard: spec.is_hazard,
        collectible_name,
    }
}
