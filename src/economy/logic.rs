use super::state::SessionState;
use crate::core::constants::{STREAK_BAND, STREAK_BONUS_PER_BAND_TENTHS, UNLIMITED_LIVES};
use crate::loot::types::DrawResult;

/// Multiplier earned by a streak: +0.1 for every full band of 5.
pub fn streak_multiplier(streak: u32) -> f64 {
    1.0 + (streak / STREAK_BAND) as f64 * STREAK_BONUS_PER_BAND_TENTHS as f64 / 10.0
}

/// `floor(currency * streak_multiplier(streak))`, computed in integers so
/// float rounding can never shave a coin off.
pub fn streak_bonus(currency: u64, streak: u32) -> u64 {
    let tenths = 10 + (streak / STREAK_BAND) as u64 * STREAK_BONUS_PER_BAND_TENTHS;
    currency.saturating_mul(tenths) / 10
}

/// What a single `apply` did to the state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ApplyReport {
    /// Multiplier in effect for this draw.
    pub multiplier_used: f64,
    pub credited_to_run: u64,
    pub credited_to_bank: u64,
    /// Run currency destroyed by a hazard.
    pub run_forfeited: u64,
    pub life_lost: bool,
    pub streak_broken: bool,
    pub collectible_added: bool,
}

/// Apply one draw result to the session.
///
/// Rules in priority order: a hazard wipes the run, breaks the streak and
/// costs a life; a dud breaks the streak; currency is multiplied by the
/// streak bonus and credited to the run (or the bank without the run
/// mechanic); a collectible is appended and its bundled currency banked
/// directly at face value.
pub fn apply(state: &mut SessionState, result: &DrawResult, run_mechanic: bool) -> ApplyReport {
    let mut report = ApplyReport {
        multiplier_used: state.multiplier(),
        ..ApplyReport::default()
    };
    state.total_draws = state.total_draws.saturating_add(1);

    if result.is_hazard {
        report.run_forfeited = state.active_run_currency;
        state.active_run_currency = 0;
        state.in_active_run = false;
        report.streak_broken = state.streak > 0;
        state.streak = 0;
        if !state.unlimited_lives && state.lives > 0 {
            state.lives -= 1;
            report.life_lost = true;
        }
        return report;
    }

    if result.is_dud() {
        report.streak_broken = state.streak > 0;
        state.streak = 0;
        return report;
    }

    if result.is_collectible {
        state.collected_items.push(result.clone());
        report.collectible_added = true;
        if result.currency_awarded > 0 {
            state.banked_currency = state.banked_currency.saturating_add(result.currency_awarded);
            report.credited_to_bank = result.currency_awarded;
        }
    } else if result.currency_awarded > 0 {
        let bonus = streak_bonus(result.currency_awarded, state.streak);
        if run_mechanic {
            state.active_run_currency = state.active_run_currency.saturating_add(bonus);
            state.in_active_run = true;
            report.credited_to_run = bonus;
        } else {
            state.banked_currency = state.banked_currency.saturating_add(bonus);
            report.credited_to_bank = bonus;
        }
    }

    state.streak = state.streak.saturating_add(1);
    report
}

/// Bank the current run. Returns the amount moved; zero means nothing changed.
pub fn cashout(state: &mut SessionState) -> u64 {
    if state.active_run_currency == 0 {
        return 0;
    }
    let amount = state.active_run_currency;
    state.banked_currency = state.banked_currency.saturating_add(amount);
    state.active_run_currency = 0;
    state.in_active_run = false;
    amount
}

/// Add purchased lives, capped at `max_lives`. [`UNLIMITED_LIVES`] switches
/// the session to unlimited lives instead. Returns the lives actually added.
pub fn buy_lives(state: &mut SessionState, amount: u32) -> u32 {
    if amount == UNLIMITED_LIVES {
        state.unlimited_lives = true;
        let added = state.max_lives - state.lives.min(state.max_lives);
        state.lives = state.max_lives;
        return added;
    }
    if state.unlimited_lives {
        return 0;
    }
    let before = state.lives;
    state.lives = state.lives.saturating_add(amount).min(state.max_lives);
    state.lives - before
}

/// Restore one life if below the cap. Returns whether a life was restored.
pub fn regenerate_life(state: &mut SessionState) -> bool {
    if state.lives_full() {
        return false;
    }
    state.lives += 1;
    true
}
