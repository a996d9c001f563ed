//! Maps `SessionState` onto one store key per field.
//!
//! Loading never fails: a missing, unreadable or unparseable value falls back
//! to that field's default and is logged.

use super::store::KeyValueStore;
use crate::core::constants::*;
use crate::economy::state::SessionState;
use crate::error::StoreError;
use crate::loot::types::DrawResult;
use std::str::FromStr;

fn read_raw(store: &impl KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "store read failed, using default");
            None
        }
    }
}

fn read_parsed<T: FromStr>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = read_raw(store, key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "unparseable stored value, using default");
            None
        }
    }
}

fn read_collected(store: &impl KeyValueStore) -> Vec<DrawResult> {
    let Some(raw) = read_raw(store, KEY_COLLECTED) else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<DrawResult>>(&raw) {
        Ok(items) => items.into_iter().filter(|item| item.is_collectible).collect(),
        Err(e) => {
            tracing::warn!(key = KEY_COLLECTED, error = %e, "unparseable collection, starting empty");
            Vec::new()
        }
    }
}

/// Load a session from `store`, defaulting any field that is absent or bad.
pub fn load_state(store: &impl KeyValueStore, max_lives: u32) -> SessionState {
    let mut state = SessionState::new(max_lives);

    if let Some(id) = read_raw(store, KEY_SESSION_ID).filter(|id| !id.trim().is_empty()) {
        state.session_id = id;
    }
    if let Some(banked) = read_parsed(store, KEY_BANKED) {
        state.banked_currency = banked;
    }
    if let Some(lives) = read_parsed::<u32>(store, KEY_LIVES) {
        state.lives = lives.min(state.max_lives);
    }
    if let Some(draws) = read_parsed(store, KEY_TOTAL_DRAWS) {
        state.total_draws = draws;
    }
    if let Some(streak) = read_parsed(store, KEY_STREAK) {
        state.streak = streak;
    }
    if let Some(run) = read_parsed(store, KEY_RUN_CURRENCY) {
        state.active_run_currency = run;
    }
    let in_run = read_parsed::<bool>(store, KEY_IN_RUN).unwrap_or(false);
    state.in_active_run = in_run || state.active_run_currency > 0;
    if let Some(unlimited) = read_parsed(store, KEY_UNLIMITED) {
        state.unlimited_lives = unlimited;
    }
    state.collected_items = read_collected(store);
    state.saved_at = read_parsed(store, KEY_SAVED_AT);

    state
}

/// Write every persisted field. Updates `state.saved_at` on success.
pub fn save_state(
    store: &mut impl KeyValueStore,
    state: &mut SessionState,
    now: i64,
) -> Result<(), StoreError> {
    let collected = serde_json::to_string(&state.collected_items)?;
    let entries = [
        (KEY_SESSION_ID, state.session_id.clone()),
        (KEY_BANKED, state.banked_currency.to_string()),
        (KEY_LIVES, state.lives.to_string()),
        (KEY_TOTAL_DRAWS, state.total_draws.to_string()),
        (KEY_STREAK, state.streak.to_string()),
        (KEY_RUN_CURRENCY, state.active_run_currency.to_string()),
        (KEY_IN_RUN, state.in_active_run.to_string()),
        (KEY_UNLIMITED, state.unlimited_lives.to_string()),
        (KEY_COLLECTED, collected),
        (KEY_SAVED_AT, now.to_string()),
    ];
    store.set_all(&entries)?;
    state.saved_at = Some(now);
    Ok(())
}

/// Remove the persisted copy of the session.
pub fn clear_state(store: &mut impl KeyValueStore) -> Result<(), StoreError> {
    store.clear()
}
