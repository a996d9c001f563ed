//! Error types for configuration, storage and session operations.

use crate::loot::types::Tier;
use std::path::PathBuf;
use thiserror::Error;

/// A loot table or engine configuration that cannot be used.
///
/// Raised once at startup; a session is never built from a malformed table.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("loot table has no entries")]
    EmptyTable,
    #[error("loot table has no entry with a positive weight")]
    AllZeroWeight,
    #[error("entry {index} ({tier:?}) has invalid weight {weight}")]
    InvalidWeight { index: usize, tier: Tier, weight: f64 },
    #[error("entry {index} ({tier:?}) has currency range {min}..={max} with min above max")]
    InvalidCurrencyRange {
        index: usize,
        tier: Tier,
        min: u64,
        max: u64,
    },
    #[error("collectible entry {index} ({tier:?}) has no usable name pool")]
    MissingNamePool { index: usize, tier: Tier },
    #[error("collectible name {name:?} appears in both the {first:?} and {second:?} pools")]
    SharedName {
        name: String,
        first: Tier,
        second: Tier,
    },
    #[error("fallback index {index} is out of range for a table of {len} entries")]
    FallbackOutOfRange { index: usize, len: usize },
    #[error("fallback entry {index} ({tier:?}) cannot be a hazard")]
    HazardFallback { index: usize, tier: Tier },
    #[error("max_lives must be at least 1")]
    ZeroMaxLives,
    #[error("{name} must be a finite, non-negative number of seconds, got {value}")]
    InvalidDuration { name: &'static str, value: f64 },
    #[error("could not read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure of the durable key-value store.
///
/// Callers recover by falling back to defaults; these never reach the player
/// as hard failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not determine home directory")]
    NoHomeDir,
    #[error("store i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("store contents are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// An action the session refused in its current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("connect a wallet before prospecting")]
    NotConnected,
    #[error("a draw is already in progress")]
    DrawInProgress,
    #[error("this variant has no prospect run to cash out")]
    RunMechanicDisabled,
}
