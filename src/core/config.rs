//! Engine configuration.

use super::constants::{DEFAULT_MAX_LIVES, DRAW_DELAY_SECONDS, LIFE_REGEN_INTERVAL_SECONDS};
use crate::error::ConfigError;
use crate::loot::names::{default_name_pools, NamePools};
use crate::loot::tables::{LootTable, Variant};
use crate::loot::types::OutcomeSpec;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A loot table supplied in configuration instead of a variant preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    pub entries: Vec<OutcomeSpec>,
    /// Index of the residual-mass fallback entry.
    #[serde(default)]
    pub fallback: Option<usize>,
    /// Name pools; the stock pools are used when omitted.
    #[serde(default)]
    pub name_pools: Option<NamePools>,
}

/// Static configuration for a session, fixed at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub variant: Variant,
    pub max_lives: u32,
    pub regen_interval_secs: f64,
    pub draw_delay_secs: f64,
    /// Overrides the variant's preset table. The variant still decides
    /// whether the run mechanic applies.
    pub table: Option<TableConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Prospect,
            max_lives: DEFAULT_MAX_LIVES,
            regen_interval_secs: LIFE_REGEN_INTERVAL_SECONDS,
            draw_delay_secs: DRAW_DELAY_SECONDS,
            table: None,
        }
    }
}

impl EngineConfig {
    /// Default timings for the given variant.
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,
            ..Default::default()
        }
    }

    /// Config with no artificial delay, for tests and the simulator.
    pub fn instant(variant: Variant) -> Self {
        Self {
            variant,
            draw_delay_secs: 0.0,
            ..Default::default()
        }
    }

    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: EngineConfig =
            serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_lives == 0 {
            return Err(ConfigError::ZeroMaxLives);
        }
        for (name, value) in [
            ("regen_interval_secs", self.regen_interval_secs),
            ("draw_delay_secs", self.draw_delay_secs),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDuration { name, value });
            }
        }
        Ok(())
    }

    pub fn run_mechanic(&self) -> bool {
        self.variant.has_run_mechanic()
    }

    /// Validate the config and build its loot table.
    pub fn build_table(&self) -> Result<LootTable, ConfigError> {
        self.validate()?;
        match &self.table {
            Some(custom) => LootTable::new(
                custom.entries.clone(),
                custom.name_pools.clone().unwrap_or_else(default_name_pools),
                custom.fallback,
            ),
            None => self.variant.table(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loot::types::Tier;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.variant, Variant::Prospect);
        assert_eq!(config.max_lives, 5);
        assert!((config.regen_interval_secs - 30.0).abs() < f64::EPSILON);
        assert!((config.draw_delay_secs - 3.0).abs() < f64::EPSILON);
        assert!(config.run_mechanic());
        assert!(config.build_table().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"variant":"Basic"}"#).unwrap();
        assert_eq!(config.variant, Variant::Basic);
        assert_eq!(config.max_lives, 5);
        assert!(!config.run_mechanic());
    }

    #[test]
    fn test_invalid_timings_rejected() {
        let config = EngineConfig {
            max_lives: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroMaxLives)));

        let config = EngineConfig {
            draw_delay_secs: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.build_table(),
            Err(ConfigError::InvalidDuration { name: "draw_delay_secs", .. })
        ));
    }

    #[test]
    fn test_custom_table_overrides_preset() {
        let config = EngineConfig {
            table: Some(TableConfig {
                entries: vec![
                    OutcomeSpec::currency(Tier::Common, 0.6, 1, 5),
                    OutcomeSpec::hazard(0.4, "BOOM"),
                ],
                fallback: None,
                name_pools: None,
            }),
            ..Default::default()
        };
        let table = config.build_table().unwrap();
        assert_eq!(table.entries().len(), 2);
        assert_eq!(table.fallback().tier, Tier::Common);
    }

    #[test]
    fn test_malformed_custom_table_is_config_error() {
        let config = EngineConfig {
            table: Some(TableConfig {
                entries: vec![],
                fallback: None,
                name_pools: None,
            }),
            ..Default::default()
        };
        assert!(matches!(config.build_table(), Err(ConfigError::EmptyTable)));
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let path = std::env::temp_dir().join("nftuklas-missing-config-12345.json");
        let err = EngineConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_roundtrip() {
        let path = std::env::temp_dir().join(format!(
            "nftuklas-config-test-{}.json",
            std::process::id()
        ));
        let config = EngineConfig {
            variant: Variant::Collector,
            max_lives: 3,
            ..Default::default()
        };
        fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = EngineConfig::load(&path).unwrap();
        assert_eq!(loaded, config);

        fs::remove_file(path).ok();
    }
}
