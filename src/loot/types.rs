use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Tier {
    Dud = 0,
    Common = 1,
    Uncommon = 2,
    Rare = 3,
    Epic = 4,
    Legendary = 5,
    Mythic = 6,
    Divine = 7,
    Bomb = 8,
}

impl Tier {
    /// Returns the display name for this tier.
    pub fn name(&self) -> &'static str {
        match self {
            Tier::Dud => "Dud",
            Tier::Common => "Common",
            Tier::Uncommon => "Uncommon",
            Tier::Rare => "Rare",
            Tier::Epic => "Epic",
            Tier::Legendary => "Legendary",
            Tier::Mythic => "Mythic",
            Tier::Divine => "Divine",
            Tier::Bomb => "Bomb",
        }
    }

    pub fn all() -> [Tier; 9] {
        [
            Tier::Dud,
            Tier::Common,
            Tier::Uncommon,
            Tier::Rare,
            Tier::Epic,
            Tier::Legendary,
            Tier::Mythic,
            Tier::Divine,
            Tier::Bomb,
        ]
    }
}

/// Inclusive currency bounds for an outcome. `0..=0` for non-currency outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CurrencyRange {
    pub min: u64,
    pub max: u64,
}

impl CurrencyRange {
    pub const NONE: CurrencyRange = CurrencyRange { min: 0, max: 0 };

    pub fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    pub fn fixed(amount: u64) -> Self {
        Self {
            min: amount,
            max: amount,
        }
    }

    pub fn contains(&self, amount: u64) -> bool {
        amount >= self.min && amount <= self.max
    }

    pub fn is_fixed(&self) -> bool {
        self.min == self.max
    }
}

/// One configured row of a loot table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeSpec {
    pub tier: Tier,
    pub weight: f64,
    pub reward: String,
    #[serde(default)]
    pub currency_range: CurrencyRange,
    #[serde(default)]
    pub is_collectible: bool,
    #[serde(default)]
    pub is_hazard: bool,
    /// Name pool used for collectibles; only read when `is_collectible`.
    #[serde(default)]
    pub collectible_pool: Option<Tier>,
}

impl OutcomeSpec {
    pub fn dud(weight: f64) -> Self {
        Self {
            tier: Tier::Dud,
            weight,
            reward: "Nothing".to_string(),
            currency_range: CurrencyRange::NONE,
            is_collectible: false,
            is_hazard: false,
            collectible_pool: None,
        }
    }

    pub fn currency(tier: Tier, weight: f64, min: u64, max: u64) -> Self {
        Self {
            tier,
            weight,
            reward: format!("{min}-{max} Coins"),
            currency_range: CurrencyRange::new(min, max),
            is_collectible: false,
            is_hazard: false,
            collectible_pool: None,
        }
    }

    pub fn hazard(weight: f64, reward: &str) -> Self {
        Self {
            tier: Tier::Bomb,
            weight,
            reward: reward.to_string(),
            currency_range: CurrencyRange::NONE,
            is_collectible: false,
            is_hazard: true,
            collectible_pool: None,
        }
    }

    /// A collectible drawn from the pool of its own tier, optionally bundled with currency.
    pub fn collectible(tier: Tier, weight: f64, reward: &str, bundled: u64) -> Self {
        Self {
            tier,
            weight,
            reward: reward.to_string(),
            currency_range: CurrencyRange::fixed(bundled),
            is_collectible: true,
            is_hazard: false,
            collectible_pool: Some(tier),
        }
    }
}

/// What a single draw produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawResult {
    pub tier: Tier,
    pub reward: String,
    pub currency_awarded: u64,
    #[serde(default)]
    pub is_collectible: bool,
    #[serde(default)]
    pub is_hazard: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collectible_name: Option<String>,
}

impl DrawResult {
    /// Zero currency, not a collectible and not a hazard.
    pub fn is_dud(&self) -> bool {
        !self.is_hazard && !self.is_collectible && self.currency_awarded == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        assert!(Tier::Dud < Tier::Common);
        assert!(Tier::Common < Tier::Uncommon);
        assert!(Tier::Epic < Tier::Legendary);
        assert!(Tier::Mythic < Tier::Divine);
    }

    #[test]
    fn test_tier_name() {
        for tier in Tier::all() {
            assert_eq!(tier.name(), format!("{tier:?}"));
        }
    }

    #[test]
    fn test_currency_range_contains_is_inclusive() {
        let range = CurrencyRange::new(8, 15);
        assert!(range.contains(8));
        assert!(range.contains(15));
        assert!(!range.contains(7));
        assert!(!range.contains(16));
        assert!(!range.is_fixed());
        assert!(CurrencyRange::fixed(200).is_fixed());
    }

    #[test]
    fn test_currency_outcome_reward_label() {
        let spec = OutcomeSpec::currency(Tier::Rare, 0.12, 20, 35);
        assert_eq!(spec.reward, "20-35 Coins");
        assert!(!spec.is_collectible);
        assert!(!spec.is_hazard);
    }

    #[test]
    fn test_collectible_outcome_uses_own_pool() {
        let spec = OutcomeSpec::collectible(Tier::Mythic, 0.004, "Ultra Rare NFT + 200 Coins", 200);
        assert_eq!(spec.collectible_pool, Some(Tier::Mythic));
        assert_eq!(spec.currency_range, CurrencyRange::fixed(200));
    }

    #[test]
    fn test_is_dud() {
        let dud = DrawResult {
            tier: Tier::Dud,
            reward: "Nothing".to_string(),
            currency_awarded: 0,
            is_collectible: false,
            is_hazard: false,
            collectible_name: None,
        };
        assert!(dud.is_dud());

        let bomb = DrawResult {
            is_hazard: true,
            tier: Tier::Bomb,
            ..dud.clone()
        };
        assert!(!bomb.is_dud());

        let nft = DrawResult {
            tier: Tier::Legendary,
            is_collectible: true,
            collectible_name: Some("Genesis Creator".to_string()),
            ..dud
        };
        assert!(!nft.is_dud());
    }

    #[test]
    fn test_outcome_spec_deserializes_with_defaults() {
        let json = r#"{"tier":"Uncommon","weight":0.25,"reward":"8-15 Coins","currency_range":{"min":8,"max":15}}"#;
        let spec: OutcomeSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.tier, Tier::Uncommon);
        assert!(!spec.is_collectible);
        assert!(!spec.is_hazard);
        assert_eq!(spec.collectible_pool, None);
    }
}
