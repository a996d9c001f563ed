//! Collectible name pools, one disjoint pool per tier.

use super::types::Tier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamePools {
    pools: BTreeMap<Tier, Vec<String>>,
}

impl NamePools {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pool(mut self, tier: Tier, names: &[&str]) -> Self {
        self.insert(tier, names.iter().map(|n| n.to_string()).collect());
        self
    }

    pub fn insert(&mut self, tier: Tier, names: Vec<String>) {
        self.pools.insert(tier, names);
    }

    pub fn get(&self, tier: Tier) -> Option<&[String]> {
        self.pools.get(&tier).map(|names| names.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tier, &[String])> {
        self.pools.iter().map(|(tier, names)| (*tier, names.as_slice()))
    }

    /// Tier whose pool contains `name`, if any.
    pub fn tier_of(&self, name: &str) -> Option<Tier> {
        self.iter()
            .find(|(_, names)| names.iter().any(|n| n == name))
            .map(|(tier, _)| tier)
    }
}

const COMMON_NAMES: [&str; 10] = [
    "Pixel Warrior",
    "Digital Coin",
    "Crypto Gem",
    "Base Token",
    "Chain Link",
    "Block Miner",
    "Hash Fragment",
    "Code Snippet",
    "Data Byte",
    "Network Node",
];

const UNCOMMON_NAMES: [&str; 10] = [
    "Neon Samurai",
    "Cyber Wolf",
    "Electric Tiger",
    "Frost Bear",
    "Wind Serpent",
    "Digital Phoenix",
    "Quantum Butterfly",
    "Crystal Dragon",
    "Shadow Panther",
    "Fire Lion",
];

const RARE_NAMES: [&str; 10] = [
    "Stellar Guardian",
    "Cosmic Wanderer",
    "Mystic Owl",
    "Golden Eagle",
    "Silver Hawk",
    "Plasma Sword",
    "Energy Shield",
    "Void Walker",
    "Time Keeper",
    "Space Ranger",
];

const EPIC_NAMES: [&str; 10] = [
    "Galactic Emperor",
    "Nebula Queen",
    "Starforge Master",
    "Void Sovereign",
    "Cosmic Titan",
    "Quantum Lord",
    "Digital Overlord",
    "Cyber Deity",
    "Plasma God",
    "Energy Supreme",
];

const LEGENDARY_NAMES: [&str; 10] = [
    "Genesis Creator",
    "Universe Architect",
    "Reality Shaper",
    "Dimension Walker",
    "Infinity Guardian",
    "Eternal Warden",
    "Celestial Being",
    "Divine Avatar",
    "Cosmic Entity",
    "Supreme Consciousness",
];

const MYTHIC_NAMES: [&str; 10] = [
    "The First Code",
    "Origin Protocol",
    "Prime Algorithm",
    "Genesis Block",
    "Alpha Sequence",
    "Omega Cipher",
    "Eternal Matrix",
    "Infinite Loop",
    "Perfect Hash",
    "Ultimate Key",
];

const DIVINE_NAMES: [&str; 8] = [
    "The Creator's Vision",
    "Source of All Chains",
    "The Original Satoshi",
    "Genesis of Genesis",
    "The Prime Mover",
    "Alpha and Omega",
    "The Eternal Flame",
    "The First Light",
];

/// The stock pools shipped with every preset table.
pub fn default_name_pools() -> NamePools {
    NamePools::new()
        .with_pool(Tier::Common, &COMMON_NAMES)
        .with_pool(Tier::Uncommon, &UNCOMMON_NAMES)
        .with_pool(Tier::Rare, &RARE_NAMES)
        .with_pool(Tier::Epic, &EPIC_NAMES)
        .with_pool(Tier::Legendary, &LEGENDARY_NAMES)
        .with_pool(Tier::Mythic, &MYTHIC_NAMES)
        .with_pool(Tier::Divine, &DIVINE_NAMES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_pools_are_disjoint() {
        let pools = default_name_pools();
        let mut seen = HashSet::new();
        for (_, names) in pools.iter() {
            for name in names {
                assert!(seen.insert(name.clone()), "{name} appears twice");
            }
        }
    }

    #[test]
    fn test_default_pool_sizes() {
        let pools = default_name_pools();
        assert_eq!(pools.get(Tier::Common).unwrap().len(), 10);
        assert_eq!(pools.get(Tier::Mythic).unwrap().len(), 10);
        assert_eq!(pools.get(Tier::Divine).unwrap().len(), 8);
        assert!(pools.get(Tier::Dud).is_none());
        assert!(pools.get(Tier::Bomb).is_none());
    }

    #[test]
    fn test_tier_of() {
        let pools = default_name_pools();
        assert_eq!(pools.tier_of("The Original Satoshi"), Some(Tier::Divine));
        assert_eq!(pools.tier_of("Cyber Wolf"), Some(Tier::Uncommon));
        assert_eq!(pools.tier_of("Not A Name"), None);
    }
}
