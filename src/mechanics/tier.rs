/// Rarity tiers, guarantee policies and the static records drawn from a pool.
use std::fmt;

use serde::{Deserialize, Serialize};

/// Card rarity bucket. Ordering only matters for "at least tier X" checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RarityTier {
    #[serde(rename = "rarity_1")]
    Rarity1 = 1,
    #[serde(rename = "rarity_2")]
    Rarity2 = 2,
    #[serde(rename = "rarity_3")]
    Rarity3 = 3,
    #[serde(rename = "rarity_4")]
    Rarity4 = 4,
    #[serde(rename = "rarity_birthday")]
    Birthday = 5,
}

impl RarityTier {
    pub const ALL: [RarityTier; 5] = [
        RarityTier::Rarity1,
        RarityTier::Rarity2,
        RarityTier::Rarity3,
        RarityTier::Rarity4,
        RarityTier::Birthday,
    ];

    /// Star count shown in game; birthday cards are four-star cards.
    #[inline]
    pub fn stars(self) -> u8 {
        match self {
            RarityTier::Rarity1 => 1,
            RarityTier::Rarity2 => 2,
            RarityTier::Rarity3 => 3,
            RarityTier::Rarity4 | RarityTier::Birthday => 4,
        }
    }

    /// Top tier or the special birthday tier.
    #[inline]
    pub fn is_notable(self) -> bool {
        matches!(self, RarityTier::Rarity4 | RarityTier::Birthday)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RarityTier::Rarity1 => "rarity_1",
            RarityTier::Rarity2 => "rarity_2",
            RarityTier::Rarity3 => "rarity_3",
            RarityTier::Rarity4 => "rarity_4",
            RarityTier::Birthday => "rarity_birthday",
        }
    }
}

impl fmt::Display for RarityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// "Guarantee at least tier T on the 10th draw of a block" rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuaranteePolicy {
    #[default]
    None,
    AtLeast3,
    AtLeast4,
}

impl GuaranteePolicy {
    /// Threshold tier, if the policy guarantees anything.
    #[inline]
    pub fn tier(self) -> Option<RarityTier> {
        match self {
            GuaranteePolicy::None => None,
            GuaranteePolicy::AtLeast3 => Some(RarityTier::Rarity3),
            GuaranteePolicy::AtLeast4 => Some(RarityTier::Rarity4),
        }
    }

    /// Map a master-data behavior type onto a policy.
    pub fn from_behavior_kind(kind: &str) -> Option<Self> {
        match kind {
            "normal" => Some(GuaranteePolicy::None),
            "over_rarity_3_once" => Some(GuaranteePolicy::AtLeast3),
            "over_rarity_4_once" => Some(GuaranteePolicy::AtLeast4),
            _ => None,
        }
    }
}

/// Declared percentage for one tier. Rates are independent and need not sum to 100.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RarityRate {
    pub tier: RarityTier,
    pub rate: f64,
}

impl RarityRate {
    pub fn new(tier: RarityTier, rate: f64) -> Self {
        Self { tier, rate }
    }
}

/// One drawable card. `weight` is its relative likelihood inside its tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolItem {
    pub id: u32,
    pub tier: RarityTier,
    pub weight: u32,
}

impl PoolItem {
    pub fn new(id: u32, tier: RarityTier, weight: u32) -> Self {
        Self { id, tier, weight }
    }
}
