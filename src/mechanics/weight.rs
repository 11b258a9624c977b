/// In-tier item selection by integer weight.
use std::collections::BTreeMap;

use crate::mechanics::tier::{PoolItem, RarityTier};

/// Cumulative weights for one tier. Items are ordered ascending by weight (stable).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TierWeights {
    sum_weight: u64,
    cumulative: Vec<u64>,
    items: Vec<PoolItem>,
}

impl TierWeights {
    fn build(mut items: Vec<PoolItem>) -> Self {
        items.sort_by_key(|it| it.weight);
        let mut acc = 0u64;
        let cumulative = items
            .iter()
            .map(|it| {
                acc += u64::from(it.weight);
                acc
            })
            .collect();
        Self { sum_weight: acc, cumulative, items }
    }

    #[inline]
    pub fn sum_weight(&self) -> u64 {
        self.sum_weight
    }

    pub fn cumulative(&self) -> &[u64] {
        &self.cumulative
    }

    pub fn items(&self) -> &[PoolItem] {
        &self.items
    }

    /// `r = floor(unit * sum)`, first index with `cumulative[idx] > r`.
    pub fn pick(&self, unit: f64) -> Option<&PoolItem> {
        if self.sum_weight == 0 {
            return None;
        }
        let scaled = (unit.clamp(0.0, 1.0) * self.sum_weight as f64).floor() as u64;
        let r = scaled.min(self.sum_weight - 1);
        let idx = self.cumulative.partition_point(|c| *c <= r);
        self.items.get(idx)
    }
}

/// Per-tier weight tables for a whole prize pool.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeightTable {
    tiers: BTreeMap<RarityTier, TierWeights>,
}

impl WeightTable {
    /// Group items by tier. Zero-weight items can never be drawn and are left out.
    pub fn build(items: &[PoolItem]) -> Self {
        let mut grouped: BTreeMap<RarityTier, Vec<PoolItem>> = BTreeMap::new();
        for it in items.iter().filter(|it| it.weight > 0) {
            grouped.entry(it.tier).or_default().push(*it);
        }
        Self {
            tiers: grouped
                .into_iter()
                .map(|(tier, items)| (tier, TierWeights::build(items)))
                .collect(),
        }
    }

    pub fn tier(&self, tier: RarityTier) -> Option<&TierWeights> {
        self.tiers.get(&tier)
    }

    /// Whether `tier` has at least one positively weighted item.
    pub fn is_selectable(&self, tier: RarityTier) -> bool {
        self.sum_weight(tier) > 0
    }

    pub fn sum_weight(&self, tier: RarityTier) -> u64 {
        self.tiers.get(&tier).map_or(0, TierWeights::sum_weight)
    }

    pub fn pick(&self, tier: RarityTier, unit: f64) -> Option<&PoolItem> {
        self.tiers.get(&tier)?.pick(unit)
    }

    /// Share of `item` inside its own tier, in `[0, 1]`.
    pub fn share(&self, item: &PoolItem) -> f64 {
        match self.sum_weight(item.tier) {
            0 => 0.0,
            sum => f64::from(item.weight) / sum as f64,
        }
    }

    pub fn items(&self) -> impl Iterator<Item = &PoolItem> {
        self.tiers.values().flat_map(|t| t.items.iter())
    }
}
