//! Running statistics for one simulation session.
//!
//! `fold` is the only way draws enter the statistics and `reset` the only way
//! they leave. Notable draws (top tier or birthday) are kept most recent first
//! together with their 1-based pull index in the session.

use std::collections::{BTreeMap, VecDeque};

use serde::Serialize;

use crate::mechanics::{PoolItem, RarityTier};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct NotableDraw {
    pub item: PoolItem,
    pub pull_index: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunningStatistics {
    per_tier: BTreeMap<RarityTier, u64>,
    total_draws: u64,
    pickup_hits: u64,
    notable: VecDeque<NotableDraw>,
}

impl RunningStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one batch. `pickup_hits` is the count reported by the engine call
    /// that produced `result`.
    pub fn fold(&mut self, result: &[PoolItem], pickup_hits: u32) {
        let before = self.total_draws;
        for (pos, item) in result.iter().enumerate() {
            *self.per_tier.entry(item.tier).or_insert(0) += 1;
            if item.tier.is_notable() {
                self.notable.push_front(NotableDraw {
                    item: *item,
                    pull_index: before + pos as u64 + 1,
                });
            }
        }
        self.total_draws += result.len() as u64;
        self.pickup_hits += u64::from(pickup_hits);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn total_draws(&self) -> u64 {
        self.total_draws
    }

    pub fn pickup_hits(&self) -> u64 {
        self.pickup_hits
    }

    pub fn count(&self, tier: RarityTier) -> u64 {
        self.per_tier.get(&tier).copied().unwrap_or(0)
    }

    pub fn per_tier(&self) -> &BTreeMap<RarityTier, u64> {
        &self.per_tier
    }

    /// Notable draws, most recent first.
    pub fn notable(&self) -> &VecDeque<NotableDraw> {
        &self.notable
    }

    /// Draws since the previous notable hit: the gap to the next older entry,
    /// or the entry's own pull index when it is the oldest.
    pub fn pity_interval(&self, entry: usize) -> Option<u64> {
        let cur = self.notable.get(entry)?;
        Some(match self.notable.get(entry + 1) {
            Some(older) => cur.pull_index - older.pull_index,
            None => cur.pull_index,
        })
    }

    pub fn pickup_rate(&self) -> f64 {
        ratio(self.pickup_hits, self.total_draws)
    }

    pub fn tier_rate(&self, tier: RarityTier) -> f64 {
        ratio(self.count(tier), self.total_draws)
    }

    pub fn snapshot(&self) -> StatisticsSnapshot {
        StatisticsSnapshot {
            total_draws: self.total_draws,
            pickup_hits: self.pickup_hits,
            pickup_rate: self.pickup_rate(),
            per_tier: self
                .per_tier
                .iter()
                .map(|(tier, count)| TierCount { tier: *tier, count: *count, rate: self.tier_rate(*tier) })
                .collect(),
            notable: self
                .notable
                .iter()
                .enumerate()
                .map(|(i, n)| NotableEntry {
                    item: n.item,
                    pull_index: n.pull_index,
                    pity_interval: self.pity_interval(i).unwrap_or(n.pull_index),
                })
                .collect(),
        }
    }
}

#[inline]
fn ratio(num: u64, den: u64) -> f64 {
    if den > 0 { num as f64 / den as f64 } else { 0.0 }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TierCount {
    pub tier: RarityTier,
    pub count: u64,
    pub rate: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct NotableEntry {
    pub item: PoolItem,
    pub pull_index: u64,
    pub pity_interval: u64,
}

/// Read-only copy of the statistics for the presentation layer.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct StatisticsSnapshot {
    pub total_draws: u64,
    pub pickup_hits: u64,
    pub pickup_rate: f64,
    pub per_tier: Vec<TierCount>,
    pub notable: Vec<NotableEntry>,
}
