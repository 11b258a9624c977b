//! Cumulative rarity tables.
//!
//! A gacha declares one percentage per tier. Draws pick a tier by rolling
//! `roll ∈ [0, total)` and taking the first bucket whose running sum exceeds
//! the roll. Two tables are derived from the same declaration:
//!
//! - **normal**: declared rates, sorted descending (stable), zero rates dropped.
//! - **guaranteed**: same bucket order, but every tier below the guarantee
//!   threshold hands its mass to the lowest tier at or above it. The total is
//!   unchanged, so both tables are rolled against the same range.

use crate::error::ConfigError;
use crate::mechanics::tier::{RarityRate, RarityTier};

#[derive(Clone, Debug, PartialEq)]
pub struct RarityTable {
    tiers: Vec<RarityTier>,
    masses: Vec<f64>,
    cumulative: Vec<f64>,
}

impl RarityTable {
    /// Prefix-summed table of the declared rates, e.g. `[70, 25, 5]` → `[70, 95, 100]`.
    pub fn build_normal(rates: &[RarityRate]) -> Result<Self, ConfigError> {
        let ordered = ordered_rates(rates)?;
        Ok(Self::from_masses(
            ordered.iter().map(|r| r.tier).collect(),
            ordered.iter().map(|r| r.rate).collect(),
        ))
    }

    /// Table used on a guarantee draw: mass below `threshold` moves onto the
    /// lowest present tier `>= threshold`.
    pub fn build_guaranteed(rates: &[RarityRate], threshold: RarityTier) -> Result<Self, ConfigError> {
        let ordered = ordered_rates(rates)?;
        let recipient = ordered
            .iter()
            .map(|r| r.tier)
            .filter(|t| *t >= threshold)
            .min()
            .ok_or(ConfigError::UnsatisfiableGuarantee { tier: threshold })?;
        let moved: f64 = ordered.iter().filter(|r| r.tier < threshold).map(|r| r.rate).sum();

        let masses = ordered
            .iter()
            .map(|r| {
                if r.tier < threshold {
                    0.0
                } else if r.tier == recipient {
                    r.rate + moved
                } else {
                    r.rate
                }
            })
            .collect();
        Ok(Self::from_masses(ordered.iter().map(|r| r.tier).collect(), masses))
    }

    fn from_masses(tiers: Vec<RarityTier>, masses: Vec<f64>) -> Self {
        let mut acc = 0.0;
        let cumulative = masses
            .iter()
            .map(|m| {
                acc += m;
                acc
            })
            .collect();
        Self { tiers, masses, cumulative }
    }

    /// Upper bound of the roll range.
    #[inline]
    pub fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    /// Bucket order (descending declared rate).
    pub fn tiers(&self) -> &[RarityTier] {
        &self.tiers
    }

    /// First bucket with `roll < cumulative[i]`. `None` when the roll falls
    /// outside every bucket (non-finite, negative, or `>= total`).
    pub fn select(&self, roll: f64) -> Option<RarityTier> {
        if !roll.is_finite() || roll < 0.0 {
            return None;
        }
        let idx = self.cumulative.partition_point(|c| *c <= roll);
        self.tiers.get(idx).copied()
    }

    /// Deterministic fallback: the positive-mass bucket with the smallest
    /// mass, latest bucket on ties.
    pub fn fallback_tier(&self) -> Option<RarityTier> {
        let mut best: Option<(RarityTier, f64)> = None;
        for (tier, mass) in self.tiers.iter().zip(&self.masses) {
            if *mass <= 0.0 {
                continue;
            }
            match best {
                Some((_, m)) if *mass > m => {}
                _ => best = Some((*tier, *mass)),
            }
        }
        best.map(|(t, _)| t)
    }

    /// Probability mass assigned to `tier` in this table.
    pub fn mass(&self, tier: RarityTier) -> f64 {
        self.tiers
            .iter()
            .zip(&self.masses)
            .filter(|(t, _)| **t == tier)
            .map(|(_, m)| *m)
            .sum()
    }

    /// Share of the roll range owned by `tier`, in `[0, 1]`.
    pub fn probability(&self, tier: RarityTier) -> f64 {
        let total = self.total();
        if total > 0.0 { self.mass(tier) / total } else { 0.0 }
    }
}

/// Validate, drop zero rates, sort descending keeping declaration order on ties.
fn ordered_rates(rates: &[RarityRate]) -> Result<Vec<RarityRate>, ConfigError> {
    let mut seen = Vec::with_capacity(rates.len());
    for r in rates {
        if !r.rate.is_finite() || r.rate < 0.0 {
            return Err(ConfigError::InvalidRate { tier: r.tier, rate: r.rate });
        }
        if seen.contains(&r.tier) {
            return Err(ConfigError::DuplicateRate { tier: r.tier });
        }
        seen.push(r.tier);
    }

    let mut ordered: Vec<RarityRate> = rates.iter().copied().filter(|r| r.rate > 0.0).collect();
    if ordered.is_empty() {
        return Err(ConfigError::MissingRates);
    }
    ordered.sort_by(|a, b| b.rate.total_cmp(&a.rate));
    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use RarityTier::*;

    fn rates(v: &[(RarityTier, f64)]) -> Vec<RarityRate> {
        v.iter().map(|(t, r)| RarityRate::new(*t, *r)).collect()
    }

    #[test]
    fn ties_keep_declaration_order() {
        let t = RarityTable::build_normal(&rates(&[(Rarity2, 50.0), (Rarity1, 50.0)])).unwrap();
        assert_eq!(t.tiers(), &[Rarity2, Rarity1]);
        assert_eq!(t.cumulative(), &[50.0, 100.0]);
    }

    #[test]
    fn zero_width_buckets_are_skipped() {
        let t = RarityTable::build_guaranteed(
            &rates(&[(Rarity2, 88.5), (Rarity3, 8.5), (Rarity4, 3.0)]),
            Rarity3,
        )
        .unwrap();
        // Rarity2 keeps its slot with zero width.
        assert_eq!(t.select(0.0), Some(Rarity3));
        assert_eq!(t.select(96.9), Some(Rarity3));
        assert_eq!(t.select(97.0), Some(Rarity4));
        assert_eq!(t.mass(Rarity2), 0.0);
    }

    #[test]
    fn fallback_prefers_latest_smallest_bucket() {
        let t = RarityTable::build_normal(&rates(&[
            (Rarity1, 80.0),
            (Rarity3, 10.0),
            (Rarity4, 10.0),
        ]))
        .unwrap();
        assert_eq!(t.fallback_tier(), Some(Rarity4));
    }

    #[test]
    fn out_of_range_rolls_select_nothing() {
        let t = RarityTable::build_normal(&rates(&[(Rarity1, 70.0), (Rarity2, 30.0)])).unwrap();
        assert_eq!(t.select(100.0), None);
        assert_eq!(t.select(-1.0), None);
        assert_eq!(t.select(f64::NAN), None);
    }
}
