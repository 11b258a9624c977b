//! Draw engine: executes one spin action against validated tables.
//!
//! Each draw rolls a tier, then an item inside that tier. Guarantee behaviors
//! split the batch into 10-draw blocks; on the 10th draw of a block where none
//! of the previous nine met the threshold, the tier is rolled against the
//! guaranteed table instead of the normal one.
//!
//! A tier roll that lands in no bucket is retried once and then resolved to
//! the table's lowest-rate tier. That path is logged and counted in the
//! outcome; it never aborts a batch.

use crate::config::{DrawBehavior, GachaTables};
use crate::error::ConfigError;
use crate::mechanics::{PoolItem, RarityTable, RarityTier, RollSource};

/// Draws per guarantee block.
pub const BLOCK_LEN: u32 = 10;

/// Position inside the current guarantee block and how many of its draws
/// missed the threshold so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PityTracker {
    position: u32,
    shortfall: u32,
}

impl PityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn shortfall(&self) -> u32 {
        self.shortfall
    }

    #[inline]
    fn guarantee_due(&self) -> bool {
        self.position == BLOCK_LEN - 1 && self.shortfall == BLOCK_LEN - 1
    }

    #[inline]
    fn record(&mut self, met_threshold: bool) {
        if !met_threshold {
            self.shortfall += 1;
        }
        self.position += 1;
        if self.position == BLOCK_LEN {
            *self = Self::default();
        }
    }
}

/// Result of one engine call. `items.len()` always equals the batch size.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawOutcome {
    pub items: Vec<PoolItem>,
    pub pickup_hits: u32,
    pub guarantees_fired: u32,
    /// Draws whose first tier roll matched no bucket.
    pub degenerate_rolls: u32,
    /// Degenerate draws that also failed the retry and used the fallback tier.
    pub fallbacks: u32,
}

enum TierRoll {
    Hit(RarityTier),
    Retried(RarityTier),
    Fallback(RarityTier),
}

pub struct DrawEngine<'a> {
    tables: &'a GachaTables,
}

impl<'a> DrawEngine<'a> {
    pub fn new(tables: &'a GachaTables) -> Self {
        Self { tables }
    }

    /// Run `behavior` with a fresh guarantee block.
    pub fn draw<S: RollSource + ?Sized>(
        &self,
        behavior: &DrawBehavior,
        source: &mut S,
    ) -> Result<DrawOutcome, ConfigError> {
        self.draw_with(behavior, &mut PityTracker::new(), source)
    }

    /// Run `behavior` continuing from `pity`, which is left at the position
    /// reached after the last draw.
    pub fn draw_with<S: RollSource + ?Sized>(
        &self,
        behavior: &DrawBehavior,
        pity: &mut PityTracker,
        source: &mut S,
    ) -> Result<DrawOutcome, ConfigError> {
        let guaranteed = match behavior.guarantee.tier() {
            Some(tier) => Some((
                tier,
                self.tables
                    .guaranteed(behavior.guarantee)
                    .ok_or(ConfigError::UnsatisfiableGuarantee { tier })?,
            )),
            None => None,
        };

        let mut out = DrawOutcome {
            items: Vec::with_capacity(behavior.batch_size as usize),
            ..DrawOutcome::default()
        };

        for i in 0..behavior.batch_size {
            let (table, threshold) = match guaranteed {
                Some((tier, table)) if pity.guarantee_due() => {
                    out.guarantees_fired += 1;
                    (table, Some(tier))
                }
                Some((tier, _)) => (self.tables.normal(), Some(tier)),
                None => (self.tables.normal(), None),
            };

            let tier = match roll_tier(table, source)? {
                TierRoll::Hit(t) => t,
                TierRoll::Retried(t) => {
                    out.degenerate_rolls += 1;
                    t
                }
                TierRoll::Fallback(t) => {
                    out.degenerate_rolls += 1;
                    out.fallbacks += 1;
                    log::warn!("draw {i}: tier roll matched no bucket twice, falling back to {t}");
                    t
                }
            };

            if let Some(threshold) = threshold {
                pity.record(tier >= threshold);
            }

            let item = *self
                .tables
                .weights()
                .pick(tier, source.next_unit())
                .ok_or(ConfigError::UnselectableTier { tier })?;
            if self.tables.is_pickup(item.id) {
                out.pickup_hits += 1;
            }
            out.items.push(item);
        }

        log::debug!(
            "batch of {} ({:?}): {} guarantees, {} pickups, {} degenerate rolls",
            behavior.batch_size,
            behavior.guarantee,
            out.guarantees_fired,
            out.pickup_hits,
            out.degenerate_rolls
        );
        Ok(out)
    }
}

fn roll_tier<S: RollSource + ?Sized>(table: &RarityTable, source: &mut S) -> Result<TierRoll, ConfigError> {
    let total = table.total();
    let first = source.next_unit() * total;
    if let Some(tier) = table.select(first) {
        return Ok(TierRoll::Hit(tier));
    }
    log::debug!("tier roll {first} outside [0, {total}), retrying");

    let second = source.next_unit() * total;
    if let Some(tier) = table.select(second) {
        return Ok(TierRoll::Retried(tier));
    }
    table.fallback_tier().map(TierRoll::Fallback).ok_or(ConfigError::MissingRates)
}
