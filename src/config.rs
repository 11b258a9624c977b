//! Gacha configuration records and validated draw tables.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::mechanics::{GuaranteePolicy, PoolItem, RarityRate, RarityTable, RarityTier, WeightTable};

/// Largest batch a single `simulate` call accepts by default.
pub const MAX_BATCH: u32 = 1000;

/// Pity shortfall is tracked per `simulate` call and never carried over.
/// This matches the live game's odds; `PityScope::Session` is opt-in.
pub const DEFAULT_PITY_SCOPE: PityScope = PityScope::PerCall;

/// How long a 10-draw guarantee block lives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PityScope {
    /// Every call starts a fresh block at its first draw.
    #[default]
    PerCall,
    /// Block position and shortfall carry over until `reset`.
    Session,
}

/// A declared spin action as it appears in master data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorSpec {
    pub kind: String,
    pub spin_count: u32,
}

/// In-memory gacha record handed over by the data layer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GachaConfig {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    pub rates: Vec<RarityRate>,
    pub pool: Vec<PoolItem>,
    #[serde(default)]
    pub pickups: Vec<u32>,
    #[serde(default)]
    pub behaviors: Vec<BehaviorSpec>,
}

/// One spin action: how many draws and which guarantee applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawBehavior {
    pub batch_size: u32,
    pub guarantee: GuaranteePolicy,
}

impl DrawBehavior {
    pub fn new(batch_size: u32, guarantee: GuaranteePolicy) -> Self {
        Self { batch_size, guarantee }
    }

    pub fn single() -> Self {
        Self::new(1, GuaranteePolicy::None)
    }

    pub fn ten(guarantee: GuaranteePolicy) -> Self {
        Self::new(10, guarantee)
    }

    pub fn from_spec(spec: &BehaviorSpec) -> Result<Self, ConfigError> {
        let guarantee = GuaranteePolicy::from_behavior_kind(&spec.kind)
            .ok_or_else(|| ConfigError::UnknownGuaranteePolicy(spec.kind.clone()))?;
        Ok(Self::new(spec.spin_count, guarantee))
    }

    /// Reject empty batches and batches above `max`.
    pub fn validate(&self, max: u32) -> Result<(), ConfigError> {
        if self.batch_size == 0 || self.batch_size > max {
            return Err(ConfigError::InvalidBatchSize { size: self.batch_size, max });
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub max_batch: u32,
    pub pity_scope: PityScope,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { max_batch: MAX_BATCH, pity_scope: DEFAULT_PITY_SCOPE }
    }
}

impl SessionConfig {
    pub fn with_max_batch(mut self, max_batch: u32) -> Self {
        self.max_batch = max_batch;
        self
    }

    pub fn with_pity_scope(mut self, pity_scope: PityScope) -> Self {
        self.pity_scope = pity_scope;
        self
    }
}

/// Normal and guaranteed rarity tables plus the weight table, validated
/// together so every selectable tier has drawable items.
#[derive(Clone, Debug, PartialEq)]
pub struct GachaTables {
    normal: RarityTable,
    at_least_3: Option<RarityTable>,
    at_least_4: Option<RarityTable>,
    weights: WeightTable,
    pickups: HashSet<u32>,
}

impl GachaTables {
    /// Build all tables for `cfg`. Policies used by a declared behavior must
    /// be satisfiable; other guaranteed tables are built when possible.
    pub fn build(cfg: &GachaConfig) -> Result<Self, ConfigError> {
        let policies = cfg
            .behaviors
            .iter()
            .map(|spec| DrawBehavior::from_spec(spec).map(|b| b.guarantee))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_parts(&cfg.rates, &cfg.pool, cfg.pickups.iter().copied(), &policies)
    }

    pub fn from_parts(
        rates: &[RarityRate],
        pool: &[PoolItem],
        pickups: impl IntoIterator<Item = u32>,
        policies: &[GuaranteePolicy],
    ) -> Result<Self, ConfigError> {
        let normal = RarityTable::build_normal(rates)?;
        let weights = WeightTable::build(pool);
        if let Some(tier) = normal.tiers().iter().find(|t| !weights.is_selectable(**t)) {
            return Err(ConfigError::EmptyTier { tier: *tier });
        }

        let guaranteed = |policy: GuaranteePolicy| -> Result<Option<RarityTable>, ConfigError> {
            let Some(tier) = policy.tier() else {
                return Ok(None);
            };
            match RarityTable::build_guaranteed(rates, tier) {
                Ok(table) => Ok(Some(table)),
                Err(e) if policies.contains(&policy) => Err(e),
                Err(_) => Ok(None),
            }
        };
        let at_least_3 = guaranteed(GuaranteePolicy::AtLeast3)?;
        let at_least_4 = guaranteed(GuaranteePolicy::AtLeast4)?;

        log::info!(
            "gacha tables built: {} tiers, total rate {:.3}, {} items",
            normal.tiers().len(),
            normal.total(),
            weights.items().count()
        );

        Ok(Self {
            normal,
            at_least_3,
            at_least_4,
            weights,
            pickups: pickups.into_iter().collect(),
        })
    }

    pub fn normal(&self) -> &RarityTable {
        &self.normal
    }

    /// Guaranteed table for `policy`; `None` for `GuaranteePolicy::None`
    /// or a policy no declared tier can satisfy.
    pub fn guaranteed(&self, policy: GuaranteePolicy) -> Option<&RarityTable> {
        match policy {
            GuaranteePolicy::None => None,
            GuaranteePolicy::AtLeast3 => self.at_least_3.as_ref(),
            GuaranteePolicy::AtLeast4 => self.at_least_4.as_ref(),
        }
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    pub fn pickups(&self) -> &HashSet<u32> {
        &self.pickups
    }

    #[inline]
    pub fn is_pickup(&self, id: u32) -> bool {
        self.pickups.contains(&id)
    }

    /// Effective percentage of drawing `id` on a plain draw
    /// (tier share × in-tier weight share × 100).
    pub fn item_rate(&self, id: u32) -> Option<f64> {
        self.item_rate_in(&self.normal, id)
    }

    /// Same as [`item_rate`](Self::item_rate) on the guaranteed draw of `policy`.
    pub fn guaranteed_item_rate(&self, policy: GuaranteePolicy, id: u32) -> Option<f64> {
        self.item_rate_in(self.guaranteed(policy)?, id)
    }

    fn item_rate_in(&self, table: &RarityTable, id: u32) -> Option<f64> {
        let item = self.weights.items().find(|it| it.id == id)?;
        Some(table.probability(item.tier) * self.weights.share(item) * 100.0)
    }

    /// Tiers that can come out of a plain draw, most likely first.
    pub fn tiers(&self) -> &[RarityTier] {
        self.normal.tiers()
    }
}
