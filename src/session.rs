//! Simulation session orchestrator.
//!
//! Owns the validated tables, the random source, the running statistics and
//! (with [`PityScope::Session`]) the guarantee block that carries across calls.
//! Each `simulate` runs the draw engine to completion and folds the result
//! before returning, so statistics never see a partial batch.

use bevy_prng::WyRand;

use crate::config::{DrawBehavior, GachaConfig, GachaTables, PityScope, SessionConfig};
use crate::error::ConfigError;
use crate::mechanics::{CountingSource, GuaranteePolicy, RollSource, seeded};
use crate::systems::{DrawEngine, DrawOutcome, PityTracker, RunningStatistics, StatisticsSnapshot};

/// What one spin hands back to the presentation layer.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulateOutcome {
    pub draw: DrawOutcome,
    pub snapshot: StatisticsSnapshot,
}

pub struct GachaSession<S> {
    gacha_id: u32,
    tables: GachaTables,
    behaviors: Vec<DrawBehavior>,
    cfg: SessionConfig,
    stats: RunningStatistics,
    pity: PityTracker,
    source: S,
}

impl GachaSession<CountingSource<WyRand>> {
    /// Session backed by the default seeded generator.
    pub fn seeded(gacha: &GachaConfig, cfg: SessionConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(gacha, cfg, seeded(seed))
    }
}

impl<S: RollSource> GachaSession<S> {
    pub fn new(gacha: &GachaConfig, cfg: SessionConfig, source: S) -> Result<Self, ConfigError> {
        let behaviors = gacha
            .behaviors
            .iter()
            .map(DrawBehavior::from_spec)
            .collect::<Result<Vec<_>, _>>()?;
        let tables = GachaTables::build(gacha)?;
        Ok(Self {
            gacha_id: gacha.id,
            tables,
            behaviors,
            cfg,
            stats: RunningStatistics::new(),
            pity: PityTracker::new(),
            source,
        })
    }

    /// Run one spin and fold it into the session statistics.
    pub fn simulate(&mut self, behavior: &DrawBehavior) -> Result<SimulateOutcome, ConfigError> {
        behavior.validate(self.cfg.max_batch)?;
        let engine = DrawEngine::new(&self.tables);
        let draw = match self.cfg.pity_scope {
            PityScope::PerCall => engine.draw(behavior, &mut self.source)?,
            PityScope::Session => engine.draw_with(behavior, &mut self.pity, &mut self.source)?,
        };
        self.stats.fold(&draw.items, draw.pickup_hits);
        Ok(SimulateOutcome { draw, snapshot: self.stats.snapshot() })
    }

    /// Spin an arbitrary count with the guarantee of the declared 10-draw
    /// behavior (none if the gacha declares no guarantee).
    pub fn simulate_custom(&mut self, count: u32) -> Result<SimulateOutcome, ConfigError> {
        let behavior = DrawBehavior::new(count, self.custom_guarantee());
        self.simulate(&behavior)
    }

    fn custom_guarantee(&self) -> GuaranteePolicy {
        self.behaviors
            .iter()
            .filter(|b| b.batch_size >= 10)
            .map(|b| b.guarantee)
            .find(|g| *g != GuaranteePolicy::None)
            .unwrap_or_default()
    }

    /// Clear statistics and any carried guarantee block.
    pub fn reset(&mut self) {
        self.stats.reset();
        self.pity = PityTracker::new();
        log::info!("gacha {} session reset", self.gacha_id);
    }

    pub fn gacha_id(&self) -> u32 {
        self.gacha_id
    }

    /// Declared spin actions, in master-data order.
    pub fn behaviors(&self) -> &[DrawBehavior] {
        &self.behaviors
    }

    pub fn statistics(&self) -> &RunningStatistics {
        &self.stats
    }

    pub fn snapshot(&self) -> StatisticsSnapshot {
        self.stats.snapshot()
    }

    pub fn tables(&self) -> &GachaTables {
        &self.tables
    }

    pub fn config(&self) -> &SessionConfig {
        &self.cfg
    }

    /// Guarantee block carried into the next call (only moves with `PityScope::Session`).
    pub fn pity(&self) -> PityTracker {
        self.pity
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
