/*!
`gacha_sim` — a weighted, tiered, pity-guaranteed gacha draw simulator.

What it does
- Derives cumulative rarity tables (normal and guaranteed) and per-tier
  weight tables from a gacha's static configuration.
- Executes spin actions (single, 10-pull, or any custom count) with the
  "at least tier T on the 10th draw of a block" guarantee.
- Folds every batch into running session statistics: per-tier counts,
  pickup hits, and the pull-index history of top-tier draws.

How to use (call surface only)
- Build a [`GachaConfig`] (by hand, or from master data with
  [`masterdata::load_gacha`]).
- Open a session: `GachaSession::seeded(&gacha, SessionConfig::default(), seed)`
  or `GachaSession::new(&gacha, session_cfg, source)` with any [`RollSource`].
- Call `simulate(&behavior)` per spin, `reset()` to start over, and read
  `statistics()` / `snapshot()` for display.

What it does NOT do
- No persistence, no networking, no cryptographic randomness. Only the
  probability semantics of the game's draws are reproduced.
*/

pub mod config;
pub mod error;
#[cfg(feature = "masterdata")]
pub mod masterdata;
pub mod mechanics;
pub mod session;
pub mod systems;

pub use config::{
    BehaviorSpec, DEFAULT_PITY_SCOPE, DrawBehavior, GachaConfig, GachaTables, MAX_BATCH, PityScope,
    SessionConfig,
};
pub use error::ConfigError;
pub use mechanics::{
    CountingSource, GuaranteePolicy, PoolItem, RarityRate, RarityTable, RarityTier, RollSource,
    ScriptedRolls, WeightTable, seeded,
};
pub use session::{GachaSession, SimulateOutcome};
pub use systems::{
    BLOCK_LEN, DrawEngine, DrawOutcome, NotableDraw, PityTracker, RunningStatistics,
    StatisticsSnapshot,
};
