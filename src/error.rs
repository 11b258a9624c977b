use thiserror::Error;

use crate::mechanics::RarityTier;

/// Errors raised while validating a gacha before any draw happens.
/// A gacha that fails here must not be simulated.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("gacha declares no nonzero rarity rates")]
    MissingRates,
    #[error("rate for {tier} must be a finite non-negative percentage (got {rate})")]
    InvalidRate { tier: RarityTier, rate: f64 },
    #[error("rate for {tier} is declared more than once")]
    DuplicateRate { tier: RarityTier },
    #[error("{tier} has a positive rate but no drawable pool items")]
    EmptyTier { tier: RarityTier },
    #[error("unknown guarantee policy `{0}`")]
    UnknownGuaranteePolicy(String),
    #[error("guarantee of at least {tier} cannot be met by any nonzero tier")]
    UnsatisfiableGuarantee { tier: RarityTier },
    #[error("batch size {size} outside 1..={max}")]
    InvalidBatchSize { size: u32, max: u32 },
    #[error("draw resolved to {tier}, which has no weighted items")]
    UnselectableTier { tier: RarityTier },
}
