//! Master-data adapter: turns the game's `gachas` and `cards` JSON records
//! into a [`GachaConfig`].
//!
//! Only the fields the simulator needs are read; everything else in the
//! records is ignored. A card's tier comes from the `cards` table, since
//! `gachaDetails` entries only carry a card id and a weight.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use crate::config::{BehaviorSpec, GachaConfig};
use crate::error::ConfigError;
use crate::mechanics::{PoolItem, RarityRate, RarityTier};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("malformed master data: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("gacha {gacha_id} not found")]
    UnknownGacha { gacha_id: u32 },
    #[error("gacha detail references unknown card {card_id}")]
    UnknownCard { card_id: u32 },
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GachaRecord {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub gacha_type: String,
    #[serde(default)]
    pub gacha_behaviors: Vec<BehaviorRecord>,
    #[serde(default)]
    pub gacha_card_rarity_rates: Vec<RarityRateRecord>,
    #[serde(default)]
    pub gacha_details: Vec<DetailRecord>,
    #[serde(default)]
    pub gacha_pickups: Vec<PickupRecord>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorRecord {
    pub gacha_behavior_type: String,
    pub spin_count: u32,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RarityRateRecord {
    pub card_rarity_type: RarityTier,
    pub rate: f64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailRecord {
    pub card_id: u32,
    pub weight: u32,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupRecord {
    pub card_id: u32,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub id: u32,
    pub card_rarity_type: RarityTier,
}

pub fn parse_gachas(json: &str) -> Result<Vec<GachaRecord>, LoadError> {
    Ok(serde_json::from_str(json)?)
}

pub fn parse_cards(json: &str) -> Result<Vec<CardRecord>, LoadError> {
    Ok(serde_json::from_str(json)?)
}

/// Card id → tier lookup.
pub fn card_tiers(cards: &[CardRecord]) -> HashMap<u32, RarityTier> {
    cards.iter().map(|c| (c.id, c.card_rarity_type)).collect()
}

impl GachaRecord {
    /// Join this gacha with the card tiers. Behavior kinds are copied as-is;
    /// unknown kinds are rejected when tables are built.
    pub fn to_config(&self, tiers: &HashMap<u32, RarityTier>) -> Result<GachaConfig, LoadError> {
        let pool = self
            .gacha_details
            .iter()
            .map(|d| -> Result<PoolItem, LoadError> {
                let tier = *tiers.get(&d.card_id).ok_or(LoadError::UnknownCard { card_id: d.card_id })?;
                Ok(PoolItem::new(d.card_id, tier, d.weight))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(GachaConfig {
            id: self.id,
            name: self.name.clone(),
            rates: self
                .gacha_card_rarity_rates
                .iter()
                .map(|r| RarityRate::new(r.card_rarity_type, r.rate))
                .collect(),
            pool,
            pickups: self.gacha_pickups.iter().map(|p| p.card_id).collect(),
            behaviors: self
                .gacha_behaviors
                .iter()
                .map(|b| BehaviorSpec { kind: b.gacha_behavior_type.clone(), spin_count: b.spin_count })
                .collect(),
        })
    }
}

/// Parse both tables and build the config for `gacha_id`.
pub fn load_gacha(gachas_json: &str, cards_json: &str, gacha_id: u32) -> Result<GachaConfig, LoadError> {
    let gachas = parse_gachas(gachas_json)?;
    let gacha = gachas
        .iter()
        .find(|g| g.id == gacha_id)
        .ok_or(LoadError::UnknownGacha { gacha_id })?;
    let cards = parse_cards(cards_json)?;
    gacha.to_config(&card_tiers(&cards))
}
