// tests/masterdata.rs
#![cfg(feature = "masterdata")]

use gacha_sim::masterdata::{LoadError, load_gacha};
use gacha_sim::{
    BehaviorSpec, ConfigError, DrawBehavior, GachaSession, GuaranteePolicy, PoolItem, RarityTier,
    SessionConfig,
};

const GACHAS: &str = r#"[
  {
    "id": 1,
    "gachaType": "ceil",
    "name": "Limited Pickup",
    "seq": 1,
    "assetbundleName": "ab_gacha_1",
    "startAt": 1600000000000,
    "endAt": 1600600000000,
    "gachaBehaviors": [
      { "id": 1, "gachaId": 1, "gachaBehaviorType": "normal", "costResourceType": "jewel", "costResourceQuantity": 300, "spinCount": 1 },
      { "id": 2, "gachaId": 1, "gachaBehaviorType": "over_rarity_3_once", "costResourceType": "jewel", "costResourceQuantity": 3000, "spinCount": 10 }
    ],
    "gachaCardRarityRates": [
      { "id": 1, "gachaId": 1, "cardRarityType": "rarity_4", "rate": 3 },
      { "id": 2, "gachaId": 1, "cardRarityType": "rarity_3", "rate": 8.5 },
      { "id": 3, "gachaId": 1, "cardRarityType": "rarity_2", "rate": 88.5 }
    ],
    "gachaDetails": [
      { "id": 1, "gachaId": 1, "cardId": 100, "weight": 400000 },
      { "id": 2, "gachaId": 1, "cardId": 101, "weight": 100000, "isWish": true },
      { "id": 3, "gachaId": 1, "cardId": 200, "weight": 100000 },
      { "id": 4, "gachaId": 1, "cardId": 300, "weight": 100000 }
    ],
    "gachaPickups": [
      { "id": 1, "gachaId": 1, "cardId": 100, "gachaPickupType": "normal" }
    ]
  },
  {
    "id": 2,
    "gachaType": "normal",
    "name": "Daily",
    "gachaBehaviors": [
      { "id": 3, "gachaId": 2, "gachaBehaviorType": "once_a_day", "costResourceType": "free", "costResourceQuantity": 0, "spinCount": 1 }
    ],
    "gachaCardRarityRates": [
      { "id": 4, "gachaId": 2, "cardRarityType": "rarity_2", "rate": 100 }
    ],
    "gachaDetails": [
      { "id": 5, "gachaId": 2, "cardId": 300, "weight": 1 },
      { "id": 6, "gachaId": 2, "cardId": 999, "weight": 1 }
    ],
    "gachaPickups": []
  }
]"#;

const CARDS: &str = r#"[
  { "id": 100, "characterId": 1, "cardRarityType": "rarity_4", "attr": "cool", "prefix": "A" },
  { "id": 101, "characterId": 2, "cardRarityType": "rarity_4", "attr": "cute", "prefix": "B" },
  { "id": 200, "characterId": 3, "cardRarityType": "rarity_3", "attr": "pure", "prefix": "C" },
  { "id": 300, "characterId": 4, "cardRarityType": "rarity_2", "attr": "happy", "prefix": "D" }
]"#;

#[test]
fn gacha_record_joins_card_tiers() {
    let cfg = load_gacha(GACHAS, CARDS, 1).unwrap();
    assert_eq!(cfg.id, 1);
    assert_eq!(cfg.name, "Limited Pickup");
    assert_eq!(cfg.rates.len(), 3);
    assert_eq!(cfg.pickups, vec![100]);
    assert!(cfg.pool.contains(&PoolItem::new(101, RarityTier::Rarity4, 100_000)));
    assert!(cfg.pool.contains(&PoolItem::new(200, RarityTier::Rarity3, 100_000)));
    assert_eq!(
        cfg.behaviors[1],
        BehaviorSpec { kind: "over_rarity_3_once".into(), spin_count: 10 }
    );
}

#[test]
fn loaded_gacha_runs_a_session() {
    let cfg = load_gacha(GACHAS, CARDS, 1).unwrap();
    let mut s = GachaSession::seeded(&cfg, SessionConfig::default(), 77).unwrap();
    let ten = s.behaviors()[1];
    assert_eq!(ten, DrawBehavior::ten(GuaranteePolicy::AtLeast3));

    let rate = s.tables().item_rate(100).unwrap();
    assert!((rate - 2.4).abs() < 1e-9, "pickup rate {rate}");

    for _ in 0..20 {
        let out = s.simulate(&ten).unwrap();
        assert!(out.draw.items.iter().any(|it| it.tier >= RarityTier::Rarity3));
    }
    assert_eq!(s.statistics().total_draws(), 200);
}

#[test]
fn missing_gacha_and_card_are_reported() {
    assert!(matches!(
        load_gacha(GACHAS, CARDS, 42),
        Err(LoadError::UnknownGacha { gacha_id: 42 })
    ));
    assert!(matches!(
        load_gacha(GACHAS, CARDS, 2),
        Err(LoadError::UnknownCard { card_id: 999 })
    ));
    assert!(matches!(load_gacha("{not json", CARDS, 1), Err(LoadError::Json(_))));
}

#[test]
fn unsupported_behavior_surfaces_when_session_opens() {
    let cards = CARDS.replace(r#"{ "id": 300,"#, r#"{ "id": 999, "cardRarityType": "rarity_2" }, { "id": 300,"#);
    let cfg = load_gacha(GACHAS, &cards, 2).unwrap();
    let err = GachaSession::seeded(&cfg, SessionConfig::default(), 0).err().unwrap();
    assert_eq!(err, ConfigError::UnknownGuaranteePolicy("once_a_day".into()));
}
