// Run with:
//   RUST_LOG=debug cargo run --example session

use gacha_sim::masterdata::load_gacha;
use gacha_sim::{GachaSession, RarityTier, SessionConfig};

const GACHAS: &str = r#"[{
  "id": 1, "name": "Demo Pickup",
  "gachaBehaviors": [
    { "gachaBehaviorType": "normal", "spinCount": 1 },
    { "gachaBehaviorType": "over_rarity_3_once", "spinCount": 10 }
  ],
  "gachaCardRarityRates": [
    { "cardRarityType": "rarity_4", "rate": 3 },
    { "cardRarityType": "rarity_3", "rate": 8.5 },
    { "cardRarityType": "rarity_2", "rate": 88.5 }
  ],
  "gachaDetails": [
    { "cardId": 1, "weight": 400000 }, { "cardId": 2, "weight": 100000 },
    { "cardId": 3, "weight": 100000 }, { "cardId": 4, "weight": 100000 },
    { "cardId": 5, "weight": 100000 }, { "cardId": 6, "weight": 100000 }
  ],
  "gachaPickups": [{ "cardId": 1 }]
}]"#;

const CARDS: &str = r#"[
  { "id": 1, "cardRarityType": "rarity_4" }, { "id": 2, "cardRarityType": "rarity_4" },
  { "id": 3, "cardRarityType": "rarity_3" }, { "id": 4, "cardRarityType": "rarity_3" },
  { "id": 5, "cardRarityType": "rarity_2" }, { "id": 6, "cardRarityType": "rarity_2" }
]"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cfg = load_gacha(GACHAS, CARDS, 1)?;
    let mut session = GachaSession::seeded(&cfg, SessionConfig::default(), 0x5EED)?;

    println!("== {} ==", cfg.name);
    for tier in session.tables().tiers() {
        println!(
            "{:>16}: {:6.2}%",
            tier.as_str(),
            session.tables().normal().probability(*tier) * 100.0
        );
    }
    if let Some(rate) = session.tables().item_rate(1) {
        println!("pickup card 1: {rate:.3}% per draw");
    }

    let ten = session.behaviors()[1];
    for _ in 0..30 {
        session.simulate(&ten)?;
    }
    session.simulate_custom(37)?;

    let stats = session.statistics();
    println!("\n{} draws, pickup rate {:.2}%", stats.total_draws(), stats.pickup_rate() * 100.0);
    for tier in RarityTier::ALL {
        let n = stats.count(tier);
        if n > 0 {
            println!("{:>16}: {n:5} ({:.2}%)", tier.as_str(), stats.tier_rate(tier) * 100.0);
        }
    }

    println!("\nnotable draws (most recent first):");
    for entry in session.snapshot().notable {
        println!(
            "  #{:<4} card {:<3} {} (+{} draws)",
            entry.pull_index, entry.item.id, entry.item.tier, entry.pity_interval
        );
    }

    session.reset();
    println!("\nafter reset: {} draws", session.statistics().total_draws());
    Ok(())
}
