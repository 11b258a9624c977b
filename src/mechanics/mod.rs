pub mod rarity;
pub mod roll;
pub mod tier;
pub mod weight;

pub use rarity::*;
pub use roll::*;
pub use tier::*;
pub use weight::*;
