pub mod draw;
pub mod stats;

pub use draw::*;
pub use stats::*;
