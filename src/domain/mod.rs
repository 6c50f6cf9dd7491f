pub mod model;
pub mod ports;

pub use model::{ArcanaType, CardRecord, Court, DrawnCard, Spread, SpreadPosition, Suit};
pub use ports::ConfigStorage;
