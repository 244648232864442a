//! Configuration and shared domain types.

pub mod faction;
pub mod settings;

pub use faction::Faction;
pub use settings::HudSettings;
