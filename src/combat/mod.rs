//! Fighters and round resolution.

pub mod logic;
pub mod types;

pub use logic::{resolve_round, RoundOutcome, RoundReport, Strike};
pub use types::CombatEntity;
