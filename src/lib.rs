//! Gauntlet - terminal wave-survival combat game library
//!
//! A player drafts three characters from a catalog, then the team fights
//! randomly drawn monsters wave after wave until it is wiped out. The number
//! of waves cleared is the run's score.
//!
//! The game rules live here so the binary, the simulator, and the tests all
//! drive the same code.

pub mod catalog;
pub mod combat;
pub mod core;
pub mod scores;
pub mod simulator;
pub mod team;
pub mod utils;
pub mod wave;

pub use crate::catalog::{EntityCatalog, EntityTemplate, JsonCatalog, MemoryCatalog, TemplateKind};
pub use crate::combat::{resolve_round, CombatEntity, RoundOutcome, RoundReport};
pub use crate::core::{GameError, Result};
pub use crate::scores::{JsonScoreStore, MemoryScoreStore, Score, ScoreStore};
pub use crate::team::{create_team, Team, TeamBuilder};
pub use crate::wave::{WaveController, WaveEvent, WavePhase};
