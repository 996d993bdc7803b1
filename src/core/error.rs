//! Error type shared by the combat core, storage and simulator.

use crate::catalog::TemplateKind;
use crate::wave::WavePhase;
use thiserror::Error;

/// Everything that can stop a game operation.
///
/// Precondition violations are reported here rather than panicking; the
/// frontend is expected to keep them from happening in the first place.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("the {kind} catalog is empty")]
    EmptyCatalog { kind: TemplateKind },

    #[error("the {kind} catalog has {available} entries, {needed} are needed")]
    CatalogTooSmall {
        kind: TemplateKind,
        needed: usize,
        available: usize,
    },

    #[error("invalid {kind} template '{name}': {reason}")]
    InvalidTemplate {
        kind: TemplateKind,
        name: String,
        reason: &'static str,
    },

    #[error("a team needs exactly {expected} members, got {actual}")]
    TeamSize { expected: usize, actual: usize },

    #[error("choice {choice} is out of range (1-{available})")]
    SelectionOutOfRange { choice: usize, available: usize },

    #[error("the team is already complete")]
    TeamComplete,

    #[error("the team has no living members")]
    TeamWiped,

    #[error("{0} is already defeated")]
    MonsterDefeated(String),

    #[error("cannot {action} while the run is {phase:?}")]
    InvalidTransition {
        phase: WavePhase,
        action: &'static str,
    },

    #[error("could not determine a data directory for this platform")]
    NoDataDir,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
