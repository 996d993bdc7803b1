//! Run results and the leaderboard.

pub mod json;

pub use json::JsonScoreStore;

use crate::core::{Result, PLAYER_NAME_MAX_LEN, PLAYER_NAME_MIN_LEN};
use serde::{Deserialize, Serialize};

/// Waves fully cleared in one run, credited to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player_name: String,
    pub waves: u32,
}

impl Score {
    pub fn new(player_name: impl Into<String>, waves: u32) -> Self {
        Self {
            player_name: player_name.into(),
            waves,
        }
    }
}

/// Append-only record of finished runs.
pub trait ScoreStore {
    /// Adds one record. Repeat players get separate entries.
    fn append_score(&mut self, score: &Score) -> Result<()>;

    /// Best `limit` records, most waves first. Equal scores keep their
    /// insertion order.
    fn top_scores(&self, limit: usize) -> Result<Vec<Score>>;
}

/// Sorts by waves descending (stable) and keeps the first `limit`.
pub fn rank_scores(mut scores: Vec<Score>, limit: usize) -> Vec<Score> {
    scores.sort_by(|a, b| b.waves.cmp(&a.waves));
    scores.truncate(limit);
    scores
}

/// Score store that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    scores: Vec<Score>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn append_score(&mut self, score: &Score) -> Result<()> {
        self.scores.push(score.clone());
        Ok(())
    }

    fn top_scores(&self, limit: usize) -> Result<Vec<Score>> {
        Ok(rank_scores(self.scores.clone(), limit))
    }
}

/// Checks a player name before it is attached to a run.
pub fn validate_player_name(name: &str) -> std::result::Result<(), String> {
    let length = name.trim().chars().count();

    if length < PLAYER_NAME_MIN_LEN {
        return Err(format!(
            "Name must be at least {} characters",
            PLAYER_NAME_MIN_LEN
        ));
    }

    if length > PLAYER_NAME_MAX_LEN {
        return Err(format!(
            "Name must be {} characters or less",
            PLAYER_NAME_MAX_LEN
        ));
    }

    Ok(())
}
