//! Leaderboard persisted as JSON lines, one record per finished run.

use super::{rank_scores, Score, ScoreStore};
use crate::core::{Result, SCORES_FILE};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Score store backed by `scores.jsonl` in the data directory.
///
/// Each run is a single appended line, so a record is either fully written
/// or absent. Lines that fail to parse are skipped when reading.
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(SCORES_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every readable record in file order.
    pub fn all_scores(&self) -> Result<Vec<Score>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let scores = content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(index, line)| match serde_json::from_str::<Score>(line) {
                Ok(score) => Some(score),
                Err(e) => {
                    warn!(line = index + 1, error = %e, "skipping unreadable score record");
                    None
                }
            })
            .collect();

        Ok(scores)
    }
}

impl ScoreStore for JsonScoreStore {
    fn append_score(&mut self, score: &Score) -> Result<()> {
        let mut line = serde_json::to_string(score)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;

        debug!(player = %score.player_name, waves = score.waves, "score appended");
        Ok(())
    }

    fn top_scores(&self, limit: usize) -> Result<Vec<Score>> {
        Ok(rank_scores(self.all_scores()?, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty_leaderboard() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonScoreStore::open(dir.path()).unwrap();

        assert!(store.top_scores(3).unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_append_and_rank() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonScoreStore::open(dir.path()).unwrap();

        store.append_score(&Score::new("Ada", 4)).unwrap();
        store.append_score(&Score::new("Grace", 9)).unwrap();
        store.append_score(&Score::new("Ada", 4)).unwrap();
        store.append_score(&Score::new("Linus", 0)).unwrap();

        let top = store.top_scores(3).unwrap();
        assert_eq!(
            top,
            vec![Score::new("Grace", 9), Score::new("Ada", 4), Score::new("Ada", 4)]
        );
        assert_eq!(store.all_scores().unwrap().len(), 4);
    }

    #[test]
    fn test_records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = JsonScoreStore::open(dir.path()).unwrap();
            store.append_score(&Score::new("Ada", 2)).unwrap();
        }

        let store = JsonScoreStore::open(dir.path()).unwrap();
        assert_eq!(store.all_scores().unwrap(), vec![Score::new("Ada", 2)]);
    }

    #[test]
    fn test_file_holds_one_record_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonScoreStore::open(dir.path()).unwrap();
        store.append_score(&Score::new("Ada", 2)).unwrap();
        store.append_score(&Score::new("Bob", 3)).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            content,
            "{\"player_name\":\"Ada\",\"waves\":2}\n{\"player_name\":\"Bob\",\"waves\":3}\n"
        );
    }

    #[test]
    fn test_corrupt_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonScoreStore::open(dir.path()).unwrap();
        store.append_score(&Score::new("Ada", 2)).unwrap();
        fs::OpenOptions::new()
            .append(true)
            .open(store.path())
            .unwrap()
            .write_all(b"{\"player_name\": \"Trunc\n\n")
            .unwrap();
        store.append_score(&Score::new("Bob", 3)).unwrap();

        let all = store.all_scores().unwrap();
        assert_eq!(all, vec![Score::new("Ada", 2), Score::new("Bob", 3)]);
    }
}
