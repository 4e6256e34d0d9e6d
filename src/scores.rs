use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::Result;
use crate::frontend::ScoreStore;

pub const TOP_SCORES: usize = 5;

/// Highest `n` scores, best first.
pub fn top_scores(scores: &[u32], n: usize) -> Vec<u32> {
    let mut sorted = scores.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted.truncate(n);
    sorted
}

/// Appends `score` to the store and returns the updated list.
pub fn record<S: ScoreStore>(store: &mut S, score: u32) -> Result<Vec<u32>> {
    let mut scores = store.load();
    scores.push(score);
    store.save(&scores)?;
    Ok(scores)
}

/// Scores kept as a JSON array of integers in a single file.
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonScoreStore { path: path.into() }
    }
}

impl ScoreStore for JsonScoreStore {
    fn load(&self) -> Vec<u32> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no high scores yet");
                return vec![];
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not read high scores");
                return vec![];
            }
        };

        serde_json::from_str(&json).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "ignoring malformed high scores");
            vec![]
        })
    }

    fn save(&mut self, scores: &[u32]) -> Result<()> {
        let json = serde_json::to_string(scores).map_err(std::io::Error::from)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryScoreStore {
    pub scores: Vec<u32>,
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> Vec<u32> {
        self.scores.clone()
    }

    fn save(&mut self, scores: &[u32]) -> Result<()> {
        self.scores = scores.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("snake-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn top_scores_are_descending_and_capped() {
        let scores = [30, 10, 90, 50, 70, 20, 60];
        assert_eq!(top_scores(&scores, TOP_SCORES), vec![90, 70, 60, 50, 30]);
        assert_eq!(top_scores(&[], TOP_SCORES), Vec::<u32>::new());
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let store = JsonScoreStore::new(temp_path("missing"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn malformed_file_reads_as_empty() {
        let path = temp_path("malformed");
        fs::write(&path, "{not json").unwrap();
        let store = JsonScoreStore::new(&path);
        assert!(store.load().is_empty());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn record_persists_whole_list() {
        let path = temp_path("record");
        let mut store = JsonScoreStore::new(&path);
        record(&mut store, 40).unwrap();
        let scores = record(&mut store, 120).unwrap();
        assert_eq!(scores, vec![40, 120]);

        let reopened = JsonScoreStore::new(&path);
        assert_eq!(reopened.load(), vec![40, 120]);
        assert_eq!(fs::read_to_string(&path).unwrap(), "[40,120]");
        fs::remove_file(&path).unwrap();
    }
}
