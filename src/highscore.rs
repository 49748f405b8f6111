//! High score persistence
//!
//! Best-effort by contract: a store that cannot read returns 0, a store
//! that cannot write logs and moves on. The game never fails because the
//! disk did.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Persistence capability for the single best score
pub trait HighScoreStore {
    fn load(&mut self) -> u32;
    fn save(&mut self, score: u32);
}

/// In-memory store (tests, hosts that persist elsewhere)
#[derive(Debug, Default)]
pub struct MemoryStore {
    score: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u32) -> Self {
        Self { score }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> u32 {
        self.score
    }

    fn save(&mut self, score: u32) {
        self.score = score;
    }
}

/// On-disk JSON record
#[derive(Debug, Default, Serialize, Deserialize)]
struct HighScoreFile {
    high_score: u32,
}

/// File-backed store using a small JSON document
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&mut self) -> u32 {
        match fs::read_to_string(&self.path) {
            Ok(json) => match serde_json::from_str::<HighScoreFile>(&json) {
                Ok(file) => file.high_score,
                Err(err) => {
                    log::warn!("corrupt high score file {}: {err}", self.path.display());
                    0
                }
            },
            // Missing file is the normal first-run case
            Err(_) => 0,
        }
    }

    fn save(&mut self, score: u32) {
        let file = HighScoreFile { high_score: score };
        let json = match serde_json::to_string(&file) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("failed to encode high score: {err}");
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, json) {
            log::warn!(
                "failed to write high score to {}: {err}",
                self.path.display()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load(), 0);
        store.save(4_200);
        assert_eq!(store.load(), 4_200);
    }

    #[test]
    fn test_file_store_missing_file_reads_zero() {
        let mut store = JsonFileStore::new("/nonexistent/dir/highscore.json");
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_file_store_round_trip() {
        let path = std::env::temp_dir().join("galactic_defender_hs_test.json");
        let _ = fs::remove_file(&path);

        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.load(), 0);
        store.save(9_999);
        assert_eq!(store.load(), 9_999);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_store_corrupt_file_reads_zero() {
        let path = std::env::temp_dir().join("galactic_defender_hs_corrupt.json");
        fs::write(&path, "not json at all").unwrap();

        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.load(), 0);

        let _ = fs::remove_file(&path);
    }
}
