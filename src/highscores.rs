//! High score leaderboard system
//!
//! Persisted as a JSON list, tracks the top 10 scores.

use std::cmp::Reverse;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;
/// Longest name stored on the board, in characters
pub const MAX_NAME_LEN: usize = 12;
/// Name recorded when the player leaves it blank
pub const ANONYMOUS_NAME: &str = "Anon";

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player's name
    pub name: String,
    /// Player's score
    pub score: u64,
    /// Unix timestamp (seconds) of the submission
    #[serde(alias = "ts")]
    pub timestamp: u64,
}

/// High score leaderboard
///
/// Sorted by descending score; among equal scores the earlier submission
/// ranks higher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

/// Board name for a raw player entry
pub fn board_name(name: &str) -> String {
    if name.is_empty() {
        ANONYMOUS_NAME.to_string()
    } else {
        name.chars().take(MAX_NAME_LEN).collect()
    }
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn sort(&mut self) {
        self.entries
            .sort_by_key(|e| (Reverse(e.score), e.timestamp));
    }

    /// Check if a score submitted at `timestamp` would make the board
    pub fn qualifies(&self, score: u64, timestamp: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries
            .last()
            .map(|e| score > e.score || (score == e.score && timestamp < e.timestamp))
            .unwrap_or(true)
    }

    /// Add a score to the leaderboard
    ///
    /// Returns the rank achieved (1-indexed) or None if it fell off the board.
    pub fn insert(&mut self, name: &str, score: u64, timestamp: u64) -> Option<usize> {
        let entry = HighScoreEntry {
            name: board_name(name),
            score,
            timestamp,
        };
        self.entries.push(entry.clone());
        self.sort();
        self.entries.truncate(MAX_HIGH_SCORES);

        self.entries
            .iter()
            .rposition(|e| *e == entry)
            .map(|i| i + 1)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (0 if the board is empty)
    pub fn best_score(&self) -> u64 {
        self.entries.first().map(|e| e.score).unwrap_or(0)
    }

    /// Load high scores; a missing or corrupt file gives an empty board
    pub fn load(path: &Path) -> Self {
        match persistence::read_json::<HighScores>(path) {
            Some(mut scores) => {
                scores.sort();
                scores.entries.truncate(MAX_HIGH_SCORES);
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            None => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        }
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        persistence::save_json(path, self)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}
