//! High score leaderboard system
//!
//! Keeps each player's best score and the top 10 across players. The
//! [`ScoreStore`] trait is what the session talks to at game start and game
//! over; [`FileScoreStore`] persists the board as JSON.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Errors from a score backend
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored leaderboard could not be parsed or written
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where finished runs are reported and best scores come from
pub trait ScoreStore {
    /// Record a finished run. Only ever raises the player's best.
    fn report_score(&mut self, player: &str, score: u64) -> Result<(), StoreError>;

    /// Best score for `player`, 0 if unknown
    fn fetch_high_score(&self, player: &str) -> Result<u64, StoreError>;
}

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub player: String,
    pub score: u64,
}

/// High score leaderboard
///
/// `entries` is the top 10 across players, sorted descending by score.
/// `bests` keeps every player's personal best, including players who have
/// since been pushed off the top 10.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
    #[serde(default)]
    pub bests: BTreeMap<String, u64>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Best recorded score for a player
    pub fn best_for(&self, player: &str) -> Option<u64> {
        self.bests.get(player).copied()
    }

    /// Position of a player on the top 10 (1-indexed)
    pub fn rank_of(&self, player: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.player == player).map(|i| i + 1)
    }

    /// Submit a player's score.
    ///
    /// A player appears at most once; a score at or below their best is ignored.
    /// Returns true if the player's best was raised.
    pub fn add_score(&mut self, player: &str, score: u64) -> bool {
        if score == 0 || self.best_for(player).is_some_and(|best| score <= best) {
            return false;
        }
        self.bests.insert(player.to_string(), score);

        self.entries.retain(|e| e.player != player);
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(
            pos,
            HighScoreEntry {
                player: player.to_string(),
                score,
            },
        );

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);
        true
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// [`HighScores::add_score`] plus a log line when the best moves
    fn record(&mut self, player: &str, score: u64) -> bool {
        if !self.add_score(player, score) {
            return false;
        }
        match self.rank_of(player) {
            Some(rank) => log::info!("{} placed #{} with {}", player, rank, score),
            None => log::info!("New personal best for {}: {}", player, score),
        }
        true
    }

    /// Boards written before `bests` existed only have the top 10
    fn backfill_bests(&mut self) {
        for entry in &self.entries {
            let best = self.bests.entry(entry.player.clone()).or_insert(0);
            *best = (*best).max(entry.score);
        }
    }
}

/// In-memory store
impl ScoreStore for HighScores {
    fn report_score(&mut self, player: &str, score: u64) -> Result<(), StoreError> {
        self.record(player, score);
        Ok(())
    }

    fn fetch_high_score(&self, player: &str) -> Result<u64, StoreError> {
        Ok(self.best_for(player).unwrap_or(0))
    }
}

/// Leaderboard persisted to a JSON file
#[derive(Debug)]
pub struct FileScoreStore {
    path: PathBuf,
    board: HighScores,
}

impl FileScoreStore {
    /// Load the board at `path`. A missing file is an empty board.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let board = match std::fs::read_to_string(&path) {
            Ok(json) => {
                let mut board: HighScores = serde_json::from_str(&json)?;
                board.backfill_bests();
                log::info!("Loaded {} high scores", board.entries.len());
                board
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high scores found, starting fresh");
                HighScores::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, board })
    }

    /// Like [`FileScoreStore::open`], but an unreadable file starts an empty board
    pub fn open_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::open(path).unwrap_or_else(|e| {
            log::warn!("Could not load high scores from {}: {}", path.display(), e);
            Self {
                path: path.to_path_buf(),
                board: HighScores::new(),
            }
        })
    }

    pub fn board(&self) -> &HighScores {
        &self.board
    }

    fn save(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.board)?;
        std::fs::write(&self.path, json)?;
        log::info!("High scores saved ({} entries)", self.board.entries.len());
        Ok(())
    }
}

impl ScoreStore for FileScoreStore {
    fn report_score(&mut self, player: &str, score: u64) -> Result<(), StoreError> {
        if self.board.record(player, score) {
            self.save()?;
        }
        Ok(())
    }

    fn fetch_high_score(&self, player: &str) -> Result<u64, StoreError> {
        self.board.fetch_high_score(player)
    }
}
