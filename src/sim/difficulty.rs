//! Score-driven difficulty tiers

use serde::{Deserialize, Serialize};

/// Obstacle speed and pool size for a band of scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTier {
    /// Depth added to every obstacle per tick
    pub speed: f32,
    /// Obstacle pool cardinality
    pub count: usize,
}

/// Score thresholds, highest first
const TIERS: [(u64, DifficultyTier); 6] = [
    (500, DifficultyTier { speed: 0.6, count: 80 }),
    (400, DifficultyTier { speed: 0.5, count: 70 }),
    (300, DifficultyTier { speed: 0.4, count: 50 }),
    (200, DifficultyTier { speed: 0.3, count: 40 }),
    (100, DifficultyTier { speed: 0.2, count: 30 }),
    (0, DifficultyTier { speed: 0.1, count: 15 }),
];

/// Highest tier whose threshold `score` meets
pub fn tier_for_score(score: u64) -> DifficultyTier {
    TIERS
        .iter()
        .find(|(threshold, _)| score >= *threshold)
        .map(|&(_, tier)| tier)
        .unwrap_or(TIERS[TIERS.len() - 1].1)
}
