//! Score and health bookkeeping

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_HEALTH, SHIP_HIT_DAMAGE};

/// Running score; only projectile kills add to it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTracker {
    score: u64,
}

impl ScoreTracker {
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Credit one destroyed obstacle, returning the new score
    pub fn on_obstacle_destroyed(&mut self) -> u64 {
        self.score = self.score.saturating_add(1);
        self.score
    }
}

/// Result of a ship hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitOutcome {
    pub health: u8,
    /// True only for the hit that drained the last health point
    pub depleted: bool,
}

/// Ship health in `0..=MAX_HEALTH`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthTracker {
    health: u8,
}

impl Default for HealthTracker {
    fn default() -> Self {
        Self { health: MAX_HEALTH }
    }
}

impl HealthTracker {
    pub fn health(&self) -> u8 {
        self.health
    }

    pub fn is_depleted(&self) -> bool {
        self.health == 0
    }

    /// Apply one obstacle hit. Hits after depletion change nothing.
    pub fn on_ship_hit(&mut self) -> HitOutcome {
        if self.is_depleted() {
            return HitOutcome {
                health: 0,
                depleted: false,
            };
        }
        self.health = self.health.saturating_sub(SHIP_HIT_DAMAGE);
        HitOutcome {
            health: self.health,
            depleted: self.health == 0,
        }
    }
}
