//! Running / Paused / GameOver state machine
//!
//! GameOver is terminal; only a full session reset leaves it.

use serde::{Deserialize, Serialize};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Running,
    /// Simulation frozen, entity state preserved
    Paused,
    /// Run ended
    GameOver,
}

/// Gate deciding whether a tick advances the simulation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauseController {
    phase: GamePhase,
}

impl PauseController {
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Pause-toggle input: Running <-> Paused
    pub fn toggle(&mut self) -> GamePhase {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            GamePhase::GameOver => GamePhase::GameOver,
        };
        self.phase
    }

    /// Explicit resume action (pause overlay click)
    pub fn resume(&mut self) -> GamePhase {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Running;
        }
        self.phase
    }

    /// Health ran out. Returns true on the transition, false if already over.
    pub fn end(&mut self) -> bool {
        if self.phase == GamePhase::GameOver {
            return false;
        }
        self.phase = GamePhase::GameOver;
        true
    }
}
