//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (pool slot order, projectile fire order)
//! - No rendering, audio or persistence dependencies

pub mod collision;
pub mod difficulty;
pub mod input;
pub mod obstacle;
pub mod pause;
pub mod projectile;
pub mod ship;
pub mod state;
pub mod tick;
pub mod tracker;

pub use collision::{ObstacleOutcome, hit_test};
pub use difficulty::{DifficultyTier, tier_for_score};
pub use input::{Action, Control, InputEvent, InputState, TickInput};
pub use pause::{GamePhase, PauseController};
pub use ship::Camera;
pub use state::{
    GameEvent, GameState, Obstacle, Projectile, Ship, ShipModel, ShipPose, Snapshot, TextureId,
};
pub use tick::tick;
pub use tracker::{HealthTracker, HitOutcome, ScoreTracker};
