//! Space Explorer - An arcade asteroid shooter in 3D
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, game state)
//! - `session`: Glue between the simulation and its outside collaborators
//! - `audio`: Sound effect routing
//! - `highscores`: Leaderboard and score persistence
//! - `settings`: Player preferences

pub mod audio;
pub mod highscores;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::{HighScores, ScoreStore};
pub use session::Session;
pub use settings::Settings;

use glam::Vec3;

/// Game configuration constants
///
/// Distances are world units; speeds are world units per nominal tick.
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Camera defaults
    pub const CAMERA_POSITION: [f32; 3] = [0.0, 10.0, 20.0];
    pub const CAMERA_FOV_DEGREES: f32 = 75.0;
    /// Keeps the ship this far inside the visible frustum edge
    pub const VIEW_PADDING: f32 = 0.5;

    /// Ship defaults
    pub const SHIP_SPEED: f32 = 0.3;
    pub const SHIP_RADIUS: f32 = 1.0;
    /// Roll applied while strafing (radians)
    pub const SHIP_TILT: f32 = 0.3;

    /// Projectile defaults - fired down -z, away from the camera
    pub const PROJECTILE_SPEED: f32 = 0.8;
    pub const PROJECTILE_RADIUS: f32 = 2.0;
    /// Projectiles at or beyond this depth are discarded
    pub const PROJECTILE_CUTOFF_Z: f32 = -30.0;

    /// Obstacle spawn cylinder
    pub const SPAWN_RADIUS: f32 = 40.0;
    pub const SPAWN_MIN_Z: f32 = -60.0;
    pub const SPAWN_MAX_Z: f32 = -20.0;
    /// Obstacles past this depth have flown by the player
    pub const OBSTACLE_PASS_Z: f32 = 10.0;
    pub const OBSTACLE_MIN_SIZE: f32 = 0.5;
    pub const OBSTACLE_SIZE_RANGE: f32 = 1.0;
    /// Number of distinct obstacle textures
    pub const OBSTACLE_TEXTURES: u8 = 4;

    /// Added to every radius sum in hit tests (compensates for discrete steps)
    pub const COLLISION_SLACK: f32 = 1.0;
    /// Floor for any radius fed into a hit test
    pub const MIN_RADIUS: f32 = 0.01;

    /// Health
    pub const MAX_HEALTH: u8 = 100;
    pub const SHIP_HIT_DAMAGE: u8 = 3;
}

/// Point on a circle of radius `r` around the z axis at angle `theta`, at depth `z`
#[inline]
pub fn cylindrical_to_cartesian(r: f32, theta: f32, z: f32) -> Vec3 {
    Vec3::new(r * theta.cos(), r * theta.sin(), z)
}

/// Half extent of the visible frustum at `dist` for an opening angle `half_angle`
#[inline]
pub fn frustum_half_extent(dist: f32, half_angle: f32) -> f32 {
    dist * half_angle.tan()
}
