//! Game state and core simulation types
//!
//! Everything the simulation owns between ticks lives in [`GameState`].
//! Renderers and audio only ever see the [`Snapshot`] emitted by a tick.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::{DifficultyTier, tier_for_score};
use super::obstacle;
use super::pause::PauseController;
use super::ship::Camera;
use super::tracker::{HealthTracker, ScoreTracker};
use crate::consts::*;

/// Selectable ship models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShipModel {
    #[default]
    Falcon,
    Destroyer,
    /// Cannon sits off to the lower left of the hull
    Interceptor,
}

impl ShipModel {
    pub const ALL: [ShipModel; 3] = [
        ShipModel::Falcon,
        ShipModel::Destroyer,
        ShipModel::Interceptor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShipModel::Falcon => "Falcon",
            ShipModel::Destroyer => "Destroyer",
            ShipModel::Interceptor => "Interceptor",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "falcon" => Some(ShipModel::Falcon),
            "destroyer" => Some(ShipModel::Destroyer),
            "interceptor" => Some(ShipModel::Interceptor),
            _ => None,
        }
    }

    /// Where projectiles leave the ship, relative to its origin
    pub fn cannon_offset(&self) -> Vec3 {
        match self {
            ShipModel::Interceptor => Vec3::new(-4.0, -1.0, 0.0),
            ShipModel::Falcon | ShipModel::Destroyer => Vec3::ZERO,
        }
    }
}

/// Position and roll of the ship as seen by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipPose {
    pub position: Vec3,
    /// Roll around the forward axis (radians)
    pub tilt: f32,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub position: Vec3,
    pub tilt: f32,
    pub model: ShipModel,
}

impl Ship {
    pub fn new(model: ShipModel) -> Self {
        Self {
            position: Vec3::ZERO,
            tilt: 0.0,
            model,
        }
    }

    pub fn pose(&self) -> ShipPose {
        ShipPose {
            position: self.position,
            tilt: self.tilt,
        }
    }
}

/// A laser bolt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub position: Vec3,
    pub velocity: Vec3,
}

/// Opaque handle to an obstacle texture, resolved by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureId(pub u8);

/// An asteroid occupying one pool slot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub position: Vec3,
    /// Collision radius, also the render scale
    pub size: f32,
    pub texture: TextureId,
}

/// Things that happened during a tick, for audio and UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A projectile was fired
    LaserFired,
    /// A projectile destroyed the obstacle in `slot`
    ObstacleDestroyed { slot: usize },
    /// The obstacle in `slot` rammed the ship
    ShipHit { slot: usize, health: u8 },
    /// The obstacle in `slot` flew past the player
    ObstaclePassed { slot: usize },
    /// Score crossed into a new difficulty tier
    TierChanged { tier: DifficultyTier },
    /// Health reached zero
    GameOver { score: u64 },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn RNG, seeded from `seed`
    pub rng: Pcg32,
    /// Running / Paused / GameOver
    pub pause: PauseController,
    pub score: ScoreTracker,
    pub health: HealthTracker,
    /// `None` until the ship has been placed in the scene
    pub ship: Option<Ship>,
    /// `None` while the camera is unknown; ship movement is then unclamped
    pub camera: Option<Camera>,
    /// Ship displacement per tick along each pressed axis
    pub ship_speed: f32,
    /// Live projectiles (order matters for hit resolution)
    pub projectiles: Vec<Projectile>,
    /// Obstacle pool, one entry per slot
    pub obstacles: Vec<Obstacle>,
    /// Tier the pool is currently sized for
    pub tier: DifficultyTier,
    /// Simulated tick counter (paused ticks are not counted)
    pub time_ticks: u64,
    /// Events raised since the last snapshot
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_ship(seed, ShipModel::default(), SHIP_SPEED)
    }

    /// Create a new game state flying the given ship
    pub fn with_ship(seed: u64, model: ShipModel, ship_speed: f32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let tier = tier_for_score(0);
        let obstacles = obstacle::init_pool(&mut rng, tier);

        Self {
            seed,
            rng,
            pause: PauseController::default(),
            score: ScoreTracker::default(),
            health: HealthTracker::default(),
            ship: Some(Ship::new(model)),
            camera: Some(Camera::default()),
            ship_speed,
            projectiles: Vec::new(),
            obstacles,
            tier,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Start over with a fresh seed, keeping ship model, speed and camera
    pub fn reset(&mut self, seed: u64) {
        let model = self.ship.as_ref().map(|s| s.model).unwrap_or_default();
        let camera = self.camera;
        *self = Self::with_ship(seed, model, self.ship_speed);
        self.camera = camera;
    }

    pub fn is_game_over(&self) -> bool {
        self.pause.is_game_over()
    }

    /// Read-only view of the current state, carrying any pending events
    pub fn snapshot(&mut self) -> Snapshot {
        Snapshot {
            ship: self.ship.as_ref().map(Ship::pose),
            projectiles: self.projectiles.clone(),
            obstacles: self.obstacles.clone(),
            score: self.score.score(),
            health: self.health.health(),
            tier: self.tier,
            paused: self.pause.is_paused(),
            game_over: self.pause.is_game_over(),
            events: std::mem::take(&mut self.events),
        }
    }
}

/// Immutable per-tick output for the renderer and audio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub ship: Option<ShipPose>,
    pub projectiles: Vec<Projectile>,
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    pub health: u8,
    pub tier: DifficultyTier,
    pub paused: bool,
    pub game_over: bool,
    pub events: Vec<GameEvent>,
}
