//! Game settings and preferences
//!
//! Stored as JSON next to the high score file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::SHIP_SPEED;
use crate::sim::ShipModel;

/// Settings errors
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name shown on the leaderboard
    pub player: String,
    /// Ship flown in new sessions
    pub ship: ShipModel,
    /// Ship displacement per tick
    pub ship_speed: f32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    /// Fixed RNG seed for reproducible runs; random when unset
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player: "pilot".to_string(),
            ship: ShipModel::default(),
            ship_speed: SHIP_SPEED,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Bring out-of-range values back into range
    pub fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        if !(self.ship_speed.is_finite() && self.ship_speed > 0.0) {
            log::warn!("Ship speed {} is invalid, using {}", self.ship_speed, SHIP_SPEED);
            self.ship_speed = SHIP_SPEED;
        }
        if self.player.trim().is_empty() {
            self.player = Self::default().player;
        }
        self
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        Ok(settings.sanitized())
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }
}
