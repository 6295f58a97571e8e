//! Ship movement and viewport clamping

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::input::TickInput;
use super::state::{Ship, ShipPose};
use crate::consts::*;
use crate::frustum_half_extent;

/// The scene camera, looking down -z
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    /// Vertical field of view (degrees)
    pub fov_degrees: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::from_array(CAMERA_POSITION),
            fov_degrees: CAMERA_FOV_DEGREES,
        }
    }
}

impl Camera {
    /// Half width and half height the ship may occupy at `depth`.
    ///
    /// `None` when the camera is degenerate (behind the ship, or a bad fov);
    /// callers then skip clamping.
    pub fn clamp_extents(&self, depth: f32) -> Option<(f32, f32)> {
        let fov = self.fov_degrees.to_radians();
        let dist = self.position.z - depth;
        if !fov.is_finite() || !dist.is_finite() || fov <= 0.0 || dist <= 0.0 {
            return None;
        }

        // Horizontal extent uses fov/1.5 to account for the wide aspect
        let half_width = frustum_half_extent(dist, fov / 1.5) - VIEW_PADDING;
        let half_height = frustum_half_extent(dist, fov / 2.0) - VIEW_PADDING;
        let usable = half_width.is_finite() && half_height.is_finite();
        if !usable || half_width < 0.0 || half_height < 0.0 {
            return None;
        }
        Some((half_width, half_height))
    }
}

/// Roll for the current strafe input; snaps, no easing
pub fn tilt_for(input: &TickInput) -> f32 {
    // Left is checked first, so it wins when both are held
    if input.left {
        -SHIP_TILT
    } else if input.right {
        SHIP_TILT
    } else {
        0.0
    }
}

impl Ship {
    /// Move the ship by one tick of input, clamped to the visible area.
    ///
    /// `scale` is `dt / SIM_DT`, so a nominal tick moves exactly `speed`.
    /// Diagonals are not normalized.
    pub fn advance(
        &mut self,
        input: &TickInput,
        speed: f32,
        scale: f32,
        camera: Option<&Camera>,
    ) -> ShipPose {
        let step = speed * scale;
        let mut pos = self.position;

        if input.left {
            pos.x -= step;
        }
        if input.right {
            pos.x += step;
        }
        if input.up {
            pos.y += step;
        }
        if input.down {
            pos.y -= step;
        }

        match camera.and_then(|c| c.clamp_extents(pos.z)) {
            Some((half_width, half_height)) => {
                pos.x = pos.x.clamp(-half_width, half_width);
                pos.y = pos.y.clamp(-half_height, half_height);
            }
            None => log::debug!("No usable camera, ship movement unclamped"),
        }

        self.position = pos;
        self.tilt = tilt_for(input);
        self.pose()
    }
}
