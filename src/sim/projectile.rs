//! Projectile spawning and flight

use glam::Vec3;

use super::state::Projectile;
use crate::consts::*;

/// Fire a projectile from `origin` shifted by the ship's cannon `offset`.
///
/// Velocity is always straight down -z, regardless of ship motion.
pub fn spawn(origin: Vec3, offset: Vec3) -> Projectile {
    Projectile {
        position: origin + offset,
        velocity: Vec3::new(0.0, 0.0, -PROJECTILE_SPEED),
    }
}

/// Move every projectile by its velocity, then drop the ones past the cutoff
pub fn advance(projectiles: &mut Vec<Projectile>, scale: f32) {
    for projectile in projectiles.iter_mut() {
        projectile.position += projectile.velocity * scale;
    }
    projectiles.retain(|p| p.position.z > PROJECTILE_CUTOFF_Z);
}
