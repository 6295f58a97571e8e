//! Sphere-sphere hit tests
//!
//! Everything here is read-only: it inspects positions and returns a
//! decision. The obstacle pass applies the decision.

use glam::Vec3;

use super::state::Projectile;
use crate::consts::*;

/// What happens to one obstacle on one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleOutcome {
    /// Rammed the ship
    ShipHit,
    /// Destroyed by the projectile at this index of the live list
    ProjectileHit(usize),
    /// Flew past the player
    Passed,
    /// Keeps flying
    Unchanged,
}

/// True when two spheres overlap, widened by `COLLISION_SLACK`.
///
/// Radii below `MIN_RADIUS` (including negative or NaN) are raised to it first.
pub fn hit_test(pos_a: Vec3, radius_a: f32, pos_b: Vec3, radius_b: f32) -> bool {
    let reach = sanitize_radius(radius_a) + sanitize_radius(radius_b) + COLLISION_SLACK;
    pos_a.distance(pos_b) < reach
}

fn sanitize_radius(radius: f32) -> f32 {
    if radius.is_nan() { MIN_RADIUS } else { radius.max(MIN_RADIUS) }
}

/// Index of the first projectile in list order touching the obstacle
pub fn first_projectile_hit(
    obstacle_pos: Vec3,
    obstacle_size: f32,
    projectiles: &[Projectile],
) -> Option<usize> {
    projectiles
        .iter()
        .position(|p| hit_test(obstacle_pos, obstacle_size, p.position, PROJECTILE_RADIUS))
}

/// Classify an obstacle at its already-advanced position.
///
/// Checks run in priority order: ship, projectiles, pass-through.
pub fn classify(
    obstacle_pos: Vec3,
    obstacle_size: f32,
    ship_pos: Vec3,
    projectiles: &[Projectile],
) -> ObstacleOutcome {
    if hit_test(obstacle_pos, obstacle_size, ship_pos, SHIP_RADIUS) {
        return ObstacleOutcome::ShipHit;
    }
    if let Some(index) = first_projectile_hit(obstacle_pos, obstacle_size, projectiles) {
        return ObstacleOutcome::ProjectileHit(index);
    }
    if obstacle_pos.z > OBSTACLE_PASS_Z {
        return ObstacleOutcome::Passed;
    }
    ObstacleOutcome::Unchanged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bolt(x: f32, z: f32) -> Projectile {
        Projectile {
            position: Vec3::new(x, 0.0, z),
            velocity: Vec3::new(0.0, 0.0, -PROJECTILE_SPEED),
        }
    }

    #[test]
    fn test_hit_test_includes_slack() {
        // 1 + 1 + slack 1 = 3
        assert!(hit_test(Vec3::ZERO, 1.0, Vec3::new(2.9, 0.0, 0.0), 1.0));
        assert!(!hit_test(Vec3::ZERO, 1.0, Vec3::new(3.0, 0.0, 0.0), 1.0));
    }

    #[test]
    fn test_degenerate_radius_is_clamped() {
        assert!(!hit_test(Vec3::ZERO, -50.0, Vec3::new(1.5, 0.0, 0.0), -50.0));
        assert!(!hit_test(Vec3::ZERO, f32::NAN, Vec3::new(1.5, 0.0, 0.0), 0.0));
        assert!(hit_test(Vec3::ZERO, -1.0, Vec3::new(1.0, 0.0, 0.0), 0.0));
    }

    #[test]
    fn test_first_match_wins() {
        let obstacle = Vec3::new(0.0, 0.0, -10.0);
        // Index 1 is closer but index 0 comes first
        let projectiles = [bolt(2.5, -10.0), bolt(0.0, -10.0), bolt(50.0, -10.0)];
        assert_eq!(first_projectile_hit(obstacle, 1.0, &projectiles), Some(0));
        assert_eq!(first_projectile_hit(obstacle, 1.0, &projectiles[2..]), None);
    }

    #[test]
    fn test_ship_hit_beats_projectile_hit() {
        let projectiles = [bolt(0.0, 0.0)];
        assert_eq!(classify(Vec3::ZERO, 1.0, Vec3::ZERO, &projectiles), ObstacleOutcome::ShipHit);
    }

    #[test]
    fn test_projectile_hit_beats_pass() {
        let pos = Vec3::new(30.0, 0.0, 11.0);
        let projectiles = [bolt(30.0, 11.0)];
        assert_eq!(
            classify(pos, 1.0, Vec3::ZERO, &projectiles),
            ObstacleOutcome::ProjectileHit(0)
        );
        assert_eq!(classify(pos, 1.0, Vec3::ZERO, &[]), ObstacleOutcome::Passed);
    }

    #[test]
    fn test_unchanged_when_nothing_near() {
        let pos = Vec3::new(20.0, 20.0, -40.0);
        assert_eq!(classify(pos, 1.0, Vec3::ZERO, &[bolt(0.0, -5.0)]), ObstacleOutcome::Unchanged);
    }
}
