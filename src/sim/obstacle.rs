//! Obstacle pool: spawning, advancing and respawning
//!
//! The pool has a fixed number of slots. Obstacles are never removed;
//! a destroyed, crashed or missed obstacle is respawned in place.

use std::ops::ControlFlow;

use glam::Vec3;
use rand::Rng;

use super::collision::{ObstacleOutcome, classify};
use super::difficulty::DifficultyTier;
use super::state::{Obstacle, Projectile, TextureId};
use crate::consts::*;
use crate::cylindrical_to_cartesian;

/// Random point in the spawn cylinder, ahead of the player
pub fn spawn_position<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let theta = rng.random::<f32>() * std::f32::consts::TAU;
    let r = rng.random::<f32>() * SPAWN_RADIUS;
    let z = rng.random::<f32>() * (SPAWN_MAX_Z - SPAWN_MIN_Z) + SPAWN_MIN_Z;
    cylindrical_to_cartesian(r, theta, z)
}

/// A fresh obstacle with random position, size and texture
pub fn spawn<R: Rng + ?Sized>(rng: &mut R) -> Obstacle {
    let position = spawn_position(rng);
    let size = rng.random::<f32>() * OBSTACLE_SIZE_RANGE + OBSTACLE_MIN_SIZE;
    let texture = TextureId(rng.random_range(0..OBSTACLE_TEXTURES));
    Obstacle {
        position,
        size,
        texture,
    }
}

/// Build a pool of exactly `tier.count` obstacles
pub fn init_pool<R: Rng + ?Sized>(rng: &mut R, tier: DifficultyTier) -> Vec<Obstacle> {
    (0..tier.count).map(|_| spawn(rng)).collect()
}

/// Grow or shrink the pool to `count` slots. Existing slots keep their obstacles.
pub fn resize_pool<R: Rng + ?Sized>(pool: &mut Vec<Obstacle>, rng: &mut R, count: usize) {
    if pool.len() > count {
        pool.truncate(count);
    } else {
        let missing = count - pool.len();
        pool.extend((0..missing).map(|_| spawn(rng)));
    }
}

/// Move the obstacle in a slot to a new random position. Size and texture stay.
fn respawn<R: Rng + ?Sized>(obstacle: &mut Obstacle, rng: &mut R) {
    obstacle.position = spawn_position(rng);
}

/// Advance every obstacle toward the player by `speed * scale` and resolve it.
///
/// Each obstacle gets exactly one outcome per call. A projectile that destroys
/// an obstacle is removed from `projectiles` before the next obstacle is
/// checked, so one projectile never destroys two obstacles.
///
/// `on_outcome` sees every resolved slot in pool order. Returning
/// `ControlFlow::Break` stops the pass; slots after it are left untouched.
pub fn advance<R, F>(
    pool: &mut [Obstacle],
    rng: &mut R,
    speed: f32,
    scale: f32,
    ship_pos: Vec3,
    projectiles: &mut Vec<Projectile>,
    mut on_outcome: F,
) where
    R: Rng + ?Sized,
    F: FnMut(usize, ObstacleOutcome) -> ControlFlow<()>,
{
    for (slot, obstacle) in pool.iter_mut().enumerate() {
        let mut next = obstacle.position;
        next.z += speed * scale;

        let outcome = classify(next, obstacle.size, ship_pos, projectiles);
        match outcome {
            ObstacleOutcome::ShipHit | ObstacleOutcome::Passed => respawn(obstacle, rng),
            ObstacleOutcome::ProjectileHit(index) => {
                projectiles.remove(index);
                respawn(obstacle, rng);
            }
            ObstacleOutcome::Unchanged => obstacle.position = next,
        }

        if on_outcome(slot, outcome).is_break() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use crate::sim::difficulty::tier_for_score;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(1234)
    }

    fn parked(position: Vec3) -> Obstacle {
        Obstacle {
            position,
            size: 1.0,
            texture: TextureId(0),
        }
    }

    fn bolt(position: Vec3) -> Projectile {
        Projectile {
            position,
            velocity: Vec3::new(0.0, 0.0, -PROJECTILE_SPEED),
        }
    }

    fn in_spawn_band(p: Vec3) -> bool {
        let lateral = (p.x * p.x + p.y * p.y).sqrt();
        lateral <= SPAWN_RADIUS + 1e-3 && p.z >= SPAWN_MIN_Z && p.z < SPAWN_MAX_Z
    }

    #[test]
    fn test_spawn_inside_cylinder() {
        let mut rng = rng();
        for _ in 0..500 {
            let o = spawn(&mut rng);
            assert!(in_spawn_band(o.position));
            assert!(o.size >= OBSTACLE_MIN_SIZE);
            assert!(o.size < OBSTACLE_MIN_SIZE + OBSTACLE_SIZE_RANGE);
            assert!(o.texture.0 < OBSTACLE_TEXTURES);
        }
    }

    #[test]
    fn test_init_pool_matches_tier() {
        let mut rng = rng();
        assert_eq!(init_pool(&mut rng, tier_for_score(0)).len(), 15);
        assert_eq!(init_pool(&mut rng, tier_for_score(500)).len(), 80);
    }

    #[test]
    fn test_resize_pool() {
        let mut rng = rng();
        let mut pool = init_pool(&mut rng, tier_for_score(0));
        let first = pool[0];
        resize_pool(&mut pool, &mut rng, 30);
        assert_eq!(pool.len(), 30);
        assert_eq!(pool[0], first);
        resize_pool(&mut pool, &mut rng, 10);
        assert_eq!(pool.len(), 10);
        assert_eq!(pool[0], first);
    }

    #[test]
    fn test_unchanged_obstacle_moves_toward_player() {
        let mut rng = rng();
        let mut pool = vec![parked(Vec3::new(30.0, 0.0, -40.0))];
        let mut projectiles = Vec::new();
        let mut seen = Vec::new();
        advance(&mut pool, &mut rng, 0.2, 1.0, Vec3::ZERO, &mut projectiles, |slot, outcome| {
            seen.push((slot, outcome));
            ControlFlow::Continue(())
        });
        assert_eq!(seen, vec![(0, ObstacleOutcome::Unchanged)]);
        assert!((pool[0].position.z - -39.8).abs() < 1e-5);
    }

    #[test]
    fn test_ship_hit_respawns_and_keeps_projectiles() {
        let mut rng = rng();
        let mut pool = vec![parked(Vec3::new(0.0, 0.0, -0.1))];
        let mut projectiles = vec![bolt(Vec3::new(0.0, 0.0, -0.1))];
        let mut seen = Vec::new();
        advance(&mut pool, &mut rng, 0.1, 1.0, Vec3::ZERO, &mut projectiles, |_, outcome| {
            seen.push(outcome);
            ControlFlow::Continue(())
        });
        assert_eq!(seen, vec![ObstacleOutcome::ShipHit]);
        assert_eq!(projectiles.len(), 1);
        assert!(in_spawn_band(pool[0].position));
        assert_eq!(pool[0].size, 1.0);
    }

    #[test]
    fn test_projectile_consumed_once() {
        let mut rng = rng();
        // Two obstacles both within reach of the single projectile
        let mut pool = vec![
            parked(Vec3::new(20.0, 0.0, -15.0)),
            parked(Vec3::new(21.0, 0.0, -15.0)),
        ];
        let mut projectiles = vec![bolt(Vec3::new(20.5, 0.0, -15.0))];
        let mut seen = Vec::new();
        advance(&mut pool, &mut rng, 0.0, 1.0, Vec3::ZERO, &mut projectiles, |_, outcome| {
            seen.push(outcome);
            ControlFlow::Continue(())
        });
        assert_eq!(seen, vec![ObstacleOutcome::ProjectileHit(0), ObstacleOutcome::Unchanged]);
        assert!(projectiles.is_empty());
        assert_eq!(pool[1].position, Vec3::new(21.0, 0.0, -15.0));
    }

    #[test]
    fn test_passed_obstacle_respawns() {
        let mut rng = rng();
        let mut pool = vec![parked(Vec3::new(30.0, 0.0, 9.95))];
        let mut projectiles = Vec::new();
        let mut seen = Vec::new();
        advance(&mut pool, &mut rng, 0.1, 1.0, Vec3::ZERO, &mut projectiles, |_, outcome| {
            seen.push(outcome);
            ControlFlow::Continue(())
        });
        assert_eq!(seen, vec![ObstacleOutcome::Passed]);
        assert!(in_spawn_band(pool[0].position));
    }

    #[test]
    fn test_break_leaves_remaining_slots() {
        let mut rng = rng();
        let far = Vec3::new(30.0, 0.0, -40.0);
        let mut pool = vec![parked(far), parked(far)];
        let mut projectiles = Vec::new();
        let mut calls = 0;
        advance(&mut pool, &mut rng, 0.5, 1.0, Vec3::ZERO, &mut projectiles, |_, _| {
            calls += 1;
            ControlFlow::Break(())
        });
        assert_eq!(calls, 1);
        assert_eq!(pool[0].position.z, -39.5);
        assert_eq!(pool[1].position, far);
    }
}
