//! Fixed timestep simulation tick
//!
//! One call advances the game by one frame in a fixed order:
//! pause gate, ship, firing, projectiles, obstacles (collisions and
//! scoring), difficulty, snapshot.

use std::ops::ControlFlow;

use glam::Vec3;

use super::collision::ObstacleOutcome;
use super::difficulty::tier_for_score;
use super::input::{Action, TickInput};
use super::state::{GameEvent, GameState, Snapshot};
use super::{obstacle, projectile};
use crate::consts::SIM_DT;

/// Advance the game state by one timestep and return what the renderer should draw
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Snapshot {
    // Replay presses in arrival order. A fire counts only if the game is
    // running at that point; presses while paused are dropped, not queued.
    let mut shots = 0u32;
    for action in &input.actions {
        match action {
            Action::PauseToggle => {
                state.pause.toggle();
            }
            Action::Resume => {
                state.pause.resume();
            }
            Action::Fire if state.pause.is_running() => shots += 1,
            Action::Fire => log::debug!("Ignoring fire press while {:?}", state.pause.phase()),
        }
    }

    // Don't tick if paused or game over
    if !state.pause.is_running() {
        // Shots taken before a pause in this window leave from where the ship is
        if shots > 0 {
            if let Some(ship) = state.ship.as_ref() {
                let (origin, offset) = (ship.position, ship.model.cannon_offset());
                fire(state, origin, offset, shots);
            }
        }
        return state.snapshot();
    }

    // Nothing to fly yet; try again next tick
    let Some(ship) = state.ship.as_mut() else {
        log::debug!("Ship not placed yet, skipping tick");
        return state.snapshot();
    };

    let scale = dt / SIM_DT;
    state.time_ticks += 1;

    let pose = ship.advance(input, state.ship_speed, scale, state.camera.as_ref());
    let offset = ship.model.cannon_offset();
    fire(state, pose.position, offset, shots);

    projectile::advance(&mut state.projectiles, scale);

    let GameState {
        rng,
        pause,
        score,
        health,
        projectiles,
        obstacles,
        tier,
        events,
        ..
    } = state;

    obstacle::advance(
        obstacles,
        rng,
        tier.speed,
        scale,
        pose.position,
        projectiles,
        |slot, outcome| match outcome {
            ObstacleOutcome::ShipHit => {
                let hit = health.on_ship_hit();
                log::debug!("Obstacle {} hit the ship, health {}", slot, hit.health);
                events.push(GameEvent::ShipHit { slot, health: hit.health });
                if hit.depleted && pause.end() {
                    let final_score = score.score();
                    log::info!("Game over with score {}", final_score);
                    events.push(GameEvent::GameOver { score: final_score });
                    return ControlFlow::Break(());
                }
                ControlFlow::Continue(())
            }
            ObstacleOutcome::ProjectileHit(_) => {
                let new_score = score.on_obstacle_destroyed();
                log::debug!("Obstacle {} destroyed, score {}", slot, new_score);
                events.push(GameEvent::ObstacleDestroyed { slot });
                ControlFlow::Continue(())
            }
            ObstacleOutcome::Passed => {
                events.push(GameEvent::ObstaclePassed { slot });
                ControlFlow::Continue(())
            }
            ObstacleOutcome::Unchanged => ControlFlow::Continue(()),
        },
    );

    // Game over freezes the field as it is
    if state.pause.is_running() {
        let next_tier = tier_for_score(state.score.score());
        if next_tier != state.tier {
            log::info!(
                "Difficulty now speed {} with {} obstacles (score {})",
                next_tier.speed,
                next_tier.count,
                state.score.score()
            );
            state.tier = next_tier;
            state.events.push(GameEvent::TierChanged { tier: next_tier });
        }
        obstacle::resize_pool(&mut state.obstacles, &mut state.rng, state.tier.count);
    }

    state.snapshot()
}

fn fire(state: &mut GameState, origin: Vec3, offset: Vec3, shots: u32) {
    for _ in 0..shots {
        state.projectiles.push(projectile::spawn(origin, offset));
        state.events.push(GameEvent::LaserFired);
    }
}
