//! Procedural obstacle and star spawning
//!
//! Difficulty is a step function of survival time (see [`Tuning::bands`]).
//! Faster scrolling widens the minimum gap so every layout stays jumpable.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Obstacle, ObstacleKind, Star};
use crate::consts::*;
use crate::tuning::Tuning;

/// Effective minimum gap between obstacles at the given time and speed
pub fn min_gap(tuning: &Tuning, elapsed: f32, speed: f32) -> f32 {
    tuning.band_at(elapsed).min_gap + speed * tuning.gap_speed_factor
}

/// Maybe spawn an obstacle at the right edge. Returns the new obstacle's id.
pub fn spawn_obstacle(state: &mut GameState) -> Option<u32> {
    let elapsed = state.elapsed();
    let band = state.tuning.band_at(elapsed);
    let gap = min_gap(&state.tuning, elapsed, state.speed);

    let room = match state.obstacles.last() {
        Some(last) => state.view_width - last.pos.x > gap,
        None => true,
    };
    if !room || state.rng.random::<f32>() >= band.spawn_chance {
        return None;
    }

    let kind = if elapsed > state.tuning.air_after_secs
        && state.rng.random::<f32>() > state.tuning.air_draw_threshold
    {
        ObstacleKind::Air
    } else {
        ObstacleKind::Ground
    };
    let size = match kind {
        ObstacleKind::Air => AIR_OBSTACLE_SIZE,
        ObstacleKind::Ground => {
            GROUND_OBSTACLE_MIN_SIZE
                + state.rng.random::<f32>() * (GROUND_OBSTACLE_MAX_SIZE - GROUND_OBSTACLE_MIN_SIZE)
        }
    };

    let id = state.next_entity_id();
    let x = state.view_width + SPAWN_OFFSET;
    state
        .obstacles
        .push(Obstacle::new(id, x, size, kind, state.ground_y));
    log::debug!("Spawned {kind:?} obstacle {id} (size {size:.0}) at t={elapsed:.1}s");
    Some(id)
}

/// Maybe spawn a star when none is collectible. Returns the new star's id.
pub fn spawn_star(state: &mut GameState) -> Option<u32> {
    if state.has_active_star() || state.rng.random::<f32>() >= state.tuning.star_chance {
        return None;
    }

    let altitude = STAR_MIN_ALTITUDE + state.rng.random::<f32>() * STAR_ALTITUDE_RANGE;
    let id = state.next_entity_id();
    state.stars.push(Star {
        id,
        pos: Vec2::new(state.view_width + SPAWN_OFFSET, state.ground_y - altitude),
        width: STAR_SIZE,
        height: STAR_SIZE,
        active: true,
        rotation: 0.0,
    });
    log::debug!("Spawned star {id}");
    Some(id)
}
