//! Particle bursts
//!
//! Purely visual, but drawn from the run's RNG so replays stay identical.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Particle};
use crate::consts::*;

/// Radial burst of particles (crash, star pickup)
pub fn explosion(state: &mut GameState, at: Vec2, color: &str, count: usize) {
    for _ in 0..count {
        let vel = Vec2::new(
            (state.rng.random::<f32>() - 0.5) * 12.0,
            (state.rng.random::<f32>() - 0.5) * 12.0,
        );
        let size = state.rng.random::<f32>() * 6.0 + 2.0;
        state.particles.push(Particle {
            pos: at,
            vel,
            life: 1.0,
            color: color.to_owned(),
            size,
        });
    }
}

/// Small upward puff kicked up at the player's feet on take-off
pub fn jump_dust(state: &mut GameState, color: &str) {
    let feet_y = state.ground_y;
    for _ in 0..JUMP_PARTICLES {
        let x = PLAYER_X + (state.rng.random::<f32>() - 0.5) * 20.0;
        let vel = Vec2::new(
            (state.rng.random::<f32>() - 0.5) * 4.0,
            -(state.rng.random::<f32>() * 3.0),
        );
        let size = state.rng.random::<f32>() * 4.0 + 2.0;
        state.particles.push(Particle {
            pos: Vec2::new(x, feet_y),
            vel,
            life: 1.0,
            color: color.to_owned(),
            size,
        });
    }
}

/// Move particles, fade them, drop the dead ones
pub fn update_particles(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel;
        particle.life -= PARTICLE_DECAY;
    }
    particles.retain(|p| p.life > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_explosion_count_and_bounds() {
        let mut state = GameState::new(11, Tuning::default());
        explosion(&mut state, Vec2::new(50.0, 60.0), "#ff0000", 30);
        assert_eq!(state.particles.len(), 30);
        for p in &state.particles {
            assert_eq!(p.pos, Vec2::new(50.0, 60.0));
            assert!(p.vel.x.abs() <= 6.0 && p.vel.y.abs() <= 6.0);
            assert!((2.0..8.0).contains(&p.size));
            assert_eq!(p.life, 1.0);
            assert_eq!(p.color, "#ff0000");
        }
    }

    #[test]
    fn test_jump_dust_rises_from_feet() {
        let mut state = GameState::new(12, Tuning::default());
        jump_dust(&mut state, "#1c1917");
        assert_eq!(state.particles.len(), JUMP_PARTICLES);
        for p in &state.particles {
            assert_eq!(p.pos.y, state.ground_y);
            assert!((p.pos.x - PLAYER_X).abs() <= 10.0);
            assert!(p.vel.y <= 0.0);
        }
    }

    #[test]
    fn test_particles_decay_and_die() {
        let mut particles = vec![Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, -2.0),
            life: 0.05,
            color: "#000000".into(),
            size: 3.0,
        }];
        update_particles(&mut particles);
        assert_eq!(particles.len(), 1);
        assert_eq!(particles[0].pos, Vec2::new(1.0, -2.0));
        update_particles(&mut particles);
        update_particles(&mut particles);
        assert!(particles.is_empty());
    }

    #[test]
    fn test_empty_update_is_noop() {
        let mut particles = Vec::new();
        update_particles(&mut particles);
        assert!(particles.is_empty());
    }
}
