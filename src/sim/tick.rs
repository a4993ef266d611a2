//! Fixed timestep simulation tick
//!
//! One tick per displayed frame. Survival time is counted in ticks, so the
//! perceived pace follows the achieved frame rate.

use super::effects::{explosion, jump_dust, update_particles};
use super::spawn::{spawn_obstacle, spawn_star};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::theme;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump requested since the previous tick
    pub jump: bool,
}

/// Advance the game state by one fixed timestep.
///
/// Only runs while `phase` is [`GamePhase::Playing`]. Returns the phase after
/// the tick; notifications for the host are appended to `events`.
pub fn tick(
    state: &mut GameState,
    phase: GamePhase,
    input: &TickInput,
    now_ms: f64,
    events: &mut Vec<GameEvent>,
) -> GamePhase {
    if phase != GamePhase::Playing {
        return phase;
    }

    // Clock
    state.ticks += 1;
    let elapsed = state.elapsed();
    let theme = theme::resolve(elapsed);

    // Ease toward the target speed instead of snapping
    let target = state.tuning.target_speed(elapsed);
    let k = state.tuning.speed_smoothing;
    state.speed = state.speed * (1.0 - k) + target * k;
    state.scroll += state.speed;

    integrate_player(state);

    if input.jump && try_jump(state, &theme.colors.player) {
        events.push(GameEvent::Jumped);
    }

    let invincible = state.invincibility.is_active(now_ms);
    if invincible != state.invincible {
        state.invincible = invincible;
        events.push(GameEvent::InvincibilityChanged(invincible));
    }

    spawn_obstacle(state);
    spawn_star(state);

    if update_obstacles(state, invincible, &theme.colors.player) {
        log::info!("Crashed at {elapsed:.2}s");
        events.push(GameEvent::Crashed);
        events.push(GameEvent::PhaseChanged(GamePhase::GameOver));
        return GamePhase::GameOver;
    }

    if update_stars(state, now_ms) {
        events.push(GameEvent::StarCollected);
    }

    update_particles(&mut state.particles);

    if state.ticks % SCORE_SAMPLE_INTERVAL == 0 {
        events.push(GameEvent::ScoreSample(elapsed));
    }

    GamePhase::Playing
}

/// Gravity, then clamp to the ground line
fn integrate_player(state: &mut GameState) {
    let ground_y = state.ground_y;
    let player = &mut state.player;

    player.vy += state.tuning.gravity;
    player.y += player.vy;

    if player.y > ground_y {
        player.y = ground_y;
        player.vy = 0.0;
        player.airborne = false;
    }
}

/// Take off if grounded. Returns whether the jump happened.
fn try_jump(state: &mut GameState, dust_color: &str) -> bool {
    if state.player.airborne {
        return false;
    }
    state.player.vy = -state.tuning.jump_strength;
    state.player.airborne = true;
    jump_dust(state, dust_color);
    true
}

/// Scroll obstacles and test them against the player. Returns true on a fatal hit.
fn update_obstacles(state: &mut GameState, invincible: bool, player_color: &str) -> bool {
    let player_box = state.player.hitbox();
    let speed = state.speed;
    let ground_y = state.ground_y;
    let mut crashed = false;

    for obstacle in state.obstacles.iter_mut() {
        obstacle.pos.x -= speed;
        obstacle.settle(ground_y);

        if !invincible && obstacle.hitbox().overlaps(&player_box) {
            crashed = true;
            break;
        }

        if !obstacle.passed && obstacle.rect().right() < player_box.x {
            obstacle.passed = true;
        }
    }

    if crashed {
        explosion(state, player_box.origin(), player_color, CRASH_PARTICLES);
        return true;
    }

    state
        .obstacles
        .retain(|o| o.rect().right() >= -OBSTACLE_PRUNE_MARGIN);
    false
}

/// Scroll and spin stars, collect on contact. Returns true if one was collected.
fn update_stars(state: &mut GameState, now_ms: f64) -> bool {
    let player_box = state.player.hitbox();
    let speed = state.speed;
    let mut collected_at = None;

    for star in state.stars.iter_mut() {
        star.pos.x -= speed;
        star.rotation += STAR_ROTATION_STEP;

        if star.active && star.rect().overlaps(&player_box) {
            star.active = false;
            collected_at = Some(star.pos);
        }
    }

    state.stars.retain(|s| s.pos.x >= -STAR_PRUNE_MARGIN);

    match collected_at {
        Some(pos) => {
            state.invincibility.expires_at_ms = now_ms + state.tuning.star_duration_ms();
            explosion(state, pos, STAR_COLOR, COLLECT_PARTICLES);
            log::info!("Star collected, invincible until {:.0}", state.invincibility.expires_at_ms);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Obstacle, ObstacleKind, Particle, Star};
    use crate::tuning::Tuning;
    use glam::Vec2;

    const NOW: f64 = 1_000_000.0;

    fn playing_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Tuning::default());
        state.obstacles.clear();
        state
    }

    fn step(state: &mut GameState, jump: bool) -> (GamePhase, Vec<GameEvent>) {
        let mut events = Vec::new();
        let phase = tick(state, GamePhase::Playing, &TickInput { jump }, NOW, &mut events);
        (phase, events)
    }

    fn star_on_player(state: &mut GameState) {
        let id = state.next_entity_id();
        let y = state.ground_y - 50.0;
        state.stars.push(Star {
            id,
            // One tick of scrolling lands it across the player's hitbox
            pos: Vec2::new(PLAYER_X - 15.0 + state.speed, y),
            width: STAR_SIZE,
            height: STAR_SIZE,
            active: true,
            rotation: 0.0,
        });
    }

    #[test]
    fn test_only_ticks_while_playing() {
        let mut state = playing_state(1);
        let mut events = Vec::new();
        for phase in [GamePhase::Start, GamePhase::GameOver] {
            let result = tick(&mut state, phase, &TickInput { jump: true }, NOW, &mut events);
            assert_eq!(result, phase);
        }
        assert_eq!(state.ticks, 0);
        assert!(!state.player.airborne);
        assert!(events.is_empty());
    }

    #[test]
    fn test_speed_is_smoothed() {
        let mut state = playing_state(1);
        step(&mut state, false);
        let target = state.tuning.target_speed(SIM_DT);
        let expected = 5.0 * 0.95 + target * 0.05;
        assert!((state.speed - expected).abs() < 1e-5);
        assert!((state.scroll - state.speed).abs() < 1e-5);
    }

    #[test]
    fn test_jump_from_ground() {
        let mut state = playing_state(2);
        let (_, events) = step(&mut state, true);
        assert!(state.player.airborne);
        assert!(state.player.vy < 0.0);
        assert!(events.contains(&GameEvent::Jumped));
        assert_eq!(state.particles.len(), JUMP_PARTICLES);
    }

    #[test]
    fn test_second_jump_while_airborne_is_ignored() {
        let mut state = playing_state(3);
        step(&mut state, true);

        let mut twin = state.clone();
        let (_, events) = step(&mut state, true);
        step(&mut twin, false);

        assert!(!events.contains(&GameEvent::Jumped));
        assert_eq!(state.player, twin.player);
        // Only gravity acted on the velocity
        assert!((state.player.vy - (-13.0 + 0.6)).abs() < 1e-5);
    }

    #[test]
    fn test_player_never_below_ground() {
        let mut state = playing_state(4);
        for i in 0..600 {
            step(&mut state, i % 37 == 0);
            state.obstacles.clear();
            assert!(state.player.y <= state.ground_y);
        }
        // Eventually lands again
        for _ in 0..60 {
            step(&mut state, false);
        }
        assert!(!state.player.airborne);
        assert_eq!(state.player.y, state.ground_y);
        assert_eq!(state.player.vy, 0.0);
    }

    #[test]
    fn test_collision_ends_run_and_freezes_tick() {
        let mut state = playing_state(5);
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle::new(
            id,
            PLAYER_X - 20.0,
            40.0,
            ObstacleKind::Ground,
            state.ground_y,
        ));
        star_on_player(&mut state);
        state.stars[0].pos.x += 300.0;
        state.particles.push(Particle {
            pos: Vec2::new(10.0, 10.0),
            vel: Vec2::new(1.0, 1.0),
            life: 0.5,
            color: "#000000".into(),
            size: 3.0,
        });
        let star_before = state.stars[0].clone();

        let (phase, events) = step(&mut state, false);

        assert_eq!(phase, GamePhase::GameOver);
        let phase_changes = events
            .iter()
            .filter(|e| matches!(e, GameEvent::PhaseChanged(_)))
            .count();
        assert_eq!(phase_changes, 1);
        assert!(events.contains(&GameEvent::PhaseChanged(GamePhase::GameOver)));
        assert!(events.contains(&GameEvent::Crashed));

        // Nothing after the crash moved
        assert_eq!(state.stars[0], star_before);
        assert_eq!(state.particles[0].pos, Vec2::new(10.0, 10.0));
        assert_eq!(state.particles[0].life, 0.5);
        assert_eq!(state.particles.len(), 1 + CRASH_PARTICLES);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::ScoreSample(_))));

        // Further ticks in GameOver are inert
        let ticks = state.ticks;
        let mut more = Vec::new();
        tick(&mut state, GamePhase::GameOver, &TickInput::default(), NOW, &mut more);
        assert_eq!(state.ticks, ticks);
        assert!(more.is_empty());
    }

    #[test]
    fn test_invincible_passes_through() {
        let mut state = playing_state(6);
        state.invincibility.expires_at_ms = NOW + 5000.0;
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle::new(
            id,
            PLAYER_X - 20.0,
            40.0,
            ObstacleKind::Ground,
            state.ground_y,
        ));

        let (phase, events) = step(&mut state, false);
        assert_eq!(phase, GamePhase::Playing);
        assert!(events.contains(&GameEvent::InvincibilityChanged(true)));
        assert!(!events.contains(&GameEvent::Crashed));
    }

    #[test]
    fn test_invincibility_change_is_edge_triggered() {
        let mut state = playing_state(7);
        state.invincibility.expires_at_ms = NOW + 100.0;

        let mut events = Vec::new();
        tick(&mut state, GamePhase::Playing, &TickInput::default(), NOW, &mut events);
        tick(&mut state, GamePhase::Playing, &TickInput::default(), NOW + 50.0, &mut events);
        tick(&mut state, GamePhase::Playing, &TickInput::default(), NOW + 200.0, &mut events);
        tick(&mut state, GamePhase::Playing, &TickInput::default(), NOW + 300.0, &mut events);

        let changes: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::InvincibilityChanged(on) => Some(*on),
                _ => None,
            })
            .collect();
        assert_eq!(changes, vec![true, false]);
    }

    #[test]
    fn test_star_grants_invincibility_once() {
        let mut state = playing_state(8);
        star_on_player(&mut state);

        let (_, events) = step(&mut state, false);
        assert!(events.contains(&GameEvent::StarCollected));
        assert!(!state.stars[0].active);
        assert_eq!(
            state.invincibility.expires_at_ms,
            NOW + state.tuning.star_duration_ms()
        );
        assert!(state.invincibility.is_active(NOW));
        assert_eq!(state.particles.len(), COLLECT_PARTICLES);

        // The flag is published on the following tick
        let (_, events) = step(&mut state, false);
        assert!(events.contains(&GameEvent::InvincibilityChanged(true)));
        assert!(state.invincible);

        // Still overlapping but inactive: no re-trigger at a later time
        let expiry = state.invincibility.expires_at_ms;
        let mut later = Vec::new();
        tick(&mut state, GamePhase::Playing, &TickInput::default(), NOW + 3000.0, &mut later);
        assert!(!later.contains(&GameEvent::StarCollected));
        assert_eq!(state.invincibility.expires_at_ms, expiry);
    }

    #[test]
    fn test_offscreen_entities_are_pruned() {
        let mut state = playing_state(9);
        let id = state.next_entity_id();
        state
            .obstacles
            .push(Obstacle::new(id, -150.0, 40.0, ObstacleKind::Ground, state.ground_y));
        star_on_player(&mut state);
        state.stars[0].pos.x = -48.0;

        step(&mut state, false);
        assert!(state.obstacles.iter().all(|o| o.id != id));
        assert!(state.stars.is_empty());
    }

    #[test]
    fn test_obstacles_marked_passed() {
        let mut state = playing_state(10);
        let id = state.next_entity_id();
        state
            .obstacles
            .push(Obstacle::new(id, 20.0, 40.0, ObstacleKind::Ground, state.ground_y));
        step(&mut state, false);
        assert!(state.obstacles[0].passed);
    }

    #[test]
    fn test_score_sample_cadence() {
        let mut state = GameState::new(11, Tuning::default());
        let mut samples = Vec::new();
        for _ in 0..20 {
            let (phase, events) = step(&mut state, false);
            assert_eq!(phase, GamePhase::Playing);
            samples.extend(events.into_iter().filter_map(|e| match e {
                GameEvent::ScoreSample(s) => Some(s),
                _ => None,
            }));
        }
        assert_eq!(samples.len(), 4);
        assert!((samples[0] - 5.0 / 60.0).abs() < 1e-6);
        assert!((samples[3] - 20.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999, Tuning::default());
        let mut state2 = GameState::new(99999, Tuning::default());

        for i in 0..3000 {
            let jump = i % 45 == 0;
            let p1 = step(&mut state1, jump);
            let p2 = step(&mut state2, jump);
            assert_eq!(p1, p2);
            if p1.0 == GamePhase::GameOver {
                break;
            }
        }

        assert_eq!(state1.ticks, state2.ticks);
        assert_eq!(state1.obstacles, state2.obstacles);
        assert_eq!(state1.particles, state2.particles);
    }
}
