//! Game state and core simulation types
//!
//! Everything the renderer reads lives in [`GameState`]. The phase itself is
//! owned by the host and passed into each tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Idle title screen, static render
    #[default]
    Start,
    /// Active run
    Playing,
    /// Run ended
    GameOver,
}

/// Notifications produced by a tick, drained by the frame driver
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Phase moved (only ever to `GameOver` from inside the simulation)
    PhaseChanged(GamePhase),
    /// Periodic score sample
    ScoreSample(f32),
    /// Invincibility switched on or off
    InvincibilityChanged(bool),
    Jumped,
    StarCollected,
    Crashed,
}

/// The runner
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Feet position (y grows downward)
    pub y: f32,
    /// Vertical velocity (negative is up)
    pub vy: f32,
    pub airborne: bool,
}

impl Player {
    pub fn grounded(ground_y: f32) -> Self {
        Self {
            y: ground_y,
            vy: 0.0,
            airborne: false,
        }
    }

    /// Collision box, anchored on the fixed horizontal position
    pub fn hitbox(&self) -> Rect {
        Rect::new(
            PLAYER_X - PLAYER_WIDTH / 2.0,
            self.y - PLAYER_HEIGHT,
            PLAYER_WIDTH,
            PLAYER_HEIGHT,
        )
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Sits on the ground, must be jumped
    Ground,
    /// Hangs at head height, must be run under
    Air,
}

/// An obstacle entity
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Kind is fixed at creation; vertical position is derived from it each tick
    kind: ObstacleKind,
    pub passed: bool,
}

impl Obstacle {
    pub fn new(id: u32, x: f32, size: f32, kind: ObstacleKind, ground_y: f32) -> Self {
        let mut obstacle = Self {
            id,
            pos: Vec2::new(x, 0.0),
            width: size,
            height: size,
            kind,
            passed: false,
        };
        obstacle.settle(ground_y);
        obstacle
    }

    pub fn kind(&self) -> ObstacleKind {
        self.kind
    }

    /// Place the obstacle vertically for its kind
    pub fn settle(&mut self, ground_y: f32) {
        self.pos.y = match self.kind {
            ObstacleKind::Ground => ground_y - self.height,
            ObstacleKind::Air => ground_y - AIR_OBSTACLE_HEIGHT,
        };
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    /// Shrunken box used for collision tests
    pub fn hitbox(&self) -> Rect {
        self.rect().inset(OBSTACLE_HITBOX_INSET)
    }
}

/// A star pickup (grants invincibility)
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub id: u32,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub active: bool,
    pub rotation: f32,
}

impl Star {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width, self.height) / 2.0
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0-1, decreases every tick
    pub life: f32,
    pub color: String,
    pub size: f32,
}

/// Invincible while the injected clock reads before `expires_at_ms`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InvincibilityWindow {
    pub expires_at_ms: f64,
}

impl InvincibilityWindow {
    pub fn is_active(&self, now_ms: f64) -> bool {
        now_ms < self.expires_at_ms
    }

    pub fn remaining_ms(&self, now_ms: f64) -> f64 {
        (self.expires_at_ms - now_ms).max(0.0)
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub rng: Pcg32,
    /// Simulation tick counter (the clock)
    pub ticks: u64,
    /// Current scroll speed (px/tick)
    pub speed: f32,
    /// Accumulated scroll distance, drives the ground texture
    pub scroll: f32,
    /// Visible width (spawn edge)
    pub view_width: f32,
    /// Ground line (player feet rest here)
    pub ground_y: f32,
    pub player: Player,
    /// Obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    pub stars: Vec<Star>,
    pub particles: Vec<Particle>,
    pub invincibility: InvincibilityWindow,
    /// Last invincibility state reported to the host
    pub invincible: bool,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Default view used until the first resize
    pub const DEFAULT_VIEW: Vec2 = Vec2::new(1280.0, 720.0);

    /// Create a new game state with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let ground_y = Self::DEFAULT_VIEW.y - tuning.ground_height;
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            ticks: 0,
            speed: tuning.base_speed,
            scroll: 0.0,
            view_width: Self::DEFAULT_VIEW.x,
            ground_y,
            player: Player::grounded(ground_y),
            obstacles: Vec::new(),
            stars: Vec::new(),
            particles: Vec::new(),
            invincibility: InvincibilityWindow::default(),
            invincible: false,
            next_id: 1,
            tuning,
        };
        state.reset();
        state
    }

    /// Survival time in seconds (also the score)
    pub fn elapsed(&self) -> f32 {
        self.ticks as f32 * SIM_DT
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Adopt a new view size; the ground line tracks the bottom edge
    pub fn set_view(&mut self, width: f32, height: f32) {
        let was_on_ground = !self.player.airborne;
        self.view_width = width;
        self.ground_y = height - self.tuning.ground_height;
        if was_on_ground {
            self.player.y = self.ground_y;
        }
    }

    /// Clear everything for a fresh run. Keeps the RNG stream, tuning and view.
    pub fn reset(&mut self) {
        self.ticks = 0;
        self.speed = self.tuning.base_speed;
        self.scroll = 0.0;
        self.player = Player::grounded(self.ground_y);
        self.obstacles.clear();
        self.stars.clear();
        self.particles.clear();
        self.invincibility = InvincibilityWindow::default();
        self.invincible = false;

        // Harmless warm-up obstacle far off to the right
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle::new(
            id,
            self.view_width + OPENING_OBSTACLE_OFFSET,
            OPENING_OBSTACLE_SIZE,
            ObstacleKind::Ground,
            self.ground_y,
        ));
    }

    /// Whether a star is currently collectible
    pub fn has_active_star(&self) -> bool {
        self.stars.iter().any(|s| s.active)
    }
}
