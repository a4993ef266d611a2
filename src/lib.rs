//! Samurai Jump - An ink-brush endless runner
//!
//! Core modules:
//! - `color`: Hex color parsing and interpolation
//! - `theme`: Day/night palette resolution
//! - `sim`: Deterministic simulation (physics, spawning, collisions)
//! - `renderer`: Canvas 2D drawing of the simulation state
//! - `driver`: Per-frame update/render cycle
//! - `session` / `app`: Host-side phase machine and composition root
//! - `platform`: Time source abstraction
//! - `persistence`: Key-value storage (LocalStorage on web)
//! - `tuning`: Data-driven game balance

pub mod app;
pub mod audio;
pub mod color;
pub mod driver;
pub mod highscores;
pub mod hud;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod theme;
pub mod tuning;

pub use app::App;
pub use driver::{FrameDriver, FrameError, Host};
pub use highscores::BestTime;
pub use session::{InputAction, Session};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per displayed frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Score samples are published every N ticks
    pub const SCORE_SAMPLE_INTERVAL: u64 = 5;

    /// Player figure - fixed horizontal anchor, feet at `y`
    pub const PLAYER_X: f32 = 100.0;
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const PLAYER_HEAD_RADIUS: f32 = 8.0;

    /// Obstacle hitboxes shrink by this much on each side
    pub const OBSTACLE_HITBOX_INSET: f32 = 5.0;
    /// Obstacles are dropped once their right edge is this far past x = 0
    pub const OBSTACLE_PRUNE_MARGIN: f32 = 100.0;
    /// Stars are dropped once their left edge is this far past x = 0
    pub const STAR_PRUNE_MARGIN: f32 = 50.0;
    /// New entities appear this far beyond the right edge
    pub const SPAWN_OFFSET: f32 = 50.0;

    /// Opening obstacle placed on every reset (harmless warm-up)
    pub const OPENING_OBSTACLE_OFFSET: f32 = 600.0;
    pub const OPENING_OBSTACLE_SIZE: f32 = 40.0;

    /// Ground obstacle size range (square)
    pub const GROUND_OBSTACLE_MIN_SIZE: f32 = 30.0;
    pub const GROUND_OBSTACLE_MAX_SIZE: f32 = 70.0;
    /// Air obstacles are fixed size, hung at head height
    pub const AIR_OBSTACLE_SIZE: f32 = 50.0;
    pub const AIR_OBSTACLE_HEIGHT: f32 = 110.0;

    /// Stars
    pub const STAR_SIZE: f32 = 30.0;
    pub const STAR_OUTER_RADIUS: f32 = 15.0;
    pub const STAR_INNER_RADIUS: f32 = 7.0;
    pub const STAR_ROTATION_STEP: f32 = 0.05;
    pub const STAR_MIN_ALTITUDE: f32 = 60.0;
    pub const STAR_ALTITUDE_RANGE: f32 = 100.0;
    pub const STAR_COLOR: &str = "#fbbf24";

    /// Particles
    pub const PARTICLE_DECAY: f32 = 0.02;
    pub const JUMP_PARTICLES: usize = 8;
    pub const CRASH_PARTICLES: usize = 30;
    pub const COLLECT_PARTICLES: usize = 15;

    /// Ground texture tile width (px)
    pub const GROUND_TILE: f32 = 200.0;

    /// Invincibility blinks during its final stretch (ms)
    pub const BLINK_WINDOW_MS: f64 = 5000.0;
}
