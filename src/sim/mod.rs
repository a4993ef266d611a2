//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies; wall-clock time is passed in

pub mod autopilot;
pub mod collision;
pub mod effects;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::should_jump;
pub use collision::Rect;
pub use state::{
    GameEvent, GamePhase, GameState, InvincibilityWindow, Obstacle, ObstacleKind, Particle,
    Player, Star,
};
pub use tick::{TickInput, tick};
