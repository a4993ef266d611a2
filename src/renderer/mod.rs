//! Canvas 2D rendering module
//!
//! Draws a read-only view of the simulation. Everything goes through the
//! [`Canvas`] trait so the same scene code drives the browser canvas and the
//! in-memory recorder used by tests and the headless runner.

pub mod figure;
pub mod recorder;
pub mod scene;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use recorder::{DrawCmd, RecordingCanvas};
#[cfg(target_arch = "wasm32")]
pub use web::WebCanvas;

use crate::settings::Settings;
use crate::sim::GameState;
use crate::theme;

/// The subset of the 2D context API the scene needs
pub trait Canvas {
    /// Current backing size in pixels
    fn size(&self) -> (u32, u32);
    fn set_size(&mut self, width: u32, height: u32);

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    fn begin_path(&mut self);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64);
    fn close_path(&mut self);
    fn fill(&mut self);
    fn stroke(&mut self);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f64, y: f64);
    fn rotate(&mut self, angle: f64);

    fn set_fill_style(&mut self, color: &str);
    fn set_stroke_style(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    fn set_line_cap(&mut self, cap: &str);
    fn set_line_join(&mut self, join: &str);
    fn set_global_alpha(&mut self, alpha: f64);
    fn set_shadow_blur(&mut self, blur: f64);
    fn set_shadow_color(&mut self, color: &str);

    /// Full circle path, filled
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64) {
        self.begin_path();
        self.arc(x, y, radius, 0.0, std::f64::consts::TAU);
        self.fill();
    }

    /// Single stroked segment
    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.begin_path();
        self.move_to(x1, y1);
        self.line_to(x2, y2);
        self.stroke();
    }
}

/// Player preferences that affect drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub particles: bool,
    /// Disables headband wind and the invincibility blink
    pub reduced_motion: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            particles: true,
            reduced_motion: false,
        }
    }
}

impl From<&Settings> for RenderOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            particles: settings.particles,
            reduced_motion: settings.reduced_motion,
        }
    }
}

/// Per-frame inputs the state does not carry
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    pub width: f64,
    pub height: f64,
    /// Wall-clock time for animation and invincibility
    pub now_ms: f64,
    /// Title-screen render: no ground scrolling
    pub static_render: bool,
    pub options: RenderOptions,
}

/// Draw one complete frame
pub fn render<C: Canvas + ?Sized>(canvas: &mut C, state: &GameState, ctx: &FrameContext) {
    let theme = theme::resolve(state.elapsed());

    scene::draw_sky(canvas, &theme, ctx);
    scene::draw_ground(canvas, state, &theme, ctx);
    scene::draw_obstacles(canvas, state, &theme);
    scene::draw_stars(canvas, state);
    if ctx.options.particles {
        scene::draw_particles(canvas, state);
    }
    figure::draw_samurai(canvas, state, &theme, ctx);
}
