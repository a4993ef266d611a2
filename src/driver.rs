//! Per-frame update and render cycle
//!
//! One display refresh: fit the surface to the viewport, run one simulation
//! tick, draw, then hand the tick's events to the host. The host owns the
//! phase; the driver only reports transitions.

use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;

use crate::audio::SoundEffect;
use crate::renderer::{self, Canvas, FrameContext, RenderOptions};
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use crate::tuning::Tuning;

/// Receives notifications from the frame driver
pub trait Host {
    /// Fired once when a run ends
    fn on_phase_change(&mut self, phase: GamePhase);
    /// Survival time, every few ticks
    fn on_score_sample(&mut self, seconds: f32);
    /// Invincibility switched on or off
    fn on_invincibility_change(&mut self, invincible: bool);
    fn on_sound(&mut self, _effect: SoundEffect) {}
}

/// Why a frame was dropped
#[derive(Debug, Error, PartialEq)]
pub enum FrameError {
    #[error("no drawing surface available")]
    NoSurface,
    #[error("frame panicked: {0}")]
    Panicked(String),
}

/// Owns the simulation state and steps it once per frame
pub struct FrameDriver {
    state: GameState,
    pending_jump: bool,
    events: Vec<GameEvent>,
    options: RenderOptions,
}

impl FrameDriver {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            state: GameState::new(seed, tuning),
            pending_jump: false,
            events: Vec::new(),
            options: RenderOptions::default(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Test and tooling access to the simulation
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
    }

    /// Buffer a jump for the next tick
    pub fn request_jump(&mut self) {
        self.pending_jump = true;
    }

    /// Fit the surface and the ground line to the viewport
    pub fn resize<C: Canvas + ?Sized>(&mut self, canvas: &mut C, viewport: (u32, u32)) {
        if canvas.size() != viewport {
            log::debug!("Resizing surface to {}x{}", viewport.0, viewport.1);
            canvas.set_size(viewport.0, viewport.1);
        }

        let (width, height) = (viewport.0 as f32, viewport.1 as f32);
        let ground_y = height - self.state.tuning.ground_height;
        if self.state.view_width != width || self.state.ground_y != ground_y {
            self.state.set_view(width, height);
        }
    }

    /// Reset for the title screen and draw it once, without scrolling
    pub fn enter_start<C: Canvas + ?Sized>(
        &mut self,
        surface: Option<&mut C>,
        viewport: (u32, u32),
        now_ms: f64,
    ) -> Result<(), FrameError> {
        self.pending_jump = false;
        self.events.clear();

        // The opening obstacle is placed relative to the current view width
        let canvas = match surface {
            Some(canvas) => {
                self.resize(canvas, viewport);
                canvas
            }
            None => {
                self.state.set_view(viewport.0 as f32, viewport.1 as f32);
                self.state.reset();
                return Err(FrameError::NoSurface);
            }
        };
        self.state.reset();

        let ctx = self.frame_context(viewport, now_ms, true);
        renderer::render(canvas, &self.state, &ctx);
        Ok(())
    }

    /// Run one display frame. Returns whether another frame should be scheduled.
    ///
    /// A missing surface skips the frame and keeps the buffered jump for the
    /// retry. A panic while ticking or drawing is contained and reported as a
    /// dropped frame.
    pub fn frame<C: Canvas + ?Sized, H: Host + ?Sized>(
        &mut self,
        surface: Option<&mut C>,
        viewport: (u32, u32),
        phase: GamePhase,
        now_ms: f64,
        host: &mut H,
    ) -> Result<bool, FrameError> {
        let canvas = surface.ok_or(FrameError::NoSurface)?;

        let input = TickInput {
            jump: std::mem::take(&mut self.pending_jump) && phase == GamePhase::Playing,
        };
        self.events.clear();

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            self.resize(canvas, viewport);
            let next = tick(&mut self.state, phase, &input, now_ms, &mut self.events);
            let ctx = self.frame_context(viewport, now_ms, false);
            renderer::render(canvas, &self.state, &ctx);
            next
        }));

        let next = match result {
            Ok(next) => next,
            Err(payload) => {
                self.events.clear();
                return Err(FrameError::Panicked(panic_message(payload.as_ref())));
            }
        };

        for event in self.events.drain(..) {
            if let Some(effect) = SoundEffect::for_event(&event) {
                host.on_sound(effect);
            }
            match event {
                GameEvent::PhaseChanged(phase) => host.on_phase_change(phase),
                GameEvent::ScoreSample(seconds) => host.on_score_sample(seconds),
                GameEvent::InvincibilityChanged(on) => host.on_invincibility_change(on),
                GameEvent::Jumped | GameEvent::StarCollected | GameEvent::Crashed => {}
            }
        }

        Ok(next == GamePhase::Playing)
    }

    fn frame_context(&self, viewport: (u32, u32), now_ms: f64, static_render: bool) -> FrameContext {
        FrameContext {
            width: viewport.0 as f64,
            height: viewport.1 as f64,
            now_ms,
            static_render,
            options: self.options,
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_owned()
    }
}
