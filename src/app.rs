//! Composition root
//!
//! Ties the frame driver to the session and the drawing surface. Shared by the
//! browser entry point and the native headless runner.

use crate::driver::{FrameDriver, FrameError};
use crate::hud::HudView;
use crate::persistence::KeyValueStore;
use crate::platform::TimeSource;
use crate::renderer::{Canvas, RenderOptions};
use crate::session::{InputAction, Session};
use crate::sim::GamePhase;
use crate::tuning::Tuning;

pub struct App<C: Canvas, S: KeyValueStore, T: TimeSource> {
    surface: Option<C>,
    driver: FrameDriver,
    session: Session<S, T>,
}

impl<C: Canvas, S: KeyValueStore, T: TimeSource> App<C, S, T> {
    pub fn new(surface: Option<C>, seed: u64, tuning: Tuning, store: S, clock: T) -> Self {
        let session = Session::new(store, clock);
        let mut driver = FrameDriver::new(seed, tuning);
        driver.set_options(RenderOptions::from(session.settings()));
        log::info!("Game initialized with seed: {seed}");
        Self {
            surface,
            driver,
            session,
        }
    }

    pub fn session(&self) -> &Session<S, T> {
        &self.session
    }

    pub fn driver(&self) -> &FrameDriver {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut FrameDriver {
        &mut self.driver
    }

    pub fn surface_mut(&mut self) -> Option<&mut C> {
        self.surface.as_mut()
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase()
    }

    /// Reset and draw the title screen
    pub fn show_start(&mut self, viewport: (u32, u32)) {
        let now = self.session.now_ms();
        if let Err(e) = self.driver.enter_start(self.surface.as_mut(), viewport, now) {
            log::warn!("Title screen not drawn: {e}");
        }
    }

    /// Route a jump press. Returns what it did so the host can start or stop
    /// its frame loop.
    pub fn press_jump(&mut self, viewport: (u32, u32)) -> InputAction {
        let action = self.session.handle_jump_input();
        match action {
            InputAction::Jump => self.driver.request_jump(),
            InputAction::ReturnToStart => self.show_start(viewport),
            InputAction::StartRun | InputAction::Ignored => {}
        }
        action
    }

    /// Run one display frame. Returns whether to schedule another.
    pub fn frame(&mut self, viewport: (u32, u32)) -> Result<bool, FrameError> {
        let now = self.session.now_ms();
        let phase = self.session.phase();
        self.driver
            .frame(self.surface.as_mut(), viewport, phase, now, &mut self.session)
    }

    pub fn hud(&self) -> HudView {
        let session = &self.session;
        HudView::new(
            session.phase(),
            session.score(),
            session.best(),
            session.is_invincible(),
            session.can_restart(),
            session.is_new_best(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::highscores::BestTime;
    use crate::persistence::MemoryStore;
    use crate::platform::ManualClock;
    use crate::renderer::RecordingCanvas;
    use crate::sim::should_jump;

    const VIEW: (u32, u32) = (1280, 720);
    const RESTART_MS: f64 = crate::session::RESTART_COOLDOWN_MS;

    type TestApp = App<RecordingCanvas, MemoryStore, ManualClock>;

    fn app(store: MemoryStore, clock: ManualClock) -> TestApp {
        let tuning = Tuning {
            star_chance: 0.0,
            ..Tuning::default()
        };
        let mut app = App::new(Some(RecordingCanvas::new(VIEW.0, VIEW.1)), 7, tuning, store, clock);
        app.show_start(VIEW);
        app
    }

    /// Frames until the run ends or the limit is hit
    fn play(app: &mut TestApp, clock: &ManualClock, frames: usize, autopilot: bool) -> usize {
        for n in 0..frames {
            if autopilot && should_jump(app.driver().state()) {
                app.press_jump(VIEW);
            }
            clock.advance(1000.0 / 60.0);
            if !app.frame(VIEW).unwrap() {
                return n + 1;
            }
        }
        frames
    }

    #[test]
    fn test_first_score_sample() {
        let clock = ManualClock::new(0.0);
        let mut app = app(MemoryStore::new(), clock.clone());
        assert_eq!(app.press_jump(VIEW), InputAction::StartRun);

        play(&mut app, &clock, 5, false);
        assert!((app.session().score() - 5.0 * SIM_DT).abs() < 1e-6);
        assert_eq!(app.hud().time, "0.1s");
    }

    #[test]
    fn test_full_run_cycle() {
        let store = MemoryStore::new();
        let clock = ManualClock::new(0.0);
        let mut app = app(store.clone(), clock.clone());

        // Nothing happens on the title screen until a press
        assert!(app.hud().show_start);
        app.press_jump(VIEW);
        assert_eq!(app.phase(), GamePhase::Playing);

        // Idle player runs into the opening obstacle
        let frames = play(&mut app, &clock, 2000, false);
        assert!(frames < 2000);
        assert_eq!(app.phase(), GamePhase::GameOver);

        let best = BestTime::load(&store).seconds;
        assert!(best > 0.0);
        assert_eq!(best, app.session().best());
        let hud = app.hud();
        assert!(hud.final_time.is_some());
        assert!(hud.new_best);
        assert!(!hud.can_restart);

        // Cooldown, then back to the title screen with a fresh state
        assert_eq!(app.press_jump(VIEW), InputAction::Ignored);
        clock.advance(RESTART_MS);
        assert_eq!(app.press_jump(VIEW), InputAction::ReturnToStart);
        assert_eq!(app.phase(), GamePhase::Start);
        assert_eq!(app.driver().state().ticks, 0);
        assert_eq!(app.driver().state().obstacles.len(), 1);
    }

    #[test]
    fn test_autopilot_outlasts_idle_run() {
        let clock = ManualClock::new(0.0);
        let mut app = app(MemoryStore::new(), clock.clone());
        app.press_jump(VIEW);
        let idle = play(&mut app, &clock, 3000, false);

        clock.advance(RESTART_MS);
        app.press_jump(VIEW);
        app.press_jump(VIEW);
        assert_eq!(app.phase(), GamePhase::Playing);
        let piloted = play(&mut app, &clock, 900, true);
        assert!(piloted > idle);
    }

    #[test]
    fn test_missing_surface_drops_frames() {
        let clock = ManualClock::new(0.0);
        let mut app: TestApp = App::new(None, 1, Tuning::default(), MemoryStore::new(), clock);
        app.show_start(VIEW);
        app.press_jump(VIEW);
        assert_eq!(app.frame(VIEW), Err(FrameError::NoSurface));
        assert_eq!(app.driver().state().ticks, 0);
    }
}
