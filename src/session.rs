//! Host-side game flow
//!
//! Tracks the phase, the displayed score and the best time, and turns the
//! single jump input into the right action for the current phase.

use crate::audio::{AudioManager, SoundEffect};
use crate::driver::Host;
use crate::highscores::BestTime;
use crate::persistence::KeyValueStore;
use crate::platform::TimeSource;
use crate::settings::Settings;
use crate::sim::GamePhase;

/// Input is ignored for this long after a run ends
pub const RESTART_COOLDOWN_MS: f64 = 1000.0;

/// What a jump press did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Forward to the simulation
    Jump,
    /// Title screen -> run
    StartRun,
    /// Game over -> title screen (the caller resets and redraws)
    ReturnToStart,
    /// Cooldown still running
    Ignored,
}

pub struct Session<S: KeyValueStore, T: TimeSource> {
    phase: GamePhase,
    /// Latest survival time sample
    score: f32,
    best: BestTime,
    /// Best time when the current run started
    best_at_start: f32,
    invincible: bool,
    game_over_at: Option<f64>,
    settings: Settings,
    store: S,
    audio: AudioManager,
    clock: T,
}

impl<S: KeyValueStore, T: TimeSource> Session<S, T> {
    pub fn new(store: S, clock: T) -> Self {
        let settings = Settings::load(&store);
        let best = BestTime::load(&store);
        let mut audio = AudioManager::new();
        audio.apply_settings(&settings);
        log::info!("Best time so far: {:.1}s", best.seconds);

        Self {
            phase: GamePhase::Start,
            score: 0.0,
            best_at_start: best.seconds,
            best,
            invincible: false,
            game_over_at: None,
            settings,
            store,
            audio,
            clock,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    pub fn best(&self) -> f32 {
        self.best.seconds
    }

    /// Whether the current run has beaten the previous record
    pub fn is_new_best(&self) -> bool {
        self.score > self.best_at_start
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn update_settings(&mut self, settings: Settings) {
        self.audio.apply_settings(&settings);
        settings.save(&mut self.store);
        self.settings = settings;
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }

    /// Whether a game-over screen would accept input now
    pub fn can_restart(&self) -> bool {
        match (self.phase, self.game_over_at) {
            (GamePhase::GameOver, Some(at)) => self.now_ms() - at >= RESTART_COOLDOWN_MS,
            (GamePhase::GameOver, None) => true,
            _ => false,
        }
    }

    /// Space, tap or the jump button
    pub fn handle_jump_input(&mut self) -> InputAction {
        match self.phase {
            GamePhase::Playing => InputAction::Jump,
            GamePhase::Start => {
                self.phase = GamePhase::Playing;
                self.score = 0.0;
                self.invincible = false;
                self.best_at_start = self.best.seconds;
                self.game_over_at = None;
                // Browsers only allow audio after a user gesture
                self.audio.resume();
                log::info!("Run started");
                InputAction::StartRun
            }
            GamePhase::GameOver if self.can_restart() => {
                self.phase = GamePhase::Start;
                self.score = 0.0;
                self.invincible = false;
                InputAction::ReturnToStart
            }
            GamePhase::GameOver => InputAction::Ignored,
        }
    }
}

impl<S: KeyValueStore, T: TimeSource> Host for Session<S, T> {
    fn on_phase_change(&mut self, phase: GamePhase) {
        if phase == self.phase {
            return;
        }
        self.phase = phase;
        if phase == GamePhase::GameOver {
            self.game_over_at = Some(self.now_ms());
            self.invincible = false;
            log::info!("Game over after {:.2}s", self.score);
        }
    }

    fn on_score_sample(&mut self, seconds: f32) {
        self.score = seconds;
        let was_first = self.best.seconds <= self.best_at_start;
        if self.best.submit(seconds) {
            self.best.save(&mut self.store);
            if was_first {
                log::info!("New best time (previous {:.1}s)", self.best_at_start);
            }
        }
    }

    fn on_invincibility_change(&mut self, invincible: bool) {
        self.invincible = invincible;
    }

    fn on_sound(&mut self, effect: SoundEffect) {
        self.audio.play(effect);
    }
}
