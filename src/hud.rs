//! HUD view model
//!
//! Plain strings and flags; the browser host copies them into the DOM.

use crate::sim::GamePhase;
use crate::theme::CYCLE_LENGTH;

/// Everything the overlay shows for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudView {
    /// Running time, e.g. `12.3s`
    pub time: String,
    /// e.g. `Best: 40.0s`
    pub best: String,
    /// Final time on the game-over screen, e.g. `12.34s`
    pub final_time: Option<String>,
    pub invincible: bool,
    /// Night styling for the HUD panels
    pub night: bool,
    pub show_start: bool,
    /// Restart button armed (cooldown over)
    pub can_restart: bool,
    pub new_best: bool,
}

impl HudView {
    pub fn new(
        phase: GamePhase,
        score: f32,
        best: f32,
        invincible: bool,
        can_restart: bool,
        new_best: bool,
    ) -> Self {
        let game_over = phase == GamePhase::GameOver;
        Self {
            time: format!("{score:.1}s"),
            best: format!("Best: {best:.1}s"),
            final_time: game_over.then(|| format!("{score:.2}s")),
            invincible: invincible && phase == GamePhase::Playing,
            night: is_night(score),
            show_start: phase == GamePhase::Start,
            can_restart: game_over && can_restart,
            new_best: game_over && new_best,
        }
    }

    /// Label for the restart button
    pub fn restart_label(&self) -> &'static str {
        if self.can_restart { "TRY AGAIN" } else { "..." }
    }
}

/// Odd minutes of survival are night
pub fn is_night(score: f32) -> bool {
    (score.max(0.0) / CYCLE_LENGTH).floor() as u64 % 2 == 1
}
