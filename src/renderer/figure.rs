//! The stick samurai
//!
//! Drawn in local coordinates with the origin at the feet, y up is negative.

use std::f64::consts::PI;

use super::{Canvas, FrameContext};
use crate::consts::*;
use crate::sim::GameState;
use crate::theme::Theme;

/// Pose inputs for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
struct Pose {
    /// Headband ribbon sway
    wind: f64,
    /// Leg splay
    legs: f64,
    /// Arm swing
    arms: f64,
}

impl Pose {
    fn new(running: bool, speed: f32, now_ms: f64, reduced_motion: bool) -> Self {
        if !running {
            return Self { wind: 0.0, legs: 0.0, arms: 0.0 };
        }
        let cycle = (now_ms / 100.0 * (speed as f64 / 5.0)) % PI;
        let wind = if reduced_motion { 0.0 } else { (now_ms / 50.0).sin() * 5.0 };
        Self {
            wind,
            legs: cycle.sin() * 12.0,
            arms: cycle.cos() * 10.0,
        }
    }
}

/// Whether the figure is in the dimmed half of a blink
fn blink_dimmed(remaining_ms: f64, now_ms: f64) -> bool {
    remaining_ms < BLINK_WINDOW_MS && (now_ms / 100.0).floor() as i64 % 2 == 0
}

pub fn draw_samurai<C: Canvas + ?Sized>(
    canvas: &mut C,
    state: &GameState,
    theme: &Theme,
    ctx: &FrameContext,
) {
    let now = ctx.now_ms;
    let running = !state.player.airborne;
    let invincible = state.invincibility.is_active(now);
    let pose = Pose::new(running, state.speed, now, ctx.options.reduced_motion);

    canvas.save();
    canvas.translate(PLAYER_X as f64, state.player.y as f64);

    let color = if invincible {
        let remaining = state.invincibility.remaining_ms(now);
        if !ctx.options.reduced_motion && blink_dimmed(remaining, now) {
            canvas.set_global_alpha(0.5);
        }
        canvas.set_shadow_blur(15.0);
        canvas.set_shadow_color(&theme.colors.player_invincible);
        &theme.colors.player_invincible
    } else {
        &theme.colors.player
    };

    canvas.set_stroke_style(color);
    canvas.set_fill_style(color);
    canvas.set_line_width(4.0);
    canvas.set_line_cap("round");
    canvas.set_line_join("round");

    canvas.fill_circle(0.0, -50.0, PLAYER_HEAD_RADIUS as f64);

    // Headband ribbons
    canvas.set_line_width(2.0);
    canvas.begin_path();
    canvas.move_to(-6.0, -52.0);
    canvas.quadratic_curve_to(-20.0, -55.0 + pose.wind, -30.0, -45.0 + pose.wind);
    canvas.stroke();
    canvas.begin_path();
    canvas.move_to(-6.0, -52.0);
    canvas.quadratic_curve_to(-20.0, -50.0 + pose.wind, -28.0, -58.0 + pose.wind);
    canvas.stroke();
    canvas.set_line_width(4.0);

    // Torso
    canvas.stroke_line(0.0, -42.0, 0.0, -20.0);

    // Legs
    for side in [-1.0, 1.0] {
        let splay = pose.legs * -side;
        canvas.begin_path();
        canvas.move_to(0.0, -20.0);
        canvas.line_to(8.0 * side + splay, -10.0);
        canvas.line_to(4.0 * side + splay * 1.5, 0.0);
        canvas.stroke();
    }

    // Sword arm
    canvas.set_line_width(3.0);
    canvas.stroke_line(-2.0, -25.0, -20.0, -30.0);

    // Swinging arms
    canvas.set_line_width(4.0);
    canvas.stroke_line(0.0, -38.0, -10.0 - pose.arms, -20.0);
    canvas.stroke_line(0.0, -38.0, 10.0 + pose.arms, -20.0);

    canvas.restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCmd, RecordingCanvas, RenderOptions};
    use crate::theme;
    use crate::tuning::Tuning;

    fn ctx(now_ms: f64) -> FrameContext {
        FrameContext {
            width: 800.0,
            height: 600.0,
            now_ms,
            static_render: false,
            options: RenderOptions::default(),
        }
    }

    fn draw(state: &GameState, ctx: &FrameContext) -> RecordingCanvas {
        let mut canvas = RecordingCanvas::new(800, 600);
        draw_samurai(&mut canvas, state, &theme::resolve(0.0), ctx);
        canvas
    }

    #[test]
    fn test_airborne_pose_is_still() {
        assert_eq!(
            Pose::new(false, 9.0, 12_345.0, false),
            Pose { wind: 0.0, legs: 0.0, arms: 0.0 }
        );
        let running = Pose::new(true, 5.0, 12_345.0, true);
        assert_eq!(running.wind, 0.0);
        assert!(running.legs.abs() <= 12.0);
        assert!(running.arms.abs() <= 10.0);
    }

    #[test]
    fn test_blink_only_in_final_window() {
        assert!(!blink_dimmed(6000.0, 0.0));
        assert!(blink_dimmed(4000.0, 0.0));
        assert!(!blink_dimmed(4000.0, 150.0));
        assert!(blink_dimmed(4000.0, 250.0));
    }

    #[test]
    fn test_invincible_glow_and_color() {
        let mut state = GameState::new(1, Tuning::default());
        state.invincibility.expires_at_ms = 20_000.0;

        let canvas = draw(&state, &ctx(1_000.0));
        let gold = theme::DAY.player_invincible.clone();
        assert!(canvas.commands.contains(&DrawCmd::FillStyle(gold.clone())));
        assert!(canvas.commands.contains(&DrawCmd::ShadowBlur(15.0)));
        // Far from expiry: no blink
        assert!(!canvas.commands.contains(&DrawCmd::GlobalAlpha(0.5)));

        // Final seconds on an even 100ms slot
        let canvas = draw(&state, &ctx(16_000.0));
        assert!(canvas.commands.contains(&DrawCmd::GlobalAlpha(0.5)));

        let mut calm = ctx(16_000.0);
        calm.options.reduced_motion = true;
        let canvas = draw(&state, &calm);
        assert!(!canvas.commands.contains(&DrawCmd::GlobalAlpha(0.5)));
        assert!(canvas.commands.contains(&DrawCmd::FillStyle(gold)));
    }

    #[test]
    fn test_plain_figure_uses_player_color() {
        let state = GameState::new(1, Tuning::default());
        let canvas = draw(&state, &ctx(1_000.0));
        assert!(canvas.commands.contains(&DrawCmd::FillStyle(theme::DAY.player.clone())));
        assert!(!canvas.commands.contains(&DrawCmd::ShadowBlur(15.0)));
        assert_eq!(canvas.commands.first(), Some(&DrawCmd::Save));
        assert_eq!(canvas.commands.last(), Some(&DrawCmd::Restore));
    }
}
