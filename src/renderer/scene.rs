//! Backdrop and entities: sky, sun and moon, ground, obstacles, stars, particles

use std::f64::consts::{PI, TAU};

use super::{Canvas, FrameContext};
use crate::consts::*;
use crate::sim::{GameState, ObstacleKind};
use crate::theme::{self, Theme};

/// Texture stroke color on the ground band
const GROUND_STROKE_DAY: &str = "#44403c";
const GROUND_STROKE_NIGHT: &str = "#a3a3a3";
/// Inner border on air traps
const AIR_BORDER_DAY: &str = "#fca5a5";
const AIR_BORDER_NIGHT: &str = "#ef4444";

/// Background, then the sun fading out and the moon fading in
pub fn draw_sky<C: Canvas + ?Sized>(canvas: &mut C, theme: &Theme, ctx: &FrameContext) {
    let (w, h) = (ctx.width, ctx.height);
    let t = theme.t as f64;

    canvas.set_fill_style(&theme.colors.background);
    canvas.fill_rect(0.0, 0.0, w, h);

    if t < 1.0 {
        let radius = w.min(h) * 0.25;
        canvas.save();
        canvas.set_global_alpha(1.0 - t);
        canvas.set_fill_style(&theme::DAY.sun);
        canvas.fill_circle(w / 2.0, h * 0.6, radius);
        canvas.restore();
    }

    if t > 0.0 {
        let (x, y) = (w / 2.0, h * 0.25);
        let radius = w.min(h) * 0.1;
        canvas.save();
        canvas.set_global_alpha(t);

        canvas.set_fill_style(&theme::NIGHT.moon);
        canvas.set_shadow_blur(15.0);
        canvas.set_shadow_color(&theme::NIGHT.moon);
        canvas.fill_circle(x, y, radius);

        // Background-colored disc shifted up and right leaves a crescent
        canvas.set_shadow_blur(0.0);
        canvas.set_fill_style(&theme.colors.background);
        canvas.fill_circle(x + radius * 0.3, y - radius * 0.1, radius * 0.9);

        canvas.restore();
    }
}

/// Ground band with scrolling brush strokes
pub fn draw_ground<C: Canvas + ?Sized>(
    canvas: &mut C,
    state: &GameState,
    theme: &Theme,
    ctx: &FrameContext,
) {
    let ground_y = state.ground_y as f64;
    let tile = GROUND_TILE as f64;

    canvas.set_fill_style(&theme.colors.ground);
    canvas.fill_rect(0.0, ground_y, ctx.width, ctx.height - ground_y);

    let stroke = if theme.t > 0.5 { GROUND_STROKE_NIGHT } else { GROUND_STROKE_DAY };
    canvas.set_stroke_style(stroke);
    canvas.set_line_width(3.0);

    let offset = if ctx.static_render {
        0.0
    } else {
        (state.scroll as f64).rem_euclid(tile)
    };
    let mut x = -offset;
    while x < ctx.width {
        canvas.stroke_line(x, ground_y + 5.0, x + 50.0, ground_y + 15.0);
        x += tile;
    }
}

pub fn draw_obstacles<C: Canvas + ?Sized>(canvas: &mut C, state: &GameState, theme: &Theme) {
    let border = if theme.t > 0.5 { AIR_BORDER_NIGHT } else { AIR_BORDER_DAY };

    for obstacle in &state.obstacles {
        let (x, y) = (obstacle.pos.x as f64, obstacle.pos.y as f64);
        let (w, h) = (obstacle.width as f64, obstacle.height as f64);

        match obstacle.kind() {
            ObstacleKind::Ground => {
                canvas.set_fill_style(&theme.colors.obstacle_ground);
                canvas.fill_rect(x, y, w, h);
                canvas.set_fill_style(&theme.colors.background);
                canvas.fill_rect(x + 5.0, y + 5.0, 4.0, 4.0);
            }
            ObstacleKind::Air => {
                canvas.set_fill_style(&theme.colors.obstacle_air);
                canvas.set_shadow_color(&theme.colors.obstacle_air);
                canvas.set_shadow_blur(10.0);
                canvas.fill_rect(x, y, w, h);
                canvas.set_shadow_blur(0.0);
                canvas.set_stroke_style(border);
                canvas.stroke_rect(x + 4.0, y + 4.0, w - 8.0, h - 8.0);
            }
        }
    }
}

/// Collectible stars as rotated five-point shapes
pub fn draw_stars<C: Canvas + ?Sized>(canvas: &mut C, state: &GameState) {
    for star in state.stars.iter().filter(|s| s.active) {
        let center = star.center();
        canvas.save();
        canvas.translate(center.x as f64, center.y as f64);
        canvas.rotate(star.rotation as f64);
        canvas.set_fill_style(STAR_COLOR);
        star_path(canvas, STAR_OUTER_RADIUS as f64, STAR_INNER_RADIUS as f64);
        canvas.fill();
        canvas.restore();
    }
}

/// Alternate outer and inner points, starting at 18 degrees
fn star_path<C: Canvas + ?Sized>(canvas: &mut C, outer: f64, inner: f64) {
    canvas.begin_path();
    for i in 0..5 {
        let a = (18.0 + i as f64 * 72.0) * PI / 180.0;
        let b = (54.0 + i as f64 * 72.0) * PI / 180.0;
        canvas.line_to(a.cos() * outer, -a.sin() * outer);
        canvas.line_to(b.cos() * inner, -b.sin() * inner);
    }
    canvas.close_path();
}

pub fn draw_particles<C: Canvas + ?Sized>(canvas: &mut C, state: &GameState) {
    for particle in &state.particles {
        canvas.set_fill_style(&particle.color);
        canvas.set_global_alpha(particle.life as f64);
        canvas.begin_path();
        canvas.arc(
            particle.pos.x as f64,
            particle.pos.y as f64,
            particle.size as f64,
            0.0,
            TAU,
        );
        canvas.fill();
        canvas.set_global_alpha(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCmd, RecordingCanvas, RenderOptions};
    use crate::sim::Obstacle;
    use crate::tuning::Tuning;

    fn ctx() -> FrameContext {
        FrameContext {
            width: 800.0,
            height: 600.0,
            now_ms: 0.0,
            static_render: false,
            options: RenderOptions::default(),
        }
    }

    #[test]
    fn test_ground_strokes_tile_across_width() {
        let mut state = GameState::new(1, Tuning::default());
        state.scroll = 450.0;
        let mut canvas = RecordingCanvas::new(800, 600);
        draw_ground(&mut canvas, &state, &theme::resolve(0.0), &ctx());

        let strokes = canvas.count(|c| *c == DrawCmd::Stroke);
        // Starts at -50 and steps by 200 while left of 800
        assert_eq!(strokes, 5);
        assert!(canvas.commands.contains(&DrawCmd::StrokeStyle(GROUND_STROKE_DAY.into())));
    }

    #[test]
    fn test_obstacle_styles_by_kind() {
        let mut state = GameState::new(1, Tuning::default());
        state.obstacles.clear();
        let ground_y = state.ground_y;
        state
            .obstacles
            .push(Obstacle::new(1, 200.0, 40.0, ObstacleKind::Ground, ground_y));
        state
            .obstacles
            .push(Obstacle::new(2, 400.0, 50.0, ObstacleKind::Air, ground_y));

        let theme = theme::resolve(0.0);
        let mut canvas = RecordingCanvas::new(800, 600);
        draw_obstacles(&mut canvas, &state, &theme);

        let ground_top = (ground_y - 40.0) as f64;
        assert!(canvas.commands.contains(&DrawCmd::FillRect(205.0, ground_top + 5.0, 4.0, 4.0)));

        let air_top = (ground_y - AIR_OBSTACLE_HEIGHT) as f64;
        assert!(canvas.commands.contains(&DrawCmd::ShadowBlur(10.0)));
        assert!(canvas.commands.contains(&DrawCmd::StrokeRect(404.0, air_top + 4.0, 42.0, 42.0)));
        assert!(canvas.commands.contains(&DrawCmd::StrokeStyle(AIR_BORDER_DAY.into())));
    }

    #[test]
    fn test_star_has_ten_points() {
        let mut canvas = RecordingCanvas::new(10, 10);
        star_path(&mut canvas, 15.0, 7.0);
        assert_eq!(canvas.count(|c| matches!(c, DrawCmd::LineTo(..))), 10);
        assert_eq!(canvas.commands.last(), Some(&DrawCmd::ClosePath));
    }
}
