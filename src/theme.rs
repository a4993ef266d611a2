//! Day/night palette resolution
//!
//! The sky cycles every 60 seconds of survival time: even cycles are day,
//! odd cycles are night. Each cycle after the first opens with a 5 second
//! blend from the previous palette.

use std::borrow::Cow;
use std::sync::LazyLock;

use crate::color::lerp;

/// Length of one day or night period (seconds of survival time)
pub const CYCLE_LENGTH: f32 = 60.0;
/// Length of the blend at the start of each cycle
pub const TRANSITION_DURATION: f32 = 5.0;
/// Blend factors this close to 0 or 1 snap to the exact palette
const SNAP_EPSILON: f32 = 0.01;

/// A full set of themed colors (`#rrggbb` strings)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub background: String,
    pub ground: String,
    pub player: String,
    pub player_invincible: String,
    pub obstacle_ground: String,
    pub obstacle_air: String,
    pub sun: String,
    pub moon: String,
    pub text: String,
    pub accent: String,
}

/// Rice paper and ink
pub static DAY: LazyLock<Palette> = LazyLock::new(|| Palette {
    background: "#f5f5f4".into(),
    ground: "#1c1917".into(),
    player: "#1c1917".into(),
    player_invincible: "#d97706".into(),
    obstacle_ground: "#1c1917".into(),
    obstacle_air: "#7f1d1d".into(),
    sun: "#ef4444".into(),
    moon: "transparent".into(),
    text: "#1c1917".into(),
    accent: "#ef4444".into(),
});

/// Deep night and white ink
pub static NIGHT: LazyLock<Palette> = LazyLock::new(|| Palette {
    background: "#09090b".into(),
    ground: "#e5e5e5".into(),
    player: "#e5e5e5".into(),
    player_invincible: "#fbbf24".into(),
    obstacle_ground: "#e5e5e5".into(),
    obstacle_air: "#f87171".into(),
    sun: "transparent".into(),
    moon: "#fef3c7".into(),
    text: "#e5e5e5".into(),
    accent: "#f87171".into(),
});

/// A resolved palette plus its day/night blend factor (0 = day, 1 = night)
#[derive(Debug, Clone)]
pub struct Theme {
    pub colors: Cow<'static, Palette>,
    pub t: f32,
}

impl Theme {
    pub fn is_day(&self) -> bool {
        self.t == 0.0
    }

    pub fn is_night(&self) -> bool {
        self.t == 1.0
    }
}

/// Raw blend factor for a given survival time (before snapping)
pub fn blend_factor(elapsed: f32) -> f32 {
    let elapsed = elapsed.max(0.0);
    let cycle_index = (elapsed / CYCLE_LENGTH).floor() as u64;

    // The run always opens in full daylight
    if cycle_index == 0 {
        return 0.0;
    }

    let night_target = cycle_index % 2 == 1;
    let time_in_cycle = elapsed % CYCLE_LENGTH;

    if time_in_cycle < TRANSITION_DURATION {
        let progress = time_in_cycle / TRANSITION_DURATION;
        if night_target { progress } else { 1.0 - progress }
    } else if night_target {
        1.0
    } else {
        0.0
    }
}

/// Resolve the palette for a given survival time
pub fn resolve(elapsed: f32) -> Theme {
    let t = blend_factor(elapsed);

    if t <= SNAP_EPSILON {
        return Theme {
            colors: Cow::Borrowed(&*DAY),
            t: 0.0,
        };
    }
    if t >= 1.0 - SNAP_EPSILON {
        return Theme {
            colors: Cow::Borrowed(&*NIGHT),
            t: 1.0,
        };
    }

    let (day, night) = (&*DAY, &*NIGHT);
    Theme {
        colors: Cow::Owned(Palette {
            background: lerp(&day.background, &night.background, t),
            ground: lerp(&day.ground, &night.ground, t),
            player: lerp(&day.player, &night.player, t),
            player_invincible: lerp(&day.player_invincible, &night.player_invincible, t),
            obstacle_ground: lerp(&day.obstacle_ground, &night.obstacle_ground, t),
            obstacle_air: lerp(&day.obstacle_air, &night.obstacle_air, t),
            // Celestial bodies fade by alpha instead of blending
            sun: day.sun.clone(),
            moon: night.moon.clone(),
            text: lerp(&day.text, &night.text, t),
            accent: lerp(&day.accent, &night.accent, t),
        }),
        t,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_borrowed_from(theme: &Theme, palette: &'static Palette) -> bool {
        match &theme.colors {
            Cow::Borrowed(p) => std::ptr::eq(*p, palette),
            Cow::Owned(_) => false,
        }
    }

    #[test]
    fn test_start_is_exact_day() {
        let theme = resolve(0.0);
        assert_eq!(theme.t, 0.0);
        assert!(is_borrowed_from(&theme, &DAY));
    }

    #[test]
    fn test_first_cycle_never_transitions() {
        for s in [0.5, 4.9, 30.0, 54.9, 55.0, 59.99] {
            let theme = resolve(s);
            assert_eq!(theme.t, 0.0, "s = {s}");
            assert!(theme.is_day());
        }
    }

    #[test]
    fn test_mid_transition_blends() {
        let theme = resolve(62.5);
        assert!(theme.t > 0.0 && theme.t < 1.0);
        assert!((theme.t - 0.5).abs() < 1e-4);
        assert!(matches!(theme.colors, Cow::Owned(_)));
        // Sun and moon are never blended
        assert_eq!(theme.colors.sun, DAY.sun);
        assert_eq!(theme.colors.moon, NIGHT.moon);
        assert_ne!(theme.colors.background, DAY.background);
        assert_ne!(theme.colors.background, NIGHT.background);
    }

    #[test]
    fn test_stable_night() {
        let theme = resolve(90.0);
        assert_eq!(theme.t, 1.0);
        assert!(is_borrowed_from(&theme, &NIGHT));
    }

    #[test]
    fn test_night_to_day_ramps_down() {
        assert!((blend_factor(121.0) - 0.8).abs() < 1e-3);
        assert!((blend_factor(124.0) - 0.2).abs() < 1e-3);
        assert_eq!(resolve(130.0).t, 0.0);
    }

    #[test]
    fn test_window_edge_snaps() {
        // 0.005 into the window is within the snap tolerance of day
        let theme = resolve(60.02);
        assert_eq!(theme.t, 0.0);
        assert!(is_borrowed_from(&theme, &DAY));
        // Closing edge of the window is stable night
        assert_eq!(resolve(65.0).t, 1.0);
    }

    #[test]
    fn test_negative_time_is_day() {
        assert_eq!(resolve(-5.0).t, 0.0);
    }
}
