//! Scripted player for attract mode and headless runs

use super::collision::Rect;
use super::state::{GameState, ObstacleKind};

/// Ticks of look-ahead used to time a take-off
const TAKEOFF_LEAD_TICKS: f32 = 10.0;
/// Roughly how long a jump keeps the player off the ground
const AIRTIME_TICKS: f32 = 45.0;

/// Decide whether to jump this tick.
///
/// Jumps when the next ground obstacle is within take-off range, unless an
/// air trap would be in the way during the arc. Air traps are run under.
pub fn should_jump(state: &GameState) -> bool {
    if state.player.airborne {
        return false;
    }

    let player = state.player.hitbox();
    let reach = state.speed * TAKEOFF_LEAD_TICKS;
    let arc = state.speed * AIRTIME_TICKS;

    let takeoff = ahead(state, ObstacleKind::Ground, &player)
        .next()
        .map(|b| b.x - player.right())
        .is_some_and(|d| (0.0..=reach).contains(&d));

    let trap_overhead =
        ahead(state, ObstacleKind::Air, &player).any(|b| b.x - player.right() <= arc);

    takeoff && !trap_overhead
}

/// Hitboxes of one kind that have not yet fully passed the player
fn ahead<'a>(
    state: &'a GameState,
    kind: ObstacleKind,
    player: &'a Rect,
) -> impl Iterator<Item = Rect> + 'a {
    state
        .obstacles
        .iter()
        .filter(move |o| o.kind() == kind)
        .map(|o| o.hitbox())
        .filter(move |b| b.right() > player.x)
}
