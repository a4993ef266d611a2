//! Data-driven game balance
//!
//! Defaults reproduce the shipped feel. Overrides can be supplied as JSON,
//! any missing field falls back to its default.

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;

/// One step of the obstacle difficulty curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyBand {
    /// Band applies once survival time is strictly greater than this
    pub after_secs: f32,
    /// Minimum pixel gap before any speed allowance
    pub min_gap: f32,
    /// Per-tick obstacle spawn probability
    pub spawn_chance: f32,
}

/// Gameplay balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration (px/tick²)
    pub gravity: f32,
    /// Initial upward velocity of a jump (px/tick)
    pub jump_strength: f32,
    /// Distance from the bottom of the view to the ground line
    pub ground_height: f32,
    /// Scroll speed at the start of a run (px/tick)
    pub base_speed: f32,
    /// Weight of the target speed in the per-tick smoothing
    pub speed_smoothing: f32,
    /// Extra gap per unit of scroll speed
    pub gap_speed_factor: f32,
    /// Probability that a late obstacle is an air trap is `1 - air_draw_threshold`
    pub air_draw_threshold: f32,
    /// Air traps only appear after this much survival time
    pub air_after_secs: f32,
    /// Per-tick probability of a star while none is active
    pub star_chance: f32,
    /// Invincibility granted by a star (seconds)
    pub star_duration_secs: f32,
    /// Obstacle difficulty curve, ascending by `after_secs`
    pub bands: Vec<DifficultyBand>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.6,
            jump_strength: 13.0,
            ground_height: 120.0,
            base_speed: 5.0,
            speed_smoothing: 0.05,
            gap_speed_factor: 15.0,
            air_draw_threshold: 0.6,
            air_after_secs: 40.0,
            star_chance: 0.0008,
            star_duration_secs: 15.0,
            bands: vec![
                DifficultyBand { after_secs: 0.0, min_gap: 350.0, spawn_chance: 0.015 },
                DifficultyBand { after_secs: 20.0, min_gap: 300.0, spawn_chance: 0.02 },
                DifficultyBand { after_secs: 40.0, min_gap: 250.0, spawn_chance: 0.03 },
                DifficultyBand { after_secs: 60.0, min_gap: 200.0, spawn_chance: 0.04 },
            ],
        }
    }
}

impl Tuning {
    /// Storage key for an optional override
    pub const STORAGE_KEY: &'static str = "samuraiJump_tuning";

    /// Stored override, or the defaults when absent or malformed
    pub fn load(store: &impl KeyValueStore) -> Self {
        let Some(json) = store.get(Self::STORAGE_KEY) else {
            return Self::default();
        };
        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Using tuning override");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring malformed tuning override: {e}");
                Self::default()
            }
        }
    }

    /// Parse overrides from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Difficulty band in effect at the given survival time
    pub fn band_at(&self, elapsed: f32) -> DifficultyBand {
        self.bands
            .iter()
            .rev()
            .find(|b| elapsed > b.after_secs)
            .or_else(|| self.bands.first())
            .copied()
            .unwrap_or(DifficultyBand {
                after_secs: 0.0,
                min_gap: 350.0,
                spawn_chance: 0.015,
            })
    }

    /// Target scroll speed for the given survival time
    ///
    /// Every segment is an offset from `base_speed`. With the default of 5:
    /// ramps 5 -> 7 over the first 20s, holds at 8, ramps 8 -> 11 until 60s,
    /// then keeps creeping up from 12 without bound.
    pub fn target_speed(&self, elapsed: f32) -> f32 {
        let base = self.base_speed;
        if elapsed < 20.0 {
            base + (elapsed / 20.0) * 2.0
        } else if elapsed < 40.0 {
            base + 3.0
        } else if elapsed < 60.0 {
            base + 3.0 + ((elapsed - 40.0) / 20.0) * 3.0
        } else {
            base + 7.0 + (elapsed - 60.0) * 0.05
        }
    }

    /// Star invincibility in milliseconds
    pub fn star_duration_ms(&self) -> f64 {
        self.star_duration_secs as f64 * 1000.0
    }
}
