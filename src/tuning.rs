//! Data-driven physics values
//!
//! Defaults reproduce the shipped gameplay exactly; a JSON blob can override
//! individual fields for experiments and tests.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Physics and scoring values for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration per frame (px/frame²)
    pub gravity: f32,
    /// Velocity applied on jump (px/frame, negative is up)
    pub jump_force: f32,
    /// Horizontal speed while a direction is held (px/frame)
    pub move_speed: f32,
    /// Simulated milliseconds per frame step
    pub frame_dt_ms: f64,
    /// Points per collectible
    pub collectible_value: u32,
    /// On a winning step, roll the clock back to its pre-step value.
    ///
    /// The clock is NOT rolled back on a fall-off; the asymmetry is part of
    /// the shipped behavior. This toggle exists so tests can exercise both.
    pub revert_clock_on_success: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            move_speed: MOVE_SPEED,
            frame_dt_ms: FRAME_DT_MS,
            collectible_value: COLLECTIBLE_VALUE,
            revert_clock_on_success: true,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
