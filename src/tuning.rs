//! Game tuning
//!
//! Every gameplay constant lives here so a run can be reshaped from a JSON
//! override without recompiling. Missing fields fall back to [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;

/// Data-driven game constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Surface ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Bird ===
    /// Fixed horizontal position of the bird's left edge
    pub bird_x: f32,
    pub bird_width: f32,
    pub bird_height: f32,
    /// Velocity gained per tick
    pub gravity: f32,
    /// Velocity set by a flap (must be negative)
    pub flap_impulse: f32,

    // === Pipes ===
    pub pipe_width: f32,
    /// Vertical size of the passable gap
    pub pipe_gap: f32,
    /// Scroll distance per tick
    pub pipe_speed: f32,
    /// Time between spawns, same unit as frame timestamps (ms)
    pub spawn_interval_ms: f32,
    /// Minimum clearance between the gap and the canvas edges
    pub gap_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            bird_x: BIRD_X,
            bird_width: BIRD_WIDTH,
            bird_height: BIRD_HEIGHT,
            gravity: GRAVITY,
            flap_impulse: FLAP_IMPULSE,

            pipe_width: PIPE_WIDTH,
            pipe_gap: PIPE_GAP,
            pipe_speed: PIPE_SPEED,
            spawn_interval_ms: PIPE_SPAWN_INTERVAL_MS,
            gap_margin: GAP_MARGIN,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Bird starting height (vertically centered)
    pub fn bird_start_y(&self) -> f32 {
        self.canvas_height / 2.0
    }

    /// Valid range for a pipe's top segment height
    ///
    /// Keeps `gap_margin` between the gap and both edges, so neither segment
    /// is ever degenerate.
    pub fn gap_top_range(&self) -> std::ops::Range<f32> {
        self.gap_margin..(self.canvas_height - self.pipe_gap - self.gap_margin)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("bird_width", self.bird_width),
            ("bird_height", self.bird_height),
            ("pipe_width", self.pipe_width),
            ("pipe_gap", self.pipe_gap),
            ("pipe_speed", self.pipe_speed),
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("gap_margin", self.gap_margin),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::invalid(
                    field,
                    format!("must be a positive number, got {value}"),
                ));
            }
        }

        if !(self.gravity.is_finite() && self.gravity >= 0.0) {
            return Err(TuningError::invalid(
                "gravity",
                format!("must be non-negative, got {}", self.gravity),
            ));
        }
        if !(self.flap_impulse.is_finite() && self.flap_impulse < 0.0) {
            return Err(TuningError::invalid(
                "flap_impulse",
                format!("must be negative (upward), got {}", self.flap_impulse),
            ));
        }

        let range = self.gap_top_range();
        if range.start >= range.end {
            return Err(TuningError::invalid(
                "pipe_gap",
                format!(
                    "gap {} plus 2 x margin {} does not fit in height {}",
                    self.pipe_gap, self.gap_margin, self.canvas_height
                ),
            ));
        }
        if !(self.bird_x.is_finite()
            && self.bird_x >= 0.0
            && self.bird_x + self.bird_width <= self.canvas_width)
        {
            return Err(TuningError::invalid("bird_x", "bird must start on screen"));
        }
        if self.bird_height >= self.canvas_height {
            return Err(TuningError::invalid(
                "bird_height",
                "bird must be shorter than the canvas",
            ));
        }

        Ok(())
    }
}
