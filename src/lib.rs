//! Flappy - a single-screen flap-through-the-pipes arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, scoring)
//! - `driver`: Frame loop state machine (start/restart, scheduling, cancellation)
//! - `renderer`: Drawing seam plus the WebGPU backend
//! - `platform`: Browser/native frame scheduling and input mapping
//! - `tuning`: Data-driven game constants

pub mod driver;
pub mod error;
pub mod highscores;
pub mod hud;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use driver::{FrameOutcome, LoopDriver};
pub use error::{RenderError, TuningError};
pub use highscores::BestScore;
pub use hud::HudView;
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Logical drawing surface size
    pub const CANVAS_WIDTH: f32 = 400.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Bird defaults
    pub const BIRD_X: f32 = 100.0;
    pub const BIRD_WIDTH: f32 = 40.0;
    pub const BIRD_HEIGHT: f32 = 30.0;
    /// Added to velocity every tick (not scaled by dt)
    pub const GRAVITY: f32 = 0.5;
    /// Velocity set on flap (negative = up)
    pub const FLAP_IMPULSE: f32 = -10.0;

    /// Pipe defaults
    pub const PIPE_WIDTH: f32 = 60.0;
    pub const PIPE_GAP: f32 = 150.0;
    /// Scroll distance per tick
    pub const PIPE_SPEED: f32 = 2.0;
    /// Milliseconds between spawns
    pub const PIPE_SPAWN_INTERVAL_MS: f32 = 1500.0;
    /// Minimum distance between the gap and the top/bottom edges
    pub const GAP_MARGIN: f32 = 50.0;
}
