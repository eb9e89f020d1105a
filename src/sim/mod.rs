//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Pipes kept in spawn order
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Rect, bird_hits_pipe};
pub use spawner::advance_spawner;
pub use state::{Bird, GamePhase, GameState, Pipe};
pub use tick::{CrashCause, TickReport, tick};
