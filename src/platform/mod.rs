//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame scheduling (requestAnimationFrame on web, manual pumping natively)
//! - Input events (mapping raw signals to game commands)

pub mod input;
pub mod manual;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{Command, Signal, command_for};
pub use manual::ManualScheduler;

/// Host-provided source of frame callbacks
///
/// The host calls back into [`crate::LoopDriver::frame`] with the fired
/// handle and a timestamp for every request that was not cancelled.
pub trait FrameScheduler {
    /// Identifies one outstanding request
    type Handle: Copy + PartialEq + std::fmt::Debug;

    /// Ask for one frame callback. `None` if the host refused.
    fn request_frame(&mut self) -> Option<Self::Handle>;

    /// Withdraw a request so its callback never fires
    fn cancel_frame(&mut self, handle: Self::Handle);
}
