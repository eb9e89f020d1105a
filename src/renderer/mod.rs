//! Rendering
//!
//! [`scene::draw`] turns the game state into fill calls on a [`Canvas2d`].
//! Backends: [`CommandList`] records calls (tests, headless), and
//! [`RenderState`] tessellates them for WebGPU.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

use glam::Vec2;

use crate::sim::Rect;

pub use pipeline::RenderState;
pub use scene::{CommandList, DrawCommand, draw};
pub use vertex::{Color, Vertex, colors};

/// 2D drawing target in canvas space (origin top-left, y down)
pub trait Canvas2d {
    /// Called once before a frame's fill calls
    fn begin_frame(&mut self) {}

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Fill a convex path
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
}
