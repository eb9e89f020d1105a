//! Collision detection for axis-aligned boxes
//!
//! Everything in the game is a screen-aligned rectangle in canvas space
//! (origin top-left, y grows downward). Pipes are columns with a hole in
//! them, so a hit is "overlaps the column and is not fully inside the gap".

use glam::Vec2;

use super::state::{Bird, Pipe};

/// Axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    /// Strict horizontal overlap (touching edges do not overlap)
    #[inline]
    pub fn overlaps_x(&self, left: f32, right: f32) -> bool {
        self.right() > left && self.left() < right
    }

    /// Whether the vertical extent lies within `[top, bottom]` (inclusive)
    #[inline]
    pub fn within_y(&self, top: f32, bottom: f32) -> bool {
        self.top() >= top && self.bottom() <= bottom
    }
}

/// Check whether the bird hits a pipe
///
/// Inside the gap is safe; anywhere else inside the column is a hit.
pub fn bird_hits_pipe(bird: &Bird, pipe: &Pipe) -> bool {
    let body = bird.rect();
    body.overlaps_x(pipe.x, pipe.right()) && !body.within_y(pipe.top_height, pipe.bottom_y)
}
