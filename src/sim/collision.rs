//! Collision detection between circles and axis-aligned rectangles
//!
//! Everything on the board is either a circle (the sprite, the mouse
//! pointer) or a rectangle (cells, traps), so one test covers it all.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in pixel space (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size / 2.0
    }
}

/// Check whether a circle overlaps a rectangle (edges inclusive)
///
/// A zero radius turns this into a point-in-rectangle test.
pub fn circle_rect_collision(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let half = rect.half_extents();
    let delta = (center - rect.center()).abs();

    if delta.x > half.x + radius || delta.y > half.y + radius {
        return false;
    }
    if delta.x <= half.x || delta.y <= half.y {
        return true;
    }

    // Only the corner region is left
    let corner = delta - half;
    corner.length_squared() <= radius * radius
}
