//! Overlap tests for axis-aligned rectangles and circles
//!
//! Every gameplay collision goes through here. Fish and coins are modelled as
//! circles inscribed in their sprites; kelp obstacles stay rectangles.
//! All tests are strict: shapes that merely touch do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (top-left corner + size, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Square sprite box of side `size` at `pos`
    pub fn square(pos: Vec2, size: f32) -> Self {
        Self {
            pos,
            size: Vec2::splat(size),
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Trailing (right) edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Circle collider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Circle centred in a square sprite, with radius `size * fraction`
    pub fn inscribed(pos: Vec2, size: f32, fraction: f32) -> Self {
        Self {
            center: pos + Vec2::splat(size * 0.5),
            radius: size * fraction,
        }
    }
}

/// Rectangles overlap on both axes (open intervals)
pub fn rect_overlap(a: &Rect, b: &Rect) -> bool {
    a.pos.x < b.right() && a.right() > b.pos.x && a.pos.y < b.bottom() && a.bottom() > b.pos.y
}

/// Distance between centres is less than the sum of radii
pub fn circle_overlap(a: &Circle, b: &Circle) -> bool {
    let reach = a.radius + b.radius;
    a.center.distance_squared(b.center) < reach * reach
}

/// Circle vs rectangle
///
/// Clamps the circle's centre onto the rectangle to find the closest point,
/// then compares that distance against the radius.
pub fn circle_rect_overlap(circle: &Circle, rect: &Rect) -> bool {
    let closest = circle.center.clamp(rect.min(), rect.max());
    circle.center.distance_squared(closest) < circle.radius * circle.radius
}
