//! Geometric types for surface coordinates

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A position in surface pixel coordinates (or display coordinates before mapping)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Axis-aligned bounds with inclusive edges
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Check if this rectangle contains a point (edges included)
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }
}

/// On-screen display size of the drawable surface.
///
/// Pointer input arrives in display coordinates; the surface itself is sized
/// to the image's natural pixels, so the two differ whenever the surface is
/// scaled by layout.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Map a display-space point into surface pixel space.
    ///
    /// Each axis is scaled independently. A degenerate viewport maps 1:1 on
    /// that axis.
    pub fn to_surface(&self, pos: Point, surface_width: u32, surface_height: u32) -> Point {
        let sx = if self.width > 0.0 {
            surface_width as f32 / self.width
        } else {
            1.0
        };
        let sy = if self.height > 0.0 {
            surface_height as f32 / self.height
        } else {
            1.0
        };
        Point::new(pos.x * sx, pos.y * sy)
    }
}
