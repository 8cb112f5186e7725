//! Geometry primitives (microns)

use crate::error::{LayoutError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Rect {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Rect { x1, y1, x2, y2 }
    }

    /// Rectangle of the given size with its lower-left corner at `origin`
    pub fn from_origin(origin: Point, width: f64, height: f64) -> Self {
        Rect {
            x1: origin.x,
            y1: origin.y,
            x2: origin.x + width,
            y2: origin.y + height,
        }
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    pub fn lower_left(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn upper_right(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    pub fn center(&self) -> Point {
        Point::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Grow outward by `amount` on every side
    pub fn expand(&self, amount: f64) -> Self {
        Rect {
            x1: self.x1 - amount,
            y1: self.y1 - amount,
            x2: self.x2 + amount,
            y2: self.y2 + amount,
        }
    }

    /// Whether `other` lies inside this rectangle, edges included
    pub fn contains(&self, other: &Rect, tolerance: f64) -> bool {
        other.x1 >= self.x1 - tolerance
            && other.y1 >= self.y1 - tolerance
            && other.x2 <= self.x2 + tolerance
            && other.y2 <= self.y2 + tolerance
    }

    /// Whether the interiors intersect; touching edges do not count
    pub fn overlaps(&self, other: &Rect, tolerance: f64) -> bool {
        self.x1 < other.x2 - tolerance
            && other.x1 < self.x2 - tolerance
            && self.y1 < other.y2 - tolerance
            && other.y1 < self.y2 - tolerance
    }
}

/// Rectangular region (diffusion / active area) holding a cut array
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Lower-left corner
    pub origin: Point,
    /// Extent along x
    pub width: f64,
    /// Extent along y
    pub length: f64,
}

impl Region {
    pub fn new(x: f64, y: f64, width: f64, length: f64) -> Self {
        Region {
            origin: Point::new(x, y),
            width,
            length,
        }
    }

    /// Region of the given size at the origin
    pub fn sized(width: f64, length: f64) -> Self {
        Region::new(0.0, 0.0, width, length)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.origin.x.is_finite() || !self.origin.y.is_finite() {
            return Err(LayoutError::InvalidRegion(format!(
                "origin ({}, {}) is not finite",
                self.origin.x, self.origin.y
            )));
        }
        for (name, value) in [("width", self.width), ("length", self.length)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::InvalidRegion(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    pub fn rect(&self) -> Rect {
        Rect::from_origin(self.origin, self.width, self.length)
    }
}
