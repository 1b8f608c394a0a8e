//! Rectangle and region types shared with the host scene graph.
//!
//! All coordinates are in screen space with the y axis pointing down,
//! matching the compositor's paint pipeline.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ============================================================================
// Rect
// ============================================================================

/// A rectangle with position and size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Create a zero-sized rectangle at origin.
    #[must_use]
    pub const fn zero() -> Self { Self::new(0.0, 0.0, 0.0, 0.0) }

    /// Check if this rectangle has valid dimensions.
    ///
    /// An invalid rectangle signals "no geometry available"; the host reports
    /// a missing taskbar icon this way.
    #[must_use]
    pub fn is_valid(&self) -> bool { self.width > 0.0 && self.height > 0.0 }

    /// The x coordinate of the right edge.
    #[must_use]
    pub fn right(&self) -> f64 { self.x + self.width }

    /// The y coordinate of the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 { self.y + self.height }

    /// Check if this rectangle contains a point.
    #[must_use]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Check if this rectangle intersects with another.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    /// Get the center point of this rectangle.
    #[must_use]
    pub fn center(&self) -> (f64, f64) { (self.x + self.width / 2.0, self.y + self.height / 2.0) }

    /// The smallest rectangle containing both `self` and `other`.
    #[must_use]
    pub fn united(&self, other: &Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(x, y, right - x, bottom - y)
    }

    /// A copy of this rectangle with every edge moved outward by the given
    /// margins. Negative margins shrink the rectangle.
    #[must_use]
    pub fn inflated(&self, horizontal: f64, vertical: f64) -> Self {
        Self::new(
            self.x - horizontal,
            self.y - vertical,
            self.width + 2.0 * horizontal,
            self.height + 2.0 * vertical,
        )
    }

    /// Check if two rectangles are approximately equal (within epsilon).
    #[must_use]
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.width - other.width).abs() < epsilon
            && (self.height - other.height).abs() < epsilon
    }
}

// ============================================================================
// Region
// ============================================================================

/// A screen-space region made of one or more rectangles.
///
/// Paint clipping only needs coarse regions, so this stays a flat rect list
/// rather than a scanline structure. Uses `SmallVec` for inline storage of
/// the common one-rect case.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Region {
    rects: SmallVec<[Rect; 2]>,
}

impl Region {
    /// Create an empty region.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Returns whether the region contains no area.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.rects.iter().all(|r| !r.is_valid()) }

    /// Adds a rectangle to the region. Invalid rectangles are ignored.
    pub fn add(&mut self, rect: Rect) {
        if rect.is_valid() {
            self.rects.push(rect);
        }
    }

    /// The smallest rectangle covering the whole region, or a zero rect for
    /// an empty region.
    #[must_use]
    pub fn bounding_rect(&self) -> Rect {
        let mut valid = self.rects.iter().filter(|r| r.is_valid());
        let Some(first) = valid.next() else {
            return Rect::zero();
        };
        valid.fold(*first, |acc, r| acc.united(r))
    }

    /// Check if any rectangle in the region contains the point.
    #[must_use]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.rects.iter().any(|r| r.contains_point(x, y))
    }

    /// Iterates over the rectangles making up the region.
    pub fn iter(&self) -> impl Iterator<Item = &Rect> { self.rects.iter() }
}

impl From<Rect> for Region {
    fn from(rect: Rect) -> Self {
        let mut region = Self::new();
        region.add(rect);
        region
    }
}

// ============================================================================
// Tests
// ============================================================================
