//! Window surface meshes for per-vertex deformation.
//!
//! The host hands the effect a window's surface as a list of textured quads
//! in window-local coordinates. [`QuadList::make_grid`] subdivides that
//! surface into a finer mesh so a deformation applied per vertex produces a
//! smooth curved shape instead of a sheared rectangle.

use super::geometry::Rect;

// ============================================================================
// Types
// ============================================================================

/// A single mesh vertex: window-local position plus texture coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WindowVertex {
    /// Window-local x position.
    pub x: f64,
    /// Window-local y position.
    pub y: f64,
    /// Horizontal texture coordinate.
    pub u: f64,
    /// Vertical texture coordinate.
    pub v: f64,
}

impl WindowVertex {
    /// Creates a new vertex.
    #[must_use]
    pub const fn new(x: f64, y: f64, u: f64, v: f64) -> Self { Self { x, y, u, v } }
}

/// A textured quadrilateral, corners ordered top-left, top-right,
/// bottom-right, bottom-left.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WindowQuad {
    vertices: [WindowVertex; 4],
}

impl WindowQuad {
    /// Creates a quad from its four corners.
    #[must_use]
    pub const fn new(vertices: [WindowVertex; 4]) -> Self { Self { vertices } }

    /// Creates an axis-aligned quad covering `rect` with texture coordinates
    /// interpolated over `tex`.
    #[must_use]
    pub fn from_rect(rect: Rect, tex: Rect) -> Self {
        Self::new([
            WindowVertex::new(rect.x, rect.y, tex.x, tex.y),
            WindowVertex::new(rect.right(), rect.y, tex.right(), tex.y),
            WindowVertex::new(rect.right(), rect.bottom(), tex.right(), tex.bottom()),
            WindowVertex::new(rect.x, rect.bottom(), tex.x, tex.bottom()),
        ])
    }

    /// The quad's corners.
    #[must_use]
    pub const fn vertices(&self) -> &[WindowVertex; 4] { &self.vertices }

    /// Mutable access to the quad's corners.
    pub const fn vertices_mut(&mut self) -> &mut [WindowVertex; 4] { &mut self.vertices }
}

/// A window surface as a list of quads.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuadList {
    quads: Vec<WindowQuad>,
}

impl QuadList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self { Self { quads: Vec::new() } }

    /// Creates the undeformed surface of a window: a single quad spanning
    /// `width x height` with the full texture mapped onto it.
    #[must_use]
    pub fn from_window(width: f64, height: f64) -> Self {
        Self {
            quads: vec![WindowQuad::from_rect(
                Rect::new(0.0, 0.0, width, height),
                Rect::new(0.0, 0.0, 1.0, 1.0),
            )],
        }
    }

    /// Number of quads in the list.
    #[must_use]
    pub fn len(&self) -> usize { self.quads.len() }

    /// Returns whether the list contains no quads.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.quads.is_empty() }

    /// Iterates over the quads.
    pub fn iter(&self) -> impl Iterator<Item = &WindowQuad> { self.quads.iter() }

    /// Iterates mutably over the quads.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut WindowQuad> { self.quads.iter_mut() }

    /// The smallest rectangle containing every vertex position.
    #[must_use]
    pub fn bounding_rect(&self) -> Rect {
        let mut vertices = self.quads.iter().flat_map(|q| q.vertices().iter());
        let Some(first) = vertices.next() else {
            return Rect::zero();
        };
        let mut min_x = first.x;
        let mut min_y = first.y;
        let mut max_x = first.x;
        let mut max_y = first.y;
        for vertex in vertices {
            min_x = min_x.min(vertex.x);
            min_y = min_y.min(vertex.y);
            max_x = max_x.max(vertex.x);
            max_y = max_y.max(vertex.y);
        }
        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Subdivides the surface into a `resolution x resolution` mesh over its
    /// bounding rectangle.
    ///
    /// A resolution of 0 or 1 returns the list unchanged (a single cell is
    /// the surface itself). Assumes the list is an undeformed axis-aligned
    /// mesh with uniform texture mapping, which holds for window surfaces
    /// before any deformation is applied.
    #[must_use]
    pub fn make_grid(&self, resolution: u32) -> Self {
        if resolution <= 1 || self.quads.is_empty() {
            return self.clone();
        }
        let bounds = self.bounding_rect();
        if !bounds.is_valid() {
            return self.clone();
        }
        let tex = self.texture_bounds();

        let steps = f64::from(resolution);
        let mut quads = Vec::new();
        for row in 0..resolution {
            let top = f64::from(row) / steps;
            let bottom = f64::from(row + 1) / steps;
            for col in 0..resolution {
                let left = f64::from(col) / steps;
                let right = f64::from(col + 1) / steps;
                quads.push(WindowQuad::from_rect(
                    Rect::new(
                        bounds.x + left * bounds.width,
                        bounds.y + top * bounds.height,
                        (right - left) * bounds.width,
                        (bottom - top) * bounds.height,
                    ),
                    Rect::new(
                        tex.x + left * tex.width,
                        tex.y + top * tex.height,
                        (right - left) * tex.width,
                        (bottom - top) * tex.height,
                    ),
                ));
            }
        }
        Self { quads }
    }

    /// The texture-coordinate range covered by the list.
    fn texture_bounds(&self) -> Rect {
        let mut vertices = self.quads.iter().flat_map(|q| q.vertices().iter());
        let Some(first) = vertices.next() else {
            return Rect::zero();
        };
        let mut min_u = first.u;
        let mut min_v = first.v;
        let mut max_u = first.u;
        let mut max_v = first.v;
        for vertex in vertices {
            min_u = min_u.min(vertex.u);
            min_v = min_v.min(vertex.v);
            max_u = max_u.max(vertex.u);
            max_v = max_v.max(vertex.v);
        }
        Rect::new(min_u, min_v, max_u - min_u, max_v - min_v)
    }
}

// ============================================================================
// Tests
// ============================================================================
