//! Geometry vocabulary shared with the host's scene graph.
//!
//! The host compositor owns rendering; this module only defines the plain
//! data types the paint hooks exchange: rectangles, clip regions, and the
//! quad meshes window surfaces are subdivided into for deformation.

pub mod geometry;
pub mod quads;

pub use geometry::{Rect, Region};
pub use quads::{QuadList, WindowQuad, WindowVertex};
