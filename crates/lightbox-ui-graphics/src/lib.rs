//! Pure math/data for geometry and view transforms in Lightbox
//!
//! This crate contains the geometry primitives and the visual transform value
//! shared by the gesture engines and whatever renderer hosts them.

mod geometry;
mod transform;

pub use geometry::*;
pub use transform::*;

pub mod prelude {
    pub use crate::geometry::{frame_for_content, ContentMode, Point, Rect, Size};
    pub use crate::transform::VisualTransform;
}
