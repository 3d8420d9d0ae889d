//! Coordinate, color and placement types shared by the renderer and the demo.
//!
//! Geometry is authored directly in normalized device coordinates
//! ([-1, 1] on both axes, +Y up). The projected vertex variant maps it
//! through a matrix built here.

mod color;
mod transform;
mod viewport;

pub use color::ColorRgba;
pub use transform::{ortho_for_viewport, Transform};
pub use viewport::Viewport;
