//! GPU rendering.
//!
//! Geometry is authored in normalized device coordinates and drawn through
//! `ColorPipeline`, which is built from the validated GLSL stages in
//! [`crate::shader`]. Each renderer owns its own GPU resources.

mod ctx;
mod mesh;
mod pipeline;
mod uniforms;
mod vertex;

pub use ctx::{RenderCtx, RenderTarget};
pub use mesh::Mesh;
pub use pipeline::ColorPipeline;
pub use uniforms::{ProjectionBlock, RedBlock};
pub use vertex::{ColorVertex, Index, VertexLayout, QUAD_INDICES, QUAD_VERTICES};
