//! Citey engine crate.
//!
//! GLSL shader stages for a vertex-colored quad, their host-side checks, a
//! CPU reference of both stages, and the wgpu/winit runtime that draws them.

pub mod coords;
pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod reference;
pub mod render;
pub mod shader;
pub mod time;
pub mod window;
