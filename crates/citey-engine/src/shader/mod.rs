//! GLSL sources and their host-side checks.
//!
//! The stages are parsed with naga's GLSL front end, validated, and reflected
//! so that a vertex/fragment pair can be checked for a matching interface
//! before any GPU object is created. The validated naga modules are what the
//! render pipeline is built from.

mod compile;
mod error;
mod interface;
mod program;
mod sources;

pub use compile::{compile, CompiledStage, UniformBlock, UniformMember};
pub use error::ShaderError;
pub use interface::{check_link, IoType, IoVar, StageInterface};
pub use program::{ShaderProgram, UniformLocation};
pub use sources::{ShaderSource, ShaderStage, VertexVariant};
