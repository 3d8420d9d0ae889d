use thiserror::Error;

use super::interface::IoType;
use super::sources::ShaderStage;

/// Errors produced while compiling or linking the GLSL stages.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShaderError {
    #[error("failed to parse shader `{label}`: {message}")]
    Parse { label: String, message: String },

    #[error("shader `{label}` failed validation: {message}")]
    Validation { label: String, message: String },

    #[error("shader `{label}` has no `{expected}` entry point (found {found})")]
    StageMismatch {
        label: String,
        expected: ShaderStage,
        found: String,
    },

    /// The fragment stage reads a location the vertex stage never writes.
    #[error("fragment input at location {location} ({ty}) is not written by the vertex stage")]
    MissingInput { location: u32, ty: IoType },

    #[error("location {location} is {vertex} in the vertex stage but {fragment} in the fragment stage")]
    InputTypeMismatch {
        location: u32,
        vertex: IoType,
        fragment: IoType,
    },

    #[error("location {location} is named `{vertex}` in the vertex stage but `{fragment}` in the fragment stage")]
    InputNameMismatch {
        location: u32,
        vertex: String,
        fragment: String,
    },
}
