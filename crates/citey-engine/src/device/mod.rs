//! GPU device + surface management.
//!
//! - creates the wgpu Instance/Adapter/Device/Queue
//! - creates and configures the Surface for a window
//! - acquires frames and hands out an encoder + view for rendering

mod context;
mod error;
mod frame;
mod init;
mod surface;

pub use context::Gpu;
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use init::GpuInit;
