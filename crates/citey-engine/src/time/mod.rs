//! Frame timing.
//!
//! - `FrameClock`: one per window, `tick()` once per presented frame
//! - `FpsCounter`: frames-per-second readout for the window title

mod fps;
mod frame_clock;

pub use fps::FpsCounter;
pub use frame_clock::{FrameClock, FrameTime};
