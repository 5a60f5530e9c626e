//! Pointer Module
//!
//! Turns 2D pointer input into world-space positions: the camera projection
//! snapshot, the frame-clock input accumulator, and the surface mapping used
//! when the camera image is shown inside a UI rect.

mod frame;
mod letterbox;
mod mapper;

pub use frame::*;
pub use letterbox::*;
pub use mapper::*;
