//! Selection Module
//!
//! Raycast selection with a constrained, position-interpolated drag.

mod scene;
mod state;
mod systems;

pub use scene::*;
pub use state::*;
pub use systems::*;
