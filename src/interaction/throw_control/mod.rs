//! Throw Control Module
//!
//! This module handles grabbing rigid bodies with the pointer and throwing
//! them. A held body follows the pointer by velocity on the fixed step, its
//! depth is adjusted with the wheel or the fine-depth key, and on release the
//! averaged pointer motion becomes the launch velocity.

mod history;
mod state;
mod systems;

pub use history::*;
pub use state::*;
pub use systems::*;
