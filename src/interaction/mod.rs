//! Pointer interaction with physics objects
//!
//! Two controllers share the pointer: a drag-and-throw controller that moves
//! a held body by velocity and launches it on release, and a selection
//! controller that pulls the picked object along by interpolation. Both are
//! plain state machines driven by Bevy systems.

pub mod plugin;
pub mod pointer;
pub mod selection;
pub mod systems;
pub mod throw_control;
pub mod types;

pub use plugin::InteractionPlugin;
