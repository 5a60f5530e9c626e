//! Type definitions shared by the interaction controllers
//!
//! This module is organized into submodules:
//! - `body` - Rigid body access for the controllers
//! - `camera` - Camera marker, view presets and transitions
//! - `capability` - Highlight / interaction capabilities and marker components
//! - `mode` - Which controller reacts to the pointer
//! - `settings` - Tuning parameters and settings loading

pub mod body;
pub mod camera;
pub mod capability;
pub mod mode;
pub mod settings;

pub use body::*;
pub use camera::*;
pub use capability::*;
pub use mode::*;
pub use settings::*;
