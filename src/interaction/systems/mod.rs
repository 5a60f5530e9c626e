//! Systems module for the interaction layer
//!
//! Bevy systems shared by both controllers, organized into submodules:
//!
//! - `input`: Pointer sampling and the interaction mode hotkey
//! - `camera`: Pointer mapper lookup, preset views and camera transitions
//! - `highlight`: Material tint for held objects
//! - `setup`: Demo scene initialization

mod camera;
mod highlight;
mod input;
mod setup;

pub use camera::{
    drive_camera_tween, main_camera_mapper, select_camera_view, MainCameraQuery,
};
pub use highlight::sync_drag_highlight;
pub use input::{sample_pointer, toggle_interaction_mode};
pub use setup::{default_camera_views, setup, DemoScene, SCENERY_GROUP};
