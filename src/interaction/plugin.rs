//! Bevy plugin wiring both controllers into an app.

use bevy::input::InputSystems;
use bevy::prelude::*;

use super::pointer::PointerFrame;
use super::selection::{begin_selection, drive_selection, end_selection, SelectionState};
use super::systems::*;
use super::throw_control::{
    apply_gravity_feel, begin_throw_drag, drive_throw_drag, end_throw_drag, ThrowControlState,
};
use super::types::*;

/// Pointer-driven drag, throw and selection of Rapier bodies.
///
/// The physics plugin is not added here; run Rapier in the fixed schedule so
/// velocity changes from [`drive_throw_drag`] land on the step they are made
/// for.
#[derive(Default)]
pub struct InteractionPlugin {
    pub settings: InteractionSettings,
    pub mode: InteractionMode,
}

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        let settings = self.settings.clone().sanitized();

        app.insert_resource(ThrowControlState::new(settings.throw.clone()))
            .insert_resource(SelectionState::new(settings.select.clone()))
            .insert_resource(settings)
            .insert_resource(self.mode)
            .init_resource::<PointerFrame>()
            .init_resource::<CameraViews>()
            .add_systems(PreUpdate, sample_pointer.after(InputSystems))
            .add_systems(
                Update,
                (
                    (
                        toggle_interaction_mode,
                        begin_throw_drag,
                        end_throw_drag,
                        begin_selection,
                        end_selection,
                        sync_drag_highlight,
                    )
                        .chain(),
                    (select_camera_view, drive_camera_tween).chain(),
                ),
            )
            .add_systems(
                FixedUpdate,
                (drive_throw_drag, drive_selection, apply_gravity_feel).chain(),
            );
    }
}
