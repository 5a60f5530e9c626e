//! Selection Systems
//!
//! Glue between the pointer, the Rapier world and the selection controller.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::scene::RapierScene;
use super::state::SelectionState;
use crate::interaction::pointer::PointerFrame;
use crate::interaction::systems::{main_camera_mapper, MainCameraQuery};
use crate::interaction::types::*;

/// Select the object under the pointer.
pub fn begin_selection(
    mode: Res<InteractionMode>,
    pointer: Res<PointerFrame>,
    cameras: MainCameraQuery,
    rapier_context: ReadRapierContext,
    mut selection: ResMut<SelectionState>,
    mut bodies: Query<BodyQueryData>,
    mut touchables: Query<&'static mut Touchable>,
) {
    if *mode != InteractionMode::Constrained || !pointer.just_pressed {
        return;
    }
    let Some(position) = pointer.position else {
        return;
    };
    let Some(mapper) = main_camera_mapper(&cameras, pointer.space) else {
        return;
    };
    let context = rapier_context.single().ok();
    if context.is_none() {
        warn_once!("No Rapier context available; selection is paused");
        return;
    }

    let mut scene = RapierScene {
        context,
        bodies: &mut bodies,
        touchables: &mut touchables,
    };
    if let Some(object) = selection.controller.press(&mapper, position, &mut scene) {
        info!("Selected {:?}", object);
    }
}

/// Pull the selection toward the pointer for one fixed step.
pub fn drive_selection(
    time: Res<Time>,
    pointer: Res<PointerFrame>,
    cameras: MainCameraQuery,
    mut selection: ResMut<SelectionState>,
    mut bodies: Query<BodyQueryData>,
    mut touchables: Query<&'static mut Touchable>,
) {
    if selection.controller.selected().is_none() {
        return;
    }
    let Some(position) = pointer.position else {
        return;
    };
    let Some(mapper) = main_camera_mapper(&cameras, pointer.space) else {
        return;
    };

    let mut scene = RapierScene {
        context: None,
        bodies: &mut bodies,
        touchables: &mut touchables,
    };
    selection
        .controller
        .drag(&mapper, position, time.delta_secs(), &mut scene);
}

/// Drop the selection when the button goes up.
pub fn end_selection(
    pointer: Res<PointerFrame>,
    mut selection: ResMut<SelectionState>,
    mut bodies: Query<BodyQueryData>,
    mut touchables: Query<&'static mut Touchable>,
) {
    if !pointer.just_released {
        return;
    }

    let mut scene = RapierScene {
        context: None,
        bodies: &mut bodies,
        touchables: &mut touchables,
    };
    if let Some(object) = selection.controller.release(&mut scene) {
        info!("Released {:?}", object);
    }
}
