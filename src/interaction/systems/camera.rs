//! Camera systems
//!
//! This module contains the pointer mapper lookup shared by the controllers,
//! the preset view hotkeys and the per-frame camera transition.

use bevy::prelude::*;

use crate::interaction::pointer::{PointerMapper, PointerSpace};
use crate::interaction::types::*;

/// Query for the camera the pointer is mapped through.
pub type MainCameraQuery<'w, 's> = Query<
    'w,
    's,
    (&'static Camera, &'static GlobalTransform, &'static Projection),
    With<MainCamera>,
>;

/// Snapshot the main camera's projection for pointers given in `space`, or
/// `None` when there is no usable perspective camera this frame.
pub fn main_camera_mapper(
    cameras: &MainCameraQuery,
    space: PointerSpace,
) -> Option<PointerMapper> {
    let Ok((camera, transform, projection)) = cameras.single() else {
        warn_once!("No single MainCamera found; pointer interaction is paused");
        return None;
    };
    let mapper = PointerMapper::from_camera(camera, transform, projection);
    if mapper.is_none() {
        warn_once!(
            "MainCamera has no perspective projection or viewport; pointer interaction is paused"
        );
    }
    mapper.map(|mapper| mapper.in_space(space))
}

/// Keys 1..9 move the camera to the matching preset view.
pub fn select_camera_view(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    views: Res<CameraViews>,
    settings: Res<InteractionSettings>,
    camera_query: Query<(Entity, &Transform), With<MainCamera>>,
) {
    const VIEW_KEYS: [KeyCode; 9] = [
        KeyCode::Digit1,
        KeyCode::Digit2,
        KeyCode::Digit3,
        KeyCode::Digit4,
        KeyCode::Digit5,
        KeyCode::Digit6,
        KeyCode::Digit7,
        KeyCode::Digit8,
        KeyCode::Digit9,
    ];

    let Some(index) = VIEW_KEYS.iter().position(|key| keyboard.just_pressed(*key)) else {
        return;
    };
    let Some((name, target)) = views.get(index) else {
        debug!("No camera view bound to key {}", index + 1);
        return;
    };
    let Ok((entity, transform)) = camera_query.single() else {
        return;
    };

    // Inserting replaces any transition still in flight.
    commands.entity(entity).insert(CameraTween::new(
        transform,
        target,
        settings.camera.transition_duration,
    ));
    info!("Camera moving to view '{}'", name);
}

/// Step running camera transitions and drop them once they arrive.
pub fn drive_camera_tween(
    mut commands: Commands,
    time: Res<Time>,
    mut camera_query: Query<(Entity, &mut Transform, &mut CameraTween), With<MainCamera>>,
) {
    for (entity, mut transform, mut tween) in camera_query.iter_mut() {
        if tween.advance(time.delta_secs(), &mut transform) {
            commands.entity(entity).remove::<CameraTween>();
        }
    }
}
