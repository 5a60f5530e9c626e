//! Throw Control Systems
//!
//! Contains the systems that feed pointer input into the drag-and-throw
//! controller: grabbing on press, following on the fixed step, throwing on
//! release, and the extra gravity applied to free bodies.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::state::*;
use crate::interaction::pointer::PointerFrame;
use crate::interaction::selection::pick;
use crate::interaction::systems::{main_camera_mapper, MainCameraQuery};
use crate::interaction::types::*;

/// Gravity used when no Rapier configuration is present.
const FALLBACK_GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);

/// Pick the draggable body under the pointer and start holding it.
pub fn begin_throw_drag(
    mode: Res<InteractionMode>,
    pointer: Res<PointerFrame>,
    settings: Res<InteractionSettings>,
    cameras: MainCameraQuery,
    rapier_context: ReadRapierContext,
    mut throw_state: ResMut<ThrowControlState>,
    mut bodies: Query<BodyQueryData, With<Draggable>>,
    mut highlights: Query<&mut DragHighlight>,
) {
    if *mode != InteractionMode::Throw || !pointer.just_pressed {
        return;
    }
    let Some(position) = pointer.position else {
        return;
    };
    let Some(mapper) = main_camera_mapper(&cameras, pointer.space) else {
        return;
    };
    let Ok(context) = rapier_context.single() else {
        warn_once!("No Rapier context available; throw picking is paused");
        return;
    };
    let Some(ray) = mapper.ray_through(position) else {
        return;
    };

    let select = &settings.select;
    let Some(hit) = pick(&context, ray, select.max_distance, select.layer_mask) else {
        return;
    };
    let Ok(item) = bodies.get_mut(hit.object) else {
        debug!("Pointer hit {:?}, which is not draggable", hit.object);
        return;
    };

    let mut body = RapierBody::new(item);
    let mut no_highlight = NoHighlight;
    let highlight: &mut dyn Highlight = match highlights.get_mut(hit.object) {
        Ok(highlight) => highlight.into_inner(),
        Err(_) => &mut no_highlight,
    };

    if throw_state
        .controller
        .press(hit.object, &mut body, &mapper, position, highlight)
    {
        info!(
            "Grabbed {:?} at depth {:.2}",
            hit.object,
            throw_state.controller.session().map_or(0.0, |s| s.depth)
        );
    }
}

/// Drive the held body toward the pointer for one fixed step.
pub fn drive_throw_drag(
    time: Res<Time>,
    mut pointer: ResMut<PointerFrame>,
    cameras: MainCameraQuery,
    mut throw_state: ResMut<ThrowControlState>,
    mut bodies: Query<BodyQueryData, With<Draggable>>,
) {
    // Consume depth input every step so nothing piles up while idle.
    let input = pointer.take_depth_input();

    let Some(target) = throw_state.controller.target() else {
        return;
    };
    let Some(position) = pointer.position else {
        return;
    };
    let Some(mapper) = main_camera_mapper(&cameras, pointer.space) else {
        return;
    };
    let Ok(item) = bodies.get_mut(target) else {
        throw_state.controller.abandon();
        warn!("Held body {:?} no longer exists; drag abandoned", target);
        return;
    };

    let mut body = RapierBody::new(item);
    throw_state
        .controller
        .drag(&mut body, &mapper, position, input, time.delta_secs());
}

/// Throw the held body when the button goes up.
pub fn end_throw_drag(
    pointer: Res<PointerFrame>,
    cameras: MainCameraQuery,
    mut throw_state: ResMut<ThrowControlState>,
    mut bodies: Query<BodyQueryData, With<Draggable>>,
    mut highlights: Query<&mut DragHighlight>,
) {
    if !pointer.just_released {
        return;
    }
    let Some(target) = throw_state.controller.target() else {
        return;
    };
    let Ok(item) = bodies.get_mut(target) else {
        throw_state.controller.abandon();
        warn!("Held body {:?} no longer exists; nothing to throw", target);
        return;
    };

    let mut body = RapierBody::new(item);
    let mut no_highlight = NoHighlight;
    let highlight: &mut dyn Highlight = match highlights.get_mut(target) {
        Ok(highlight) => highlight.into_inner(),
        Err(_) => &mut no_highlight,
    };

    match main_camera_mapper(&cameras, pointer.space) {
        Some(mapper) => {
            if let Some(launch) = throw_state.controller.release(&mut body, &mapper, highlight) {
                info!("Threw {:?} with velocity {:?}", target, launch);
            }
        }
        None => {
            throw_state.controller.cancel(&mut body, highlight);
            info!("Released {:?} without a camera; no throw", target);
        }
    }
}

/// Add the extra gravity from `gravity_scale` to free draggable bodies.
///
/// Bodies with gravity switched off (held by either controller) are left
/// alone.
pub fn apply_gravity_feel(
    time: Res<Time>,
    throw_state: Res<ThrowControlState>,
    configuration: Query<&RapierConfiguration>,
    mut bodies: Query<(Entity, &RigidBody, &mut Velocity, Option<&GravityScale>), With<Draggable>>,
) {
    let gravity = configuration
        .iter()
        .next()
        .map_or(FALLBACK_GRAVITY, |config| config.gravity);
    let dt = time.delta_secs();

    for (entity, kind, mut velocity, scale) in bodies.iter_mut() {
        if *kind != RigidBody::Dynamic || scale.is_some_and(|s| s.0 == 0.0) {
            continue;
        }
        let extra = throw_state.controller.gravity_assist(entity, gravity, dt);
        if extra != Vec3::ZERO {
            velocity.linvel += extra;
        }
    }
}
