//! Selection and constrained drag state
//!
//! Picks an object with a pointer ray and pulls it toward the pointer by
//! position interpolation. Bodies are teleported every step and never keep
//! velocity, so there is no throw on release.

use bevy::prelude::*;

use super::scene::SelectionScene;
use crate::interaction::pointer::PointerMapper;
use crate::interaction::throw_control::sanitize_dt;
use crate::interaction::types::{DragBody, SelectSettings};

/// The currently selected object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Selection<O> {
    pub object: O,
    /// Gravity scale to restore on release; `None` when there is no rigid body.
    pub original_gravity: Option<f32>,
    pub grab_distance: f32,
    pub grab_offset: Vec3,
}

#[derive(Clone, Debug)]
pub struct SelectionController<O> {
    settings: SelectSettings,
    selection: Option<Selection<O>>,
}

impl<O: Copy + PartialEq + std::fmt::Debug> SelectionController<O> {
    pub fn new(settings: SelectSettings) -> Self {
        Self {
            settings,
            selection: None,
        }
    }

    pub fn settings(&self) -> &SelectSettings {
        &self.settings
    }

    pub fn selection(&self) -> Option<&Selection<O>> {
        self.selection.as_ref()
    }

    pub fn selected(&self) -> Option<O> {
        self.selection.map(|s| s.object)
    }

    /// Select the first object under `pointer`. A miss leaves the state alone.
    pub fn press<S>(&mut self, mapper: &PointerMapper, pointer: Vec2, scene: &mut S) -> Option<O>
    where
        S: SelectionScene<Object = O>,
    {
        if self.selection.is_some() {
            debug!("press ignored: an object is already selected");
            return None;
        }

        let ray = mapper.ray_through(pointer)?;
        let hit = scene.raycast(ray, self.settings.max_distance, self.settings.layer_mask)?;
        let position = scene.position(hit.object)?;

        let original_gravity = scene.body(hit.object).map(|mut body| {
            let scale = body.gravity_scale();
            body.set_gravity_scale(0.0);
            scale
        });

        if let Some(interactable) = scene.interactable(hit.object) {
            interactable.on_interact();
        }

        let grab_distance = mapper.position().distance(hit.point);
        let initial = mapper.screen_to_world(pointer, mapper.clamp_depth(grab_distance));

        self.selection = Some(Selection {
            object: hit.object,
            original_gravity,
            grab_distance,
            grab_offset: position - initial,
        });
        Some(hit.object)
    }

    /// Pull the selection toward the pointer for one fixed step.
    pub fn drag<S>(&mut self, mapper: &PointerMapper, pointer: Vec2, dt: f32, scene: &mut S)
    where
        S: SelectionScene<Object = O>,
    {
        let Some(selection) = self.selection else {
            return;
        };
        let Some(position) = scene.position(selection.object) else {
            warn!("Selected object {:?} disappeared; selection cleared", selection.object);
            self.selection = None;
            return;
        };

        let target = mapper.screen_to_world(pointer, mapper.clamp_depth(selection.grab_distance))
            + selection.grab_offset;
        let t = (self.settings.lerp_factor * sanitize_dt(dt)).clamp(0.0, 1.0);

        let moved_body = match scene.body(selection.object) {
            Some(mut body) if !body.is_kinematic() => {
                let next = body.position().lerp(target, t);
                body.move_to(next);
                body.set_linear_velocity(Vec3::ZERO);
                body.set_angular_velocity(Vec3::ZERO);
                true
            }
            _ => false,
        };
        if !moved_body {
            scene.set_position(selection.object, position.lerp(target, t));
        }
    }

    /// Restore the object's gravity and clear the selection.
    pub fn release<S>(&mut self, scene: &mut S) -> Option<O>
    where
        S: SelectionScene<Object = O>,
    {
        let selection = self.selection.take()?;
        if let Some(scale) = selection.original_gravity {
            if let Some(mut body) = scene.body(selection.object) {
                body.set_gravity_scale(scale);
            }
        }
        Some(selection.object)
    }
}

/// Resource holding the selection controller for the pointer
#[derive(Resource)]
pub struct SelectionState {
    pub controller: SelectionController<Entity>,
}

impl SelectionState {
    pub fn new(settings: SelectSettings) -> Self {
        Self {
            controller: SelectionController::new(settings),
        }
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new(SelectSettings::default())
    }
}
