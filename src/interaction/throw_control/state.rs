//! Drag-and-throw state
//!
//! Contains the press / drag / release state machine that holds a rigid body
//! under the pointer and launches it on release, plus the resource that keeps
//! it in the ECS world.

use bevy::prelude::*;

use super::history::{sanitize_dt, PointerSample, VelocityHistory};
use crate::interaction::pointer::{clamp_between, DepthInput, PointerMapper};
use crate::interaction::types::{DragBody, Highlight, ThrowSettings};

/// Everything that exists only while a body is held.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession<T> {
    pub target: T,
    pub grab_offset: Vec3,
    pub depth: f32,
    last_world: Vec3,
    last_pointer: Vec2,
    pre_drag_damping: f32,
    pre_drag_gravity: f32,
}

impl<T> DragSession<T> {
    /// Put back the body's own damping and gravity scale. A body that had
    /// gravity off before the grab falls normally once let go.
    fn restore(&self, body: &mut impl DragBody) {
        let gravity = if self.pre_drag_gravity != 0.0 {
            self.pre_drag_gravity
        } else {
            1.0
        };
        body.set_gravity_scale(gravity);
        body.set_linear_damping(self.pre_drag_damping);
    }
}

/// Holds one body at a time and throws it on release.
#[derive(Clone, Debug)]
pub struct DragThrowController<T> {
    settings: ThrowSettings,
    history: VelocityHistory,
    session: Option<DragSession<T>>,
}

impl<T: Copy + PartialEq> DragThrowController<T> {
    pub fn new(settings: ThrowSettings) -> Self {
        Self {
            history: VelocityHistory::new(settings.history_capacity),
            settings,
            session: None,
        }
    }

    pub fn settings(&self) -> &ThrowSettings {
        &self.settings
    }

    pub fn history(&self) -> &VelocityHistory {
        &self.history
    }

    pub fn session(&self) -> Option<&DragSession<T>> {
        self.session.as_ref()
    }

    pub fn target(&self) -> Option<T> {
        self.session.map(|s| s.target)
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Depth range a held body may be placed at: inside the frustum and
    /// inside `[min_depth, max_depth]`.
    pub fn clamp_depth(&self, mapper: &PointerMapper, depth: f32) -> f32 {
        let depth = mapper.clamp_depth(depth);
        clamp_between(depth, self.settings.min_depth, self.settings.max_depth)
    }

    /// Grab `body` under `pointer`. Ignored while another body is held.
    pub fn press(
        &mut self,
        target: T,
        body: &mut impl DragBody,
        mapper: &PointerMapper,
        pointer: Vec2,
        highlight: &mut dyn Highlight,
    ) -> bool {
        if self.session.is_some() {
            debug!("press ignored: a body is already held");
            return false;
        }

        let depth = self.clamp_depth(mapper, mapper.world_to_depth(body.position()));
        let world = mapper.screen_to_world(pointer, depth);

        let pre_drag_damping = body.linear_damping();
        let pre_drag_gravity = body.gravity_scale();
        body.set_gravity_scale(0.0);
        body.set_linear_damping(self.settings.drag_damping);

        self.history.reset();
        self.session = Some(DragSession {
            target,
            grab_offset: body.position() - world,
            depth,
            last_world: world,
            last_pointer: pointer,
            pre_drag_damping,
            pre_drag_gravity,
        });

        highlight.set_highlight(true);
        true
    }

    /// One fixed physics step while held. Does nothing when idle.
    pub fn drag(
        &mut self,
        body: &mut impl DragBody,
        mapper: &PointerMapper,
        pointer: Vec2,
        input: DepthInput,
        dt: f32,
    ) {
        let dt = sanitize_dt(dt);
        let Some(mut session) = self.session else {
            return;
        };

        let mut depth = session.depth + input.scroll * self.settings.depth_scroll_speed;
        if input.fine_depth_held {
            depth -= input.fine_depth_axis * self.settings.depth_drag_sensitivity;
        }
        session.depth = self.clamp_depth(mapper, depth);

        let world = mapper.screen_to_world(pointer, session.depth);
        let target = world + session.grab_offset;
        body.set_linear_velocity((target - body.position()) * self.settings.follow_speed);

        self.history.push(PointerSample::new(
            pointer - session.last_pointer,
            world - session.last_world,
            dt,
        ));
        session.last_world = world;
        session.last_pointer = pointer;

        self.session = Some(session);
    }

    /// Let go of the held body and launch it. Returns the launch velocity,
    /// or `None` when nothing was held.
    pub fn release(
        &mut self,
        body: &mut impl DragBody,
        mapper: &PointerMapper,
        highlight: &mut dyn Highlight,
    ) -> Option<Vec3> {
        let session = self.session.take()?;
        highlight.set_highlight(false);

        let (avg_world, avg_screen) = self.history.average();
        let distance = mapper.world_to_depth(body.position());
        let launch = self.launch_velocity(avg_world, avg_screen, mapper.forward(), distance);

        body.set_linear_velocity(launch);
        session.restore(body);

        Some(launch)
    }

    /// End the hold without a throw: gravity and damping come back, the
    /// body keeps whatever velocity it has.
    pub fn cancel(&mut self, body: &mut impl DragBody, highlight: &mut dyn Highlight) -> Option<T> {
        let session = self.session.take()?;
        highlight.set_highlight(false);
        session.restore(body);
        Some(session.target)
    }

    /// Drop the session without touching any body, e.g. when the held
    /// entity was despawned.
    pub fn abandon(&mut self) -> Option<T> {
        self.session.take().map(|s| s.target)
    }

    /// Launch velocity for averaged pointer motion at `distance` in front of
    /// a camera looking along `forward`.
    pub fn launch_velocity(
        &self,
        avg_world: Vec3,
        avg_screen: Vec2,
        forward: Vec3,
        distance: f32,
    ) -> Vec3 {
        let s = &self.settings;
        let distance = clamp_between(distance, s.min_depth, s.max_depth);
        let depth_factor = s.depth_compensation / distance;
        let forward_boost = forward * avg_screen.y.max(0.0) * s.forward_throw_gain;

        let mut launch = avg_world * s.throw_multiplier * depth_factor + forward_boost;
        if s.release_downward_boost > 0.0 {
            launch += Vec3::NEG_Y * s.release_downward_boost;
        }
        launch
    }

    /// Extra velocity for one fixed step of `body`. Zero for the held body.
    pub fn gravity_assist(&self, body: T, gravity: Vec3, dt: f32) -> Vec3 {
        if self.target() == Some(body) || self.settings.gravity_scale == 1.0 {
            return Vec3::ZERO;
        }
        (self.settings.gravity_scale - 1.0) * gravity * sanitize_dt(dt)
    }
}

/// Resource holding the drag-and-throw controller for the pointer
#[derive(Resource)]
pub struct ThrowControlState {
    pub controller: DragThrowController<Entity>,
}

impl ThrowControlState {
    pub fn new(settings: ThrowSettings) -> Self {
        Self {
            controller: DragThrowController::new(settings),
        }
    }
}

impl Default for ThrowControlState {
    fn default() -> Self {
        Self::new(ThrowSettings::default())
    }
}
