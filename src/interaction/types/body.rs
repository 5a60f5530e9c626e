//! Rigid body access
//!
//! The controllers never own a body. They read and write its physical fields
//! through [`DragBody`], which is implemented for a Rapier-backed entity
//! ([`RapierBody`]) and for a plain value type ([`BodyState`]).

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// The subset of a rigid body the interaction controllers manipulate.
pub trait DragBody {
    fn position(&self) -> Vec3;

    /// Place the body without integrating forces or touching its velocity.
    fn move_to(&mut self, position: Vec3);

    fn linear_velocity(&self) -> Vec3;
    fn set_linear_velocity(&mut self, velocity: Vec3);

    fn angular_velocity(&self) -> Vec3;
    fn set_angular_velocity(&mut self, velocity: Vec3);

    /// Multiplier on world gravity; `0.0` means gravity is off.
    fn gravity_scale(&self) -> f32;
    fn set_gravity_scale(&mut self, scale: f32);

    fn gravity_enabled(&self) -> bool {
        self.gravity_scale() != 0.0
    }

    fn linear_damping(&self) -> f32;
    fn set_linear_damping(&mut self, damping: f32);

    /// Kinematic (or fixed) bodies are moved by assigning their transform only.
    fn is_kinematic(&self) -> bool;
}

/// A free-standing rigid body state.
///
/// Useful wherever a body has to be simulated without an ECS world, e.g. in
/// tests or in a headless integration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyState {
    pub position: Vec3,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
    pub gravity_scale: f32,
    pub linear_damping: f32,
    pub kinematic: bool,
}

impl Default for BodyState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            gravity_scale: 1.0,
            linear_damping: 0.0,
            kinematic: false,
        }
    }
}

impl BodyState {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..default()
        }
    }
}

impl DragBody for BodyState {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn move_to(&mut self, position: Vec3) {
        self.position = position;
    }

    fn linear_velocity(&self) -> Vec3 {
        self.linear_velocity
    }

    fn set_linear_velocity(&mut self, velocity: Vec3) {
        self.linear_velocity = velocity;
    }

    fn angular_velocity(&self) -> Vec3 {
        self.angular_velocity
    }

    fn set_angular_velocity(&mut self, velocity: Vec3) {
        self.angular_velocity = velocity;
    }

    fn gravity_scale(&self) -> f32 {
        self.gravity_scale
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        self.gravity_scale = scale;
    }

    fn linear_damping(&self) -> f32 {
        self.linear_damping
    }

    fn set_linear_damping(&mut self, damping: f32) {
        self.linear_damping = damping;
    }

    fn is_kinematic(&self) -> bool {
        self.kinematic
    }
}

impl<B: DragBody + ?Sized> DragBody for &mut B {
    fn position(&self) -> Vec3 {
        (**self).position()
    }

    fn move_to(&mut self, position: Vec3) {
        (**self).move_to(position);
    }

    fn linear_velocity(&self) -> Vec3 {
        (**self).linear_velocity()
    }

    fn set_linear_velocity(&mut self, velocity: Vec3) {
        (**self).set_linear_velocity(velocity);
    }

    fn angular_velocity(&self) -> Vec3 {
        (**self).angular_velocity()
    }

    fn set_angular_velocity(&mut self, velocity: Vec3) {
        (**self).set_angular_velocity(velocity);
    }

    fn gravity_scale(&self) -> f32 {
        (**self).gravity_scale()
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        (**self).set_gravity_scale(scale);
    }

    fn linear_damping(&self) -> f32 {
        (**self).linear_damping()
    }

    fn set_linear_damping(&mut self, damping: f32) {
        (**self).set_linear_damping(damping);
    }

    fn is_kinematic(&self) -> bool {
        (**self).is_kinematic()
    }
}

/// Query data needed to treat an entity as a [`DragBody`].
pub type BodyQueryData = (
    &'static mut Transform,
    Option<&'static mut Velocity>,
    Option<&'static mut GravityScale>,
    Option<&'static mut Damping>,
    Option<&'static RigidBody>,
);

/// Mutable view over a Rapier-simulated entity.
///
/// Gravity is read and written through [`GravityScale`]. An entity without
/// one behaves as if it had a scale of `1.0` that cannot be changed.
pub struct RapierBody<'a> {
    pub transform: Mut<'a, Transform>,
    pub velocity: Option<Mut<'a, Velocity>>,
    pub gravity: Option<Mut<'a, GravityScale>>,
    pub damping: Option<Mut<'a, Damping>>,
    pub kind: Option<&'a RigidBody>,
}

impl<'a> RapierBody<'a> {
    pub fn new(
        (transform, velocity, gravity, damping, kind): (
            Mut<'a, Transform>,
            Option<Mut<'a, Velocity>>,
            Option<Mut<'a, GravityScale>>,
            Option<Mut<'a, Damping>>,
            Option<&'a RigidBody>,
        ),
    ) -> Self {
        Self {
            transform,
            velocity,
            gravity,
            damping,
            kind,
        }
    }

    /// Whether the entity carries a rigid body at all.
    pub fn has_body(&self) -> bool {
        self.kind.is_some()
    }
}

impl DragBody for RapierBody<'_> {
    fn position(&self) -> Vec3 {
        self.transform.translation
    }

    fn move_to(&mut self, position: Vec3) {
        // Rapier picks up the transform change and teleports the body.
        self.transform.translation = position;
    }

    fn linear_velocity(&self) -> Vec3 {
        self.velocity.as_ref().map_or(Vec3::ZERO, |v| v.linvel)
    }

    fn set_linear_velocity(&mut self, velocity: Vec3) {
        if let Some(v) = self.velocity.as_mut() {
            v.linvel = velocity;
        }
    }

    fn angular_velocity(&self) -> Vec3 {
        self.velocity.as_ref().map_or(Vec3::ZERO, |v| v.angvel)
    }

    fn set_angular_velocity(&mut self, velocity: Vec3) {
        if let Some(v) = self.velocity.as_mut() {
            v.angvel = velocity;
        }
    }

    fn gravity_scale(&self) -> f32 {
        self.gravity.as_ref().map_or(1.0, |g| g.0)
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        if let Some(g) = self.gravity.as_mut() {
            g.0 = scale;
        }
    }

    fn linear_damping(&self) -> f32 {
        self.damping.as_ref().map_or(0.0, |d| d.linear_damping)
    }

    fn set_linear_damping(&mut self, damping: f32) {
        if let Some(d) = self.damping.as_mut() {
            d.linear_damping = damping;
        }
    }

    fn is_kinematic(&self) -> bool {
        !matches!(self.kind, Some(RigidBody::Dynamic))
    }
}
