//! Scene access for pointer selection
//!
//! [`SelectionScene`] is what the selection controller needs from the world:
//! a filtered raycast, object positions, optional rigid bodies and the
//! optional [`Interactable`] capability. [`RapierScene`] provides it on top of
//! Rapier and Bevy queries.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::interaction::types::{
    BodyQueryData, DragBody, Interactable, LayerMask, RapierBody, Touchable,
};

/// First object hit by a pointer ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneHit<O> {
    pub object: O,
    pub point: Vec3,
    pub distance: f32,
}

pub trait SelectionScene {
    type Object: Copy + PartialEq + std::fmt::Debug;
    type Body<'a>: DragBody
    where
        Self: 'a;

    /// Closest hit along `ray` within `max_distance` on the `mask` layers.
    fn raycast(
        &self,
        ray: Ray3d,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<SceneHit<Self::Object>>;

    /// `None` once the object no longer exists.
    fn position(&self, object: Self::Object) -> Option<Vec3>;

    fn set_position(&mut self, object: Self::Object, position: Vec3);

    /// The object's rigid body, if it has one.
    fn body(&mut self, object: Self::Object) -> Option<Self::Body<'_>>;

    fn interactable(&mut self, object: Self::Object) -> Option<&mut dyn Interactable>;
}

/// Cast a pointer ray into the Rapier world, ignoring sensors.
pub fn pick(
    context: &RapierContext<'_>,
    ray: Ray3d,
    max_distance: f32,
    mask: LayerMask,
) -> Option<SceneHit<Entity>> {
    let groups = CollisionGroups::new(Group::ALL, Group::from_bits_truncate(mask.0));
    let filter = QueryFilter::new().groups(groups).exclude_sensors();
    let direction = ray.direction.as_vec3();

    let (entity, toi) = context.cast_ray(ray.origin, direction, max_distance, true, filter)?;
    Some(SceneHit {
        object: entity,
        point: ray.origin + direction * toi,
        distance: toi,
    })
}

/// Selection scene backed by Rapier colliders and ECS components.
///
/// The physics context is only needed to press; drag and release can run
/// without one.
pub struct RapierScene<'q, 'w, 's, 'tw, 'ts> {
    pub context: Option<RapierContext<'q>>,
    pub bodies: &'q mut Query<'w, 's, BodyQueryData>,
    pub touchables: &'q mut Query<'tw, 'ts, &'static mut Touchable>,
}

impl<'q, 'w, 's, 'tw, 'ts> SelectionScene for RapierScene<'q, 'w, 's, 'tw, 'ts> {
    type Object = Entity;
    type Body<'a>
        = RapierBody<'a>
    where
        Self: 'a;

    fn raycast(&self, ray: Ray3d, max_distance: f32, mask: LayerMask) -> Option<SceneHit<Entity>> {
        pick(self.context.as_ref()?, ray, max_distance, mask)
    }

    fn position(&self, object: Entity) -> Option<Vec3> {
        self.bodies
            .get(object)
            .ok()
            .map(|(transform, ..)| transform.translation)
    }

    fn set_position(&mut self, object: Entity, position: Vec3) {
        if let Ok((mut transform, ..)) = self.bodies.get_mut(object) {
            transform.translation = position;
        }
    }

    fn body(&mut self, object: Entity) -> Option<RapierBody<'_>> {
        let body = RapierBody::new(self.bodies.get_mut(object).ok()?);
        body.has_body().then_some(body)
    }

    fn interactable(&mut self, object: Entity) -> Option<&mut dyn Interactable> {
        let touchable: &mut dyn Interactable = self.touchables.get_mut(object).ok()?.into_inner();
        Some(touchable)
    }
}
