//! Pointer to world mapping
//!
//! A snapshot of the camera's projection that turns 2D pointer positions into
//! world-space points at a chosen depth, and back.

use bevy::prelude::*;

/// Distance kept from the near and far clip planes when projecting.
pub const CLIP_EPSILON: f32 = 0.05;

/// Coordinate space pointer positions are expressed in.
///
/// Both spaces have their origin at the bottom-left corner with y pointing up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerSpace {
    /// Logical pixels of the camera viewport.
    #[default]
    Pixels,
    /// Normalized `[0, 1]` viewport coordinates.
    Viewport,
}

/// Perspective camera projection used to map the pointer into the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerMapper {
    position: Vec3,
    rotation: Quat,
    /// Vertical field of view in radians.
    fov_y: f32,
    near: f32,
    far: f32,
    viewport_size: Vec2,
    space: PointerSpace,
}

impl PointerMapper {
    pub fn perspective(
        position: Vec3,
        rotation: Quat,
        fov_y: f32,
        near: f32,
        far: f32,
        viewport_size: Vec2,
    ) -> Self {
        Self {
            position,
            rotation,
            fov_y,
            near,
            far,
            viewport_size,
            space: PointerSpace::Pixels,
        }
    }

    /// Build a mapper from a Bevy camera. Only perspective projections are supported.
    pub fn from_camera(
        camera: &Camera,
        transform: &GlobalTransform,
        projection: &Projection,
    ) -> Option<Self> {
        let Projection::Perspective(perspective) = projection else {
            return None;
        };
        let viewport_size = camera.logical_viewport_size()?;
        let (_, rotation, position) = transform.to_scale_rotation_translation();

        Some(Self::perspective(
            position,
            rotation,
            perspective.fov,
            perspective.near,
            perspective.far,
            viewport_size,
        ))
    }

    pub fn in_space(mut self, space: PointerSpace) -> Self {
        self.space = space;
        self
    }

    pub fn space(&self) -> PointerSpace {
        self.space
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Unit vector the camera looks along.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn viewport_size(&self) -> Vec2 {
        self.viewport_size
    }

    /// Keep a depth strictly inside the frustum.
    ///
    /// Never panics, even for a degenerate frustum where the bounds cross.
    pub fn clamp_depth(&self, depth: f32) -> f32 {
        clamp_between(depth, self.near + CLIP_EPSILON, self.far - CLIP_EPSILON)
    }

    /// Signed distance of a world point along the camera's forward axis.
    pub fn world_to_depth(&self, world: Vec3) -> f32 {
        (world - self.position).dot(self.forward())
    }

    /// World point under `pointer` at `depth` along the forward axis.
    pub fn screen_to_world(&self, pointer: Vec2, depth: f32) -> Vec3 {
        let ndc = self.to_viewport(pointer) * 2.0 - Vec2::ONE;
        let half_height = (self.fov_y * 0.5).tan();
        let aspect = self.viewport_size.x / self.viewport_size.y.max(1.0);
        let local = Vec3::new(
            ndc.x * half_height * aspect * depth,
            ndc.y * half_height * depth,
            -depth,
        );
        self.position + self.rotation * local
    }

    /// Ray from the camera through `pointer`.
    pub fn ray_through(&self, pointer: Vec2) -> Option<Ray3d> {
        let through = self.screen_to_world(pointer, 1.0);
        let direction = Dir3::new(through - self.position).ok()?;
        Some(Ray3d::new(self.position, direction))
    }

    fn to_viewport(&self, pointer: Vec2) -> Vec2 {
        match self.space {
            PointerSpace::Viewport => pointer,
            PointerSpace::Pixels => pointer / self.viewport_size.max(Vec2::ONE),
        }
    }
}

/// `f32::clamp` without the panic when `min > max`.
pub(crate) fn clamp_between(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        return min.min(max);
    }
    value.max(min).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> PointerMapper {
        // Looking down -Z from the origin, 90 degree vertical FOV, square viewport.
        PointerMapper::perspective(
            Vec3::ZERO,
            Quat::IDENTITY,
            std::f32::consts::FRAC_PI_2,
            0.1,
            1000.0,
            Vec2::new(800.0, 800.0),
        )
    }

    #[test]
    fn test_center_projects_along_forward() {
        let m = mapper();
        let world = m.screen_to_world(Vec2::new(400.0, 400.0), 10.0);
        assert!(world.abs_diff_eq(Vec3::new(0.0, 0.0, -10.0), 1e-4));
        assert!((m.world_to_depth(world) - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_corner_spreads_with_depth() {
        let m = mapper();
        // tan(45deg) = 1, so the top-right corner at depth d is (d, d, -d).
        let world = m.screen_to_world(Vec2::new(800.0, 800.0), 5.0);
        assert!(world.abs_diff_eq(Vec3::new(5.0, 5.0, -5.0), 1e-3));
    }

    #[test]
    fn test_viewport_space_matches_pixels() {
        let pixels = mapper();
        let viewport = mapper().in_space(PointerSpace::Viewport);
        let a = pixels.screen_to_world(Vec2::new(200.0, 600.0), 7.0);
        let b = viewport.screen_to_world(Vec2::new(0.25, 0.75), 7.0);
        assert!(a.abs_diff_eq(b, 1e-4));
    }

    #[test]
    fn test_rotated_camera_forward() {
        let transform = Transform::from_xyz(0.0, 0.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y);
        let m = PointerMapper::perspective(
            transform.translation,
            transform.rotation,
            1.0,
            0.1,
            100.0,
            Vec2::new(1280.0, 720.0),
        );
        assert!(m.forward().abs_diff_eq(Vec3::NEG_Z, 1e-5));
        assert!((m.world_to_depth(Vec3::ZERO) - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_clamp_depth_is_idempotent() {
        let m = mapper();
        for depth in [-50.0, 0.0, 0.1, 0.15, 3.0, 999.95, 1000.0, 1e9, f32::NAN] {
            let once = m.clamp_depth(depth);
            assert_eq!(m.clamp_depth(once), once);
            assert!(once >= m.near() + CLIP_EPSILON);
            assert!(once <= m.far() - CLIP_EPSILON);
        }
    }

    #[test]
    fn test_clamp_depth_degenerate_frustum() {
        let m = PointerMapper::perspective(Vec3::ZERO, Quat::IDENTITY, 1.0, 1.0, 1.02, Vec2::ONE);
        let d = m.clamp_depth(5.0);
        assert!(d.is_finite());
        assert_eq!(m.clamp_depth(d), d);
    }

    #[test]
    fn test_ray_through_center() {
        let ray = mapper().ray_through(Vec2::new(400.0, 400.0)).unwrap();
        assert_eq!(ray.origin, Vec3::ZERO);
        assert!(ray.direction.as_vec3().abs_diff_eq(Vec3::NEG_Z, 1e-5));
    }
}
