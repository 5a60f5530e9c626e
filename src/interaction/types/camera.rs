//! Camera-related types and components
//!
//! This module contains the main camera marker, the per-frame camera
//! transition state and the list of preset views it can move to.

use bevy::prelude::*;

/// Marker component for the main 3D camera
#[derive(Component)]
pub struct MainCamera;

/// Smooth move of the camera toward a target pose.
///
/// Driven once per frame with [`CameraTween::advance`] until it reports done.
/// Dropping the value (or removing the component) cancels the move.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct CameraTween {
    start_translation: Vec3,
    start_rotation: Quat,
    target_translation: Vec3,
    target_rotation: Quat,
    elapsed: f32,
    duration: f32,
}

impl CameraTween {
    pub fn new(from: &Transform, to: &Transform, duration: f32) -> Self {
        Self {
            start_translation: from.translation,
            start_rotation: from.rotation,
            target_translation: to.translation,
            target_rotation: to.rotation,
            elapsed: 0.0,
            duration,
        }
    }

    /// Fraction of the transition completed, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Advance by `dt` seconds and write the interpolated pose.
    ///
    /// Returns `true` once the target pose has been applied exactly.
    pub fn advance(&mut self, dt: f32, transform: &mut Transform) -> bool {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }

        if self.progress() >= 1.0 {
            transform.translation = self.target_translation;
            transform.rotation = self.target_rotation;
            return true;
        }

        let t = self.progress();
        transform.translation = self.start_translation.lerp(self.target_translation, t);
        transform.rotation = self.start_rotation.slerp(self.target_rotation, t);
        false
    }
}

/// Named camera poses the view can transition between.
#[derive(Resource, Default, Clone, Debug)]
pub struct CameraViews {
    pub views: Vec<(String, Transform)>,
}

impl CameraViews {
    pub fn get(&self, index: usize) -> Option<&(String, Transform)> {
        self.views.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tween_reaches_target_exactly() {
        let from = Transform::from_xyz(0.0, 0.0, 0.0);
        let to = Transform::from_xyz(10.0, 0.0, 0.0).looking_at(Vec3::ZERO, Vec3::Y);
        let mut tween = CameraTween::new(&from, &to, 0.5);
        let mut camera = from;

        assert!(!tween.advance(0.25, &mut camera));
        assert!((camera.translation.x - 5.0).abs() < 1e-4);

        assert!(tween.advance(0.3, &mut camera));
        assert_eq!(camera.translation, to.translation);
        assert_eq!(camera.rotation, to.rotation);
    }

    #[test]
    fn test_zero_duration_snaps() {
        let from = Transform::default();
        let to = Transform::from_xyz(1.0, 2.0, 3.0);
        let mut tween = CameraTween::new(&from, &to, 0.0);
        let mut camera = from;

        assert!(tween.advance(0.0, &mut camera));
        assert_eq!(camera.translation, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_negative_dt_does_not_rewind() {
        let from = Transform::default();
        let to = Transform::from_xyz(4.0, 0.0, 0.0);
        let mut tween = CameraTween::new(&from, &to, 1.0);
        let mut camera = from;

        tween.advance(0.5, &mut camera);
        tween.advance(-1.0, &mut camera);
        assert!((tween.progress() - 0.5).abs() < 1e-6);
    }
}
