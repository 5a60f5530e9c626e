//! Mapping from a UI surface that displays the camera image.
//!
//! When the camera renders into a texture shown by a UI rect whose aspect
//! differs from the camera's, the image is scaled to fill the rect along one
//! axis and cropped along the other. A pointer over the rect has to be
//! corrected for that before it can be used as a viewport coordinate.

use bevy::prelude::*;

/// Size of the scaled camera image and its offset inside a rect it fills.
///
/// The offset is negative along the cropped axis and is the same on both
/// sides, so it works for y-up and y-down layouts alike.
pub fn fill_layout(rect_size: Vec2, camera_aspect: f32) -> (Vec2, Vec2) {
    let size = rect_size.abs();
    let camera_aspect = camera_aspect.max(1e-6);
    let rect_aspect = size.x / size.y.max(1.0);

    let mut used = size;
    let mut pad = Vec2::ZERO;

    if rect_aspect > camera_aspect {
        used.y = size.x / camera_aspect;
        pad.y = (size.y - used.y) * 0.5;
    } else if rect_aspect < camera_aspect {
        used.x = size.y * camera_aspect;
        pad.x = (size.x - used.x) * 0.5;
    }
    (used, pad)
}

/// Convert a point local to a UI rect into camera viewport coordinates.
///
/// `local` is measured from the rect center with y up. `rect_size` is the
/// rect's size in the same units. Returns `None` when the point falls outside
/// the camera image.
pub fn letterboxed_viewport_point(
    local: Vec2,
    rect_size: Vec2,
    camera_aspect: f32,
) -> Option<Vec2> {
    let (used, pad) = fill_layout(rect_size, camera_aspect);
    let uv = (local + rect_size.abs() * 0.5 - pad) / used.max(Vec2::splat(1e-6));

    if uv.x < 0.0 || uv.x > 1.0 || uv.y < 0.0 || uv.y > 1.0 {
        return None;
    }
    Some(uv)
}

/// UI rect showing the main camera's render target.
///
/// While this resource exists the pointer is read through the rect and
/// handed to the controllers in viewport space.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewSurface {
    /// Rect in window logical pixels, top-left origin like the cursor.
    pub rect: Rect,
    pub camera_aspect: f32,
}

impl ViewSurface {
    /// Viewport coordinates under a window cursor, or `None` off the image.
    pub fn viewport_point(&self, cursor: Vec2) -> Option<Vec2> {
        if !self.rect.contains(cursor) {
            return None;
        }
        let center = self.rect.center();
        let local = Vec2::new(cursor.x - center.x, center.y - cursor.y);
        letterboxed_viewport_point(local, self.rect.size(), self.camera_aspect)
    }
}
