//! Interaction settings and loading
//!
//! All tuning parameters are plain named fields. Missing fields fall back to
//! their defaults, so a settings file only needs to list what it changes.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::interaction::throw_control::DEFAULT_HISTORY_CAPACITY;

/// Physics layer mask used to filter pointer raycasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const ALL: LayerMask = LayerMask(u32::MAX);
    pub const NONE: LayerMask = LayerMask(0);

    pub fn contains(&self, layers: u32) -> bool {
        self.0 & layers != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Key that switches the vertical mouse axis into depth control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FineDepthKey {
    #[default]
    #[serde(rename = "shift")]
    Shift,
    #[serde(rename = "control")]
    Control,
    #[serde(rename = "alt")]
    Alt,
}

impl FineDepthKey {
    pub fn key_codes(self) -> [KeyCode; 2] {
        match self {
            Self::Shift => [KeyCode::ShiftLeft, KeyCode::ShiftRight],
            Self::Control => [KeyCode::ControlLeft, KeyCode::ControlRight],
            Self::Alt => [KeyCode::AltLeft, KeyCode::AltRight],
        }
    }
}

/// Tuning for the drag-and-throw controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrowSettings {
    /// Proportional gain pulling the body toward the pointer target.
    pub follow_speed: f32,
    /// Linear damping applied to the body while held.
    pub drag_damping: f32,
    /// Depth change per scroll line.
    pub depth_scroll_speed: f32,
    pub fine_depth_key: FineDepthKey,
    /// Depth change per unit of vertical mouse motion while the key is held.
    pub depth_drag_sensitivity: f32,
    /// Gravity multiplier for bodies that are not held.
    pub gravity_scale: f32,
    /// Extra downward speed added on release (0 disables it).
    pub release_downward_boost: f32,
    pub throw_multiplier: f32,
    /// Numerator of the depth factor; larger distances give smaller throws.
    pub depth_compensation: f32,
    /// Forward speed per unit of upward screen-space pointer speed.
    pub forward_throw_gain: f32,
    pub min_depth: f32,
    pub max_depth: f32,
    pub history_capacity: usize,
}

impl Default for ThrowSettings {
    fn default() -> Self {
        Self {
            follow_speed: 15.0,
            drag_damping: 2.0,
            depth_scroll_speed: 2.5,
            fine_depth_key: FineDepthKey::Shift,
            depth_drag_sensitivity: 0.08,
            gravity_scale: 2.0,
            release_downward_boost: 0.0,
            throw_multiplier: 1.2,
            depth_compensation: 1.5,
            forward_throw_gain: 0.012,
            min_depth: 0.3,
            max_depth: 200.0,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

/// Tuning for the selection / constrained drag controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectSettings {
    /// Interpolation rate toward the target, per second.
    pub lerp_factor: f32,
    pub max_distance: f32,
    pub layer_mask: LayerMask,
}

impl Default for SelectSettings {
    fn default() -> Self {
        Self {
            lerp_factor: 20.0,
            max_distance: 1000.0,
            layer_mask: LayerMask::ALL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Seconds a view transition takes.
    pub transition_duration: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            transition_duration: 0.5,
        }
    }
}

/// Complete settings for pointer interaction.
#[derive(Resource, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    pub throw: ThrowSettings,
    pub select: SelectSettings,
    pub camera: CameraSettings,
}

impl InteractionSettings {
    /// Load settings from a RON (preferred) or JSON file.
    pub fn load(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read settings {:?}: {}", path, e))?;
        let settings = text
            .parse::<Self>()
            .map_err(|e| format!("Failed to parse settings {:?}: {}", path, e))?;
        info!("Loaded interaction settings from {:?}", path);
        Ok(settings.sanitized())
    }

    /// Repair values the controllers cannot work with.
    pub fn sanitized(mut self) -> Self {
        let throw = &mut self.throw;

        if throw.history_capacity == 0 {
            warn!("history_capacity must be at least 1; using 1");
            throw.history_capacity = 1;
        }
        if !(throw.min_depth.is_finite() && throw.min_depth > 0.0) {
            warn!("min_depth must be positive; using the default");
            throw.min_depth = ThrowSettings::default().min_depth;
        }
        if !(throw.max_depth >= throw.min_depth) {
            warn!(
                "max_depth {} is below min_depth {}; raising it",
                throw.max_depth, throw.min_depth
            );
            throw.max_depth = throw.min_depth;
        }
        let defaults = ThrowSettings::default();
        for (name, value, default) in [
            ("follow_speed", &mut throw.follow_speed, defaults.follow_speed),
            ("drag_damping", &mut throw.drag_damping, defaults.drag_damping),
            (
                "depth_scroll_speed",
                &mut throw.depth_scroll_speed,
                defaults.depth_scroll_speed,
            ),
            (
                "depth_drag_sensitivity",
                &mut throw.depth_drag_sensitivity,
                defaults.depth_drag_sensitivity,
            ),
            ("gravity_scale", &mut throw.gravity_scale, defaults.gravity_scale),
            (
                "throw_multiplier",
                &mut throw.throw_multiplier,
                defaults.throw_multiplier,
            ),
            (
                "depth_compensation",
                &mut throw.depth_compensation,
                defaults.depth_compensation,
            ),
            (
                "forward_throw_gain",
                &mut throw.forward_throw_gain,
                defaults.forward_throw_gain,
            ),
            (
                "release_downward_boost",
                &mut throw.release_downward_boost,
                defaults.release_downward_boost,
            ),
        ] {
            if !(value.is_finite() && *value >= 0.0) {
                warn!("{} must be finite and not negative; using {}", name, default);
                *value = default;
            }
        }

        if !(self.select.lerp_factor >= 0.0) {
            warn!("lerp_factor must not be negative; using 0");
            self.select.lerp_factor = 0.0;
        }
        if !(self.select.max_distance > 0.0) {
            warn!("max_distance must be positive; using the default");
            self.select.max_distance = SelectSettings::default().max_distance;
        }
        if !(self.camera.transition_duration >= 0.0) {
            self.camera.transition_duration = 0.0;
        }

        self
    }
}

impl FromStr for InteractionSettings {
    type Err = String;

    /// Parse settings text, trying RON first and JSON second.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match ron::de::from_str::<Self>(text) {
            Ok(settings) => Ok(settings),
            Err(ron_err) => serde_json::from_str::<Self>(text)
                .map_err(|json_err| format!("RON: {}; JSON: {}", ron_err, json_err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_tuned_feel() {
        let settings = InteractionSettings::default();
        assert_eq!(settings.throw.follow_speed, 15.0);
        assert_eq!(settings.throw.forward_throw_gain, 0.012);
        assert_eq!(settings.throw.history_capacity, 6);
        assert_eq!(settings.select.lerp_factor, 20.0);
        assert_eq!(settings.select.layer_mask, LayerMask::ALL);
        assert_eq!(settings.camera.transition_duration, 0.5);
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let settings: InteractionSettings =
            "(throw: (follow_speed: 20.0, fine_depth_key: control), select: (layer_mask: 3))"
                .parse()
                .unwrap();
        assert_eq!(settings.throw.follow_speed, 20.0);
        assert_eq!(settings.throw.fine_depth_key, FineDepthKey::Control);
        assert_eq!(settings.throw.throw_multiplier, 1.2);
        assert_eq!(settings.select.layer_mask, LayerMask(3));
    }

    #[test]
    fn test_json_fallback() {
        let settings: InteractionSettings =
            r#"{ "throw": { "gravity_scale": 1.0 } }"#.parse().unwrap();
        assert_eq!(settings.throw.gravity_scale, 1.0);
        assert_eq!(settings.throw.min_depth, 0.3);
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!("not settings".parse::<InteractionSettings>().is_err());
    }

    #[test]
    fn test_sanitized_repairs_bad_values() {
        let mut settings = InteractionSettings::default();
        settings.throw.history_capacity = 0;
        settings.throw.min_depth = -1.0;
        settings.throw.max_depth = 0.1;
        settings.throw.follow_speed = f32::NAN;

        let fixed = settings.sanitized();
        assert_eq!(fixed.throw.history_capacity, 1);
        assert_eq!(fixed.throw.min_depth, 0.3);
        assert_eq!(fixed.throw.max_depth, 0.3);
        assert_eq!(fixed.throw.follow_speed, 15.0);
    }

    #[test]
    fn test_sanitized_repairs_non_finite_gains() {
        let mut settings = InteractionSettings::default();
        settings.throw.depth_compensation = f32::NAN;
        settings.throw.gravity_scale = f32::INFINITY;
        settings.throw.depth_scroll_speed = -2.0;
        settings.throw.forward_throw_gain = f32::NEG_INFINITY;

        let fixed = settings.sanitized().throw;
        assert_eq!(fixed.depth_compensation, 1.5);
        assert_eq!(fixed.gravity_scale, 2.0);
        assert_eq!(fixed.depth_scroll_speed, 2.5);
        assert_eq!(fixed.forward_throw_gain, 0.012);
    }
}
