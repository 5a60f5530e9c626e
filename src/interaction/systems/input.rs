//! Pointer input sampling
//!
//! Reads the window cursor, mouse buttons, wheel and the fine-depth modifier
//! once per frame into [`PointerFrame`].

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::interaction::pointer::{PointerFrame, PointerSpace, ViewSurface};
use crate::interaction::types::*;

/// Pixel-precise wheels report pixels; this many count as one scroll line.
const PIXELS_PER_SCROLL_LINE: f32 = 100.0;

/// Fine-depth motion is read in logical pixels and scaled down to roughly
/// match the magnitude of a mouse axis.
const FINE_DEPTH_PIXEL_SCALE: f32 = 0.1;

pub fn sample_pointer(
    windows: Query<&Window, With<PrimaryWindow>>,
    mouse: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    scroll: Res<AccumulatedMouseScroll>,
    motion: Res<AccumulatedMouseMotion>,
    settings: Res<InteractionSettings>,
    surface: Option<Res<ViewSurface>>,
    mut pointer: ResMut<PointerFrame>,
) {
    pointer.just_pressed = mouse.just_pressed(MouseButton::Left);
    pointer.just_released = mouse.just_released(MouseButton::Left);
    pointer.held = mouse.pressed(MouseButton::Left);

    if let Ok(window) = windows.single() {
        let cursor = window.cursor_position();
        match surface.as_deref() {
            // The camera image is shown inside a UI rect.
            Some(surface) => {
                let sample = cursor.and_then(|cursor| surface.viewport_point(cursor));
                pointer.track_cursor(sample, PointerSpace::Viewport);
            }
            None => {
                let sample = cursor.map(|cursor| Vec2::new(cursor.x, window.height() - cursor.y));
                pointer.track_cursor(sample, PointerSpace::Pixels);
            }
        }
    }

    let lines = match scroll.unit {
        MouseScrollUnit::Line => scroll.delta.y,
        MouseScrollUnit::Pixel => scroll.delta.y / PIXELS_PER_SCROLL_LINE,
    };
    if lines != 0.0 {
        pointer.accumulate_scroll(lines);
    }

    let fine_held = keyboard.any_pressed(settings.throw.fine_depth_key.key_codes());
    // Screen motion is y down; the depth axis is y up.
    pointer.accumulate_fine_depth(fine_held, -motion.delta.y * FINE_DEPTH_PIXEL_SCALE);
}

/// Tab switches between throwing and constrained dragging.
pub fn toggle_interaction_mode(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut mode: ResMut<InteractionMode>,
) {
    if keyboard.just_pressed(KeyCode::Tab) {
        *mode = mode.toggled();
        info!("Interaction mode: {}", mode.label());
    }
}
