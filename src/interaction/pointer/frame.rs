//! Pointer state sampled on the frame clock.
//!
//! Button edges and the cursor position are refreshed every frame. Scroll and
//! fine-depth motion accumulate until a fixed physics step consumes them, so
//! no input is lost or counted twice when the two clocks drift apart.

use bevy::prelude::*;

use super::mapper::PointerSpace;

/// Depth-related input gathered since the last fixed step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DepthInput {
    /// Scroll lines, positive away from the viewer.
    pub scroll: f32,
    pub fine_depth_held: bool,
    /// Vertical pointer motion while the fine-depth key was held, y up.
    pub fine_depth_axis: f32,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct PointerFrame {
    /// Cursor position in `space`, bottom-left origin. `None` until the
    /// cursor has been over the window or view surface.
    pub position: Option<Vec2>,
    pub space: PointerSpace,
    pub just_pressed: bool,
    pub just_released: bool,
    pub held: bool,
    depth: DepthInput,
}

impl PointerFrame {
    /// Record this frame's cursor sample, already converted into `space`.
    ///
    /// A missing sample keeps the last position while the button is held so a
    /// grabbed body stays put. Otherwise the pointer is considered gone.
    pub fn track_cursor(&mut self, sample: Option<Vec2>, space: PointerSpace) {
        self.space = space;
        match sample {
            Some(point) => self.position = Some(point),
            None if !self.held => self.position = None,
            None => {}
        }
    }

    pub fn accumulate_scroll(&mut self, lines: f32) {
        self.depth.scroll += lines;
    }

    pub fn accumulate_fine_depth(&mut self, held: bool, axis: f32) {
        self.depth.fine_depth_held = held;
        if held {
            self.depth.fine_depth_axis += axis;
        }
    }

    /// Hand the accumulated depth input to a fixed step and start over.
    pub fn take_depth_input(&mut self) -> DepthInput {
        let held = self.depth.fine_depth_held;
        let taken = std::mem::take(&mut self.depth);
        self.depth.fine_depth_held = held;
        taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_input_is_consumed_once() {
        let mut frame = PointerFrame::default();
        frame.accumulate_scroll(1.0);
        frame.accumulate_scroll(2.0);
        frame.accumulate_fine_depth(true, 0.5);

        let first = frame.take_depth_input();
        assert_eq!(first.scroll, 3.0);
        assert_eq!(first.fine_depth_axis, 0.5);
        assert!(first.fine_depth_held);

        let second = frame.take_depth_input();
        assert_eq!(second.scroll, 0.0);
        assert_eq!(second.fine_depth_axis, 0.0);
        assert!(second.fine_depth_held);
    }

    #[test]
    fn test_cursor_kept_only_while_held() {
        let mut frame = PointerFrame::default();
        frame.held = true;
        frame.track_cursor(Some(Vec2::new(0.25, 0.75)), PointerSpace::Viewport);
        frame.track_cursor(None, PointerSpace::Viewport);
        assert_eq!(frame.position, Some(Vec2::new(0.25, 0.75)));
        assert_eq!(frame.space, PointerSpace::Viewport);

        frame.held = false;
        frame.track_cursor(None, PointerSpace::Viewport);
        assert_eq!(frame.position, None);
    }

    #[test]
    fn test_fine_axis_ignored_without_key() {
        let mut frame = PointerFrame::default();
        frame.accumulate_fine_depth(false, 4.0);
        assert_eq!(frame.take_depth_input().fine_depth_axis, 0.0);
    }
}
