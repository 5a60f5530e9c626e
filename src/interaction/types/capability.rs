//! Optional capabilities an interactive object may expose.

use bevy::prelude::*;

/// Cosmetic "being held" signal.
pub trait Highlight {
    fn set_highlight(&mut self, enabled: bool);
}

/// Highlight sink for objects without any visual feedback.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHighlight;

impl Highlight for NoHighlight {
    fn set_highlight(&mut self, _enabled: bool) {}
}

/// Notification sent to an object when it gets selected.
pub trait Interactable {
    fn on_interact(&mut self);
}

/// Marker for bodies that can be grabbed and thrown.
#[derive(Component, Debug, Default)]
pub struct Draggable;

/// Tint applied to an object's material while it is held.
#[derive(Component, Clone, Debug)]
pub struct DragHighlight {
    pub drag_color: Color,
    /// Material color captured the first time the highlight turns on.
    pub original_color: Option<Color>,
    pub active: bool,
}

impl DragHighlight {
    pub fn new(drag_color: Color) -> Self {
        Self {
            drag_color,
            original_color: None,
            active: false,
        }
    }
}

impl Default for DragHighlight {
    fn default() -> Self {
        Self::new(Color::srgb(0.0, 1.0, 1.0))
    }
}

impl Highlight for DragHighlight {
    fn set_highlight(&mut self, enabled: bool) {
        self.active = enabled;
    }
}

/// Object that reacts to being selected by the constrained drag.
#[derive(Component, Clone, Debug, Default)]
pub struct Touchable {
    pub label: String,
    pub touches: u32,
}

impl Touchable {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            touches: 0,
        }
    }
}

impl Interactable for Touchable {
    fn on_interact(&mut self) {
        self.touches += 1;
        info!("{} was touched ({} total)", self.label, self.touches);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touchable_counts_interactions() {
        let mut touchable = Touchable::new("crate");
        touchable.on_interact();
        touchable.on_interact();
        assert_eq!(touchable.touches, 2);
    }

    #[test]
    fn test_drag_highlight_toggles() {
        let mut highlight = DragHighlight::default();
        assert!(!highlight.active);
        highlight.set_highlight(true);
        assert!(highlight.active);
        highlight.set_highlight(false);
        assert!(!highlight.active);
    }
}
