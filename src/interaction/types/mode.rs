//! Which controller currently owns the pointer.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// Grab with velocity following and throw on release.
    #[default]
    Throw,
    /// Select with a raycast and pull by position interpolation.
    Constrained,
}

impl InteractionMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Throw => Self::Constrained,
            Self::Constrained => Self::Throw,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Throw => "throw",
            Self::Constrained => "constrained",
        }
    }
}
