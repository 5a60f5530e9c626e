//! Systems for held-object highlighting.

use bevy::pbr::MeshMaterial3d;
use bevy::prelude::*;

use crate::interaction::types::DragHighlight;

/// Tint the material of objects whose highlight changed and restore the
/// captured color once it turns off.
pub fn sync_drag_highlight(
    mut query: Query<
        (&mut DragHighlight, &MeshMaterial3d<StandardMaterial>),
        Changed<DragHighlight>,
    >,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (mut highlight, material_handle) in query.iter_mut() {
        let Some(material) = materials.get_mut(material_handle) else {
            continue;
        };

        if highlight.active {
            if highlight.original_color.is_none() {
                // Bypass change detection so this write doesn't retrigger us.
                highlight.bypass_change_detection().original_color = Some(material.base_color);
            }
            material.base_color = highlight.drag_color;
        } else if let Some(original) = highlight.original_color {
            material.base_color = original;
        }
    }
}
