//! Hit detection for layers and the handles around the selected layer.
//!
//! All positions here are in view space. Handles are laid out in the selected
//! layer's local (unrotated) frame, so the pointer is mapped into that frame
//! once and compared against plain axis-aligned squares.

use bevy::math::Vec2;

use crate::common::ResizeHandle;
use crate::constants::{HANDLE_SIZE, ROTATION_HANDLE_OFFSET};
use crate::document::geometry::{contains_rotated, from_local, to_local};
use crate::document::{Document, Layer, LayerRect};

/// What the pointer is over on the selected layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    RotationHandle,
    Resize(ResizeHandle),
    Body,
}

/// The rotation handle square, in the local frame of a layer whose view-space size is `size`.
pub fn rotation_handle_local(size: Vec2) -> LayerRect {
    LayerRect::new(
        size.x / 2.0 - HANDLE_SIZE / 2.0,
        -ROTATION_HANDLE_OFFSET,
        HANDLE_SIZE,
        HANDLE_SIZE,
    )
}

/// A resize handle square, centered on its anchor in the local frame.
pub fn resize_handle_local(handle: ResizeHandle, size: Vec2) -> LayerRect {
    let (fx, fy) = handle.anchor_fraction();
    LayerRect::new(
        size.x * fx - HANDLE_SIZE / 2.0,
        size.y * fy - HANDLE_SIZE / 2.0,
        HANDLE_SIZE,
        HANDLE_SIZE,
    )
}

/// Center of the rotation handle in view space, for drawing the connector line.
pub fn rotation_handle_center(view_rect: &LayerRect, rotation: f32) -> Vec2 {
    let local = rotation_handle_local(view_rect.size());
    from_local(local.center(), view_rect, rotation)
}

/// Top-center of the layer in view space (where the connector line starts).
pub fn top_center(view_rect: &LayerRect, rotation: f32) -> Vec2 {
    from_local(Vec2::new(view_rect.width / 2.0, 0.0), view_rect, rotation)
}

/// Classify the pointer against the selected layer.
///
/// Priority is rotation handle, then the eight resize handles, then the body.
pub fn classify_selected(pointer: Vec2, layer: &Layer, scale: f32) -> Option<HitTarget> {
    let view_rect = layer.rect.to_view(scale);
    let local = to_local(pointer, &view_rect, layer.rotation());
    let size = view_rect.size();

    if rotation_handle_local(size).contains(local) {
        return Some(HitTarget::RotationHandle);
    }

    if let Some(handle) = ResizeHandle::ALL
        .into_iter()
        .find(|h| resize_handle_local(*h, size).contains(local))
    {
        return Some(HitTarget::Resize(handle));
    }

    if contains_rotated(pointer, &view_rect, layer.rotation()) {
        return Some(HitTarget::Body);
    }

    None
}

/// Rotation-aware body containment for a single layer.
pub fn layer_contains(pointer: Vec2, layer: &Layer, scale: f32) -> bool {
    contains_rotated(pointer, &layer.rect.to_view(scale), layer.rotation())
}

/// Topmost visible layer whose body contains the pointer.
///
/// Used both for click selection and hover highlighting; both stop at the
/// first match.
pub fn topmost_layer_at(pointer: Vec2, document: &Document, scale: f32) -> Option<usize> {
    document
        .layers()
        .iter()
        .enumerate()
        .filter(|(_, layer)| layer.visible)
        .find(|(_, layer)| layer_contains(pointer, layer, scale))
        .map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::CanvasSize;

    fn layer_at(x: f32, y: f32, w: f32, h: f32) -> Layer {
        Layer::image("/tmp/x.png", LayerRect::new(x, y, w, h))
    }

    #[test]
    fn test_rotation_handle_beats_everything() {
        let layer = layer_at(100.0, 100.0, 200.0, 100.0);
        // Handle spans local x 96..104, y -30..-22 => view (196..204, 70..78)
        let hit = classify_selected(Vec2::new(200.0, 74.0), &layer, 1.0);
        assert_eq!(hit, Some(HitTarget::RotationHandle));
    }

    #[test]
    fn test_rotation_handle_follows_rotation() {
        // Rotated 90 degrees clockwise, "above" points to the right of the center
        let layer = layer_at(100.0, 100.0, 200.0, 100.0).with_rotation(90.0);
        // Center (200,150), half height 50, offset reaches local y -26 => 76 right of center
        let hit = classify_selected(Vec2::new(276.0, 150.0), &layer, 1.0);
        assert_eq!(hit, Some(HitTarget::RotationHandle));
        // The unrotated position is no longer a handle
        assert_ne!(
            classify_selected(Vec2::new(200.0, 74.0), &layer, 1.0),
            Some(HitTarget::RotationHandle)
        );
    }

    #[test]
    fn test_corner_handle_before_body() {
        let layer = layer_at(100.0, 100.0, 200.0, 100.0);
        assert_eq!(
            classify_selected(Vec2::new(102.0, 102.0), &layer, 1.0),
            Some(HitTarget::Resize(ResizeHandle::TopLeft))
        );
        assert_eq!(
            classify_selected(Vec2::new(300.0, 150.0), &layer, 1.0),
            Some(HitTarget::Resize(ResizeHandle::RightCenter))
        );
        assert_eq!(
            classify_selected(Vec2::new(150.0, 150.0), &layer, 1.0),
            Some(HitTarget::Body)
        );
    }

    #[test]
    fn test_handles_scale_with_view() {
        let layer = layer_at(100.0, 100.0, 200.0, 100.0);
        // At scale 2 the bottom-right corner is at view (600, 400)
        assert_eq!(
            classify_selected(Vec2::new(599.0, 399.0), &layer, 2.0),
            Some(HitTarget::Resize(ResizeHandle::BottomRight))
        );
        assert_eq!(classify_selected(Vec2::new(700.0, 400.0), &layer, 2.0), None);
    }

    #[test]
    fn test_topmost_layer_wins() {
        let mut doc = Document::new(CanvasSize::default());
        doc.insert_at_top(layer_at(0.0, 0.0, 300.0, 300.0));
        doc.insert_at_top(layer_at(50.0, 50.0, 100.0, 100.0));
        assert_eq!(topmost_layer_at(Vec2::new(75.0, 75.0), &doc, 1.0), Some(0));
        assert_eq!(topmost_layer_at(Vec2::new(250.0, 250.0), &doc, 1.0), Some(1));
        assert_eq!(topmost_layer_at(Vec2::new(400.0, 400.0), &doc, 1.0), None);
    }

    #[test]
    fn test_hidden_layers_are_skipped() {
        let mut doc = Document::new(CanvasSize::default());
        doc.insert_at_top(layer_at(0.0, 0.0, 300.0, 300.0));
        doc.insert_at_top(layer_at(50.0, 50.0, 100.0, 100.0));
        doc.set_visible(0, false);
        assert_eq!(topmost_layer_at(Vec2::new(75.0, 75.0), &doc, 1.0), Some(1));
    }

    #[test]
    fn test_rotated_body_containment() {
        let mut doc = Document::new(CanvasSize::default());
        doc.insert_at_top(layer_at(100.0, 100.0, 200.0, 20.0).with_rotation(90.0));
        // Vertical bar centered at (200,110)
        assert_eq!(topmost_layer_at(Vec2::new(200.0, 190.0), &doc, 1.0), Some(0));
        assert_eq!(topmost_layer_at(Vec2::new(290.0, 110.0), &doc, 1.0), None);
    }
}
