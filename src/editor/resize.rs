//! Rotation-aware resize math.
//!
//! A resize gesture always starts from the rect captured at press time and the
//! total pointer delta since then, so repeated frames never accumulate error.
//! The delta is projected into the layer's local frame, the handle's edges move,
//! corner handles lock the aspect ratio, the minimum size is enforced by moving
//! the dragged edge back, and finally the rect is shifted so the edge or corner
//! opposite the handle stays put on screen.

use bevy::math::Vec2;

use crate::common::ResizeHandle;
use crate::constants::MIN_LAYER_SIZE;
use crate::document::geometry::rotate_vec;
use crate::document::LayerRect;

/// Width over height, falling back to 1 for degenerate rects.
pub fn aspect_ratio(rect: &LayerRect) -> f32 {
    if rect.height > f32::EPSILON && rect.width > f32::EPSILON {
        rect.width / rect.height
    } else {
        1.0
    }
}

/// Compute the resized rect.
///
/// `delta` is the pointer movement since the gesture started, already divided by
/// the view scale (document units, screen axes). `aspect` is the ratio captured
/// when the gesture started.
pub fn resize_rect(
    start: &LayerRect,
    rotation: f32,
    handle: ResizeHandle,
    delta: Vec2,
    aspect: f32,
) -> LayerRect {
    let local_delta = rotate_vec(delta, -rotation);

    let mut left = start.left();
    let mut top = start.top();
    let mut right = start.right();
    let mut bottom = start.bottom();

    if handle.moves_left() {
        left += local_delta.x;
    }
    if handle.moves_right() {
        right += local_delta.x;
    }
    if handle.moves_top() {
        top += local_delta.y;
    }
    if handle.moves_bottom() {
        bottom += local_delta.y;
    }

    // Corner handles keep the gesture-start aspect ratio
    match handle {
        ResizeHandle::TopLeft => top = bottom - (right - left) / aspect,
        ResizeHandle::BottomRight => bottom = top + (right - left) / aspect,
        ResizeHandle::TopRight => right = left + (bottom - top) * aspect,
        ResizeHandle::BottomLeft => left = right - (bottom - top) * aspect,
        _ => {}
    }

    if right - left < MIN_LAYER_SIZE {
        if handle.moves_left() {
            left = right - MIN_LAYER_SIZE;
        } else {
            right = left + MIN_LAYER_SIZE;
        }
    }
    if bottom - top < MIN_LAYER_SIZE {
        if handle.moves_top() {
            top = bottom - MIN_LAYER_SIZE;
        } else {
            bottom = top + MIN_LAYER_SIZE;
        }
    }

    let resized = LayerRect::from_edges(left, top, right, bottom);

    // The untouched edges share their unrotated coordinates with the start rect.
    // Rotating about a different center only adds a translation, so undo it.
    let center_shift = resized.center() - start.center();
    resized.translated(rotate_vec(center_shift, rotation) - center_shift)
}
