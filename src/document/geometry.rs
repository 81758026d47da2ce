//! Coordinate conversion between document space and view space.
//!
//! Document space is the fixed coordinate system of the canvas. View space is
//! document space multiplied by the current scale factor and is what pointer
//! positions and rendering use. Both spaces have their origin at the canvas
//! top-left corner with y growing downwards, and a positive rotation turns a
//! layer clockwise on screen.

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle of a layer before its rotation is applied.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayerRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LayerRect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rect from two opposite edges on each axis.
    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.origin() + self.size() / 2.0
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    pub fn translated(mut self, delta: Vec2) -> Self {
        self.translate(delta);
        self
    }

    /// Scale every component from document units to view units.
    pub fn to_view(&self, scale: f32) -> Self {
        Self::new(
            self.x * scale,
            self.y * scale,
            self.width * scale,
            self.height * scale,
        )
    }

    /// Inverse of [`LayerRect::to_view`].
    pub fn to_document(&self, scale: f32) -> Self {
        Self::new(
            self.x / scale,
            self.y / scale,
            self.width / scale,
            self.height / scale,
        )
    }

    /// Axis-aligned containment, edges included.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }
}

pub fn to_view(point: Vec2, scale: f32) -> Vec2 {
    point * scale
}

pub fn to_document(point: Vec2, scale: f32) -> Vec2 {
    point / scale
}

/// Bring any angle into `[0, 360)`.
pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Rotate a vector clockwise on screen (y-down) by `degrees`.
pub fn rotate_vec(v: Vec2, degrees: f32) -> Vec2 {
    let (sin_a, cos_a) = degrees.to_radians().sin_cos();
    Vec2::new(v.x * cos_a - v.y * sin_a, v.x * sin_a + v.y * cos_a)
}

/// Map a point into the unrotated local frame of `rect`.
///
/// Translates by `-center`, rotates by `-rotation`, then translates by the half
/// extents, so the local frame has its origin at the rect's top-left corner.
/// `point` and `rect` must be in the same space.
pub fn to_local(point: Vec2, rect: &LayerRect, rotation: f32) -> Vec2 {
    rotate_vec(point - rect.center(), -rotation) + rect.size() / 2.0
}

/// Inverse of [`to_local`].
pub fn from_local(local: Vec2, rect: &LayerRect, rotation: f32) -> Vec2 {
    rotate_vec(local - rect.size() / 2.0, rotation) + rect.center()
}

/// Rotation-aware containment: is `point` inside `rect` rotated about its center?
pub fn contains_rotated(point: Vec2, rect: &LayerRect, rotation: f32) -> bool {
    let local = to_local(point, rect, rotation);
    local.x >= 0.0 && local.x <= rect.width && local.y >= 0.0 && local.y <= rect.height
}

/// The four corners of a rotated rect, clockwise from the top-left.
pub fn rotated_corners(rect: &LayerRect, rotation: f32) -> [Vec2; 4] {
    [
        from_local(Vec2::ZERO, rect, rotation),
        from_local(Vec2::new(rect.width, 0.0), rect, rotation),
        from_local(rect.size(), rect, rotation),
        from_local(Vec2::new(0.0, rect.height), rect, rotation),
    ]
}

/// Stored rotation for a pointer dragged around `center`.
///
/// A pointer straight above the center maps to 0 degrees.
pub fn pointer_angle_to_rotation(pointer: Vec2, center: Vec2) -> f32 {
    let d = pointer - center;
    normalize_degrees(d.y.atan2(d.x).to_degrees() + 90.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < EPS
    }

    #[test]
    fn test_view_document_round_trip() {
        for scale in [0.1, 0.37, 1.0, 2.5, 5.0] {
            let p = Vec2::new(123.4, -56.7);
            assert!(approx(to_view(to_document(p, scale), scale), p));
            assert!(approx(to_document(to_view(p, scale), scale), p));
        }
    }

    #[test]
    fn test_rect_to_view_round_trip() {
        let rect = LayerRect::new(10.0, 20.0, 30.0, 40.0);
        let back = rect.to_view(0.3).to_document(0.3);
        assert!((back.x - rect.x).abs() < EPS);
        assert!((back.height - rect.height).abs() < EPS);
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert!((normalize_degrees(-90.0) - 270.0).abs() < EPS);
        assert!((normalize_degrees(725.0) - 5.0).abs() < EPS);
        assert!(normalize_degrees(-1e-7) < 360.0);
    }

    #[test]
    fn test_rotate_vec_is_clockwise_on_screen() {
        // Up (negative y) turns to the right for +90 degrees
        let v = rotate_vec(Vec2::new(0.0, -1.0), 90.0);
        assert!(approx(v, Vec2::new(1.0, 0.0)));
    }

    #[test]
    fn test_local_round_trip_for_any_rotation() {
        let rect = LayerRect::new(100.0, 50.0, 200.0, 80.0);
        let points = [
            Vec2::new(0.0, 0.0),
            Vec2::new(150.0, 90.0),
            Vec2::new(-40.0, 300.0),
        ];
        for rotation in [0.0, 15.0, 90.0, 133.3, 270.0, 359.9] {
            for p in points {
                let local = to_local(p, &rect, rotation);
                assert!(approx(from_local(local, &rect, rotation), p));
                assert!(approx(to_local(from_local(p, &rect, rotation), &rect, rotation), p));
            }
        }
    }

    #[test]
    fn test_to_local_without_rotation_is_offset() {
        let rect = LayerRect::new(100.0, 50.0, 200.0, 80.0);
        let local = to_local(Vec2::new(110.0, 60.0), &rect, 0.0);
        assert!(approx(local, Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn test_contains_rotated() {
        // 200x20 bar centered at (200, 110)
        let rect = LayerRect::new(100.0, 100.0, 200.0, 20.0);
        let tip = Vec2::new(290.0, 110.0);
        assert!(contains_rotated(tip, &rect, 0.0));
        // Rotated 90 degrees the bar is vertical, so the old tip is outside
        assert!(!contains_rotated(tip, &rect, 90.0));
        assert!(contains_rotated(Vec2::new(200.0, 200.0), &rect, 90.0));
        assert!(contains_rotated(rect.center(), &rect, 45.0));
    }

    #[test]
    fn test_rotated_corners_unrotated() {
        let rect = LayerRect::new(0.0, 0.0, 10.0, 20.0);
        let corners = rotated_corners(&rect, 0.0);
        assert!(approx(corners[0], Vec2::new(0.0, 0.0)));
        assert!(approx(corners[2], Vec2::new(10.0, 20.0)));
    }

    #[test]
    fn test_pointer_angle_to_rotation() {
        let center = Vec2::new(100.0, 100.0);
        assert!(pointer_angle_to_rotation(Vec2::new(100.0, 50.0), center).abs() < EPS);
        assert!((pointer_angle_to_rotation(Vec2::new(150.0, 100.0), center) - 90.0).abs() < EPS);
        assert!((pointer_angle_to_rotation(Vec2::new(100.0, 150.0), center) - 180.0).abs() < EPS);
        assert!((pointer_angle_to_rotation(Vec2::new(50.0, 100.0), center) - 270.0).abs() < EPS);
    }

    #[test]
    fn test_rect_contains_includes_edges() {
        let rect = LayerRect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(!rect.contains(Vec2::new(10.1, 5.0)));
    }
}
