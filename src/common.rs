//! Common types shared across multiple modules.
//!
//! The resize handle enum is used by the hit-test engine, the resize math,
//! the interaction state machine and the cursor/overlay rendering.

use bevy::window::{CursorIcon, SystemCursorIcon};

/// One of the eight resize handles around a layer.
///
/// The name encodes which edges of the layer rect move while the handle is dragged.
/// Side handles move one edge, corner handles move two.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum ResizeHandle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    TopCenter,
    BottomCenter,
    LeftCenter,
    RightCenter,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::TopLeft,
        ResizeHandle::TopRight,
        ResizeHandle::BottomLeft,
        ResizeHandle::BottomRight,
        ResizeHandle::TopCenter,
        ResizeHandle::BottomCenter,
        ResizeHandle::LeftCenter,
        ResizeHandle::RightCenter,
    ];

    pub fn moves_top(&self) -> bool {
        matches!(
            self,
            ResizeHandle::TopLeft | ResizeHandle::TopRight | ResizeHandle::TopCenter
        )
    }

    pub fn moves_bottom(&self) -> bool {
        matches!(
            self,
            ResizeHandle::BottomLeft | ResizeHandle::BottomRight | ResizeHandle::BottomCenter
        )
    }

    pub fn moves_left(&self) -> bool {
        matches!(
            self,
            ResizeHandle::TopLeft | ResizeHandle::BottomLeft | ResizeHandle::LeftCenter
        )
    }

    pub fn moves_right(&self) -> bool {
        matches!(
            self,
            ResizeHandle::TopRight | ResizeHandle::BottomRight | ResizeHandle::RightCenter
        )
    }

    /// Position of the handle center in the layer's local frame,
    /// as a fraction of the layer size (0,0 = top-left, 1,1 = bottom-right).
    pub fn anchor_fraction(&self) -> (f32, f32) {
        match self {
            ResizeHandle::TopLeft => (0.0, 0.0),
            ResizeHandle::TopRight => (1.0, 0.0),
            ResizeHandle::BottomLeft => (0.0, 1.0),
            ResizeHandle::BottomRight => (1.0, 1.0),
            ResizeHandle::TopCenter => (0.5, 0.0),
            ResizeHandle::BottomCenter => (0.5, 1.0),
            ResizeHandle::LeftCenter => (0.0, 0.5),
            ResizeHandle::RightCenter => (1.0, 0.5),
        }
    }

    /// Get the appropriate cursor icon for this handle.
    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            ResizeHandle::TopCenter | ResizeHandle::BottomCenter => {
                CursorIcon::System(SystemCursorIcon::NsResize)
            }
            ResizeHandle::LeftCenter | ResizeHandle::RightCenter => {
                CursorIcon::System(SystemCursorIcon::EwResize)
            }
            ResizeHandle::TopRight | ResizeHandle::BottomLeft => {
                CursorIcon::System(SystemCursorIcon::NeswResize)
            }
            ResizeHandle::TopLeft | ResizeHandle::BottomRight => {
                CursorIcon::System(SystemCursorIcon::NwseResize)
            }
        }
    }
}
