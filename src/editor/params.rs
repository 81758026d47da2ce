//! Common SystemParam bundles and view helpers shared by the editor systems.
//!
//! ## Available Bundles
//!
//! - [`CanvasPointer`]: Window cursor mapped into canvas view space
//!
//! ## Helper Functions
//!
//! - [`is_cursor_over_ui`]: Check if cursor is over egui UI (for input gating)

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

/// Where the canvas sits in the window, written by the canvas painter each frame.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct CanvasViewport {
    /// Screen position of the canvas top-left corner (view-space origin)
    pub origin: Vec2,
    /// Size of the area left for the canvas next to the side panel
    pub size: Vec2,
}

impl CanvasViewport {
    pub fn to_view(&self, screen: Vec2) -> Vec2 {
        screen - self.origin
    }

    pub fn to_screen(&self, view: Vec2) -> Vec2 {
        view + self.origin
    }
}

/// Bundled window query and viewport for cursor-to-canvas conversion
#[derive(SystemParam)]
pub struct CanvasPointer<'w, 's> {
    pub window: Query<'w, 's, &'static Window, With<PrimaryWindow>>,
    pub viewport: Res<'w, CanvasViewport>,
}

impl CanvasPointer<'_, '_> {
    /// Cursor position in canvas view space, if the cursor is in the window
    pub fn cursor_view_pos(&self) -> Option<Vec2> {
        let window = self.window.single().ok()?;
        let cursor = window.cursor_position()?;
        Some(self.viewport.to_view(cursor))
    }
}

/// Check if the cursor is over egui UI
pub fn is_cursor_over_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.is_pointer_over_area())
        .unwrap_or(false)
}

/// Check if egui is consuming keyboard input (a text field has focus)
pub fn is_typing_in_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_keyboard_input())
        .unwrap_or(false)
}
