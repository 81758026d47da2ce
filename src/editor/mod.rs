//! The interactive canvas: session state, pointer and keyboard input, and
//! painting of layers and selection handles.
//!
//! ## Module Structure
//!
//! - [`session`] - Document, view state and history owner with the interaction state machine
//! - [`hit_test`] - Which layer or handle lies under the pointer
//! - [`resize`] - Anchored, rotation-aware resizing
//! - [`text_reflow`] - Text sizing for inline editing
//! - [`history`] - Snapshot undo/redo log
//! - [`input`] - Mouse and keyboard systems feeding the session
//! - [`canvas`] - egui painting of the canvas and overlays
//! - [`text_overlay`] - Inline multi-line text editor
//! - [`textures`] - Image layer textures

mod camera;
mod canvas;
mod conditions;
mod history;
mod hit_test;
mod input;
mod params;
mod resize;
mod session;
pub mod text_reflow;
mod text_overlay;
mod textures;

pub use conditions::no_dialog_open;
pub use params::CanvasViewport;
pub use session::EditorSession;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

/// Canvas painting and the inline editor. Panels that take screen space must
/// run before this set so the canvas fills what they leave.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanvasPaint;

pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EditorSession>()
            .init_resource::<CanvasViewport>()
            .init_resource::<textures::LayerTextures>()
            .add_systems(
                Startup,
                (camera::spawn_camera, textures::setup_placeholder_texture),
            )
            .add_systems(
                Update,
                (
                    input::canvas_pointer_input,
                    input::editor_shortcuts.run_if(
                        conditions::no_dialog_open.and(not(conditions::gesture_active)),
                    ),
                    input::ctrl_scroll_zoom.run_if(
                        conditions::no_dialog_open.and(not(conditions::gesture_active)),
                    ),
                    input::update_cursor_icon,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    textures::load_layer_textures,
                    textures::evict_unused_textures
                        .run_if(resource_changed::<EditorSession>),
                ),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (canvas::canvas_ui, text_overlay::text_overlay_ui)
                    .chain()
                    .in_set(CanvasPaint),
            );
    }
}
