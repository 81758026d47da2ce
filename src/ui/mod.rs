//! egui panels and dialogs around the canvas.
//!
//! ## Module Structure
//!
//! - [`side_panel`] - Right side panel (file, layers, text properties, font, history)
//! - [`file_menu`] - File actions, native pickers, new canvas and export dialogs
//! - [`dialogs`] - Error, warning, busy and startup notification windows

mod dialogs;
pub mod file_menu;
mod side_panel;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::config::{ConfigResetNotification, MissingProjectWarning};
use crate::editor::{no_dialog_open, CanvasPaint};
use crate::export::{ExportError, ExportWarnings};
use crate::project::{AsyncOperation, LoadWarnings, ProjectLoadError, ProjectSaveError};

use file_menu::{FileAction, FileMenuState, ImageLoadError};

/// Resource that tracks whether any modal dialog is currently open.
/// Editor input handlers should check this to avoid processing input
/// when the user is interacting with a dialog.
#[derive(Resource, Default)]
pub struct DialogState {
    /// True when any modal dialog is open that should block editor input
    pub any_modal_open: bool,
}

/// Every resource whose state can put a modal window on screen
#[derive(bevy::ecs::system::SystemParam)]
struct ModalSources<'w> {
    file_menu: Res<'w, FileMenuState>,
    image_error: Res<'w, ImageLoadError>,
    missing_project: Res<'w, MissingProjectWarning>,
    config_reset: Res<'w, ConfigResetNotification>,
    load_warnings: Res<'w, LoadWarnings>,
    export_warnings: Res<'w, ExportWarnings>,
    load_error: Res<'w, ProjectLoadError>,
    save_error: Res<'w, ProjectSaveError>,
    export_error: Res<'w, ExportError>,
    async_op: Res<'w, AsyncOperation>,
}

impl ModalSources<'_> {
    fn any_open(&self) -> bool {
        self.file_menu.show_new_canvas
            || self.file_menu.show_export
            || self.file_menu.pending_dialog.is_some()
            || self.image_error.message.is_some()
            || self.missing_project.show
            || self.config_reset.show
            || self.load_warnings.show
            || self.export_warnings.show
            || self.load_error.message.is_some()
            || self.save_error.message.is_some()
            || self.export_error.message.is_some()
            || self.async_op.is_busy()
    }
}

/// System to aggregate all dialog open states into a single resource.
/// Runs in First schedule before input handlers.
fn update_dialog_state(sources: ModalSources, mut dialog_state: ResMut<DialogState>) {
    let open = sources.any_open();
    if dialog_state.any_modal_open != open {
        dialog_state.any_modal_open = open;
    }
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DialogState>()
            .init_resource::<FileMenuState>()
            .init_resource::<ImageLoadError>()
            .add_message::<FileAction>()
            .add_systems(
                Update,
                (
                    file_menu::handle_file_shortcuts.run_if(no_dialog_open),
                    file_menu::handle_file_actions.run_if(on_message::<FileAction>),
                    file_menu::poll_file_dialogs,
                )
                    .chain(),
            )
            // The side panel takes its space before the canvas fills the rest
            .add_systems(
                EguiPrimaryContextPass,
                side_panel::side_panel_ui.before(CanvasPaint),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (
                    // Last: dialogs/overlays
                    file_menu::file_menu_ui,
                    dialogs::missing_project_warning_ui,
                    dialogs::config_reset_notification_ui,
                    dialogs::error_dialogs_ui,
                    dialogs::warning_dialogs_ui,
                    dialogs::async_operation_modal_ui,
                )
                    .after(CanvasPaint),
            )
            // Update dialog state at the start of each frame
            .add_systems(First, update_dialog_state);
    }
}
