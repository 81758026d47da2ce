//! Notification windows: errors, skipped-layer warnings, the busy modal and
//! startup notices.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::config::{AppConfig, ConfigResetNotification, MissingProjectWarning, SaveConfigRequest};
use crate::export::{ExportError, ExportWarnings};
use crate::project::{AsyncOperation, LoadWarnings, ProjectLoadError, ProjectSaveError};

use super::file_menu::ImageLoadError;

/// Shorten long paths from the front so the file name stays visible
fn display_path(path: &std::path::Path) -> String {
    let path_str = path.to_string_lossy();
    let chars: Vec<char> = path_str.chars().collect();
    if chars.len() > 50 {
        let tail: String = chars[chars.len() - 47..].iter().collect();
        format!("...{}", tail)
    } else {
        path_str.to_string()
    }
}

/// Error window that stays until dismissed. Returns true when dismissed.
fn error_window(ctx: &egui::Context, title: &str, message: &str) -> bool {
    let mut dismissed = false;
    egui::Window::new(title)
        .collapsible(false)
        .resizable(true)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                ui.colored_label(egui::Color32::RED, message);
            });
            ui.add_space(8.0);
            dismissed = ui.button("OK").clicked();
        });
    dismissed
}

fn warning_window(ctx: &egui::Context, title: &str, intro: &str, skipped: &[String]) -> bool {
    let mut dismissed = false;
    egui::Window::new(title)
        .collapsible(false)
        .resizable(true)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(intro);
            ui.add_space(8.0);
            egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                for line in skipped {
                    ui.colored_label(egui::Color32::YELLOW, format!("• {}", line));
                }
            });
            ui.add_space(8.0);
            dismissed = ui.button("OK").clicked();
        });
    dismissed
}

/// Renders error windows for failed loads, saves, exports and image inserts
pub fn error_dialogs_ui(
    mut contexts: EguiContexts,
    mut load_error: ResMut<ProjectLoadError>,
    mut save_error: ResMut<ProjectSaveError>,
    mut export_error: ResMut<ExportError>,
    mut image_error: ResMut<ImageLoadError>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    if let Some(message) = &load_error.message
        && error_window(ctx, "Open Failed", message)
    {
        load_error.message = None;
    }
    if let Some(message) = &save_error.message
        && error_window(ctx, "Save Failed", message)
    {
        save_error.message = None;
    }
    if let Some(message) = &export_error.message
        && error_window(ctx, "Export Failed", message)
    {
        export_error.message = None;
    }
    if let Some(message) = &image_error.message
        && error_window(ctx, "Image Not Added", message)
    {
        image_error.message = None;
    }

    Ok(())
}

/// Renders the lists of layers skipped while opening or exporting
pub fn warning_dialogs_ui(
    mut contexts: EguiContexts,
    mut load_warnings: ResMut<LoadWarnings>,
    mut export_warnings: ResMut<ExportWarnings>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    if load_warnings.show
        && warning_window(
            ctx,
            "Project Opened With Warnings",
            "Some layers could not be loaded and were skipped:",
            &load_warnings.skipped,
        )
    {
        load_warnings.show = false;
        load_warnings.skipped.clear();
    }

    if export_warnings.show
        && warning_window(
            ctx,
            "Export Finished With Warnings",
            "Some layers were left out of the exported image:",
            &export_warnings.skipped,
        )
    {
        export_warnings.show = false;
        export_warnings.skipped.clear();
    }

    Ok(())
}

/// Blocking modal while a save, open or export runs in the background
pub fn async_operation_modal_ui(mut contexts: EguiContexts, async_op: Res<AsyncOperation>) -> Result {
    if !async_op.is_busy() {
        return Ok(());
    }

    let description = async_op
        .operation_description
        .as_deref()
        .unwrap_or("Working...");

    egui::Window::new("Please Wait")
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(description);
            });
        });

    Ok(())
}

/// Tells the user their config file was unreadable and has been reset
pub fn config_reset_notification_ui(
    mut contexts: EguiContexts,
    mut notification: ResMut<ConfigResetNotification>,
) -> Result {
    if !notification.show {
        return Ok(());
    }

    egui::Window::new("Settings Reset")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("Your settings could not be read and were reset to defaults.");
            if let Some(reason) = &notification.reason {
                ui.add_space(5.0);
                ui.label(egui::RichText::new(reason).weak());
            }
            ui.add_space(10.0);
            if ui.button("OK").clicked() {
                notification.show = false;
                notification.reason = None;
            }
        });

    Ok(())
}

/// Renders the missing project warning (shown at startup if the last project is gone)
pub fn missing_project_warning_ui(
    mut contexts: EguiContexts,
    mut warning: ResMut<MissingProjectWarning>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) -> Result {
    if !warning.show {
        return Ok(());
    }

    egui::Window::new("Project Not Found")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("The last opened project no longer exists:");

            if let Some(ref path) = warning.path {
                ui.add_space(5.0);
                ui.label(egui::RichText::new(display_path(path)).weak())
                    .on_hover_text(path.to_string_lossy());
                ui.add_space(10.0);
            }

            ui.horizontal(|ui| {
                if ui.button("OK").clicked() {
                    warning.show = false;
                }

                if ui.button("Clear from history").clicked() {
                    config.data.last_project_path = None;
                    config.dirty = true;
                    save_events.write(SaveConfigRequest);
                    warning.show = false;
                }
            });
        });

    Ok(())
}
