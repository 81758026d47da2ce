//! Side panel UI module.
//!
//! The right-side panel with file and insert buttons, zoom controls, the
//! layers list, text properties, the text font picker and the history list.
//!
//! ## Module Structure
//!
//! - [`file_section`] - File, insert and zoom buttons
//! - [`layers`] - Layers list with visibility, ordering and deletion
//! - [`properties`] - Text properties of the selected text layer
//! - [`font`] - Text font picker
//! - [`history`] - Undo/redo buttons and the clickable history list
//! - [`main_panel`] - Main panel orchestration
//!
//! ## Systems
//!
//! - [`side_panel_ui`]: Main side panel rendering system

mod file_section;
mod font;
mod history;
mod layers;
mod main_panel;
mod properties;

use bevy_egui::egui;

/// Section title followed by a separator, shared by every panel section.
fn section_heading(ui: &mut egui::Ui, title: &str) {
    ui.add_space(4.0);
    ui.label(egui::RichText::new(title).heading().size(18.0));
    ui.add_space(4.0);
    ui.separator();
    ui.add_space(4.0);
}

// Re-exports - Systems
pub use main_panel::side_panel_ui;
