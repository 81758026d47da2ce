//! Text properties of the selected text layer.
//!
//! Discrete changes commit straight away. Text fields update the layer live
//! and commit once when they lose focus; dragging the size or picking a color
//! with the pointer held commits when the pointer is released.

use bevy_egui::egui;

use crate::document::{Rgb, TextAlignment};
use crate::editor::EditorSession;

use super::section_heading;

#[derive(Default)]
pub struct PropertiesState {
    content: String,
    font_family: String,
    /// History description of a live edit awaiting its commit
    pending_commit: Option<&'static str>,
}

fn content_id() -> egui::Id {
    egui::Id::new("text_properties_content")
}

fn family_id() -> egui::Id {
    egui::Id::new("text_properties_family")
}

/// Renders the properties section for a selected text layer.
pub fn render_properties(ui: &mut egui::Ui, session: &mut EditorSession, state: &mut PropertiesState) {
    let Some(text) = session.selected_layer().and_then(|l| l.as_text()).cloned() else {
        if let Some(description) = state.pending_commit.take() {
            session.commit(description);
        }
        return;
    };

    section_heading(ui, "Text");

    // Fields not being typed into follow the document (undo, selection changes)
    if !ui.memory(|m| m.has_focus(content_id())) {
        state.content = text.content.clone();
    }
    if !ui.memory(|m| m.has_focus(family_id())) {
        state.font_family = text.font_family.clone();
    }

    let editing_inline = session.editing_text().is_some();
    ui.add_enabled_ui(!editing_inline, |ui| {
        let response = ui.add(
            egui::TextEdit::multiline(&mut state.content)
                .id(content_id())
                .desired_rows(3)
                .desired_width(f32::INFINITY),
        );
        if response.changed() && session.set_text_content(&state.content) {
            state.pending_commit = Some("Edit text");
        }
        if response.lost_focus()
            && let Some(description) = state.pending_commit.take()
        {
            session.commit(description);
        }
    });

    ui.add_space(6.0);
    egui::Grid::new("text_properties_grid")
        .num_columns(2)
        .spacing([8.0, 6.0])
        .show(ui, |ui| {
            ui.label("Font:");
            let response = ui.add(
                egui::TextEdit::singleline(&mut state.font_family)
                    .id(family_id())
                    .desired_width(160.0),
            );
            if response.lost_focus() {
                session.set_font_family(state.font_family.trim());
            }
            ui.end_row();

            ui.label("Size:");
            let mut size = text.font_size;
            let response = ui.add(egui::DragValue::new(&mut size).range(1.0..=500.0).speed(0.5));
            if response.changed() {
                if response.dragged() {
                    if session.edit_selected_text(|t| t.font_size = size) {
                        state.pending_commit = Some("Font size");
                    }
                } else {
                    session.set_font_size(size);
                }
            }
            ui.end_row();

            ui.label("Color:");
            let mut color = text.color.to_array();
            if ui.color_edit_button_srgb(&mut color).changed() {
                let [r, g, b] = color;
                let color = Rgb::new(r, g, b);
                if ui.input(|i| i.pointer.any_down()) {
                    if session.edit_selected_text(|t| t.color = color) {
                        state.pending_commit = Some("Text color");
                    }
                } else {
                    session.set_text_color(color);
                }
            }
            ui.end_row();

            ui.label("Align:");
            let mut alignment = text.alignment;
            egui::ComboBox::from_id_salt("text_alignment")
                .selected_text(alignment.display_name())
                .show_ui(ui, |ui| {
                    for option in TextAlignment::ALL {
                        ui.selectable_value(&mut alignment, option, option.display_name());
                    }
                });
            if alignment != text.alignment {
                session.set_text_alignment(alignment);
            }
            ui.end_row();
        });

    // Drag values and the color picker settle when the pointer is released
    let pointer_down = ui.input(|i| i.pointer.any_down());
    let typing = ui.memory(|m| m.has_focus(content_id()));
    if !pointer_down
        && !typing
        && let Some(description) = state.pending_commit.take()
    {
        session.commit(description);
    }

    ui.add_space(8.0);
}
