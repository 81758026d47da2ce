//! Layers list: selection, visibility, ordering and deletion.

use bevy_egui::egui;

use crate::editor::EditorSession;

use super::section_heading;

/// Renders the layers list, topmost layer first, with the row actions below it.
pub fn render_layers(ui: &mut egui::Ui, session: &mut EditorSession) {
    section_heading(ui, "Layers");

    if session.document().is_empty() {
        ui.label(egui::RichText::new("No layers yet").size(14.0).weak());
    }

    let selected = session.selected();
    let rows: Vec<(usize, String, bool, bool)> = session
        .document()
        .layers()
        .iter()
        .enumerate()
        .map(|(index, layer)| (index, layer.label(), layer.visible, layer.is_text()))
        .collect();

    for (index, label, visible, is_text) in rows {
        egui::Frame::new()
            .inner_margin(egui::Margin::symmetric(4, 2))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let mut checked = visible;
                    if ui
                        .checkbox(&mut checked, "")
                        .on_hover_text("Visible (Ctrl+H)")
                        .changed()
                    {
                        session.toggle_visibility(index);
                    }

                    let text = egui::RichText::new(label).size(14.0);
                    let text = if visible { text } else { text.weak().italics() };
                    let response = ui.selectable_label(selected == Some(index), text);
                    if response.double_clicked() && is_text {
                        session.begin_text_edit(index);
                    } else if response.clicked() {
                        session.select(Some(index));
                    }
                });
            });
    }

    ui.add_space(4.0);
    let has_selection = selected.is_some();
    let layer_count = session.document().len();
    ui.horizontal(|ui| {
        let can_raise = selected.is_some_and(|i| i > 0);
        let can_lower = selected.is_some_and(|i| i + 1 < layer_count);
        if ui
            .add_enabled(can_raise, egui::Button::new("⬆"))
            .on_hover_text("Move up (Ctrl+Up)")
            .clicked()
        {
            session.move_selected_up();
        }
        if ui
            .add_enabled(can_lower, egui::Button::new("⬇"))
            .on_hover_text("Move down (Ctrl+Down)")
            .clicked()
        {
            session.move_selected_down();
        }
        if ui
            .add_enabled(has_selection, egui::Button::new("Delete"))
            .on_hover_text("Delete")
            .clicked()
        {
            session.delete_selected();
        }
        if ui
            .add_enabled(has_selection, egui::Button::new("Copy"))
            .on_hover_text("Ctrl+C")
            .clicked()
        {
            session.copy_selected();
        }
        if ui
            .add_enabled(session.has_clipboard(), egui::Button::new("Paste"))
            .on_hover_text("Ctrl+V")
            .clicked()
        {
            session.paste();
        }
    });
    ui.add_space(8.0);
}
