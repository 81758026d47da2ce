//! Undo/redo buttons and the history list.

use bevy_egui::egui;

use crate::editor::EditorSession;

use super::section_heading;

/// Renders the history list, oldest entry first. Clicking an entry restores it.
pub fn render_history(ui: &mut egui::Ui, session: &mut EditorSession) {
    section_heading(ui, "History");

    let history = session.history();
    let can_undo = history.can_undo();
    let can_redo = history.can_redo();
    let cursor = history.cursor();
    let entries: Vec<String> = history
        .entries()
        .iter()
        .map(|snapshot| snapshot.description.clone())
        .collect();

    ui.horizontal(|ui| {
        if ui
            .add_enabled(can_undo, egui::Button::new("Undo"))
            .on_hover_text("Ctrl+Z")
            .clicked()
        {
            session.undo();
        }
        if ui
            .add_enabled(can_redo, egui::Button::new("Redo"))
            .on_hover_text("Ctrl+Y")
            .clicked()
        {
            session.redo();
        }
    });

    ui.add_space(4.0);
    if entries.is_empty() {
        ui.label(egui::RichText::new("No changes yet").size(14.0).weak());
        return;
    }

    egui::ScrollArea::vertical()
        .id_salt("history_list")
        .max_height(200.0)
        .stick_to_bottom(true)
        .show(ui, |ui| {
            let mut restore = None;
            for (index, description) in entries.iter().enumerate() {
                let text = format!("{}. {}", index + 1, description);
                // Entries past the cursor are undone and can be redone
                let text = match cursor {
                    Some(c) if index > c => egui::RichText::new(text).weak(),
                    _ => egui::RichText::new(text),
                };
                if ui.selectable_label(cursor == Some(index), text).clicked() {
                    restore = Some(index);
                }
            }
            if let Some(index) = restore {
                session.restore_at(index);
            }
        });
}
