//! Text font picker.

use bevy_egui::egui;

use crate::config::SetTextFontRequest;
use crate::fonts::LoadedTextFont;

use super::super::file_menu::FileAction;
use super::main_panel::PanelRequests;
use super::section_heading;

pub fn render_font_section(ui: &mut egui::Ui, font: &LoadedTextFont, requests: &mut PanelRequests) {
    section_heading(ui, "Text Font");

    match font.path() {
        Some(path) => {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("Unknown");
            ui.label(egui::RichText::new(name).size(14.0))
                .on_hover_text(path.to_string_lossy());
        }
        None => {
            ui.label(egui::RichText::new("Built-in font").size(14.0));
            ui.label(
                egui::RichText::new("Used on the canvas and in exports")
                    .size(12.0)
                    .weak(),
            );
        }
    }

    if let Some(error) = &font.error {
        ui.colored_label(egui::Color32::RED, error);
    }

    ui.horizontal(|ui| {
        if ui.button("Choose...").clicked() {
            requests.actions.write(FileAction::ChooseFont);
        }
        if ui
            .add_enabled(font.path().is_some(), egui::Button::new("Use built-in"))
            .clicked()
        {
            requests.font.write(SetTextFontRequest { path: None });
        }
    });
    ui.add_space(8.0);
}
