//! File, insert and zoom buttons at the top of the panel.

use bevy::prelude::*;
use bevy_egui::egui;

use crate::config::AppConfig;
use crate::editor::EditorSession;
use crate::project::OpenProjectRequest;

use super::super::file_menu::FileAction;
use super::main_panel::PanelRequests;
use super::section_heading;

const BUTTON_SIZE: [f32; 2] = [80.0, 26.0];

/// Renders the file buttons, the recent projects menu, insert buttons and zoom.
pub fn render_file_section(
    ui: &mut egui::Ui,
    session: &mut EditorSession,
    requests: &mut PanelRequests,
    config: &AppConfig,
    viewport: Vec2,
) {
    section_heading(ui, "File");

    ui.horizontal_wrapped(|ui| {
        let buttons = [
            ("New", "Ctrl+N", FileAction::NewCanvas),
            ("Open", "Ctrl+O", FileAction::Open),
            ("Save", "Ctrl+S", FileAction::Save),
            ("Save As", "Ctrl+Shift+S", FileAction::SaveAs),
            ("Export", "Ctrl+E", FileAction::Export),
        ];
        for (label, shortcut, action) in buttons {
            if ui
                .add_sized(BUTTON_SIZE, egui::Button::new(label))
                .on_hover_text(shortcut)
                .clicked()
            {
                requests.actions.write(action);
            }
        }

        ui.add_enabled_ui(!config.data.recent_projects.is_empty(), |ui| {
            ui.menu_button("Recent", |ui| {
                for path in &config.data.recent_projects {
                    let name = path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .unwrap_or("Unknown");
                    if ui
                        .button(name)
                        .on_hover_text(path.to_string_lossy())
                        .clicked()
                    {
                        requests.open.write(OpenProjectRequest { path: path.clone() });
                        ui.close();
                    }
                }
            });
        });
    });

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        if ui
            .add_sized([120.0, 26.0], egui::Button::new("Add text"))
            .on_hover_text("Ctrl+T")
            .clicked()
        {
            session.add_text_layer();
        }
        if ui
            .add_sized([120.0, 26.0], egui::Button::new("Add image"))
            .on_hover_text("Ctrl+I")
            .clicked()
        {
            requests.actions.write(FileAction::AddImage);
        }
    });

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.label("Zoom:");
        if ui.button("−").on_hover_text("Ctrl+-").clicked() {
            session.zoom_out();
        }
        ui.label(format!("{:.0}%", session.scale() * 100.0));
        if ui.button("+").on_hover_text("Ctrl+=").clicked() {
            session.zoom_in();
        }
        if ui.button("Fit").on_hover_text("Ctrl+0").clicked() {
            session.fit_to_view(viewport);
        }
        if ui.button("100%").clicked() {
            session.set_scale(1.0);
        }
    });

    let canvas = session.document().canvas_size;
    ui.label(
        egui::RichText::new(format!("Canvas: {} x {} px", canvas.width, canvas.height))
            .size(12.0)
            .weak(),
    );
}
