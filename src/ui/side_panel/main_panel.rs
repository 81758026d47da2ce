//! Main side panel UI orchestration.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::config::{AppConfig, SetTextFontRequest};
use crate::constants::SIDE_PANEL_WIDTH;
use crate::editor::{CanvasViewport, EditorSession};
use crate::fonts::LoadedTextFont;
use crate::project::OpenProjectRequest;

use super::super::file_menu::FileAction;
use super::file_section::render_file_section;
use super::font::render_font_section;
use super::history::render_history;
use super::layers::render_layers;
use super::properties::{render_properties, PropertiesState};

/// Requests the panel can send
#[derive(SystemParam)]
pub struct PanelRequests<'w> {
    pub actions: MessageWriter<'w, FileAction>,
    pub open: MessageWriter<'w, OpenProjectRequest>,
    pub font: MessageWriter<'w, SetTextFontRequest>,
}

/// Main side panel UI system.
pub fn side_panel_ui(
    mut contexts: EguiContexts,
    mut session: ResMut<EditorSession>,
    mut requests: PanelRequests,
    config: Res<AppConfig>,
    font: Res<LoadedTextFont>,
    viewport: Res<CanvasViewport>,
    mut properties_state: Local<PropertiesState>,
) -> Result {
    egui::SidePanel::right("side_panel")
        .default_width(SIDE_PANEL_WIDTH)
        .show(contexts.ctx_mut()?, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                // File, insert and zoom
                render_file_section(ui, &mut session, &mut requests, &config, viewport.size);

                // Layers list
                render_layers(ui, &mut session);

                // Text properties (text layer selected)
                render_properties(ui, &mut session, &mut properties_state);

                // Text font
                render_font_section(ui, &font, &mut requests);

                // History
                render_history(ui, &mut session);
            });
        });
    Ok(())
}
