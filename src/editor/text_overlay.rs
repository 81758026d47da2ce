//! The inline text editor shown over a text layer while it is being edited.

use bevy::prelude::*;
use bevy_egui::egui::{self, Color32};
use bevy_egui::EguiContexts;

use crate::document::TextAlignment;
use crate::fonts::LoadedTextFont;

use super::params::CanvasViewport;
use super::EditorSession;

#[derive(Default)]
pub struct InlineEditorState {
    /// Layer the buffer belongs to
    index: Option<usize>,
    buffer: String,
}

fn egui_align(alignment: TextAlignment) -> egui::Align {
    match alignment {
        TextAlignment::Left => egui::Align::Min,
        TextAlignment::Center => egui::Align::Center,
        TextAlignment::Right => egui::Align::Max,
    }
}

/// Show a multi-line editor at the layer's position. Every change grows the
/// layer live; losing focus ends the edit and records it in history.
pub fn text_overlay_ui(
    mut contexts: EguiContexts,
    mut session: ResMut<EditorSession>,
    font: Res<LoadedTextFont>,
    viewport: Res<CanvasViewport>,
    mut state: Local<InlineEditorState>,
) -> Result {
    let Some(index) = session.editing_text() else {
        if state.index.is_some() {
            *state = InlineEditorState::default();
        }
        return Ok(());
    };
    let Some(text) = session.document().get(index).and_then(|l| l.as_text()).cloned() else {
        return Ok(());
    };
    let Some(rect) = session.text_editor_rect(font.metrics()) else {
        return Ok(());
    };

    let just_started = state.index != Some(index);
    if just_started {
        state.index = Some(index);
        state.buffer = text.content.clone();
    }

    let ctx = contexts.ctx_mut()?;
    let scale = session.scale();
    let screen = viewport.to_screen(rect.origin());
    let [r, g, b] = text.color.to_array();
    let font_id = egui::FontId::new((text.font_size * scale).max(1.0), font.egui_family());

    let mut changed = false;
    let mut finished = false;
    egui::Area::new(egui::Id::new("inline_text_editor"))
        .fixed_pos(egui::pos2(screen.x, screen.y))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            let response = ui.add(
                egui::TextEdit::multiline(&mut state.buffer)
                    .font(font_id)
                    .text_color(Color32::from_rgb(r, g, b))
                    .horizontal_align(egui_align(text.alignment))
                    .desired_width(rect.width)
                    .min_size(egui::vec2(rect.width, rect.height))
                    .margin(egui::Margin::ZERO),
            );

            if just_started {
                response.request_focus();
            }
            changed = response.changed();
            finished = response.lost_focus();
        });

    if changed {
        let buffer = state.buffer.clone();
        session.update_text_edit(&buffer, font.metrics());
    }
    if finished {
        session.finish_text_edit(font.metrics());
        *state = InlineEditorState::default();
    }

    Ok(())
}
