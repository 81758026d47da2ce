//! Pointer and keyboard state machine.
//!
//! Pointer positions are in view space (canvas top-left is the origin). A gesture
//! runs from `press` to `release`; only the release commits history, so every
//! snapshot is a settled document state.

use bevy::math::Vec2;

use crate::common::ResizeHandle;
use crate::constants::NUDGE_STEP;
use crate::document::geometry::{pointer_angle_to_rotation, to_document};
use crate::document::LayerRect;
use crate::editor::hit_test::{classify_selected, layer_contains, topmost_layer_at, HitTarget};
use crate::editor::resize::{aspect_ratio, resize_rect};
use crate::editor::text_reflow::{
    editor_rect, final_text_size, ideal_text_size, FontMetrics,
};

use super::EditorSession;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    Dragging {
        index: usize,
        last_pointer: Vec2,
    },
    Resizing {
        index: usize,
        handle: ResizeHandle,
        start_rect: LayerRect,
        start_pointer: Vec2,
        aspect: f32,
    },
    Rotating {
        index: usize,
        /// Body center in view space, fixed for the whole gesture
        center: Vec2,
    },
    EditingText {
        index: usize,
    },
}

impl InteractionMode {
    /// Dragging, resizing or rotating.
    pub fn is_gesture(&self) -> bool {
        matches!(
            self,
            InteractionMode::Dragging { .. }
                | InteractionMode::Resizing { .. }
                | InteractionMode::Rotating { .. }
        )
    }
}

impl EditorSession {
    /// Selected layer index when its handles are live: the layer exists, is
    /// visible and no text edit is running.
    fn handle_target(&self) -> Option<usize> {
        if matches!(self.mode, InteractionMode::EditingText { .. }) {
            return None;
        }
        let index = self.selected?;
        let layer = self.document.get(index)?;
        layer.visible.then_some(index)
    }

    /// What the pointer would grab on the selected layer, for cursor feedback.
    pub fn hover_target(&self, pointer: Vec2) -> Option<HitTarget> {
        if self.mode.is_gesture() {
            return None;
        }
        let index = self.handle_target()?;
        let layer = self.document.get(index)?;
        classify_selected(pointer, layer, self.scale)
    }

    /// Primary button pressed on the canvas.
    pub fn press(&mut self, pointer: Vec2, metrics: &dyn FontMetrics) {
        if self.editing_text().is_some() {
            self.finish_text_edit(metrics);
        }
        self.hovered = None;

        if let Some(index) = self.handle_target() {
            let hit = self
                .document
                .get(index)
                .and_then(|layer| classify_selected(pointer, layer, self.scale).map(|h| (h, layer)));
            if let Some((target, layer)) = hit {
                self.mode = match target {
                    HitTarget::RotationHandle => InteractionMode::Rotating {
                        index,
                        center: layer.rect.to_view(self.scale).center(),
                    },
                    HitTarget::Resize(handle) => InteractionMode::Resizing {
                        index,
                        handle,
                        start_rect: layer.rect,
                        start_pointer: pointer,
                        aspect: aspect_ratio(&layer.rect),
                    },
                    HitTarget::Body => InteractionMode::Dragging {
                        index,
                        last_pointer: pointer,
                    },
                };
                return;
            }
        }

        // Not on the selected layer: a plain click changes the selection
        self.selected = topmost_layer_at(pointer, &self.document, self.scale);
    }

    /// Pointer moved, with or without a button held.
    pub fn pointer_move(&mut self, pointer: Vec2) {
        let scale = self.scale;
        match self.mode {
            InteractionMode::Idle | InteractionMode::EditingText { .. } => {
                self.hovered = topmost_layer_at(pointer, &self.document, scale);
            }
            InteractionMode::Dragging {
                index,
                last_pointer,
            } => {
                self.hovered = None;
                if let Some(layer) = self.document.get_mut(index) {
                    layer.rect.translate(to_document(pointer - last_pointer, scale));
                }
                self.mode = InteractionMode::Dragging {
                    index,
                    last_pointer: pointer,
                };
            }
            InteractionMode::Resizing {
                index,
                handle,
                start_rect,
                start_pointer,
                aspect,
            } => {
                self.hovered = None;
                if let Some(layer) = self.document.get_mut(index) {
                    let delta = to_document(pointer - start_pointer, scale);
                    layer.rect = resize_rect(&start_rect, layer.rotation(), handle, delta, aspect);
                }
            }
            InteractionMode::Rotating { index, center } => {
                self.hovered = None;
                if let Some(layer) = self.document.get_mut(index) {
                    layer.set_rotation(pointer_angle_to_rotation(pointer, center));
                }
            }
        }
    }

    /// Primary button released. Ends any gesture, wherever the pointer is.
    pub fn release(&mut self) {
        let description = match self.mode {
            InteractionMode::Dragging { .. } => "Move",
            InteractionMode::Resizing { .. } => "Resize",
            InteractionMode::Rotating { .. } => "Rotate",
            InteractionMode::Idle | InteractionMode::EditingText { .. } => return,
        };
        self.mode = InteractionMode::Idle;
        self.commit(description);
    }

    /// Pointer left the canvas: nothing is hovered any more.
    pub fn pointer_left(&mut self) {
        self.hovered = None;
    }

    /// Double click starts editing when it lands on the selected text layer.
    pub fn double_click(&mut self, pointer: Vec2) {
        let Some(index) = self.selected else {
            return;
        };
        let on_text = self
            .document
            .get(index)
            .is_some_and(|layer| layer.is_text() && layer_contains(pointer, layer, self.scale));
        if on_text {
            self.begin_text_edit(index);
        }
    }

    /// Move the selected layer by one nudge step per axis unit of `direction`.
    pub fn nudge(&mut self, direction: Vec2) {
        if self.mode != InteractionMode::Idle {
            return;
        }
        let step = NUDGE_STEP / self.scale;
        let Some(layer) = self.selected.and_then(|i| self.document.get_mut(i)) else {
            return;
        };
        layer.rect.translate(direction * step);
        self.commit("Nudge");
    }

    // --- Inline text editing ---

    /// Enter text editing on a text layer. Returns false for anything else.
    pub fn begin_text_edit(&mut self, index: usize) -> bool {
        if self.mode.is_gesture() {
            return false;
        }
        if !self.document.get(index).is_some_and(|l| l.is_text()) {
            return false;
        }
        self.selected = Some(index);
        self.mode = InteractionMode::EditingText { index };
        true
    }

    /// The edit key: start editing the selected text layer, or finish the running edit.
    pub fn toggle_text_edit(&mut self, metrics: &dyn FontMetrics) {
        if self.editing_text().is_some() {
            self.finish_text_edit(metrics);
        } else if let Some(index) = self.selected {
            self.begin_text_edit(index);
        }
    }

    /// Inline editor bounds in view space for the running edit.
    pub fn text_editor_rect(&self, metrics: &dyn FontMetrics) -> Option<LayerRect> {
        let index = self.editing_text()?;
        let layer = self.document.get(index)?;
        let text = layer.as_text()?;
        let ideal = ideal_text_size(&text.content, text.font_size, metrics);
        Some(editor_rect(&layer.rect, ideal, self.scale))
    }

    /// Store edited content and grow the layer to fit it. No history entry yet.
    pub fn update_text_edit(&mut self, content: &str, metrics: &dyn FontMetrics) {
        let Some(index) = self.editing_text() else {
            return;
        };
        let scale = self.scale;
        let Some(layer) = self.document.get_mut(index) else {
            return;
        };
        let Some(text) = layer.as_text_mut() else {
            return;
        };
        if text.content != content {
            text.content = content.to_string();
        }
        let ideal = ideal_text_size(&text.content, text.font_size, metrics);
        let editor = editor_rect(&layer.rect, ideal, scale).to_document(scale);
        layer.rect.width = editor.width;
        layer.rect.height = editor.height;
    }

    /// Leave text editing: size the layer to its text and commit.
    pub fn finish_text_edit(&mut self, metrics: &dyn FontMetrics) {
        let Some(index) = self.editing_text() else {
            return;
        };
        self.mode = InteractionMode::Idle;
        let scale = self.scale;
        if let Some(layer) = self.document.get_mut(index) {
            let ideal = layer
                .as_text()
                .map(|text| ideal_text_size(&text.content, text.font_size, metrics));
            if let Some(ideal) = ideal {
                let size = final_text_size(ideal, scale);
                layer.rect.width = size.x;
                layer.rect.height = size.y;
            }
        }
        self.commit("Edit text");
    }
}
