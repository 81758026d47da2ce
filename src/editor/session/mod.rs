//! The editing session: document, view state and history in one owner.
//!
//! Rendering and UI read the session through its accessors; every mutation goes
//! through a method here, and every user-visible mutation ends with exactly one
//! history snapshot. Index-taking methods validate their index and quietly do
//! nothing when it no longer refers to a layer.
//!
//! ## Module Structure
//!
//! - [`interaction`] - Pointer/keyboard state machine (drag, resize, rotate, text editing)

mod interaction;


use std::path::PathBuf;

use bevy::log::debug;
use bevy::math::Vec2;
use bevy::prelude::Resource;

use crate::constants::{
    FIT_MARGIN, IMAGE_INSERT_OFFSET, MAX_SCALE, MIN_SCALE, PASTE_OFFSET, ZOOM_STEP,
};
use crate::document::{
    selection_after_remove, CanvasSize, Document, Layer, LayerRect, Rgb, TextAlignment, TextLayer,
};

use super::history::SnapshotHistory;

pub use interaction::InteractionMode;

#[derive(Resource)]
pub struct EditorSession {
    document: Document,
    scale: f32,
    selected: Option<usize>,
    hovered: Option<usize>,
    mode: InteractionMode,
    history: SnapshotHistory,
    /// Copied layer, kept out of the document and out of history
    clipboard: Option<Layer>,
    /// Bumped whenever the document is replaced or a snapshot is committed
    revision: u64,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(CanvasSize::default())
    }
}

impl EditorSession {
    pub fn new(canvas_size: CanvasSize) -> Self {
        Self {
            document: Document::new(canvas_size),
            scale: 1.0,
            selected: None,
            hovered: None,
            mode: InteractionMode::Idle,
            history: SnapshotHistory::default(),
            clipboard: None,
            revision: 0,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn has_clipboard(&self) -> bool {
        self.clipboard.is_some()
    }

    pub fn selected_layer(&self) -> Option<&Layer> {
        self.selected.and_then(|i| self.document.get(i))
    }

    /// Index of the layer under edit, if a text edit is active.
    pub fn editing_text(&self) -> Option<usize> {
        match self.mode {
            InteractionMode::EditingText { index } => Some(index),
            _ => None,
        }
    }

    /// A drag, resize or rotate is in progress. Document edits other than the
    /// gesture's own wait for the release.
    fn gesture_running(&self) -> bool {
        self.mode.is_gesture()
    }

    /// Record the current document as a new history entry. Ignored mid-gesture.
    pub fn commit(&mut self, description: &str) {
        if self.gesture_running() {
            debug!("Ignoring history entry {:?} during a gesture", description);
            return;
        }
        self.history.push(&self.document, description);
        self.revision += 1;
        debug!(
            "History: {} ({} of {})",
            description,
            self.history.cursor().map(|c| c + 1).unwrap_or(0),
            self.history.len()
        );
    }

    // --- Selection ---

    /// Select a layer, or clear the selection with `None`. Invalid indices are ignored.
    pub fn select(&mut self, index: Option<usize>) {
        match index {
            Some(i) if i < self.document.len() => self.selected = Some(i),
            Some(_) => {}
            None => self.selected = None,
        }
    }

    // --- Layer store operations ---

    pub fn add_text_layer(&mut self) {
        self.insert_at_top(Layer::default_text(), "Add text");
    }

    /// Insert an image layer of the given pixel size.
    ///
    /// The first layer of an empty document also sets the canvas to the image
    /// size. Returns true when that happened, so the caller can refit the view.
    pub fn insert_image(&mut self, source: impl Into<PathBuf>, size: (u32, u32)) -> bool {
        if self.gesture_running() {
            return false;
        }
        let (width, height) = (size.0.max(1), size.1.max(1));
        let first = self.document.is_empty();
        let rect = if first {
            self.document.canvas_size = CanvasSize::new(width, height);
            LayerRect::new(0.0, 0.0, width as f32, height as f32)
        } else {
            LayerRect::new(
                IMAGE_INSERT_OFFSET,
                IMAGE_INSERT_OFFSET,
                width as f32,
                height as f32,
            )
        };
        self.insert_at_top(Layer::image(source, rect), "Add image");
        first
    }

    fn insert_at_top(&mut self, layer: Layer, description: &str) {
        if self.gesture_running() {
            return;
        }
        self.mode = InteractionMode::Idle;
        let index = self.document.insert_at_top(layer);
        self.selected = Some(index);
        self.hovered = None;
        self.commit(description);
    }

    pub fn delete_selected(&mut self) {
        if self.gesture_running() {
            return;
        }
        let Some(index) = self.selected else {
            return;
        };
        if self.document.remove(index).is_none() {
            return;
        }
        self.mode = InteractionMode::Idle;
        self.hovered = None;
        self.selected = selection_after_remove(index, self.document.len());
        self.commit("Delete layer");
    }

    pub fn move_selected_up(&mut self) {
        if self.gesture_running() {
            return;
        }
        let Some(index) = self.selected else {
            return;
        };
        if let Some(new_index) = self.document.move_up(index) {
            self.selected = Some(new_index);
            self.commit("Move layer up");
        }
    }

    pub fn move_selected_down(&mut self) {
        if self.gesture_running() {
            return;
        }
        let Some(index) = self.selected else {
            return;
        };
        if let Some(new_index) = self.document.move_down(index) {
            self.selected = Some(new_index);
            self.commit("Move layer down");
        }
    }

    pub fn toggle_visibility(&mut self, index: usize) {
        if self.gesture_running() {
            return;
        }
        let Some(visible) = self.document.get(index).map(|l| l.visible) else {
            return;
        };
        self.document.set_visible(index, !visible);
        if self.hovered == Some(index) {
            self.hovered = None;
        }
        self.commit(if visible { "Hide layer" } else { "Show layer" });
    }

    pub fn copy_selected(&mut self) {
        if let Some(layer) = self.selected_layer() {
            self.clipboard = Some(layer.clone());
        }
    }

    pub fn paste(&mut self) {
        let Some(mut layer) = self.clipboard.clone() else {
            return;
        };
        layer.rect.translate(Vec2::splat(PASTE_OFFSET));
        self.insert_at_top(layer, "Paste");
    }

    // --- Text properties ---

    /// Mutate the selected text layer without committing. Returns false when
    /// a gesture is running, the selection is not text, or nothing changed.
    pub fn edit_selected_text(&mut self, edit: impl FnOnce(&mut TextLayer)) -> bool {
        if self.gesture_running() {
            return false;
        }
        let Some(text) = self
            .selected
            .and_then(|i| self.document.get_mut(i))
            .and_then(Layer::as_text_mut)
        else {
            return false;
        };
        let before = text.clone();
        edit(text);
        *text != before
    }

    /// Live content edit from the properties panel. The caller commits when the field loses focus.
    pub fn set_text_content(&mut self, content: &str) -> bool {
        self.edit_selected_text(|t| t.content = content.to_string())
    }

    pub fn set_text_alignment(&mut self, alignment: TextAlignment) {
        if self.edit_selected_text(|t| t.alignment = alignment) {
            self.commit("Text alignment");
        }
    }

    pub fn set_font_family(&mut self, family: &str) {
        if self.edit_selected_text(|t| t.font_family = family.to_string()) {
            self.commit("Font");
        }
    }

    pub fn set_font_size(&mut self, size: f32) {
        let size = size.max(1.0);
        if self.edit_selected_text(|t| t.font_size = size) {
            self.commit("Font size");
        }
    }

    pub fn set_text_color(&mut self, color: Rgb) {
        if self.edit_selected_text(|t| t.color = color) {
            self.commit("Text color");
        }
    }

    // --- History ---

    pub fn undo(&mut self) {
        if self.gesture_running() {
            return;
        }
        if let Some(document) = self.history.undo().cloned() {
            self.restore(document);
        }
    }

    pub fn redo(&mut self) {
        if self.gesture_running() {
            return;
        }
        if let Some(document) = self.history.redo().cloned() {
            self.restore(document);
        }
    }

    pub fn restore_at(&mut self, index: usize) {
        if self.gesture_running() {
            return;
        }
        if let Some(document) = self.history.restore_at(index).cloned() {
            self.restore(document);
        }
    }

    fn restore(&mut self, document: Document) {
        self.document = document;
        self.selected = if self.document.is_empty() { None } else { Some(0) };
        self.hovered = None;
        self.mode = InteractionMode::Idle;
        self.revision += 1;
    }

    // --- Document lifecycle ---

    /// Start over with an empty canvas. History starts empty.
    pub fn new_canvas(&mut self, width: u32, height: u32) {
        self.document = Document::new(CanvasSize::clamped(width, height));
        self.selected = None;
        self.hovered = None;
        self.mode = InteractionMode::Idle;
        self.history.clear();
        self.scale = 1.0;
        self.revision += 1;
    }

    /// Swap in a loaded document; its state becomes the only history entry.
    pub fn replace_document(&mut self, document: Document) {
        self.document = document;
        self.selected = if self.document.is_empty() { None } else { Some(0) };
        self.hovered = None;
        self.mode = InteractionMode::Idle;
        self.history.clear();
        self.commit("Open project");
    }

    // --- Zoom ---

    pub fn set_scale(&mut self, scale: f32) {
        if scale.is_finite() {
            self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_scale(self.scale * ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_scale(self.scale / ZOOM_STEP);
    }

    /// Fit the whole canvas into a viewport of the given view size.
    pub fn fit_to_view(&mut self, viewport: Vec2) {
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return;
        }
        let canvas = self.document.canvas_size.as_vec2();
        let fit = (viewport.x / canvas.x).min(viewport.y / canvas.y) * FIT_MARGIN;
        self.set_scale(fit);
    }
}
