use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, MAX_CANVAS_SIZE, MIN_CANVAS_SIZE};

use super::layer::Layer;

/// Canvas size in document units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Size accepted by the "new canvas" dialog.
    pub fn clamped(width: u32, height: u32) -> Self {
        Self::new(
            width.clamp(MIN_CANVAS_SIZE, MAX_CANVAS_SIZE),
            height.clamp(MIN_CANVAS_SIZE, MAX_CANVAS_SIZE),
        )
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }
}

/// Ordered layers plus the canvas they live on.
///
/// Index 0 is the topmost layer. Painting walks the list from the last index to
/// the first; hit-testing walks it from the first index so the topmost layer wins.
/// Every index-taking method validates the index and does nothing when it is out
/// of range.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub canvas_size: CanvasSize,
    layers: Vec<Layer>,
}

impl Document {
    pub fn new(canvas_size: CanvasSize) -> Self {
        Self {
            canvas_size,
            layers: Vec::new(),
        }
    }

    pub fn with_layers(canvas_size: CanvasSize, layers: Vec<Layer>) -> Self {
        Self {
            canvas_size,
            layers,
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    /// Layers in painting order (bottom first) with their indices.
    pub fn paint_order(&self) -> impl Iterator<Item = (usize, &Layer)> {
        self.layers.iter().enumerate().rev()
    }

    /// Insert a layer above all others. Returns its index (always 0).
    pub fn insert_at_top(&mut self, layer: Layer) -> usize {
        self.layers.insert(0, layer);
        0
    }

    pub fn remove(&mut self, index: usize) -> Option<Layer> {
        if index < self.layers.len() {
            Some(self.layers.remove(index))
        } else {
            None
        }
    }

    /// Move a layer one step towards the top. Returns its new index.
    pub fn move_up(&mut self, index: usize) -> Option<usize> {
        if index == 0 || index >= self.layers.len() {
            return None;
        }
        self.layers.swap(index, index - 1);
        Some(index - 1)
    }

    /// Move a layer one step towards the bottom. Returns its new index.
    pub fn move_down(&mut self, index: usize) -> Option<usize> {
        if index >= self.layers.len().saturating_sub(1) {
            return None;
        }
        self.layers.swap(index, index + 1);
        Some(index + 1)
    }

    /// Returns false when the index is invalid.
    pub fn set_visible(&mut self, index: usize, visible: bool) -> bool {
        match self.layers.get_mut(index) {
            Some(layer) => {
                layer.visible = visible;
                true
            }
            None => false,
        }
    }
}

/// Where a selection lands after the layer at `removed` disappears.
pub fn selection_after_remove(removed: usize, remaining: usize) -> Option<usize> {
    if remaining == 0 {
        None
    } else {
        Some(removed.min(remaining - 1))
    }
}
